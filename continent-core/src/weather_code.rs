//! WMO weather interpretation codes as reported by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

use std::borrow::Cow;

fn known(code: u32) -> Option<&'static str> {
    let phrase = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        95 => "Thunderstorm",
        _ => return None,
    };
    Some(phrase)
}

/// Human-readable phrase for a weather code.
///
/// Codes outside the table render as `Unknown (<code>)` so newer codes from
/// the service still produce a summary.
pub fn describe(code: u32) -> Cow<'static, str> {
    match known(code) {
        Some(phrase) => Cow::Borrowed(phrase),
        None => Cow::Owned(format!("Unknown ({code})")),
    }
}
