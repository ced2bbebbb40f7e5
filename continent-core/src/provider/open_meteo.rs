use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{Config, CurrentConditions, LookupError, region::Coordinate};

use super::WeatherProvider;

const USER_AGENT: &str = concat!("continent-weather/", env!("CARGO_PKG_VERSION"));

/// Open-Meteo forecast client, asking only for the current instant.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    endpoint: String,
    http: Client,
}

impl WeatherClient {
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            // No idle connections: blocking lookups run each call on a fresh
            // runtime, which would orphan pooled sockets.
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| anyhow!(e).context("Failed to build HTTP client"))?;

        Ok(Self { endpoint: endpoint.to_string(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Self::with_endpoint(config.endpoint(), config.timeout())
    }

    /// Single GET for the current conditions at `coord`.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, coord: Coordinate) -> Result<CurrentConditions, LookupError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&query_params(coord))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "weather service responded");

        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        parse_conditions(&body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_conditions(&self, coord: Coordinate) -> Result<CurrentConditions, LookupError> {
        self.fetch(coord).await
    }
}

fn query_params(coord: Coordinate) -> [(&'static str, String); 4] {
    [
        ("latitude", format_degrees(coord.latitude)),
        ("longitude", format_degrees(coord.longitude)),
        ("current_weather", "true".to_string()),
        ("timezone", "auto".to_string()),
    ]
}

/// Plain decimal, keeping one fractional digit for whole degrees (`50.0`).
fn format_degrees(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u32,
    #[serde(default)]
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
    #[serde(default)]
    timezone: Option<String>,
}

/// Decode a response body; malformed JSON and a missing `current_weather`
/// block are reported as different errors.
pub(crate) fn parse_conditions(body: &str) -> Result<CurrentConditions, LookupError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let parsed: OmResponse = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "unexpected weather service payload");
        LookupError::Schema(e.to_string())
    })?;

    let current = parsed.current_weather;
    let observed_at = current.time.as_deref().and_then(parse_local_time);

    Ok(CurrentConditions {
        temperature_c: current.temperature,
        wind_speed_kmh: current.windspeed,
        weather_code: current.weathercode,
        observed_at,
        timezone: parsed.timezone,
    })
}

fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| debug!(raw, error = %e, "ignoring unparseable observation time"))
        .ok()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 50.0,
            "longitude": 10.0,
            "timezone": "Europe/Berlin",
            "current_weather": {
                "time": "2026-10-16T14:00",
                "interval": 900,
                "temperature": 21.5,
                "windspeed": 12.3,
                "winddirection": 250,
                "is_day": 1,
                "weathercode": 3
            }
        })
    }

    fn client_for(server: &MockServer, timeout: Duration) -> WeatherClient {
        WeatherClient::with_endpoint(&format!("{}/v1/forecast", server.uri()), timeout)
            .expect("client")
    }

    #[test]
    fn degrees_are_plain_decimals() {
        assert_eq!(format_degrees(50.0), "50.0");
        assert_eq!(format_degrees(-100.0), "-100.0");
        assert_eq!(format_degrees(0.0), "0.0");
        assert_eq!(format_degrees(47.6062), "47.6062");
        assert_eq!(format_degrees(12345.5), "12345.5");
    }

    #[test]
    fn query_requests_current_weather_with_auto_timezone() {
        let params = query_params(Coordinate::new(-25.0, 135.0));
        assert_eq!(params[0], ("latitude", "-25.0".to_string()));
        assert_eq!(params[1], ("longitude", "135.0".to_string()));
        assert_eq!(params[2], ("current_weather", "true".to_string()));
        assert_eq!(params[3], ("timezone", "auto".to_string()));
    }

    #[test]
    fn parses_current_weather_block() {
        let conditions = parse_conditions(&sample_body().to_string()).expect("parse");

        assert_eq!(conditions.temperature_c, 21.5);
        assert_eq!(conditions.wind_speed_kmh, 12.3);
        assert_eq!(conditions.weather_code, 3);
        assert_eq!(conditions.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(
            conditions.observed_at.map(|t| t.to_string()).as_deref(),
            Some("2026-10-16 14:00:00")
        );
    }

    #[test]
    fn bad_observation_time_is_dropped_not_fatal() {
        let mut body = sample_body();
        body["current_weather"]["time"] = serde_json::json!("yesterday-ish");

        let conditions = parse_conditions(&body.to_string()).expect("parse");
        assert!(conditions.observed_at.is_none());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_conditions("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn missing_block_is_a_schema_error() {
        let err = parse_conditions(r#"{"latitude": 50.0}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("current_weather"));

        let err = parse_conditions("[]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn wrong_field_type_is_a_schema_error() {
        let mut body = sample_body();
        body["current_weather"]["temperature"] = serde_json::json!("warm");

        let err = parse_conditions(&body.to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);

        let mut body = sample_body();
        body["current_weather"]["weathercode"] = serde_json::json!(-1);
        let err = parse_conditions(&body.to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn fetch_sends_coordinates_and_flags() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "50.0"))
            .and(query_param("longitude", "10.0"))
            .and(query_param("current_weather", "true"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let conditions = client.fetch(Coordinate::new(50.0, 10.0)).await.expect("fetch");

        assert_eq!(conditions.weather_code, 3);
    }

    #[tokio::test]
    async fn non_success_status_is_network_classified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.fetch(Coordinate::new(0.0, 20.0)).await.unwrap_err();

        assert!(matches!(err, LookupError::HttpStatus { status: 503, .. }));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn slow_response_times_out_as_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_body())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(50));
        let err = client.fetch(Coordinate::new(34.0, 100.0)).await.unwrap_err();

        assert!(matches!(&err, LookupError::Network(e) if e.is_timeout()));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        // Grab a free port, then close it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let endpoint = format!("http://{}/v1/forecast", listener.local_addr().expect("addr"));
        drop(listener);

        let client = WeatherClient::with_endpoint(&endpoint, Duration::from_secs(2)).expect("client");
        let err = client.fetch(Coordinate::new(50.0, 10.0)).await.unwrap_err();

        assert!(matches!(&err, LookupError::Network(e) if e.is_connect()));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn each_fetch_is_a_single_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        assert!(client.fetch(Coordinate::new(50.0, 10.0)).await.is_err());
    }
}
