use anyhow::Context;
use clap::{Parser, Subcommand};
use continent_core::{Config, Region, WeatherLookupService, config::DEFAULT_ENDPOINT};
use inquire::{CustomType, Select, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "continent-weather", version, about = "Current weather for a continent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the configured request timeout, in seconds.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a continent.
    Show {
        /// Continent name, e.g. "Europe" or "South America". Prompts if absent.
        continent: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List supported continents and their representative coordinates.
    List,

    /// Set the forecast endpoint and request timeout.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { continent, json } => {
                let mut config = Config::load()?;
                if let Some(secs) = self.timeout {
                    config.timeout_secs = Some(secs);
                }
                let service = WeatherLookupService::from_config(&config)?;

                let continent = match continent {
                    Some(name) => name,
                    None => pick_continent()?,
                };

                if json {
                    let output = match service.try_lookup(&continent).await {
                        Ok(report) => serde_json::to_string_pretty(&report)?,
                        Err(err) => serde_json::json!({
                            "error": err.user_message(),
                            "kind": format!("{:?}", err.kind()),
                        })
                        .to_string(),
                    };
                    println!("{output}");
                } else {
                    println!("{}", service.lookup(&continent).await);
                    println!();
                    println!("Note: Shows weather at representative coordinates");
                    println!("Powered by Open-Meteo");
                }
            }
            Command::List => {
                for region in Region::all() {
                    let coord = region.coordinate();
                    println!(
                        "{:<14} lat {:>6.1}  lon {:>7.1}",
                        region.as_str(),
                        coord.latitude,
                        coord.longitude
                    );
                }
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

fn pick_continent() -> anyhow::Result<String> {
    let region = Select::new("Select a continent:", Region::all().to_vec())
        .with_starting_cursor(0)
        .prompt()
        .context("No continent selected")?;

    Ok(region.as_str().to_string())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let endpoint = Text::new("Forecast endpoint:")
        .with_default(config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
        .prompt()
        .context("Failed to read endpoint")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    config.endpoint = Some(endpoint.trim().to_string());
    config.timeout_secs = Some(timeout_secs);
    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
