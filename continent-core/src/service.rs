//! The lookup pipeline: validate the continent name, resolve its coordinate,
//! ask the provider and render the outcome as text.

use anyhow::anyhow;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    Config, LookupError, WeatherReport,
    provider::{WeatherProvider, provider_from_config},
    region::Region,
};

pub type LookupResult = Result<WeatherReport, LookupError>;

#[derive(Debug, Clone)]
pub struct WeatherLookupService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookupService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(Arc::from(provider_from_config(config)?)))
    }

    /// Typed outcome of a lookup. Validation failures never reach the network.
    #[instrument(skip(self), level = "info")]
    pub async fn try_lookup(&self, region_text: &str) -> LookupResult {
        let name = region_text.trim();
        if name.is_empty() {
            return Err(LookupError::EmptyRegion);
        }

        let region = Region::try_from(name)?;
        let coord = region.coordinate();

        // Run the provider as its own task so a panic inside it comes back
        // as an error instead of unwinding through the caller.
        let provider = Arc::clone(&self.provider);
        let conditions = tokio::spawn(async move { provider.current_conditions(coord).await })
            .await
            .map_err(|e| anyhow!("weather provider aborted: {e}"))??;

        info!(%region, code = conditions.weather_code, "weather lookup succeeded");
        Ok(WeatherReport::new(region, conditions))
    }

    /// Four-line summary on success, one-line message on failure.
    pub async fn lookup(&self, region_text: &str) -> String {
        match self.try_lookup(region_text).await {
            Ok(report) => report.to_string(),
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "weather lookup failed");
                err.user_message()
            }
        }
    }

    /// Blocking variant of [`lookup`](Self::lookup).
    ///
    /// Inside an async context the lookup is driven from a separate thread,
    /// since a runtime cannot be started on a thread that already runs one.
    pub fn lookup_blocking(&self, region_text: &str) -> String {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_lookup(region_text);
        }

        std::thread::scope(|scope| {
            scope.spawn(|| self.block_on_lookup(region_text)).join().unwrap_or_else(|_| {
                LookupError::from(anyhow!("blocking lookup thread panicked")).user_message()
            })
        })
    }

    fn block_on_lookup(&self, region_text: &str) -> String {
        match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt.block_on(self.lookup(region_text)),
            Err(e) => LookupError::from(anyhow!(e).context("Failed to start async runtime"))
                .user_message(),
        }
    }
}
