//! Application handle owning the store and the fetch stack for one run.

use std::time::Duration;

use wxlog_analytics::{DailyStat, HighLow};
use wxlog_core::{ApiConfig, AppError, Config};
use wxlog_store::{Location, WeatherStore};
use wxlog_weather::{CachedTransport, OpenMeteoTransport, RetryConfig, WeatherFetcher};

use crate::error_mapping::{store_error, transport_error};
use crate::pipeline::{self, IngestReport, PipelineError};
use crate::summary::{self, SummaryError};

/// Transport stack used in production: Open-Meteo with retry, behind a TTL cache.
pub type AppTransport = CachedTransport<OpenMeteoTransport>;

pub struct WeatherApp {
    store: WeatherStore,
    fetcher: WeatherFetcher<AppTransport>,
}

impl WeatherApp {
    /// Open the configured database and build the transport stack.
    pub fn open(config: &Config) -> Result<Self, AppError> {
        let store = WeatherStore::open(&config.database.path).map_err(store_error)?;
        let transport = build_transport(&config.api)?;

        tracing::info!(
            "Weather app ready (db: {}, api: {})",
            config.database.path.display(),
            config.api.base_url
        );

        Ok(Self {
            store,
            fetcher: WeatherFetcher::new(transport),
        })
    }

    pub fn store(&self) -> &WeatherStore {
        &self.store
    }

    pub fn fetcher(&self) -> &WeatherFetcher<AppTransport> {
        &self.fetcher
    }

    pub async fn ingest(
        &self,
        name: &str,
        lat: f64,
        lon: f64,
        start_date: &str,
        end_date: &str,
    ) -> Result<IngestReport, PipelineError> {
        pipeline::ingest(&self.store, &self.fetcher, name, lat, lon, start_date, end_date).await
    }

    pub async fn add_location_and_fetch(
        &self,
        name: &str,
        lat: f64,
        lon: f64,
        start_date: &str,
        end_date: &str,
    ) -> String {
        pipeline::add_location_and_fetch(&self.store, &self.fetcher, name, lat, lon, start_date, end_date)
            .await
    }

    pub fn daily_summary(
        &self,
        name: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyStat>, SummaryError> {
        summary::daily_summary(&self.store, name, start_date, end_date)
    }

    pub fn weekly_high_low_summary(
        &self,
        name: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<HighLow, SummaryError> {
        summary::weekly_high_low_summary(&self.store, name, start_date, end_date)
    }

    pub fn weekly_high_low_message(&self, name: &str, start_date: &str, end_date: &str) -> String {
        summary::weekly_high_low_message(&self.store, name, start_date, end_date)
    }

    pub fn locations(&self) -> Result<Vec<Location>, AppError> {
        self.store.list_locations().map_err(store_error)
    }

    /// Release the database connection. The app cannot be used afterwards.
    pub fn shutdown(self) -> Result<(), AppError> {
        self.fetcher.transport().clear();
        self.store.close().map_err(store_error)?;
        tracing::info!("Weather app shut down");
        Ok(())
    }
}

fn build_transport(api: &ApiConfig) -> Result<AppTransport, AppError> {
    let retry = RetryConfig::new(api.max_retries, api.initial_delay_ms, api.max_delay_ms);
    let open_meteo =
        OpenMeteoTransport::new(&api.base_url, Duration::from_secs(api.timeout_secs), retry)
            .map_err(transport_error)?;

    Ok(CachedTransport::new(
        open_meteo,
        Duration::from_secs(api.cache_ttl_secs),
    ))
}
