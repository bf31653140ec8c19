use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::aggregate::TimeAggregate;
use crate::models::payload::{GridPayload, WeatherForecast, ZoneHistoryPayload};
use crate::models::state::WeatherKind;

/// Source of grid state, zone history and weather data.
///
/// The live backend implements this over HTTP; tests and offline builds
/// plug in their own. The store never sees providers, only the events the
/// fetch service derives from their results.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait GridDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest overview of every zone (and, hourly, every exchange).
    async fn fetch_grid(&self, aggregate: TimeAggregate) -> Result<GridPayload, CoreError>;

    /// Detailed history of a single zone.
    async fn fetch_zone_history(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<ZoneHistoryPayload, CoreError>;

    /// Weather forecast grid valid around `target`.
    async fn fetch_weather(
        &self,
        kind: WeatherKind,
        target: DateTime<Utc>,
    ) -> Result<WeatherForecast, CoreError>;
}
