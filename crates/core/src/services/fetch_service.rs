use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::action::DataAction;
use crate::models::aggregate::TimeAggregate;
use crate::models::state::{DataState, WeatherKind};
use crate::providers::traits::GridDataProvider;

/// Turns provider calls into store events.
///
/// Each fetch dispatches `*Requested`, awaits the provider, then dispatches
/// `*Succeeded` or `*Failed`. On failure the error is also returned so the
/// caller can decide whether to retry; the store only keeps the
/// `failed_request_type` flag. Responses are applied as they arrive, so a
/// slow response for an older request overwrites fresher data.
pub struct FetchService {
    provider: Box<dyn GridDataProvider>,
}

impl FetchService {
    pub fn new(provider: Box<dyn GridDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn fetch_grid(
        &self,
        state: &mut DataState,
        aggregate: TimeAggregate,
    ) -> Result<(), CoreError> {
        state.apply(DataAction::GridFetchRequested { aggregate });
        match self.provider.fetch_grid(aggregate).await {
            Ok(payload) => {
                if payload.state_aggregation != aggregate {
                    tracing::warn!(
                        requested = %aggregate,
                        received = %payload.state_aggregation,
                        "grid payload aggregate differs from request"
                    );
                }
                state.apply(DataAction::GridFetchSucceeded(payload));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), %aggregate, error = %e, "grid fetch failed");
                state.apply(DataAction::GridFetchFailed);
                Err(e)
            }
        }
    }

    pub async fn fetch_zone_history(
        &self,
        state: &mut DataState,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<(), CoreError> {
        state.apply(DataAction::ZoneHistoryFetchRequested {
            zone_id: zone_id.to_string(),
            aggregate,
        });
        match self.provider.fetch_zone_history(zone_id, aggregate).await {
            Ok(payload) => {
                state.apply(DataAction::ZoneHistoryFetchSucceeded(payload));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), %zone_id, %aggregate, error = %e, "zone history fetch failed");
                state.apply(DataAction::ZoneHistoryFetchFailed {
                    zone_id: zone_id.to_string(),
                    aggregate,
                });
                Err(e)
            }
        }
    }

    pub async fn fetch_weather(
        &self,
        state: &mut DataState,
        kind: WeatherKind,
        target: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        state.apply(DataAction::WeatherFetchRequested { kind });
        match self.provider.fetch_weather(kind, target).await {
            Ok(forecast) => {
                state.apply(DataAction::WeatherFetchSucceeded { kind, forecast });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), %kind, error = %e, "weather fetch failed");
                state.apply(DataAction::WeatherFetchFailed { kind });
                Err(e)
            }
        }
    }
}
