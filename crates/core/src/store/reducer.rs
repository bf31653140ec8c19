use chrono::{DateTime, Utc};

use crate::models::action::DataAction;
use crate::models::aggregate::TimeAggregate;
use crate::models::payload::{DetailRecord, GridPayload, WeatherForecast, ZoneHistoryPayload};
use crate::models::state::{DataState, FailedRequestType, WeatherKind};
use crate::models::zone::ZoneDetail;

use super::freshness;
use super::parse_datetime;
use super::sources::dedup_sources;

/// Apply `action` to an owned state and return it.
pub fn reduce(mut state: DataState, action: DataAction) -> DataState {
    state.apply(action);
    state
}

impl DataState {
    /// The store's single transition function.
    ///
    /// Never fails: malformed payload elements are dropped with a warning
    /// and fetch failures only flip flags, keeping whatever data is
    /// already there.
    pub fn apply(&mut self, action: DataAction) {
        tracing::debug!(action = action.name(), "applying data action");
        match action {
            DataAction::GridFetchRequested { aggregate } => {
                tracing::debug!(%aggregate, "grid fetch requested");
                self.is_loading_grid = true;
            }
            DataAction::GridFetchSucceeded(payload) => self.apply_grid_fetch_succeeded(payload),
            DataAction::GridFetchFailed => {
                self.is_loading_grid = false;
                self.failed_request_type = Some(FailedRequestType::Grid);
            }

            DataAction::ZoneHistoryFetchRequested { zone_id, aggregate } => {
                tracing::debug!(%zone_id, %aggregate, "zone history fetch requested");
                self.is_loading_histories = true;
            }
            DataAction::ZoneHistoryFetchSucceeded(payload) => {
                self.apply_zone_history_fetch_succeeded(payload)
            }
            DataAction::ZoneHistoryFetchFailed { zone_id, aggregate } => {
                tracing::debug!(%zone_id, %aggregate, "zone history fetch failed");
                self.is_loading_histories = false;
                self.failed_request_type = Some(FailedRequestType::Zone);
            }

            DataAction::WeatherFetchRequested { kind } => {
                self.weather_mut(kind).is_loading = true;
            }
            DataAction::WeatherFetchSucceeded { kind, forecast } => {
                self.apply_weather_fetch_succeeded(kind, forecast)
            }
            DataAction::WeatherFetchFailed { kind } => {
                let weather = self.weather_mut(kind);
                weather.is_loading = false;
                weather.has_error = true;
            }
        }
    }

    fn apply_grid_fetch_succeeded(&mut self, payload: GridPayload) {
        let GridPayload {
            countries,
            datetimes,
            exchanges,
            state_aggregation: aggregate,
        } = payload;

        let datetimes = parse_datetimes(&datetimes);

        for (zone_id, mut overviews) in countries {
            let Some(zone) = self.zones.get_mut(&zone_id) else {
                tracing::warn!(%zone_id, %aggregate, "grid payload references unknown zone, ignoring");
                continue;
            };
            for (overview, datetime) in overviews.iter_mut().zip(&datetimes) {
                if overview.state_datetime.is_none() {
                    overview.state_datetime = Some(*datetime);
                }
            }
            zone.aggregates.get_mut(aggregate).overviews = overviews;
        }

        if aggregate == TimeAggregate::Hourly {
            for (key, data) in exchanges {
                match self.exchanges.get_mut(&key) {
                    Some(edge) => edge.data = data,
                    None => tracing::warn!(exchange = %key, "grid payload references unknown exchange, ignoring"),
                }
            }
        } else if !exchanges.is_empty() {
            tracing::debug!(%aggregate, count = exchanges.len(), "ignoring exchanges of non-hourly grid payload");
        }

        self.datetimes.set(aggregate, datetimes);

        // Every slice is re-checked, not only the zones in this payload:
        // the newest grid datetime moved for all of them.
        let latest_grid = self.latest_grid_datetime(aggregate);
        for zone in self.zones.values_mut() {
            let slice = zone.aggregates.get_mut(aggregate);
            slice.is_expired = freshness::slice_is_expired(
                slice.history_loaded,
                latest_grid,
                slice.latest_detail_datetime(),
            );
        }

        self.is_loading_grid = false;
        self.failed_request_type = None;
        self.has_initialized_grid = true;
        self.grid_freshness.set(aggregate, false);
    }

    fn apply_zone_history_fetch_succeeded(&mut self, payload: ZoneHistoryPayload) {
        let ZoneHistoryPayload {
            state_aggregation: aggregate,
            zone_id,
            zone_states,
            has_data,
        } = payload;

        self.is_loading_histories = false;
        self.failed_request_type = None;

        let latest_grid = self.latest_grid_datetime(aggregate);
        let Some(zone) = self.zones.get_mut(&zone_id) else {
            tracing::warn!(%zone_id, %aggregate, "history payload references unknown zone, ignoring");
            return;
        };

        let details: Vec<ZoneDetail> = zone_states
            .into_iter()
            .filter_map(|record| to_zone_detail(&zone_id, record))
            .collect();

        let slice = zone.aggregates.get_mut(aggregate);
        slice.details = details;
        slice.has_data = has_data;
        slice.history_loaded = true;

        let latest_detail = slice.latest_detail_datetime();
        slice.is_expired = freshness::slice_is_expired(true, latest_grid, latest_detail);

        if freshness::grid_is_stale(latest_grid, latest_detail) {
            tracing::info!(%zone_id, %aggregate, "zone history is ahead of grid, marking grid expired");
            self.grid_freshness.set(aggregate, true);
        }
    }

    fn apply_weather_fetch_succeeded(&mut self, kind: WeatherKind, forecast: WeatherForecast) {
        let weather = self.weather_mut(kind);
        weather.is_loading = false;
        weather.has_error = false;
        weather.forecast = Some(forecast);
    }
}

fn parse_datetimes(raw: &[String]) -> Vec<DateTime<Utc>> {
    raw.iter()
        .filter_map(|s| match parse_datetime(s) {
            Ok(dt) => Some(dt),
            Err(e) => {
                tracing::warn!(error = %e, "dropping grid datetime");
                None
            }
        })
        .collect()
}

fn to_zone_detail(zone_id: &str, record: DetailRecord) -> Option<ZoneDetail> {
    let datetime = match parse_datetime(&record.state_datetime) {
        Ok(dt) => dt,
        Err(e) => {
            tracing::warn!(%zone_id, error = %e, "dropping history record");
            return None;
        }
    };
    Some(ZoneDetail {
        datetime,
        source: dedup_sources(record.source.as_deref()),
        metrics: record.metrics,
        breakdown: record.breakdown,
    })
}
