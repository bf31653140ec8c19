use super::aggregate::TimeAggregate;
use super::payload::{GridPayload, WeatherForecast, ZoneHistoryPayload};
use super::state::WeatherKind;

/// Every event the data store reacts to.
///
/// Fetches come in requested / succeeded / failed triples. The reducer
/// (`DataState::apply`) matches exhaustively on this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum DataAction {
    GridFetchRequested {
        aggregate: TimeAggregate,
    },
    GridFetchSucceeded(GridPayload),
    GridFetchFailed,

    ZoneHistoryFetchRequested {
        zone_id: String,
        aggregate: TimeAggregate,
    },
    ZoneHistoryFetchSucceeded(ZoneHistoryPayload),
    ZoneHistoryFetchFailed {
        zone_id: String,
        aggregate: TimeAggregate,
    },

    WeatherFetchRequested {
        kind: WeatherKind,
    },
    WeatherFetchSucceeded {
        kind: WeatherKind,
        forecast: WeatherForecast,
    },
    WeatherFetchFailed {
        kind: WeatherKind,
    },
}

impl DataAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DataAction::GridFetchRequested { .. } => "GRID_DATA_FETCH_REQUESTED",
            DataAction::GridFetchSucceeded(_) => "GRID_DATA_FETCH_SUCCEEDED",
            DataAction::GridFetchFailed => "GRID_DATA_FETCH_FAILED",
            DataAction::ZoneHistoryFetchRequested { .. } => "ZONE_HISTORY_FETCH_REQUESTED",
            DataAction::ZoneHistoryFetchSucceeded(_) => "ZONE_HISTORY_FETCH_SUCCEEDED",
            DataAction::ZoneHistoryFetchFailed { .. } => "ZONE_HISTORY_FETCH_FAILED",
            DataAction::WeatherFetchRequested { .. } => "WEATHER_FETCH_REQUESTED",
            DataAction::WeatherFetchSucceeded { .. } => "WEATHER_FETCH_SUCCEEDED",
            DataAction::WeatherFetchFailed { .. } => "WEATHER_FETCH_FAILED",
        }
    }
}
