use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, DurationRound, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::aggregate::TimeAggregate;
use crate::models::exchange::ExchangeRecord;
use crate::models::payload::{DetailRecord, GridPayload, WeatherForecast, ZoneHistoryPayload};
use crate::models::settings::Settings;
use crate::models::state::WeatherKind;
use crate::models::zone::OverviewRecord;
use super::traits::GridDataProvider;

const PROVIDER_NAME: &str = "ElectricityMaps";
const TOKEN_HEADER: &str = "electricitymap-token";
const GFS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// HTTP client for the app backend.
///
/// - `GET /v5/state/{aggregate}` → all zones
/// - `GET /v5/history/{aggregate}?countryCode={zone}` → one zone
/// - `GET /v3/gfs/{solar|wind}?refTime=..&targetTime=..` → weather grid
///
/// Every response body is wrapped in `{"data": ...}`.
pub struct ElectricityMapsApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ElectricityMapsApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.api_token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CoreError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await.map_err(|e| CoreError::Api {
            endpoint: path.to_string(),
            status: status.as_u16(),
            message: format!("Failed to parse response: {e}"),
        })?;
        Ok(envelope.data)
    }
}

// ── Backend response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateResponse {
    #[serde(default)]
    countries: BTreeMap<String, Vec<OverviewRecord>>,
    #[serde(default)]
    datetimes: Vec<String>,
    #[serde(default)]
    exchanges: BTreeMap<String, Vec<ExchangeRecord>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    #[serde(default)]
    zone_states: Vec<DetailRecord>,
    #[serde(default)]
    has_data: bool,
}

/// GFS run (`refTime`) and forecast step (`targetTime`) to request for a
/// weather overlay valid at `target`.
///
/// Forecast steps are 3 hours apart; runs are published every 6 hours
/// and become available several hours later, so the run used is the one
/// at least 6 hours before the step.
pub fn gfs_times(target: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let step = floor_to_hours(target, 3);
    let run = floor_to_hours(step - ChronoDuration::hours(6), 6);
    (run, step)
}

fn floor_to_hours(datetime: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    datetime
        .duration_trunc(ChronoDuration::hours(hours))
        .unwrap_or(datetime)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl GridDataProvider for ElectricityMapsApi {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_grid(&self, aggregate: TimeAggregate) -> Result<GridPayload, CoreError> {
        let path = format!("/v5/state/{aggregate}");
        let state: StateResponse = self.get(&path, &[]).await?;
        Ok(GridPayload {
            countries: state.countries,
            datetimes: state.datetimes,
            exchanges: state.exchanges,
            state_aggregation: aggregate,
        })
    }

    async fn fetch_zone_history(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<ZoneHistoryPayload, CoreError> {
        let path = format!("/v5/history/{aggregate}");
        let history: HistoryResponse = self
            .get(&path, &[("countryCode", zone_id.to_string())])
            .await?;
        Ok(ZoneHistoryPayload {
            state_aggregation: aggregate,
            zone_id: zone_id.to_string(),
            zone_states: history.zone_states,
            has_data: history.has_data,
        })
    }

    async fn fetch_weather(
        &self,
        kind: WeatherKind,
        target: DateTime<Utc>,
    ) -> Result<WeatherForecast, CoreError> {
        let (run, step) = gfs_times(target);
        let path = format!("/v3/gfs/{kind}");
        self.get(
            &path,
            &[
                ("refTime", run.format(GFS_TIME_FORMAT).to_string()),
                ("targetTime", step.format(GFS_TIME_FORMAT).to_string()),
            ],
        )
        .await
    }
}
