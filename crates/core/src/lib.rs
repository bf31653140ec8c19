pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;

use chrono::{DateTime, Utc};
use config::{
    build_initial_state, exchanges::ExchangeConfigTable, topology::TopologyTable,
    zones::ZoneConfigTable,
};
use models::{
    action::DataAction,
    aggregate::{ElectricityMixMode, TimeAggregate},
    chart::{AreaLayer, ChartPoint, ZoneDataPoint},
    settings::Settings,
    state::{DataState, FailedRequestType, WeatherKind},
};
use providers::{electricitymaps::ElectricityMapsApi, traits::GridDataProvider};
use services::{
    chart_service::ChartService,
    fetch_service::FetchService,
    zone_data_service::{
        combine_zone_data, select_current_datetime, select_current_zone_data,
        select_exchange_keys_for_zone,
    },
};

use errors::CoreError;

/// Main entry point for the carbon-map core library.
/// Owns the data store and the services that read and feed it.
#[must_use]
pub struct CarbonMap {
    state: DataState,
    settings: Settings,
    fetch_service: FetchService,
    chart_service: ChartService,
}

impl std::fmt::Debug for CarbonMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarbonMap")
            .field("zones", &self.state.zones.len())
            .field("exchanges", &self.state.exchanges.len())
            .field("provider", &self.fetch_service.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CarbonMap {
    /// Wrap an initial state, fetching from the backend named in `settings`.
    pub fn new(state: DataState, settings: Settings) -> Self {
        let provider = ElectricityMapsApi::from_settings(&settings);
        Self::with_provider(state, settings, Box::new(provider))
    }

    /// Wrap an initial state with a custom data provider.
    pub fn with_provider(
        state: DataState,
        settings: Settings,
        provider: Box<dyn GridDataProvider>,
    ) -> Self {
        Self {
            state,
            settings,
            fetch_service: FetchService::new(provider),
            chart_service: ChartService::new(),
        }
    }

    /// Build the store from the three static configuration documents.
    pub fn from_config_json(
        zones_json: &str,
        exchanges_json: &str,
        topology_json: &str,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        let zones = ZoneConfigTable::from_json(zones_json)?;
        let exchanges = ExchangeConfigTable::from_json(exchanges_json)?;
        let topology = TopologyTable::from_json(topology_json)?;
        Ok(Self::new(
            build_initial_state(&zones, &exchanges, &topology),
            settings,
        ))
    }

    /// Build the store from configuration files on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_config_files(
        zones_path: &str,
        exchanges_path: &str,
        topology_path: &str,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        let zones = ZoneConfigTable::from_file(zones_path)?;
        let exchanges = ExchangeConfigTable::from_file(exchanges_path)?;
        let topology = TopologyTable::from_file(topology_path)?;
        Ok(Self::new(
            build_initial_state(&zones, &exchanges, &topology),
            settings,
        ))
    }

    // ── Store ───────────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &DataState {
        &self.state
    }

    /// Apply an event directly, bypassing the fetch layer.
    pub fn dispatch(&mut self, action: DataAction) {
        self.state.apply(action);
    }

    #[must_use]
    pub fn is_loading_grid(&self) -> bool {
        self.state.is_loading_grid
    }

    #[must_use]
    pub fn is_loading_histories(&self) -> bool {
        self.state.is_loading_histories
    }

    #[must_use]
    pub fn failed_request_type(&self) -> Option<FailedRequestType> {
        self.state.failed_request_type
    }

    /// Whether the overview series for `aggregate` is known to be stale.
    #[must_use]
    pub fn is_grid_expired(&self, aggregate: TimeAggregate) -> bool {
        *self.state.grid_freshness.get(aggregate)
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// Fetch the grid state for `aggregate` and merge it into the store.
    pub async fn refresh_grid(&mut self, aggregate: TimeAggregate) -> Result<(), CoreError> {
        self.fetch_service.fetch_grid(&mut self.state, aggregate).await
    }

    /// Fetch a zone's history for `aggregate` and merge it into the store.
    pub async fn load_zone_history(
        &mut self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<(), CoreError> {
        if self.state.zone(zone_id).is_none() {
            return Err(CoreError::UnknownZone(zone_id.to_string()));
        }
        self.fetch_service
            .fetch_zone_history(&mut self.state, zone_id, aggregate)
            .await
    }

    /// Fetch a zone's history only if the stored one is expired.
    /// Returns `true` if a fetch was made.
    pub async fn ensure_zone_history(
        &mut self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<bool, CoreError> {
        let slice = self
            .state
            .slice(zone_id, aggregate)
            .ok_or_else(|| CoreError::UnknownZone(zone_id.to_string()))?;
        if !slice.is_expired {
            return Ok(false);
        }
        self.load_zone_history(zone_id, aggregate).await?;
        Ok(true)
    }

    /// Fetch the weather overlay valid around `target`.
    pub async fn load_weather(
        &mut self,
        kind: WeatherKind,
        target: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.fetch_service
            .fetch_weather(&mut self.state, kind, target)
            .await
    }

    /// Refresh the grid every `Settings::grid_poll_interval` until
    /// `shutdown` resolves. The first poll happens immediately. Failed polls
    /// are recorded in the store and polling carries on. Returns the
    /// number of polls made.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn poll_grid_until<F>(&mut self, aggregate: TimeAggregate, shutdown: F) -> usize
    where
        F: std::future::Future<Output = ()>,
    {
        let period = self
            .settings
            .grid_poll_interval()
            .max(std::time::Duration::from_secs(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut polls = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    polls += 1;
                    if let Err(e) = self.refresh_grid(aggregate).await {
                        tracing::debug!(%aggregate, error = %e, "grid poll failed, waiting for next tick");
                    }
                }
            }
        }
        tracing::info!(%aggregate, polls, "grid polling stopped");
        polls
    }

    // ── Zone data ───────────────────────────────────────────────────

    /// Combined overview + detail series of a zone.
    pub fn zone_history(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<Vec<ZoneDataPoint>, CoreError> {
        let zone = self
            .state
            .zone(zone_id)
            .ok_or_else(|| CoreError::UnknownZone(zone_id.to_string()))?;
        Ok(combine_zone_data(zone, aggregate))
    }

    #[must_use]
    pub fn current_zone_data(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
        selected_time_index: Option<usize>,
    ) -> Option<ZoneDataPoint> {
        select_current_zone_data(&self.state, zone_id, aggregate, selected_time_index)
    }

    /// Exchange partners of a zone, using the configured mix mode.
    #[must_use]
    pub fn exchange_keys_for_zone(&self, zone_id: &str, aggregate: TimeAggregate) -> Vec<String> {
        select_exchange_keys_for_zone(
            &self.state,
            zone_id,
            aggregate,
            self.settings.electricity_mix_mode,
        )
    }

    #[must_use]
    pub fn current_datetime(
        &self,
        aggregate: TimeAggregate,
        selected_time_index: Option<usize>,
    ) -> Option<DateTime<Utc>> {
        select_current_datetime(&self.state, aggregate, selected_time_index)
    }

    // ── Charts ──────────────────────────────────────────────────────

    pub fn carbon_intensity_chart(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<Vec<ChartPoint>, CoreError> {
        let history = self.zone_history(zone_id, aggregate)?;
        Ok(self
            .chart_service
            .carbon_intensity_series(&history, self.settings.electricity_mix_mode))
    }

    pub fn price_chart(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<Vec<ChartPoint>, CoreError> {
        let history = self.zone_history(zone_id, aggregate)?;
        Ok(self.chart_service.price_series(&history))
    }

    /// Stacked production (and, in consumption mode, exchange) layers.
    pub fn breakdown_chart(
        &self,
        zone_id: &str,
        aggregate: TimeAggregate,
    ) -> Result<Vec<AreaLayer>, CoreError> {
        let history = self.zone_history(zone_id, aggregate)?;
        let exchange_keys = self.exchange_keys_for_zone(zone_id, aggregate);
        Ok(self.chart_service.breakdown_layers(
            &history,
            self.settings.electricity_mix_mode,
            &exchange_keys,
        ))
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_electricity_mix_mode(&mut self, mode: ElectricityMixMode) {
        self.settings.electricity_mix_mode = mode;
    }
}
