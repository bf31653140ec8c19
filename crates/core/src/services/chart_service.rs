use crate::models::aggregate::ElectricityMixMode;
use crate::models::chart::{AreaLayer, ChartPoint, StackedPoint, ZoneDataPoint};

/// Display order of the production breakdown, bottom band first.
pub const PRODUCTION_MODES: [&str; 12] = [
    "nuclear",
    "geothermal",
    "biomass",
    "coal",
    "wind",
    "solar",
    "hydro",
    "hydro storage",
    "battery storage",
    "gas",
    "oil",
    "unknown",
];

/// Production modes backed by the `storage` map, with their storage key.
const STORAGE_MODES: [(&str, &str); 2] = [("hydro storage", "hydro"), ("battery storage", "battery")];

/// Where a layer's value comes from.
enum LayerSource<'a> {
    Production(&'a str),
    Storage(&'a str),
    Exchange(&'a str),
}

impl LayerSource<'_> {
    fn value(&self, point: &ZoneDataPoint) -> Option<f64> {
        let breakdown = &point.breakdown;
        match self {
            LayerSource::Production(mode) => breakdown.production.get(*mode).copied().flatten(),
            // Storage is reported positive while charging; the chart shows
            // discharge as production.
            LayerSource::Storage(key) => breakdown.storage.get(*key).copied().flatten().map(|v| -v),
            LayerSource::Exchange(key) => breakdown.exchange.get(*key).copied().flatten(),
        }
    }
}

/// Generates chart-ready data sets from combined zone history.
///
/// The core computes all the numbers, the frontend only renders.
/// Points without a datetime (the "no data" placeholder) are skipped.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Carbon intensity per timestamp, in gCO2eq/kWh.
    pub fn carbon_intensity_series(
        &self,
        points: &[ZoneDataPoint],
        mix_mode: ElectricityMixMode,
    ) -> Vec<ChartPoint> {
        points
            .iter()
            .filter_map(|point| {
                let value = match mix_mode {
                    ElectricityMixMode::Consumption => point.metrics.co2intensity,
                    ElectricityMixMode::Production => point.metrics.co2intensity_production,
                };
                Some(ChartPoint {
                    datetime: point.datetime?,
                    value,
                })
            })
            .collect()
    }

    /// Day-ahead price per timestamp.
    pub fn price_series(&self, points: &[ZoneDataPoint]) -> Vec<ChartPoint> {
        points
            .iter()
            .filter_map(|point| {
                Some(ChartPoint {
                    datetime: point.datetime?,
                    value: point.breakdown.price.as_ref().and_then(|p| p.value),
                })
            })
            .collect()
    }

    /// Stacked area layers of the electricity breakdown.
    ///
    /// One layer per production mode in `PRODUCTION_MODES` order, then, in
    /// consumption mode, one per exchange key. Stacking is diverging:
    /// positive values pile up from zero, negative values (charging
    /// storage, exports) pile down from zero. Missing values stack as zero
    /// but keep `value: None`.
    pub fn breakdown_layers(
        &self,
        points: &[ZoneDataPoint],
        mix_mode: ElectricityMixMode,
        exchange_keys: &[String],
    ) -> Vec<AreaLayer> {
        let mut sources: Vec<(String, LayerSource<'_>)> = PRODUCTION_MODES
            .iter()
            .map(|&mode| {
                let source = STORAGE_MODES
                    .iter()
                    .find(|(name, _)| *name == mode)
                    .map(|&(_, key)| LayerSource::Storage(key))
                    .unwrap_or(LayerSource::Production(mode));
                (mode.to_string(), source)
            })
            .collect();
        if mix_mode == ElectricityMixMode::Consumption {
            sources.extend(
                exchange_keys
                    .iter()
                    .map(|key| (key.clone(), LayerSource::Exchange(key.as_str()))),
            );
        }

        let mut layers: Vec<AreaLayer> = sources
            .iter()
            .map(|(key, _)| AreaLayer {
                key: key.clone(),
                points: Vec::with_capacity(points.len()),
            })
            .collect();

        for point in points {
            let Some(datetime) = point.datetime else {
                continue;
            };
            let mut positive = 0.0;
            let mut negative = 0.0;
            for (layer, (_, source)) in layers.iter_mut().zip(&sources) {
                let value = source.value(point);
                let v = value.unwrap_or(0.0);
                let (y0, y1) = if v >= 0.0 {
                    let y0 = positive;
                    positive += v;
                    (y0, positive)
                } else {
                    let y1 = negative;
                    negative += v;
                    (negative, y1)
                };
                layer.points.push(StackedPoint {
                    datetime,
                    y0,
                    y1,
                    value,
                });
            }
        }

        layers
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
