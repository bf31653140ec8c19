use serde::{Deserialize, Serialize};

/// Granularity at which time-series data is requested and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAggregate {
    Hourly,
    Daily,
    Monthly,
    Yearly,
}

impl TimeAggregate {
    /// All aggregates, finest first.
    pub const ALL: [TimeAggregate; 4] = [
        TimeAggregate::Hourly,
        TimeAggregate::Daily,
        TimeAggregate::Monthly,
        TimeAggregate::Yearly,
    ];

    /// Path segment used by the backend API (`/v5/state/{aggregate}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeAggregate::Hourly => "hourly",
            TimeAggregate::Daily => "daily",
            TimeAggregate::Monthly => "monthly",
            TimeAggregate::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for TimeAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether figures are shown for what a zone consumes (imports included)
/// or only for what it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricityMixMode {
    #[default]
    Consumption,
    Production,
}

impl std::fmt::Display for ElectricityMixMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElectricityMixMode::Consumption => write!(f, "consumption"),
            ElectricityMixMode::Production => write!(f, "production"),
        }
    }
}

/// One value per `TimeAggregate`.
///
/// Used instead of a map so every aggregate is always present and lookups
/// can't miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerAggregate<T> {
    pub hourly: T,
    pub daily: T,
    pub monthly: T,
    pub yearly: T,
}

impl<T: Clone> PerAggregate<T> {
    /// Same value for every aggregate.
    pub fn splat(value: T) -> Self {
        Self {
            hourly: value.clone(),
            daily: value.clone(),
            monthly: value.clone(),
            yearly: value,
        }
    }
}

impl<T> PerAggregate<T> {
    pub fn get(&self, aggregate: TimeAggregate) -> &T {
        match aggregate {
            TimeAggregate::Hourly => &self.hourly,
            TimeAggregate::Daily => &self.daily,
            TimeAggregate::Monthly => &self.monthly,
            TimeAggregate::Yearly => &self.yearly,
        }
    }

    pub fn get_mut(&mut self, aggregate: TimeAggregate) -> &mut T {
        match aggregate {
            TimeAggregate::Hourly => &mut self.hourly,
            TimeAggregate::Daily => &mut self.daily,
            TimeAggregate::Monthly => &mut self.monthly,
            TimeAggregate::Yearly => &mut self.yearly,
        }
    }

    pub fn set(&mut self, aggregate: TimeAggregate, value: T) {
        *self.get_mut(aggregate) = value;
    }

    /// Iterate `(aggregate, value)` pairs, finest first.
    pub fn iter(&self) -> impl Iterator<Item = (TimeAggregate, &T)> {
        TimeAggregate::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}
