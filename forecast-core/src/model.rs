use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A latitude/longitude pair. Not range-checked; callers supply sane values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The metrics requested from the point forecast endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    SwellDirection,
    SwellHeight,
    SwellPeriod,
    WaveDirection,
    WaveHeight,
    WindDirection,
    WindSpeed,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::SwellDirection => "swellDirection",
            Metric::SwellHeight => "swellHeight",
            Metric::SwellPeriod => "swellPeriod",
            Metric::WaveDirection => "waveDirection",
            Metric::WaveHeight => "waveHeight",
            Metric::WindDirection => "windDirection",
            Metric::WindSpeed => "windSpeed",
        }
    }

    pub const fn all() -> &'static [Metric] {
        &[
            Metric::SwellDirection,
            Metric::SwellHeight,
            Metric::SwellPeriod,
            Metric::WaveDirection,
            Metric::WaveHeight,
            Metric::WindDirection,
            Metric::WindSpeed,
        ]
    }

    /// Comma-joined wire names, as sent in the `params` query parameter.
    pub fn params() -> String {
        Self::all()
            .iter()
            .map(Metric::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-source estimates for one metric, e.g. `{"noaa": 1.2, "sg": 1.3}`.
/// A `null` estimate is kept as `None`.
pub type SourceValues = HashMap<String, Option<f64>>;

/// A metric sent as `null` carries no estimates, same as an absent one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<SourceValues, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SourceValues>::deserialize(deserializer)?.unwrap_or_default())
}

/// One hourly record as returned upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastPoint {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub swell_direction: SourceValues,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub swell_height: SourceValues,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub swell_period: SourceValues,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub wave_direction: SourceValues,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub wave_height: SourceValues,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub wind_direction: SourceValues,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub wind_speed: SourceValues,
    #[serde(default)]
    pub time: Option<String>,
}

impl RawForecastPoint {
    pub fn source_values(&self, metric: Metric) -> &SourceValues {
        match metric {
            Metric::SwellDirection => &self.swell_direction,
            Metric::SwellHeight => &self.swell_height,
            Metric::SwellPeriod => &self.swell_period,
            Metric::WaveDirection => &self.wave_direction,
            Metric::WaveHeight => &self.wave_height,
            Metric::WindDirection => &self.wind_direction,
            Metric::WindSpeed => &self.wind_speed,
        }
    }

    /// Estimate for `metric` from `source`, if the source reported a number.
    pub fn value(&self, metric: Metric, source: &str) -> Option<f64> {
        self.source_values(metric).get(source).copied().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecastResponse {
    pub hours: Vec<RawForecastPoint>,
}

/// A normalized forecast point: one value per metric from the preferred source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub time: String,
    pub wave_direction: f64,
    pub wave_height: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}
