//! Filter-then-project step turning source-keyed raw records into flat points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ForecastPoint, Metric, RawForecastPoint, RawForecastResponse};

/// How a preferred-source value is judged usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidityRule {
    /// Value must be present, non-zero and not NaN. Legacy behavior: a real
    /// reading of exactly zero (calm wind, due-north direction) is dropped.
    #[default]
    Truthy,
    /// Value must be present and non-null; zero is accepted.
    Present,
}

impl ValidityRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidityRule::Truthy => "truthy",
            ValidityRule::Present => "present",
        }
    }

    pub const fn all() -> &'static [ValidityRule] {
        &[ValidityRule::Truthy, ValidityRule::Present]
    }

    fn accepts(self, value: f64) -> bool {
        match self {
            ValidityRule::Truthy => value != 0.0 && !value.is_nan(),
            ValidityRule::Present => true,
        }
    }
}

impl std::fmt::Display for ValidityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ValidityRule {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "truthy" => Ok(ValidityRule::Truthy),
            "present" => Ok(ValidityRule::Present),
            _ => Err(anyhow::anyhow!(
                "Unknown validity rule '{value}'. Supported rules: truthy, present."
            )),
        }
    }
}

/// True when `source` has a usable value for every metric and the record has a timestamp.
pub fn is_valid_point(point: &RawForecastPoint, source: &str, rule: ValidityRule) -> bool {
    project(point, source, rule).is_some()
}

/// Flatten `point` to its `source` values, or `None` if any metric or the timestamp is unusable.
fn project(point: &RawForecastPoint, source: &str, rule: ValidityRule) -> Option<ForecastPoint> {
    let value = |metric: Metric| point.value(metric, source).filter(|v| rule.accepts(*v));
    let time = point.time.as_deref().filter(|t| !t.is_empty())?;

    Some(ForecastPoint {
        swell_direction: value(Metric::SwellDirection)?,
        swell_height: value(Metric::SwellHeight)?,
        swell_period: value(Metric::SwellPeriod)?,
        time: time.to_string(),
        wave_direction: value(Metric::WaveDirection)?,
        wave_height: value(Metric::WaveHeight)?,
        wind_direction: value(Metric::WindDirection)?,
        wind_speed: value(Metric::WindSpeed)?,
    })
}

/// Keep the records that are valid for `source`, flattened, in their original order.
///
/// Invalid records are dropped without error.
pub fn normalize_response(
    response: &RawForecastResponse,
    source: &str,
    rule: ValidityRule,
) -> Vec<ForecastPoint> {
    let points: Vec<ForecastPoint> = response
        .hours
        .iter()
        .filter_map(|point| project(point, source, rule))
        .collect();

    let dropped = response.hours.len() - points.len();
    if dropped > 0 {
        debug!(source, dropped, kept = points.len(), "Dropped incomplete forecast records");
    }

    points
}
