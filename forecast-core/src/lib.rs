//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast provider abstraction and its StormGlass client
//! - Raw and normalized forecast models, and the normalization between them
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::{Config, StormGlassConfig};
pub use model::{Coordinate, ForecastPoint, Metric, RawForecastPoint, RawForecastResponse};
pub use normalize::{ValidityRule, normalize_response};
pub use provider::{ForecastProvider, provider_from_config, stormglass::StormGlassProvider};
