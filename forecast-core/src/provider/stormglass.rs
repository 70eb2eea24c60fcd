use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use tracing::{debug, instrument};

use crate::{
    config::StormGlassConfig,
    model::{Coordinate, ForecastPoint, Metric, RawForecastResponse},
    normalize::normalize_response,
};

use super::ForecastProvider;

const POINT_PATH: &str = "/v2/weather/point";

#[derive(Debug, Clone)]
pub struct StormGlassProvider {
    config: StormGlassConfig,
    http: Client,
}

impl StormGlassProvider {
    pub fn new(config: StormGlassConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: StormGlassConfig) -> Self {
        Self { config, http }
    }

    fn point_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), POINT_PATH)
    }

    fn query(&self, coordinate: Coordinate) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("params", Metric::params()),
            ("source", self.config.source.clone()),
        ];
        if let Some(end) = self.config.end {
            query.push(("end", end.to_string()));
        }
        query.push(("lat", coordinate.lat.to_string()));
        query.push(("lng", coordinate.lng.to_string()));
        query
    }

    async fn fetch_raw(&self, coordinate: Coordinate) -> Result<RawForecastResponse> {
        let url = self.point_url();
        debug!(url = %url, "Fetching point forecast");

        let mut req = self.http.get(&url).query(&self.query(coordinate));
        if let Some(token) = self.config.api_token.as_deref() {
            req = req.header(AUTHORIZATION, token);
        }

        let res = req
            .send()
            .await
            .context("Failed to send request to StormGlass (point forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read StormGlass point forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "StormGlass point forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse StormGlass point forecast JSON")
    }
}

#[async_trait]
impl ForecastProvider for StormGlassProvider {
    #[instrument(skip(self), fields(lat = %coordinate.lat, lng = %coordinate.lng))]
    async fn fetch_points(&self, coordinate: Coordinate) -> Result<Vec<ForecastPoint>> {
        let raw = self.fetch_raw(coordinate).await?;
        let points = normalize_response(&raw, &self.config.source, self.config.validity);

        debug!(hours = raw.hours.len(), points = points.len(), "Normalized point forecast");
        Ok(points)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(config: StormGlassConfig) -> StormGlassProvider {
        StormGlassProvider::new(config)
    }

    #[test]
    fn point_url_joins_base_without_double_slash() {
        let p = provider(StormGlassConfig {
            base_url: "http://localhost:1234/".into(),
            ..Default::default()
        });

        assert_eq!(p.point_url(), "http://localhost:1234/v2/weather/point");
    }

    #[test]
    fn query_carries_params_source_and_coordinates() {
        let p = provider(StormGlassConfig {
            end: Some(1_592_113_802),
            ..Default::default()
        });

        let query = p.query(Coordinate::new(-33.79, 151.28));

        assert_eq!(
            query,
            vec![
                ("params", Metric::params()),
                ("source", "noaa".to_string()),
                ("end", "1592113802".to_string()),
                ("lat", "-33.79".to_string()),
                ("lng", "151.28".to_string()),
            ]
        );
    }

    #[test]
    fn query_omits_end_when_unset() {
        let p = provider(StormGlassConfig::default());

        let query = p.query(Coordinate::new(1.0, 2.0));
        assert!(query.iter().all(|(key, _)| *key != "end"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);

        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
