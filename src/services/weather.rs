//! OpenWeatherMap access: fetching the raw current-weather payload and
//! extracting the fields a diary entry keeps.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::WeatherApiConfig;
use crate::models::weather::WeatherSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider responded with status {0}")]
    Status(u16),

    #[error("could not read response body: {0}")]
    Body(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Source of the raw current-weather payload.
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;
}

pub struct OpenWeatherMapFetcher {
    client: Client,
    config: WeatherApiConfig,
}

impl OpenWeatherMapFetcher {
    pub fn new(config: WeatherApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherMapFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let url = format!("{}/weather", self.config.base_url);

        // `without_url` keeps the appid out of error messages and logs.
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", self.config.location.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.without_url().to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherPayload {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
    icon: String,
}

/// Pulls `main.temp` and the first `weather[]` element out of an
/// OpenWeatherMap current-weather response.
pub fn parse_weather(raw: &str) -> Result<WeatherSnapshot, ParseError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let payload: CurrentWeatherPayload =
        serde_json::from_value(value).map_err(|e| ParseError::UnexpectedShape(e.to_string()))?;

    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::UnexpectedShape("`weather` array is empty".into()))?;

    Ok(WeatherSnapshot {
        condition: condition.main,
        icon: condition.icon,
        temperature: payload.main.temp,
    })
}

/// Fetch + parse, shared by diary creation and the daily job.
#[derive(Clone)]
pub struct WeatherService {
    fetcher: Arc<dyn WeatherFetcher>,
}

impl WeatherService {
    pub fn new(fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn current(&self) -> Result<WeatherSnapshot, WeatherError> {
        let raw = self.fetcher.fetch().await?;
        let snapshot = parse_weather(&raw)?;
        tracing::debug!(
            condition = %snapshot.condition,
            temperature = snapshot.temperature,
            "Fetched current weather"
        );
        Ok(snapshot)
    }
}
