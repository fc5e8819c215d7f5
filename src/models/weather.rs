use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The weather fields copied onto every diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeatherSnapshot {
    #[sqlx(rename = "weather")]
    #[serde(rename = "weather")]
    pub condition: String,
    pub icon: String,
    pub temperature: f64,
}

/// Cached weather for one calendar date (`date_weather` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub snapshot: WeatherSnapshot,
}

impl WeatherRecord {
    pub fn new(date: NaiveDate, snapshot: WeatherSnapshot) -> Self {
        Self { date, snapshot }
    }
}
