use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::weather::WeatherSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub text: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub weather: WeatherSnapshot,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, text: String, weather: WeatherSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            text,
            weather,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DiaryDateQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiaryEntry {
        DiaryEntry {
            id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            text: "snowed all day".into(),
            weather: WeatherSnapshot {
                condition: "Snow".into(),
                icon: "13d".into(),
                temperature: 268.4,
            },
        }
    }

    #[test]
    fn test_entry_serializes_flat() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2023-01-01");
        assert_eq!(json["text"], "snowed all day");
        assert_eq!(json["weather"], "Snow");
        assert_eq!(json["icon"], "13d");
        assert_eq!(json["temperature"], 268.4);
        assert!(json.get("condition").is_none());
    }

    #[test]
    fn test_range_query_uses_camel_case() {
        let query: DiaryRangeQuery =
            serde_json::from_str(r#"{"startDate":"2023-01-01","endDate":"2023-01-31"}"#).unwrap();
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
    }

    #[test]
    fn test_date_query_rejects_datetime() {
        let result = serde_json::from_str::<DiaryDateQuery>(r#"{"date":"2023-01-01T10:00:00"}"#);
        assert!(result.is_err());
    }
}
