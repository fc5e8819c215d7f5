use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::diary::DiaryEntry;
use crate::models::weather::WeatherRecord;

#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Records for `date`; empty when nothing is cached yet.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<WeatherRecord>, sqlx::Error>;

    /// Upserts by date.
    async fn save(&self, record: &WeatherRecord) -> Result<(), sqlx::Error>;
}

#[async_trait]
pub trait DiaryStore: Send + Sync {
    /// Entries for `date` in insertion order.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, sqlx::Error>;

    /// Entries with `start <= date <= end`, ordered by date then insertion.
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, sqlx::Error>;

    async fn first_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, sqlx::Error>;

    /// Inserts the entry, or replaces the text of the entry with the same id.
    async fn save(&self, entry: &DiaryEntry) -> Result<(), sqlx::Error>;

    /// Writes a freshly fetched weather record and the entry in one transaction.
    async fn save_with_weather(
        &self,
        entry: &DiaryEntry,
        weather: &WeatherRecord,
    ) -> Result<(), sqlx::Error>;

    async fn delete_all_by_date(&self, date: NaiveDate) -> Result<u64, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}
