//! In-process store used by the workflow and router tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::db::store::{DiaryStore, WeatherStore};
use crate::models::diary::DiaryEntry;
use crate::models::weather::WeatherRecord;

#[derive(Default)]
pub struct MemoryStore {
    weather: Mutex<Vec<WeatherRecord>>,
    diaries: Mutex<Vec<DiaryEntry>>,
}

impl MemoryStore {
    pub async fn weather_records(&self) -> Vec<WeatherRecord> {
        self.weather.lock().await.clone()
    }

    pub async fn diary_entries(&self) -> Vec<DiaryEntry> {
        self.diaries.lock().await.clone()
    }

    async fn upsert_weather(&self, record: &WeatherRecord) {
        let mut weather = self.weather.lock().await;
        match weather.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => *existing = record.clone(),
            None => weather.push(record.clone()),
        }
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<WeatherRecord>, sqlx::Error> {
        Ok(self
            .weather
            .lock()
            .await
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }

    async fn save(&self, record: &WeatherRecord) -> Result<(), sqlx::Error> {
        self.upsert_weather(record).await;
        Ok(())
    }
}

#[async_trait]
impl DiaryStore for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        Ok(self
            .diaries
            .lock()
            .await
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        let mut entries: Vec<DiaryEntry> = self
            .diaries
            .lock()
            .await
            .iter()
            .filter(|e| (start..=end).contains(&e.date))
            .cloned()
            .collect();
        // stable: keeps insertion order within a date
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn first_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, sqlx::Error> {
        Ok(self
            .diaries
            .lock()
            .await
            .iter()
            .find(|e| e.date == date)
            .cloned())
    }

    async fn save(&self, entry: &DiaryEntry) -> Result<(), sqlx::Error> {
        let mut diaries = self.diaries.lock().await;
        match diaries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => existing.text = entry.text.clone(),
            None => diaries.push(entry.clone()),
        }
        Ok(())
    }

    async fn save_with_weather(
        &self,
        entry: &DiaryEntry,
        weather: &WeatherRecord,
    ) -> Result<(), sqlx::Error> {
        self.upsert_weather(weather).await;
        DiaryStore::save(self, entry).await
    }

    async fn delete_all_by_date(&self, date: NaiveDate) -> Result<u64, sqlx::Error> {
        let mut diaries = self.diaries.lock().await;
        let before = diaries.len();
        diaries.retain(|e| e.date != date);
        Ok((before - diaries.len()) as u64)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
