use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::{DiaryStore, WeatherStore};
use crate::error::{AppError, AppResult};
use crate::models::diary::DiaryEntry;
use crate::models::weather::WeatherRecord;
use crate::services::weather::WeatherService;

pub struct DiaryService {
    weather_store: Arc<dyn WeatherStore>,
    diaries: Arc<dyn DiaryStore>,
    weather: WeatherService,
}

impl DiaryService {
    pub fn new(
        weather_store: Arc<dyn WeatherStore>,
        diaries: Arc<dyn DiaryStore>,
        weather: WeatherService,
    ) -> Self {
        Self {
            weather_store,
            diaries,
            weather,
        }
    }

    /// Stores a new entry for `date` with that date's weather attached.
    ///
    /// Cached weather for the date is reused; otherwise the current weather is
    /// fetched and cached under `date` in the same transaction as the entry,
    /// so a failed fetch or parse leaves both tables untouched.
    pub async fn create_diary(&self, date: NaiveDate, text: String) -> AppResult<DiaryEntry> {
        tracing::info!(%date, "Creating diary entry");

        let cached = self.weather_store.find_by_date(date).await?;

        let entry = match cached.into_iter().next() {
            Some(record) => {
                let entry = DiaryEntry::new(date, text, record.snapshot);
                self.diaries.save(&entry).await?;
                entry
            }
            None => {
                let snapshot = self.weather.current().await?;
                let record = WeatherRecord::new(date, snapshot.clone());
                let entry = DiaryEntry::new(date, text, snapshot);
                self.diaries.save_with_weather(&entry, &record).await?;
                tracing::info!(%date, "Cached fetched weather");
                entry
            }
        };

        tracing::info!(%date, id = %entry.id, "Diary entry created");
        Ok(entry)
    }

    pub async fn read_diary(&self, date: NaiveDate) -> AppResult<Vec<DiaryEntry>> {
        tracing::debug!(%date, "Reading diary");
        Ok(self.diaries.find_by_date(date).await?)
    }

    pub async fn read_diaries(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DiaryEntry>> {
        tracing::debug!(%start, %end, "Reading diaries");

        if start > end {
            return Err(AppError::Validation(
                "startDate must not be after endDate".into(),
            ));
        }

        Ok(self.diaries.find_by_date_range(start, end).await?)
    }

    /// Replaces the text of the first entry written for `date`.
    pub async fn update_diary(&self, date: NaiveDate, text: String) -> AppResult<DiaryEntry> {
        tracing::info!(%date, "Updating diary entry");

        let mut entry = self
            .diaries
            .first_by_date(date)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No diary entry for {date}")))?;

        entry.text = text;
        self.diaries.save(&entry).await?;

        Ok(entry)
    }

    pub async fn delete_diary(&self, date: NaiveDate) -> AppResult<u64> {
        let deleted = self.diaries.delete_all_by_date(date).await?;
        tracing::info!(%date, deleted, "Deleted diary entries");
        Ok(deleted)
    }

    pub async fn is_ready(&self) -> bool {
        self.diaries.ping().await.is_ok()
    }
}
