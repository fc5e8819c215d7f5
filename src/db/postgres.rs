use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};

use crate::db::store::{DiaryStore, WeatherStore};
use crate::models::diary::DiaryEntry;
use crate::models::weather::WeatherRecord;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn upsert_weather<'e, E>(executor: E, record: &WeatherRecord) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO date_weather (date, weather, icon, temperature)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (date) DO UPDATE SET
            weather = EXCLUDED.weather,
            icon = EXCLUDED.icon,
            temperature = EXCLUDED.temperature
        "#,
    )
    .bind(record.date)
    .bind(&record.snapshot.condition)
    .bind(&record.snapshot.icon)
    .bind(record.snapshot.temperature)
    .execute(executor)
    .await?;

    Ok(())
}

async fn upsert_entry<'e, E>(executor: E, entry: &DiaryEntry) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO diary (id, date, text, weather, icon, temperature)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE SET text = EXCLUDED.text
        "#,
    )
    .bind(entry.id)
    .bind(entry.date)
    .bind(&entry.text)
    .bind(&entry.weather.condition)
    .bind(&entry.weather.icon)
    .bind(entry.weather.temperature)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl WeatherStore for PgStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<WeatherRecord>, sqlx::Error> {
        sqlx::query_as::<_, WeatherRecord>(
            "SELECT date, weather, icon, temperature FROM date_weather WHERE date = $1",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
    }

    async fn save(&self, record: &WeatherRecord) -> Result<(), sqlx::Error> {
        upsert_weather(&self.pool, record).await
    }
}

#[async_trait]
impl DiaryStore for PgStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, date, text, weather, icon, temperature FROM diary
            WHERE date = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, date, text, weather, icon, temperature FROM diary
            WHERE date BETWEEN $1 AND $2
            ORDER BY date, created_at, id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
    }

    async fn first_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, sqlx::Error> {
        sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT id, date, text, weather, icon, temperature FROM diary
            WHERE date = $1
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save(&self, entry: &DiaryEntry) -> Result<(), sqlx::Error> {
        upsert_entry(&self.pool, entry).await
    }

    async fn save_with_weather(
        &self,
        entry: &DiaryEntry,
        weather: &WeatherRecord,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        upsert_weather(&mut *tx, weather).await?;
        upsert_entry(&mut *tx, entry).await?;
        tx.commit().await
    }

    async fn delete_all_by_date(&self, date: NaiveDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diary WHERE date = $1")
            .bind(date)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }
}
