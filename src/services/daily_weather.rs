//! Once-a-day refresh of the weather cache.
//!
//! Uses `tokio-cron-scheduler`; the cron expression has a leading seconds
//! field (`0 0 1 * * *` = 01:00 every day, UTC).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::db::WeatherStore;
use crate::error::AppResult;
use crate::models::weather::WeatherRecord;
use crate::services::weather::WeatherService;

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    Saved(WeatherRecord),
    /// A previous run was still in flight.
    Skipped,
}

pub struct DailyWeatherJob {
    weather: WeatherService,
    store: Arc<dyn WeatherStore>,
    running: AtomicBool,
}

/// Flips the job back to idle however the run ends.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DailyWeatherJob {
    pub fn new(weather: WeatherService, store: Arc<dyn WeatherStore>) -> Self {
        Self {
            weather,
            store,
            running: AtomicBool::new(false),
        }
    }

    /// Fetches current weather and stores it under today's date.
    pub async fn run_once(&self) -> AppResult<RunOutcome> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(RunOutcome::Skipped);
        }
        let _guard = RunningGuard(&self.running);

        let snapshot = self.weather.current().await?;
        let record = WeatherRecord::new(Utc::now().date_naive(), snapshot);
        self.store.save(&record).await?;

        Ok(RunOutcome::Saved(record))
    }

    /// Scheduler entry point: failures are logged and the run is skipped.
    pub async fn trigger(&self) {
        match self.run_once().await {
            Ok(RunOutcome::Saved(record)) => {
                tracing::info!(
                    date = %record.date,
                    condition = %record.snapshot.condition,
                    temperature = record.snapshot.temperature,
                    "Daily weather saved"
                );
            }
            Ok(RunOutcome::Skipped) => {
                tracing::warn!("Daily weather job still running, skipping trigger");
            }
            Err(e) => {
                tracing::error!(error = %e, "Daily weather job failed, skipping this run");
            }
        }
    }
}

/// Registers the job on a new scheduler and starts it. The returned handle
/// must be kept alive for as long as the job should keep firing.
pub async fn schedule(
    job: Arc<DailyWeatherJob>,
    cron_expression: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let task = Job::new_async(cron_expression, move |_uuid, _lock| {
        let job = Arc::clone(&job);
        Box::pin(async move {
            job.trigger().await;
        })
    })?;

    scheduler.add(task).await?;
    scheduler.start().await?;

    tracing::info!(cron = %cron_expression, "Daily weather job scheduled");
    Ok(scheduler)
}
