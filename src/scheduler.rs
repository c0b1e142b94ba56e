use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Work the scheduler can run repeatedly. Implementations know nothing about timing.
#[async_trait]
pub trait PeriodicTask: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobInfo {
    pub name: String,
    pub interval_secs: u64,
    pub state: JobState,
    pub last_run: Option<DateTime<Utc>>,
    pub run_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub last_error: Option<String>,
}

struct ScheduledJob {
    task: Box<dyn PeriodicTask>,
    interval: Duration,
    next_due: Instant,
    info: JobInfo,
}

/// Polls registered tasks at a coarse tick and runs whichever are due.
///
/// A newly registered task is due immediately. After a run finishes the task
/// becomes due again one interval later, so runs of the same task never
/// overlap and missed intervals are not replayed.
pub struct AlertScheduler {
    jobs: Vec<ScheduledJob>,
    poll_interval: Duration,
}

impl AlertScheduler {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            jobs: Vec::new(),
            poll_interval,
        }
    }

    pub fn register(&mut self, task: Box<dyn PeriodicTask>, interval: Duration) {
        let info = JobInfo {
            name: task.name().to_string(),
            interval_secs: interval.as_secs(),
            state: JobState::Idle,
            last_run: None,
            run_count: 0,
            success_count: 0,
            error_count: 0,
            last_error: None,
        };

        tracing::info!("Registered task {} every {:?}", info.name, interval);
        self.jobs.push(ScheduledJob {
            task,
            interval,
            next_due: Instant::now(),
            info,
        });
    }

    /// Runs every due task once, in registration order. Returns how many ran.
    pub async fn tick(&mut self) -> usize {
        let mut ran = 0;

        for job in self.jobs.iter_mut() {
            if Instant::now() < job.next_due {
                continue;
            }

            job.info.state = JobState::Running;
            job.info.last_run = Some(Utc::now());
            job.info.run_count += 1;
            tracing::debug!("Starting task {}", job.info.name);

            match job.task.run().await {
                Ok(()) => {
                    job.info.success_count += 1;
                    job.info.last_error = None;
                }
                Err(e) => {
                    tracing::error!("Task {} failed: {:#}", job.info.name, e);
                    job.info.error_count += 1;
                    job.info.last_error = Some(e.to_string());
                }
            }

            job.info.state = JobState::Idle;
            job.next_due = Instant::now() + job.interval;
            ran += 1;
        }

        ran
    }

    /// Ticks forever, sleeping `poll_interval` between polls.
    pub async fn run_forever(&mut self) {
        tracing::info!(
            "Scheduler running {} task(s), polling every {:?}",
            self.jobs.len(),
            self.poll_interval
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    pub fn get_job_info(&self, name: &str) -> Option<JobInfo> {
        self.jobs
            .iter()
            .find(|job| job.info.name == name)
            .map(|job| job.info.clone())
    }

    pub fn list_jobs(&self) -> Vec<JobInfo> {
        self.jobs.iter().map(|job| job.info.clone()).collect()
    }
}
