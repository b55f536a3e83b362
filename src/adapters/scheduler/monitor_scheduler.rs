//! MonitorScheduler - runs the door monitor on a fixed interval.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 300s | Time between poll cycles |
//!
//! ## Graceful Shutdown
//!
//! The loop exits when the watch channel flips to `true`. A cycle already in
//! progress finishes first; store and notifier deadlines keep that wait bounded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::application::{DoorMonitor, MonitorReport};
use crate::config::MonitorConfig;

#[derive(Debug, Clone)]
pub struct MonitorSchedulerConfig {
    pub poll_interval: Duration,
}

impl Default for MonitorSchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(300),
        }
    }
}

impl MonitorSchedulerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl From<&MonitorConfig> for MonitorSchedulerConfig {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
        }
    }
}

/// Background service that triggers poll cycles.
pub struct MonitorScheduler {
    monitor: Arc<DoorMonitor>,
    config: MonitorSchedulerConfig,
}

impl MonitorScheduler {
    pub fn new(monitor: Arc<DoorMonitor>, config: MonitorSchedulerConfig) -> Self {
        Self { monitor, config }
    }

    /// Run the poll loop until the shutdown signal is received.
    ///
    /// Returns the number of cycles that completed successfully.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> usize {
        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut completed = 0;

        tracing::info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "Door monitor started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!(completed, "Door monitor stopped");
                        return completed;
                    }
                }

                _ = interval.tick() => {
                    if self.poll_once().await.is_some() {
                        completed += 1;
                    }
                }
            }
        }
    }

    /// Run exactly one cycle, logging a failure instead of returning it.
    pub async fn poll_once(&self) -> Option<MonitorReport> {
        match self.monitor.poll().await {
            Ok(report) => {
                tracing::info!(
                    status = %report.status,
                    transitioned = report.transitioned,
                    notification = ?report.notification,
                    "Monitor cycle completed"
                );
                Some(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Monitor cycle failed");
                None
            }
        }
    }
}
