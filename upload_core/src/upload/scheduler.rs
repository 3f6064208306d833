//! Delay abstraction for the simulated pipeline

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Source of the artificial waits between pipeline steps.
#[async_trait]
pub trait Scheduler: Send + Sync + 'static {
    async fn delay(&self, duration: Duration);
}

/// Real wall-clock waits
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Skips every wait; only yields back to the runtime.
#[derive(Debug, Clone, Default)]
pub struct InstantScheduler;

#[async_trait]
impl Scheduler for InstantScheduler {
    async fn delay(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Instant scheduler that remembers every requested delay, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingScheduler {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }

    pub fn total(&self) -> Duration {
        self.delays.lock().iter().sum()
    }
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn delay(&self, duration: Duration) {
        self.delays.lock().push(duration);
        tokio::task::yield_now().await;
    }
}
