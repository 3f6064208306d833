use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use super::events::UploadEvent;
use super::registry::{FileRegistry, UploadStats};
use super::scheduler::Scheduler;
use super::stage::PipelineStage;
use super::timings::SimulationTimings;
use super::transfer::TransferSchedule;
use crate::error::{AppError, Result};
use crate::files::{FileDescriptor, FileId, FileValidator, SimulatedFile, ValidationConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub validation: ValidationConfig,
    pub timings: SimulationTimings,
    pub event_capacity: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            timings: SimulationTimings::default(),
            event_capacity: 1024,
        }
    }
}

/// Handle to the simulated upload pipeline.
///
/// Submitted files are registered as pending right away and queued for a
/// single background worker, which takes them one at a time, in submission
/// order, through validation, transfer and storage. Cloning the handle is
/// cheap; the worker stops once every handle has been dropped.
#[derive(Clone)]
pub struct UploadSimulator {
    registry: FileRegistry,
    validator: Arc<FileValidator>,
    timings: Arc<SimulationTimings>,
    queue: mpsc::UnboundedSender<FileId>,
    outstanding: Arc<watch::Sender<usize>>,
}

impl UploadSimulator {
    /// Spawns the worker on the current tokio runtime.
    pub fn start(config: SimulatorConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        let registry = FileRegistry::new(config.event_capacity);
        let validator = Arc::new(FileValidator::new(config.validation));
        let timings = Arc::new(config.timings);
        let (queue, queue_receiver) = mpsc::unbounded_channel();
        let (outstanding, _) = watch::channel(0usize);
        let outstanding = Arc::new(outstanding);

        let worker = SequencerWorker {
            registry: registry.clone(),
            validator: validator.clone(),
            timings: timings.clone(),
            scheduler,
            queue: queue_receiver,
            outstanding: outstanding.clone(),
        };

        tokio::spawn(async move {
            worker.run().await;
        });

        info!("Upload simulator started");

        Self {
            registry,
            validator,
            timings,
            queue,
            outstanding,
        }
    }

    /// Registers every descriptor as a pending record and queues it.
    pub fn submit(&self, descriptors: Vec<FileDescriptor>) -> Result<Vec<SimulatedFile>> {
        if self.queue.is_closed() {
            return Err(AppError::Other(anyhow::anyhow!("upload sequencer is not running")));
        }

        let mut registered = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let file = SimulatedFile::new(descriptor);
            debug!(file_id = %file.id, name = %file.name, size = file.size, "file registered");

            self.registry.insert(file.clone());
            self.outstanding.send_modify(|n| *n += 1);
            if self.queue.send(file.id.clone()).is_err() {
                self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
                return Err(AppError::Other(anyhow::anyhow!("upload sequencer stopped")));
            }
            registered.push(file);
        }

        info!("Queued {} file(s) for simulated upload", registered.len());
        Ok(registered)
    }

    pub fn remove(&self, id: &FileId) -> Result<SimulatedFile> {
        let removed = self.registry.remove(id)?;
        info!(file_id = %id, "file removed");
        Ok(removed)
    }

    pub fn clear(&self) -> usize {
        let count = self.registry.clear();
        info!("Cleared {} file(s)", count);
        count
    }

    pub fn files(&self) -> Vec<SimulatedFile> {
        self.registry.snapshot()
    }

    pub fn get(&self, id: &FileId) -> Option<SimulatedFile> {
        self.registry.get(id)
    }

    pub fn active_stage(&self) -> Option<PipelineStage> {
        self.registry.active_stage()
    }

    pub fn stats(&self) -> UploadStats {
        self.registry.stats()
    }

    pub fn queued(&self) -> usize {
        *self.outstanding.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.queued() > 0 || self.stats().in_progress > 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.registry.subscribe()
    }

    /// Resolves once every queued file has reached a terminal state.
    pub async fn wait_idle(&self) {
        let mut receiver = self.outstanding.subscribe();
        let _ = receiver.wait_for(|n| *n == 0).await;
    }

    pub fn validation_config(&self) -> &ValidationConfig {
        self.validator.config()
    }

    pub fn timings(&self) -> &SimulationTimings {
        &self.timings
    }
}

struct SequencerWorker {
    registry: FileRegistry,
    validator: Arc<FileValidator>,
    timings: Arc<SimulationTimings>,
    scheduler: Arc<dyn Scheduler>,
    queue: mpsc::UnboundedReceiver<FileId>,
    outstanding: Arc<watch::Sender<usize>>,
}

impl SequencerWorker {
    async fn run(mut self) {
        debug!("Sequencer worker started");

        while let Some(id) = self.queue.recv().await {
            self.process(&id).await;
            self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
        }

        debug!("Sequencer worker stopped - queue closed");
    }

    async fn process(&self, id: &FileId) {
        // Removed or cleared while still queued.
        let Some(file) = self.registry.get(id) else {
            debug!(file_id = %id, "skipping file removed before processing");
            return;
        };

        self.registry.set_active_stage(Some(PipelineStage::Intake));
        self.scheduler.delay(self.timings.intake_delay()).await;

        self.registry.update(id, |f| f.start_validation());
        self.registry.set_active_stage(Some(PipelineStage::Validation));
        debug!(file_id = %id, "validating");
        self.scheduler.delay(self.timings.validation_delay()).await;

        if let Err(failure) = self.validator.validate(&file.descriptor()) {
            warn!(file_id = %id, name = %file.name, reason = ?failure.reason, "file rejected: {}", failure);
            self.registry.update(id, |f| f.fail(failure));
            self.registry.set_active_stage(None);
            return;
        }

        self.registry.update(id, |f| f.start_upload());
        self.registry.set_active_stage(Some(PipelineStage::Transfer));

        let schedule = TransferSchedule::for_size(file.size, &self.timings);
        debug!(file_id = %id, duration_ms = schedule.total().as_millis() as u64, "transfer started");

        for tick in schedule.ticks() {
            self.scheduler.delay(tick.delay).await;
            debug!(file_id = %id, step = tick.step, percent = tick.percent, "transfer progress");
            if tick.is_final() {
                self.registry.update(id, |f| f.complete());
            } else {
                self.registry.update(id, |f| f.advance(tick.percent));
            }
        }

        self.registry.set_active_stage(Some(PipelineStage::Storage));
        self.scheduler.delay(self.timings.storage_delay()).await;
        self.registry.set_active_stage(None);

        info!(file_id = %id, name = %file.name, "file uploaded");
    }
}
