//! In-memory collection of simulated files and the active stage marker

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::events::UploadEvent;
use super::stage::PipelineStage;
use crate::error::{AppError, Result};
use crate::files::{FileId, FileStatus, SimulatedFile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStats {
    pub total: usize,
    pub success: usize,
    pub error: usize,
    pub in_progress: usize,
}

/// Every mutation publishes the matching [`UploadEvent`].
#[derive(Clone)]
pub struct FileRegistry {
    files: Arc<RwLock<Vec<SimulatedFile>>>,
    active_stage: Arc<RwLock<Option<PipelineStage>>>,
    events: broadcast::Sender<UploadEvent>,
}

impl FileRegistry {
    pub fn new(event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));

        Self {
            files: Arc::new(RwLock::new(Vec::new())),
            active_stage: Arc::new(RwLock::new(None)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: UploadEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub fn insert(&self, file: SimulatedFile) {
        self.files.write().push(file.clone());
        self.publish(UploadEvent::FileAdded(file));
    }

    /// Applies `change` to the record with `id`. Returns false when the record
    /// no longer exists.
    pub fn update<F>(&self, id: &FileId, change: F) -> bool
    where
        F: FnOnce(&mut SimulatedFile),
    {
        let updated = {
            let mut files = self.files.write();
            match files.iter_mut().find(|f| &f.id == id) {
                Some(file) => {
                    change(file);
                    Some(file.clone())
                }
                None => None,
            }
        };

        match updated {
            Some(file) => {
                self.publish(UploadEvent::FileUpdated(file));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &FileId) -> Option<SimulatedFile> {
        self.files.read().iter().find(|f| &f.id == id).cloned()
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.files.read().iter().any(|f| &f.id == id)
    }

    /// Records in submission order.
    pub fn snapshot(&self) -> Vec<SimulatedFile> {
        self.files.read().clone()
    }

    pub fn remove(&self, id: &FileId) -> Result<SimulatedFile> {
        let removed = {
            let mut files = self.files.write();
            let index = files
                .iter()
                .position(|f| &f.id == id)
                .ok_or_else(|| AppError::NotFound(format!("File with id {} not found", id)))?;
            files.remove(index)
        };

        self.publish(UploadEvent::FileRemoved { id: removed.id.clone() });
        Ok(removed)
    }

    pub fn clear(&self) -> usize {
        let count = {
            let mut files = self.files.write();
            let count = files.len();
            files.clear();
            count
        };

        self.publish(UploadEvent::FilesCleared { count });
        count
    }

    pub fn active_stage(&self) -> Option<PipelineStage> {
        *self.active_stage.read()
    }

    pub fn set_active_stage(&self, stage: Option<PipelineStage>) {
        *self.active_stage.write() = stage;
        self.publish(UploadEvent::StageChanged { stage });
    }

    pub fn stats(&self) -> UploadStats {
        let files = self.files.read();
        let count = |status: FileStatus| files.iter().filter(|f| f.status == status).count();

        UploadStats {
            total: files.len(),
            success: count(FileStatus::Success),
            error: count(FileStatus::Error),
            in_progress: files.iter().filter(|f| f.status.is_in_progress()).count(),
        }
    }
}

impl Default for FileRegistry {
    fn default() -> Self {
        Self::new(1024)
    }
}
