use serde::{Deserialize, Serialize};

use super::stage::PipelineStage;
use crate::files::{FileId, SimulatedFile};

/// Change notification published whenever the collection or the active stage
/// marker changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UploadEvent {
    FileAdded(SimulatedFile),
    FileUpdated(SimulatedFile),
    FileRemoved { id: FileId },
    FilesCleared { count: usize },
    StageChanged { stage: Option<PipelineStage> },
}

impl UploadEvent {
    pub fn file(&self) -> Option<&SimulatedFile> {
        match self {
            UploadEvent::FileAdded(file) | UploadEvent::FileUpdated(file) => Some(file),
            _ => None,
        }
    }
}
