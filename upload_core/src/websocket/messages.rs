use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::files::{FileId, SimulatedFile};
use crate::upload::{PipelineStage, UploadEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    Connected { connection_id: Uuid },
    Snapshot {
        files: Vec<SimulatedFile>,
        active_stage: Option<PipelineStage>,
    },
    FileAdded(SimulatedFile),
    FileUpdated(SimulatedFile),
    FileRemoved { id: FileId },
    FilesCleared { count: usize },
    StageChanged { stage: Option<PipelineStage> },
    Lagged { skipped: u64 },
    Ping,
    Pong,
    Error { message: String },
}

impl From<UploadEvent> for WebSocketMessage {
    fn from(event: UploadEvent) -> Self {
        match event {
            UploadEvent::FileAdded(file) => WebSocketMessage::FileAdded(file),
            UploadEvent::FileUpdated(file) => WebSocketMessage::FileUpdated(file),
            UploadEvent::FileRemoved { id } => WebSocketMessage::FileRemoved { id },
            UploadEvent::FilesCleared { count } => WebSocketMessage::FilesCleared { count },
            UploadEvent::StageChanged { stage } => WebSocketMessage::StageChanged { stage },
        }
    }
}

impl WebSocketMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileDescriptor;

    #[test]
    fn test_event_conversion() {
        let file = SimulatedFile::new(FileDescriptor::new("a.gif", 5, "image/gif"));
        let message = WebSocketMessage::from(UploadEvent::FileAdded(file.clone()));
        assert_eq!(message, WebSocketMessage::FileAdded(file));

        let message = WebSocketMessage::from(UploadEvent::StageChanged { stage: None });
        assert_eq!(message.to_json().unwrap(), r#"{"type":"StageChanged","data":{"stage":null}}"#);
    }

    #[test]
    fn test_ping_parsing() {
        let message = WebSocketMessage::from_json(r#"{"type":"Ping"}"#).unwrap();
        assert_eq!(message, WebSocketMessage::Ping);
        assert!(WebSocketMessage::from_json("not json").is_err());
    }
}
