//! Simulated file records and their lifecycle transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use super::validation::ValidationFailure;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// What a selection or drop gesture hands over. No content is ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FileDescriptor {
    #[validate(length(min = 1, max = 255, message = "File name must be between 1 and 255 characters"))]
    pub name: String,

    pub size: u64,

    #[serde(rename = "type", default)]
    pub media_type: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Validating,
    Uploading,
    Success,
    Error,
}

impl FileStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileStatus::Success | FileStatus::Error)
    }

    pub fn is_in_progress(&self) -> bool {
        !self.is_terminal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureReason {
    Type,
    Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub media_type: String,
    pub status: FileStatus,
    pub progress: u8,
    pub error: Option<FailureReason>,
    pub error_message: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl SimulatedFile {
    pub fn new(descriptor: FileDescriptor) -> Self {
        Self {
            id: FileId::new(),
            name: descriptor.name,
            size: descriptor.size,
            media_type: descriptor.media_type,
            status: FileStatus::Pending,
            progress: 0,
            error: None,
            error_message: None,
            added_at: Utc::now(),
        }
    }

    pub fn descriptor(&self) -> FileDescriptor {
        FileDescriptor::new(self.name.clone(), self.size, self.media_type.clone())
    }

    pub fn start_validation(&mut self) {
        self.status = FileStatus::Validating;
    }

    pub fn fail(&mut self, failure: ValidationFailure) {
        self.status = FileStatus::Error;
        self.error = Some(failure.reason);
        self.error_message = Some(failure.message);
    }

    pub fn start_upload(&mut self) {
        self.status = FileStatus::Uploading;
    }

    /// Progress only moves forward and stays below 100 until `complete`.
    pub fn advance(&mut self, percent: u8) {
        if self.status != FileStatus::Uploading {
            return;
        }
        self.progress = self.progress.max(percent.min(99));
    }

    pub fn complete(&mut self) {
        self.status = FileStatus::Success;
        self.progress = 100;
    }
}
