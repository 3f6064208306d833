use mime::Mime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::models::{FailureReason, FileDescriptor};
use crate::locale::Locale;

pub const DEFAULT_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_TYPES: [&str; 8] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A rejected file: the reason tag plus a message in the configured locale.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationFailure {
    pub reason: FailureReason,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub max_size_bytes: u64,
    pub allowed_types: BTreeSet<String>,
    #[serde(default)]
    pub locale: Locale,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            locale: Locale::default(),
        }
    }
}

impl ValidationConfig {
    pub fn max_size_mb(&self) -> f64 {
        self.max_size_bytes as f64 / BYTES_PER_MB
    }
}

/// Reduces a declared media type to its lowercase essence, dropping parameters.
pub fn media_type_essence(media_type: &str) -> Option<String> {
    media_type
        .trim()
        .parse::<Mime>()
        .ok()
        .map(|mime| mime.essence_str().to_ascii_lowercase())
}

#[derive(Debug, Clone)]
pub struct FileValidator {
    config: ValidationConfig,
    allowed: BTreeSet<String>,
}

impl FileValidator {
    pub fn new(config: ValidationConfig) -> Self {
        let allowed = config
            .allowed_types
            .iter()
            .filter_map(|t| media_type_essence(t))
            .collect();

        Self { config, allowed }
    }

    pub fn with_default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Media type is checked before size, so a disallowed type wins over an
    /// oversized file.
    pub fn validate(&self, descriptor: &FileDescriptor) -> Result<(), ValidationFailure> {
        self.validate_media_type(&descriptor.media_type)?;
        self.validate_size(descriptor.size)?;
        Ok(())
    }

    pub fn is_allowed_type(&self, media_type: &str) -> bool {
        media_type_essence(media_type)
            .map(|essence| self.allowed.contains(&essence))
            .unwrap_or(false)
    }

    fn validate_media_type(&self, media_type: &str) -> Result<(), ValidationFailure> {
        if self.is_allowed_type(media_type) {
            return Ok(());
        }

        let message = match self.config.locale {
            Locale::It => "Tipo di file non supportato. Tipi consentiti: immagini, PDF, documenti.".to_string(),
            Locale::En => "Unsupported file type. Allowed types: images, PDF, documents.".to_string(),
        };

        Err(ValidationFailure {
            reason: FailureReason::Type,
            message,
        })
    }

    fn validate_size(&self, size: u64) -> Result<(), ValidationFailure> {
        if size <= self.config.max_size_bytes {
            return Ok(());
        }

        let max_mb = self.config.max_size_mb();
        let message = match self.config.locale {
            Locale::It => format!("File troppo grande. Dimensione massima: {}MB", max_mb),
            Locale::En => format!("File too large. Maximum size: {}MB", max_mb),
        };

        Err(ValidationFailure {
            reason: FailureReason::Size,
            message,
        })
    }
}
