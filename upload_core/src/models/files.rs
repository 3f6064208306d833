//! Request and response bodies of the file endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::files::{
    category, display_name, format_file_size, status_label, FileCategory, FileDescriptor,
    SimulatedFile, ValidationConfig,
};
use crate::locale::Locale;
use crate::upload::{PipelineStage, UploadStats};

pub const MAX_FILES_PER_SUBMISSION: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitFilesRequest {
    #[validate(length(min = 1, max = 100, message = "Between 1 and 100 files can be submitted at once"))]
    pub files: Vec<FileDescriptor>,
}

impl SubmitFilesRequest {
    /// Checks the batch and every descriptor in it.
    pub fn validate_all(&self) -> Result<()> {
        self.validate()?;
        for descriptor in &self.files {
            descriptor.validate()?;
        }
        Ok(())
    }
}

/// A file record together with its localized display metadata.
#[derive(Debug, Serialize)]
pub struct FileView {
    #[serde(flatten)]
    pub file: SimulatedFile,
    pub display_name: Option<&'static str>,
    pub category: FileCategory,
    pub icon: &'static str,
    pub size_label: String,
    pub status_label: String,
}

impl FileView {
    pub fn new(file: SimulatedFile, locale: Locale) -> Self {
        let category = category(&file.media_type);

        Self {
            display_name: display_name(&file.media_type, locale),
            category,
            icon: category.icon(),
            size_label: format_file_size(file.size),
            status_label: status_label(&file, locale),
            file,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<FileView>,
    pub active_stage: Option<PipelineStage>,
    pub stats: UploadStats,
    pub busy: bool,
}

#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub active_stage: Option<PipelineStage>,
    pub label: Option<&'static str>,
    pub description: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize)]
pub struct AllowedType {
    pub media_type: String,
    pub name: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ValidationRulesResponse {
    pub max_size_bytes: u64,
    pub max_size: String,
    pub allowed_types: Vec<AllowedType>,
}

impl From<&ValidationConfig> for ValidationRulesResponse {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            max_size_bytes: config.max_size_bytes,
            max_size: format_file_size(config.max_size_bytes),
            allowed_types: config
                .allowed_types
                .iter()
                .map(|media_type| AllowedType {
                    media_type: media_type.clone(),
                    name: display_name(media_type, config.locale),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_limits() {
        let empty = SubmitFilesRequest { files: vec![] };
        assert!(empty.validate_all().is_err());

        let ok = SubmitFilesRequest {
            files: vec![FileDescriptor::new("a.png", 10, "image/png")],
        };
        assert!(ok.validate_all().is_ok());

        let unnamed = SubmitFilesRequest {
            files: vec![FileDescriptor::new("", 10, "image/png")],
        };
        assert!(unnamed.validate_all().is_err());

        let too_many = SubmitFilesRequest {
            files: (0..=MAX_FILES_PER_SUBMISSION)
                .map(|i| FileDescriptor::new(format!("{i}.txt"), 1, "text/plain"))
                .collect(),
        };
        assert!(too_many.validate_all().is_err());
    }

    #[test]
    fn test_file_view_metadata() {
        let file = SimulatedFile::new(FileDescriptor::new("report.pdf", 1536, "application/pdf"));
        let view = FileView::new(file.clone(), Locale::It);

        assert_eq!(view.display_name, Some("Documento PDF"));
        assert_eq!(view.category, FileCategory::Document);
        assert_eq!(view.icon, "📄");
        assert_eq!(view.size_label, "1.5 KB");
        assert_eq!(view.status_label, "In attesa...");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], file.id.to_string());
        assert_eq!(json["type"], "application/pdf");
        assert_eq!(json["category"], "document");

        let unknown = FileView::new(
            SimulatedFile::new(FileDescriptor::new("a.zip", 1, "application/zip")),
            Locale::En,
        );
        assert_eq!(unknown.display_name, None);
        assert_eq!(unknown.category, FileCategory::Unknown);
        assert_eq!(unknown.status_label, "Waiting...");
    }

    #[test]
    fn test_validation_rules_response() {
        let rules = ValidationRulesResponse::from(&ValidationConfig::default());
        assert_eq!(rules.max_size, "10 MB");
        assert_eq!(rules.allowed_types.len(), 8);
        assert!(rules
            .allowed_types
            .iter()
            .any(|t| t.media_type == "image/png" && t.name == Some("Immagine PNG")));
    }
}
