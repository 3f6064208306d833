use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Illustrative pipeline step highlighted while a file is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Intake,
    Validation,
    Transfer,
    Storage,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 4] = [
        PipelineStage::Intake,
        PipelineStage::Validation,
        PipelineStage::Transfer,
        PipelineStage::Storage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Intake => "Browser",
            PipelineStage::Validation => "Frontend",
            PipelineStage::Transfer => "Backend",
            PipelineStage::Storage => "Storage",
        }
    }

    pub fn description(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (PipelineStage::Intake, Locale::It) => "L'utente seleziona i file",
            (PipelineStage::Intake, Locale::En) => "The user selects the files",
            (PipelineStage::Validation, Locale::It) => "Validazione client-side",
            (PipelineStage::Validation, Locale::En) => "Client-side validation",
            (PipelineStage::Transfer, Locale::It) => "Elaborazione del file",
            (PipelineStage::Transfer, Locale::En) => "File processing",
            (PipelineStage::Storage, Locale::It) => "Salvataggio persistente",
            (PipelineStage::Storage, Locale::En) => "Persistent storage",
        }
    }
}
