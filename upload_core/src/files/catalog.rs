//! Display metadata for media types and human-readable sizes

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::{FileStatus, SimulatedFile};
use super::validation::media_type_essence;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    Text,
    Unknown,
}

impl FileCategory {
    pub fn icon(&self) -> &'static str {
        match self {
            FileCategory::Image => "🖼️",
            FileCategory::Document => "📄",
            FileCategory::Text => "📝",
            FileCategory::Unknown => "📎",
        }
    }
}

struct TypeInfo {
    name_it: &'static str,
    name_en: &'static str,
    category: FileCategory,
}

lazy_static! {
    static ref KNOWN_TYPES: HashMap<&'static str, TypeInfo> = {
        let mut m = HashMap::new();
        m.insert("image/jpeg", TypeInfo { name_it: "Immagine JPEG", name_en: "JPEG image", category: FileCategory::Image });
        m.insert("image/png", TypeInfo { name_it: "Immagine PNG", name_en: "PNG image", category: FileCategory::Image });
        m.insert("image/gif", TypeInfo { name_it: "Immagine GIF", name_en: "GIF image", category: FileCategory::Image });
        m.insert("image/webp", TypeInfo { name_it: "Immagine WebP", name_en: "WebP image", category: FileCategory::Image });
        m.insert("application/pdf", TypeInfo { name_it: "Documento PDF", name_en: "PDF document", category: FileCategory::Document });
        m.insert("text/plain", TypeInfo { name_it: "File di testo", name_en: "Text file", category: FileCategory::Text });
        m.insert("application/msword", TypeInfo { name_it: "Documento Word", name_en: "Word document", category: FileCategory::Document });
        m.insert(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            TypeInfo { name_it: "Documento Word", name_en: "Word document", category: FileCategory::Document },
        );
        m
    };
}

fn lookup(media_type: &str) -> Option<&'static TypeInfo> {
    let essence = media_type_essence(media_type)?;
    KNOWN_TYPES.get(essence.as_str())
}

pub fn display_name(media_type: &str, locale: Locale) -> Option<&'static str> {
    lookup(media_type).map(|info| match locale {
        Locale::It => info.name_it,
        Locale::En => info.name_en,
    })
}

pub fn category(media_type: &str) -> FileCategory {
    lookup(media_type)
        .map(|info| info.category)
        .unwrap_or(FileCategory::Unknown)
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

pub fn status_label(file: &SimulatedFile, locale: Locale) -> String {
    match (file.status, locale) {
        (FileStatus::Pending, Locale::It) => "In attesa...".to_string(),
        (FileStatus::Pending, Locale::En) => "Waiting...".to_string(),
        (FileStatus::Validating, Locale::It) => "Validazione...".to_string(),
        (FileStatus::Validating, Locale::En) => "Validating...".to_string(),
        (FileStatus::Uploading, Locale::It) => format!("Caricamento {}%", file.progress),
        (FileStatus::Uploading, Locale::En) => format!("Uploading {}%", file.progress),
        (FileStatus::Success, Locale::It) => "Caricato".to_string(),
        (FileStatus::Success, Locale::En) => "Uploaded".to_string(),
        (FileStatus::Error, _) => file.error_message.clone().unwrap_or_else(|| match locale {
            Locale::It => "Errore".to_string(),
            Locale::En => "Error".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::models::FileDescriptor;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(2_000_000), "1.91 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_display_names_and_categories() {
        assert_eq!(display_name("image/png", Locale::It), Some("Immagine PNG"));
        assert_eq!(display_name("application/pdf", Locale::En), Some("PDF document"));
        assert_eq!(display_name("application/zip", Locale::It), None);

        assert_eq!(category("image/webp"), FileCategory::Image);
        assert_eq!(category("text/plain; charset=utf-8"), FileCategory::Text);
        assert_eq!(category("application/msword"), FileCategory::Document);
        assert_eq!(category("application/zip"), FileCategory::Unknown);
        assert_eq!(FileCategory::Unknown.icon(), "📎");
    }

    #[test]
    fn test_status_labels() {
        let mut file = SimulatedFile::new(FileDescriptor::new("a.png", 10, "image/png"));
        assert_eq!(status_label(&file, Locale::It), "In attesa...");

        file.start_upload();
        file.advance(45);
        assert_eq!(status_label(&file, Locale::It), "Caricamento 45%");
        assert_eq!(status_label(&file, Locale::En), "Uploading 45%");

        file.status = FileStatus::Error;
        assert_eq!(status_label(&file, Locale::It), "Errore");
    }
}
