use serde::{Deserialize, Serialize};

/// Language used for user-facing messages and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    It,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::It => "it",
            Locale::En => "en",
        }
    }
}
