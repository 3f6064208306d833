pub mod catalog;
pub mod models;
pub mod validation;

pub use catalog::{category, display_name, format_file_size, status_label, FileCategory};
pub use models::{FailureReason, FileDescriptor, FileId, FileStatus, SimulatedFile};
pub use validation::{media_type_essence, FileValidator, ValidationConfig, ValidationFailure};
