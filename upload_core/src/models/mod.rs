pub mod files;
pub mod request;

pub use files::{
    ClearResponse, FileListResponse, FileView, StageResponse, SubmitFilesRequest,
    ValidationRulesResponse,
};
pub use request::ApiResponse;
