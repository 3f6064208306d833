use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, Result},
    extractors::ApiJson,
    files::FileId,
    models::{
        ApiResponse, ClearResponse, FileListResponse, FileView, StageResponse,
        SubmitFilesRequest, ValidationRulesResponse,
    },
    AppState,
};

pub async fn list_files(State(state): State<AppState>) -> impl IntoResponse {
    let simulator = &state.simulator;
    let locale = simulator.validation_config().locale;

    Json(ApiResponse::success(FileListResponse {
        files: simulator
            .files()
            .into_iter()
            .map(|file| FileView::new(file, locale))
            .collect(),
        active_stage: simulator.active_stage(),
        stats: simulator.stats(),
        busy: simulator.is_busy(),
    }))
}

pub async fn submit_files(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitFilesRequest>,
) -> Result<impl IntoResponse> {
    request.validate_all()?;

    info!("POST /api/files - {} descriptor(s)", request.files.len());

    let registered = state.simulator.submit(request.files)?;
    let message = format!("{} file(s) queued", registered.len());

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(registered).with_message(message)),
    ))
}

pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = FileId::from(id);
    let file = state
        .simulator
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("File with id {} not found", id)))?;

    let locale = state.simulator.validation_config().locale;
    Ok(Json(ApiResponse::success(FileView::new(file, locale))))
}

pub async fn remove_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    info!("DELETE /api/files/{}", id);

    let removed = state.simulator.remove(&FileId::from(id))?;
    Ok(Json(ApiResponse::success(removed)))
}

pub async fn clear_files(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/files");

    let removed = state.simulator.clear();
    Json(ApiResponse::success(ClearResponse { removed }))
}

pub async fn get_stage(State(state): State<AppState>) -> impl IntoResponse {
    let stage = state.simulator.active_stage();
    let locale = state.simulator.validation_config().locale;

    Json(ApiResponse::success(StageResponse {
        active_stage: stage,
        label: stage.map(|s| s.label()),
        description: stage.map(|s| s.description(locale)),
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.simulator.stats()))
}

pub async fn get_validation_rules(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(ValidationRulesResponse::from(
        state.simulator.validation_config(),
    )))
}
