use crate::dtos::{RecordListResponse, RecordRequest, RecordResponse};
use crate::models::Record;
use crate::services::{metrics, RecordFilter, RecordUpdate};
use crate::startup::AppState;
use crate::utils::{RecordId, ValidatedJson};
use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;

fn not_found(id: &RecordId) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Record not found: {}", id.0))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_record(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let record = Record::new(request.name, request.surname);

    state.store.insert(&record).await?;

    metrics::record_created();
    tracing::info!(record_id = %record.id, "Record created");

    Ok(Json(RecordResponse::from(record)))
}

#[tracing::instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<RecordListResponse>, AppError> {
    let records = state.store.list().await?;
    Ok(Json(RecordListResponse::from(records)))
}

#[tracing::instrument(skip(state))]
pub async fn get_record(
    State(state): State<AppState>,
    id: RecordId,
) -> Result<Json<RecordResponse>, AppError> {
    state
        .store
        .find_one(&RecordFilter::by_id(id.0))
        .await?
        .map(|record| Json(RecordResponse::from(record)))
        .ok_or_else(|| not_found(&id))
}

#[tracing::instrument(skip(state, request))]
pub async fn update_record(
    State(state): State<AppState>,
    id: RecordId,
    ValidatedJson(request): ValidatedJson<RecordRequest>,
) -> Result<StatusCode, AppError> {
    let update = RecordUpdate::set_name_surname(request.name, request.surname);

    let matched = state
        .store
        .update_one(&RecordFilter::by_id(id.0), &update)
        .await?;
    if !matched {
        return Err(not_found(&id));
    }

    metrics::record_updated();
    tracing::info!(record_id = %id.0, "Record updated");

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn delete_record(
    State(state): State<AppState>,
    id: RecordId,
) -> Result<StatusCode, AppError> {
    let deleted = state.store.delete_one(&RecordFilter::by_id(id.0)).await?;
    if !deleted {
        return Err(not_found(&id));
    }

    metrics::record_deleted();
    tracing::info!(record_id = %id.0, "Record deleted");

    Ok(StatusCode::NO_CONTENT)
}
