//! Endpoint handlers
//!
//! - `GET /` and `GET /about`: static messages
//! - `GET /view`: the stored mapping, unmodified
//! - `GET /patient/:id`: one record with derived fields
//! - `GET /sort`: every record ordered by `sort_by`/`order`
//! - `POST /create`: validate and store a new record

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::core::registry::PatientRegistry;
use crate::domain::{MaterializedRecord, PatientTable};

/// Body of every plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// `GET /`
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Patient management system Api",
    })
}

/// `GET /about`
pub async fn about() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "This is a Patient management system backend",
    })
}

/// `GET /view`
pub async fn view(State(registry): State<PatientRegistry>) -> Result<Json<PatientTable>, ApiError> {
    let table = registry.list_all().await?;
    Ok(Json(table))
}

/// `GET /patient/:id`
pub async fn patient(
    State(registry): State<PatientRegistry>,
    Path(patient_id): Path<String>,
) -> Result<Json<MaterializedRecord>, ApiError> {
    let record = registry.get_by_id(&patient_id).await?;
    Ok(Json(record))
}

/// `GET /sort?sort_by=<field>&order=<asc|desc>`
pub async fn sort(
    State(registry): State<PatientRegistry>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<MaterializedRecord>>, ApiError> {
    let records = registry
        .sort_by(params.sort_by.as_deref(), params.order.as_deref())
        .await?;
    Ok(Json(records))
}

/// `POST /create`
///
/// Body-level rejections (bad JSON, wrong content type) map to 400; field
/// checks happen in the record model so every violation is reported at once.
pub async fn create(
    State(registry): State<PatientRegistry>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(candidate) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected create body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    registry.create(&candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Patient created successfully",
        }),
    ))
}
