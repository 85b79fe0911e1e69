use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::Value;

use common::types::Ack;
use service::interviews::{delete_interview, list_interviews, upsert_interview, InterviewRecord};

use crate::errors::ApiError;

/// Upsert body. `payload` must be a JSON object; anything else is rejected
/// by the extractor before the store is touched.
#[derive(Debug, Deserialize)]
pub struct InterviewIn {
    pub id: String,
    pub payload: serde_json::Map<String, Value>,
}

pub async fn upsert(
    State(db): State<DatabaseConnection>,
    Json(input): Json<InterviewIn>,
) -> Result<Json<Ack>, ApiError> {
    upsert_interview(&db, &input.id, &Value::Object(input.payload)).await?;
    Ok(Json(Ack { success: true }))
}

pub async fn list(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<InterviewRecord>>, ApiError> {
    let records = list_interviews(&db).await?;
    Ok(Json(records))
}

pub async fn remove(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    delete_interview(&db, &id).await?;
    Ok(Json(Ack { success: true }))
}
