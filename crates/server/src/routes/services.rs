use axum::extract::{Path, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

use models::results::{DeleteResponse, InsertResponse};

use crate::auth::ServerState;
use crate::errors::ApiError;

/// Full scan of the services collection; no filter, no pagination.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Document>>, ApiError> {
    let cursor = state.store.services.find(doc! {}).await?;
    let services: Vec<Document> = cursor.try_collect().await?;
    Ok(Json(services))
}

/// Lookup by id; an unknown id answers `null`. The id is handed to
/// the store layer unvalidated, so a malformed one is a 500.
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, ApiError> {
    let query = doc! { "_id": ObjectId::parse_str(&id)? };
    let service = state.store.services.find_one(query).await?;
    Ok(Json(service))
}

/// Insert the posted document verbatim; no required-fields check.
pub async fn create(
    State(state): State<ServerState>,
    Json(new_service): Json<Document>,
) -> Result<Json<InsertResponse>, ApiError> {
    let result = state.store.services.insert_one(new_service).await?;
    Ok(Json(result.into()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let query = doc! { "_id": ObjectId::parse_str(&id)? };
    let result = state.store.services.delete_one(query).await?;
    Ok(Json(result.into()))
}
