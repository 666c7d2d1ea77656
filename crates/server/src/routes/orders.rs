use axum::extract::{Query, State};
use axum::{Extension, Json};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;
use serde_json::Value;

use models::results::InsertResponse;

use crate::auth::{AuthClaims, ServerState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub email: Option<String>,
}

/// Insert the posted order verbatim. Ordering is public; only reads
/// are gated.
pub async fn create(
    State(state): State<ServerState>,
    Json(order): Json<Document>,
) -> Result<Json<InsertResponse>, ApiError> {
    let result = state.store.orders.insert_one(order).await?;
    Ok(Json(result.into()))
}

/// Owner-scoped listing: the verified token's `email` claim must equal
/// the `email` query parameter, otherwise the request is rejected
/// before any store query runs. Only two absent emails compare equal
/// (and query a null owner field); a claim of any non-string shape is
/// a mismatch, never an absence.
pub async fn list_by_email(
    State(state): State<ServerState>,
    Extension(AuthClaims(claims)): Extension<AuthClaims>,
    Query(params): Query<OrderQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let authorized = match (claims.get("email"), params.email.as_deref()) {
        (None, None) => true,
        (Some(Value::String(claim)), Some(param)) => claim.as_str() == param,
        _ => false,
    };
    if !authorized {
        return Err(ApiError::Forbidden);
    }

    let filter = match params.email {
        Some(email) => doc! { "email": email },
        None => doc! { "email": Bson::Null },
    };
    let orders: Vec<Document> = state.store.orders.find(filter).await?.try_collect().await?;
    Ok(Json(orders))
}
