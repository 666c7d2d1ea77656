use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde_json::{Map, Value};

use models::db::Store;

use crate::errors::ApiError;

/// Tokens live for a fixed 24 hours; there is no refresh or revocation.
const TOKEN_TTL_HOURS: i64 = 24;

/// Shared handler state: the store handles plus the token secret,
/// built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub store: Store,
    pub auth: AuthSettings,
}

#[derive(Clone)]
pub struct AuthSettings {
    pub access_token_secret: String,
}

/// Claims decoded from a verified bearer token, attached to the
/// request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Map<String, Value>);

/// Sign the given claims as-is, adding only the `exp` claim. Claim
/// contents are not validated.
pub fn issue_token(
    claims: &Map<String, Value>,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut payload = claims.clone();
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp();
    payload.insert("exp".to_string(), Value::from(exp));
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Check signature and expiry; returns the embedded claim map.
pub fn verify_token(
    token: &str,
    secret: &str,
) -> Result<Map<String, Value>, jsonwebtoken::errors::Error> {
    let data = decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// `POST /signin`: wrap whatever JSON object the client sent into a
/// signed access token.
pub async fn signin(
    State(state): State<ServerState>,
    Json(user): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let access_token = issue_token(&user, &state.auth.access_token_secret)?;
    Ok(Json(TokenResponse { access_token }))
}

/// Bearer gate for protected routes. Missing header is 401; anything
/// that fails verification, including a header without a space (the
/// token then decodes from an empty string), is 403.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header.split(' ').nth(1).unwrap_or_default();
    let claims = verify_token(token, &state.auth.access_token_secret)
        .map_err(|_| ApiError::Forbidden)?;

    req.extensions_mut().insert(AuthClaims(claims));
    Ok(next.run(req).await)
}
