//! Router and request handlers for the token endpoint.
//!
//! `POST /token` issues a session join token for the `userID` in the JSON
//! body. The permissive CORS layer answers `OPTIONS` preflights; `GET
//! /health` is a liveness probe.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use gatekey_core::{IssueRequest, issue_token};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::IssuerConfig,
    error::{ApiError, ApiResult},
};

/// Build the service router around an issuer configuration.
pub fn router(config: IssuerConfig) -> Router {
    Router::new()
        .route("/token", post(issue))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(config))
}

/// `POST /token` request body.
#[derive(Debug, Deserialize)]
struct TokenBody {
    /// Subject joining the session. Missing falls through to the issuer's
    /// empty-user-id validation.
    #[serde(rename = "userID", default)]
    user_id: Option<String>,
}

/// `POST /token` success body.
#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

async fn issue(
    State(config): State<Arc<IssuerConfig>>,
    body: Result<Json<TokenBody>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(body) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let user_id = body.user_id.unwrap_or_default();

    let request = IssueRequest {
        app_id: config.app_id,
        user_id: &user_id,
        secret: &config.secret,
        ttl_seconds: config.ttl_seconds,
        payload: "",
    };

    let token = issue_token(&request)?;
    tracing::debug!(user_id = %user_id, "issued session token");

    Ok(Json(TokenResponse { token }))
}

async fn health() -> &'static str {
    "ok"
}
