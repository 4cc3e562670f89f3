//! Token verification endpoints with latency measurement.
//! Used by: server.

use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::console;
use crate::cookie::load_token;
use crate::error::Result;
use crate::state::AppState;
use crate::token::claims::Claims;
use crate::token::verify::verify_token;

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

pub async fn verify_body(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<Claims>> {
    check(&state, &req.token, "body")
}

pub async fn verify_cookie(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Claims>> {
    let token = load_token(&state.cookie_name, &headers).inspect_err(|e| {
        tracing::warn!(error = %e, "no token presented");
        console::log_reject(&e.to_string());
        state.metrics.record_reject();
    })?;
    check(&state, &token, "cookie")
}

fn check(state: &AppState, token: &str, source: &str) -> Result<Json<Claims>> {
    let start = Instant::now();
    match verify_token(token, &state.secret) {
        Ok(claims) => {
            let verify_us = start.elapsed().as_micros();
            tracing::info!(source, claims = claims.len(), "verify: {}μs", verify_us);
            console::log_verify(source, verify_us);
            state.metrics.record_verify();
            Ok(Json(claims))
        }
        Err(e) => {
            tracing::warn!(source, error = %e, "token rejected");
            console::log_reject(&e.to_string());
            state.metrics.record_reject();
            Err(e)
        }
    }
}
