//! Token issuing endpoint.
//! Used by: server.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::console;
use crate::error::{Error, Result};
use crate::state::AppState;
use crate::token::claims::{format_timestamp, Claims, EXPIRES_AT};
use crate::token::Token;

#[derive(Debug, Serialize)]
pub struct IssueResponse {
    pub token: String,
}

/// Stamp `exp` when a lifetime is configured and the caller set none.
fn apply_ttl(claims: &mut Claims, ttl: Option<chrono::Duration>) {
    if let Some(ttl) = ttl {
        if !claims.contains_key(EXPIRES_AT) {
            claims.insert(EXPIRES_AT, format_timestamp(Utc::now() + ttl));
        }
    }
}

pub async fn issue(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(HeaderMap, Json<IssueResponse>)> {
    let mut claims = Claims::from_slice(&body)?;
    apply_ttl(&mut claims, state.ttl);

    let claim_count = claims.len();
    let expires = claims
        .get(EXPIRES_AT)
        .and_then(|v| v.as_str())
        .map(str::to_owned);

    let token = Token::encode(claims, &state.secret)?.to_string();

    let cookie = format!("{}={}; HttpOnly; Path=/", state.cookie_name, token);
    let cookie = HeaderValue::from_str(&cookie).map_err(|e| Error::Config(e.to_string()))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    tracing::info!(claims = claim_count, exp = ?expires, "token issued");
    console::log_issue(claim_count, expires.as_deref());
    state.metrics.record_issue();

    Ok((headers, Json(IssueResponse { token })))
}
