//! Unified error types for jwtmint.
//! Used by: token, cookie, config, handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::token::Segment;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("incorrect claims data: {0}")]
    ClaimsFormat(#[from] ClaimsError),

    #[error("the token must consist of three non-empty elements separated by dots (found {segments})")]
    MalformedToken {
        segments: usize,
        empty: Option<Segment>,
    },

    #[error("failed to serialize {segment} segment: {source}")]
    Serialization {
        segment: Segment,
        #[source]
        source: serde_json::Error,
    },

    #[error("signature not valid")]
    SignatureInvalid,

    #[error("incorrect format of `{claim}` time: {reason}")]
    TimeFormat { claim: &'static str, reason: String },

    #[error("token not yet valid (nbf: {not_before}, now: {now})")]
    NotYetValid { not_before: i64, now: i64 },

    #[error("token expired (exp: {expired_at}, now: {now})")]
    Expired { expired_at: i64, now: i64 },

    #[error("cookie \"{name}\" not found in request")]
    MissingCookie { name: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Why a claims payload could not be turned into [`Claims`](crate::token::claims::Claims).
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("claims segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("claims are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("claims must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::ClaimsFormat(_) | Error::MalformedToken { .. } => StatusCode::BAD_REQUEST,
            Error::SignatureInvalid
            | Error::TimeFormat { .. }
            | Error::NotYetValid { .. }
            | Error::Expired { .. }
            | Error::MissingCookie { .. } => StatusCode::UNAUTHORIZED,
            Error::Serialization { .. } | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
