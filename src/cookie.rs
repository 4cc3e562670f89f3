//! Presented-token lookup in the request's `Cookie` headers.
//! Used by: handlers::verify.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use crate::error::{Error, Result};

/// Return the first non-empty value of cookie `name`, or `MissingCookie`.
pub fn load_token(name: &str, headers: &HeaderMap) -> Result<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| cookie_value(raw, name))
        .ok_or_else(|| Error::MissingCookie {
            name: name.to_owned(),
        })
}

fn cookie_value(raw: &str, name: &str) -> Option<String> {
    for pair in raw.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() != name {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        if value.is_empty() {
            continue;
        }
        return Some(value.to_owned());
    }
    None
}
