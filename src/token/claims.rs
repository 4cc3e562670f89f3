//! Free-form token claims with lazily checked `nbf` / `exp`.
//! Used by: token::sign, token::verify, handlers::issue.

use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClaimsError, Error, Result};

pub const NOT_BEFORE: &str = "nbf";
pub const EXPIRES_AT: &str = "exp";

/// Mapping from claim names to arbitrary JSON values.
///
/// Always backed by a JSON object. Keys other than `nbf` and `exp` are carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw bytes holding a JSON object.
    pub fn from_slice(bytes: &[u8]) -> std::result::Result<Self, ClaimsError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ClaimsError::NotAnObject(describe(&other))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// The `nbf` claim, if present, parsed in the fixed timestamp layout.
    pub fn not_before(&self) -> Option<Result<DateTime<FixedOffset>>> {
        self.timestamp(NOT_BEFORE)
    }

    /// The `exp` claim, if present, parsed in the fixed timestamp layout.
    pub fn expires_at(&self) -> Option<Result<DateTime<FixedOffset>>> {
        self.timestamp(EXPIRES_AT)
    }

    fn timestamp(&self, claim: &'static str) -> Option<Result<DateTime<FixedOffset>>> {
        self.0.get(claim).map(|value| parse_timestamp(claim, value))
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Render a time in the layout `nbf` and `exp` are expected in.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(claim: &'static str, value: &Value) -> Result<DateTime<FixedOffset>> {
    let text = value.as_str().ok_or_else(|| Error::TimeFormat {
        claim,
        reason: format!("expected a string, found {}", describe(value)),
    })?;
    let invalid = |reason: String| Error::TimeFormat { claim, reason };

    // RFC 3339 parsing alone also takes a space or lowercase `t` separator,
    // a lowercase `z` and second 60.
    if text.as_bytes().get(10) != Some(&b'T') {
        return Err(invalid(format!("expected `T` after the date in {:?}", text)));
    }
    if !text.ends_with('Z') && !has_numeric_offset(text) {
        return Err(invalid(format!("expected `Z` or `±HH:MM` zone in {:?}", text)));
    }
    let parsed = DateTime::parse_from_rfc3339(text).map_err(|e| invalid(e.to_string()))?;
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(invalid(format!("second out of range in {:?}", text)));
    }
    Ok(parsed)
}

fn has_numeric_offset(text: &str) -> bool {
    let bytes = text.as_bytes();
    let n = bytes.len();
    n >= 6 && matches!(bytes[n - 6], b'+' | b'-') && bytes[n - 3] == b':'
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn object_parses() -> std::result::Result<(), ClaimsError> {
        let claims = Claims::from_slice(br#"{"sub":"user-1","admin":true,"n":[1,2]}"#)?;
        assert_eq!(claims.len(), 3);
        assert_eq!(claims.get("sub"), Some(&Value::from("user-1")));
        assert_eq!(claims.get("admin"), Some(&Value::Bool(true)));
        Ok(())
    }

    #[test]
    fn not_json_rejected() {
        let result = Claims::from_slice(b"not json");
        assert!(matches!(result, Err(ClaimsError::Json(_))));
    }

    #[test]
    fn array_rejected() {
        let result = Claims::from_slice(b"[1,2,3]");
        assert!(matches!(result, Err(ClaimsError::NotAnObject("an array"))));
    }

    #[test]
    fn scalar_rejected() {
        assert!(matches!(Claims::from_slice(b"42"), Err(ClaimsError::NotAnObject("a number"))));
        assert!(matches!(Claims::from_slice(b"null"), Err(ClaimsError::NotAnObject("null"))));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(Claims::from_slice(b""), Err(ClaimsError::Json(_))));
    }

    #[test]
    fn unknown_keys_survive_json_roundtrip() -> crate::error::Result<()> {
        let claims = Claims::from_slice(br#"{"nested":{"a":[null,1.5]},"x":"y"}"#)?;
        let json = serde_json::to_vec(&claims).map_err(ClaimsError::from)?;
        let decoded = Claims::from_slice(&json)?;
        assert_eq!(claims, decoded);
        Ok(())
    }

    #[test]
    fn iterates_like_the_backing_map() {
        let mut map = Map::new();
        map.insert("b".into(), Value::from(2));
        map.insert("a".into(), Value::from(1));
        let claims = Claims::from(map.clone());

        let mut keys: Vec<&str> = claims.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);

        let mut total = 0;
        for (_, value) in &claims {
            total += value.as_i64().unwrap_or_default();
        }
        assert_eq!(total, 3);
        assert_eq!(claims.into_inner(), map);
    }

    #[test]
    fn near_miss_layouts_rejected() {
        for text in [
            "2099-01-01 00:00:00Z",
            "2099-01-01t00:00:00Z",
            "2099-01-01T00:00:00z",
            "2099-12-31T23:59:60Z",
            "2099-01-01T00:00:00+0000",
            "2099-01-01T00:00:00",
        ] {
            let mut claims = Claims::new();
            claims.insert(EXPIRES_AT, text);
            assert!(
                matches!(
                    claims.expires_at(),
                    Some(Err(Error::TimeFormat { claim: "exp", .. }))
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn fractional_seconds_and_offsets_accepted() {
        for text in [
            "2099-01-01T00:00:00.250Z",
            "2099-01-01T05:30:00+05:30",
            "2099-01-01T00:00:00-00:00",
        ] {
            let mut claims = Claims::new();
            claims.insert(NOT_BEFORE, text);
            assert!(claims.not_before().is_some_and(|t| t.is_ok()), "{text:?}");
        }
    }

    #[test]
    fn absent_timestamps_are_none() {
        let claims = Claims::new();
        assert!(claims.not_before().is_none());
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn timestamps_parse_with_offset_or_z() {
        let mut claims = Claims::new();
        claims.insert(NOT_BEFORE, "2024-05-01T10:00:00+02:00");
        claims.insert(EXPIRES_AT, "2024-05-01T08:00:00Z");
        let nbf = claims.not_before().unwrap().unwrap();
        let exp = claims.expires_at().unwrap().unwrap();
        assert_eq!(nbf.timestamp(), exp.timestamp());
    }

    #[test]
    fn numeric_timestamp_rejected() {
        let mut claims = Claims::new();
        claims.insert(EXPIRES_AT, 1_700_000_000);
        assert!(matches!(
            claims.expires_at(),
            Some(Err(Error::TimeFormat { claim: "exp", .. }))
        ));
    }

    #[test]
    fn garbled_timestamp_rejected() {
        let mut claims = Claims::new();
        claims.insert(NOT_BEFORE, "yesterday");
        assert!(matches!(
            claims.not_before(),
            Some(Err(Error::TimeFormat { claim: "nbf", .. }))
        ));
    }

    #[test]
    fn formatted_timestamp_parses_back() {
        let at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let text = format_timestamp(at);
        assert_eq!(text, "2030-01-02T03:04:05Z");

        let mut claims = Claims::new();
        claims.insert(EXPIRES_AT, text);
        let parsed = claims.expires_at().unwrap().unwrap();
        assert_eq!(parsed.timestamp(), at.timestamp());
    }
}
