//! Token parsing and verification: signature first, then `nbf`, then `exp`.
//! Used by: lib, handlers::verify.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;

use crate::error::{ClaimsError, Error, Result};
use crate::token::claims::{Claims, EXPIRES_AT, NOT_BEFORE};
use crate::token::header::Header;
use crate::token::sign::sign;
use crate::token::{decode_segment, Segment, Token};

/// Parse and verify `token` against `key`, returning its claims when valid.
pub fn verify_token(token: &str, key: impl AsRef<[u8]>) -> Result<Claims> {
    let token = Token::parse(token)?;
    token.verify(key.as_ref())?;
    Ok(token.into_claims())
}

impl Token {
    /// Split a token string into its segments and decode the claims.
    ///
    /// The header segment is carried through as-is and never interpreted: its
    /// `alg` is not enforced, verification always uses HMAC-SHA256.
    pub fn parse(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        let [header_segment, claims_segment, signature_segment] = parts.as_slice() else {
            return Err(Error::MalformedToken {
                segments: parts.len(),
                empty: None,
            });
        };

        if let Some(segment) = Segment::ALL
            .into_iter()
            .find(|s| parts[s.index()].is_empty())
        {
            return Err(Error::MalformedToken {
                segments: parts.len(),
                empty: Some(segment),
            });
        }

        let claims_json = decode_segment(claims_segment).map_err(ClaimsError::from)?;
        let claims = Claims::from_slice(&claims_json)?;

        Ok(Token {
            header: Header::new(),
            claims,
            segments: [
                header_segment.to_string(),
                claims_segment.to_string(),
                signature_segment.to_string(),
            ],
        })
    }

    pub fn verify(&self, key: &[u8]) -> Result<()> {
        self.verify_at(key, Utc::now())
    }

    /// Verify against an explicit clock.
    pub fn verify_at(&self, key: &[u8], now: DateTime<Utc>) -> Result<()> {
        self.check_signature(key)?;
        let now = now.timestamp();
        self.check_not_before(now)?;
        self.check_expiry(now)
    }

    fn check_signature(&self, key: &[u8]) -> Result<()> {
        let expected = sign(
            self.segment(Segment::Header),
            self.segment(Segment::Claims),
            key,
        )?;
        let presented = self.segment(Segment::Signature);

        if constant_time_eq(expected.as_bytes(), presented.as_bytes()) {
            Ok(())
        } else {
            tracing::debug!("signature mismatch");
            Err(Error::SignatureInvalid)
        }
    }

    fn check_not_before(&self, now: i64) -> Result<()> {
        let Some(not_before) = self.claims.not_before() else {
            return Ok(());
        };
        let not_before = not_before?.timestamp();
        if not_before >= now {
            tracing::debug!(claim = NOT_BEFORE, not_before, now, "token not yet valid");
            return Err(Error::NotYetValid { not_before, now });
        }
        Ok(())
    }

    fn check_expiry(&self, now: i64) -> Result<()> {
        let Some(expires_at) = self.claims.expires_at() else {
            return Ok(());
        };
        let expired_at = expires_at?.timestamp();
        if expired_at < now {
            tracing::debug!(claim = EXPIRES_AT, expired_at, now, "token expired");
            return Err(Error::Expired { expired_at, now });
        }
        Ok(())
    }
}
