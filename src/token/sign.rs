//! HMAC-SHA256 token signing.
//! Used by: lib, token::verify, handlers::issue.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::token::claims::Claims;
use crate::token::header::Header;
use crate::token::{encode_segment, Segment, Token};

type HmacSha256 = Hmac<Sha256>;

/// Build a signed token string from a raw JSON claims object.
pub fn build_token(claims_json: &[u8], key: impl AsRef<[u8]>) -> Result<String> {
    let claims = Claims::from_slice(claims_json)?;
    let token = Token::encode(claims, key.as_ref())?;
    Ok(token.to_string())
}

impl Token {
    /// Serialize header and claims and sign them with `key`.
    pub fn encode(claims: Claims, key: &[u8]) -> Result<Self> {
        let header = Header::new();

        let header_json = serde_json::to_vec(&header).map_err(|source| Error::Serialization {
            segment: Segment::Header,
            source,
        })?;
        let claims_json = serde_json::to_vec(&claims).map_err(|source| Error::Serialization {
            segment: Segment::Claims,
            source,
        })?;

        let header_segment = encode_segment(&header_json);
        let claims_segment = encode_segment(&claims_json);
        let signature = sign(&header_segment, &claims_segment, key)?;

        tracing::debug!(claims = claims.len(), "token encoded");

        Ok(Token {
            header,
            claims,
            segments: [header_segment, claims_segment, signature],
        })
    }
}

/// Base64url signature over `header_segment "." claims_segment`.
pub(crate) fn sign(header_segment: &str, claims_segment: &str, key: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| Error::SignatureInvalid)?;
    mac.update(header_segment.as_bytes());
    mac.update(b".");
    mac.update(claims_segment.as_bytes());
    Ok(encode_segment(&mac.finalize().into_bytes()))
}
