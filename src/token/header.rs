//! Fixed token header.
//! Used by: token::sign, token::verify.

use serde::Serialize;

pub const ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "JWT";

/// The `{alg, typ}` header. There is exactly one supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    alg: &'static str,
    typ: &'static str,
}

impl Header {
    pub fn new() -> Self {
        Self {
            alg: ALGORITHM,
            typ: TOKEN_TYPE,
        }
    }

    pub fn alg(&self) -> &'static str {
        self.alg
    }

    pub fn typ(&self) -> &'static str {
        self.typ
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
