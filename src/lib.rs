//! jwtmint: compact HS256-signed claim tokens.
//!
//! A token is three base64url segments joined by dots: the fixed
//! `{"alg":"HS256","typ":"JWT"}` header, the JSON claims object, and the
//! HMAC-SHA256 of the first two segments.
//!
//! ```ignore
//! let token = jwtmint::build_token(br#"{"sub":"user-1"}"#, b"secret")?;
//! let claims = jwtmint::verify_token(&token, b"secret")?;
//! ```
//!
//! Verification checks the signature first, then `nbf`, then `exp`. Both time
//! claims are optional and must be RFC 3339 strings
//! (see [`token::claims::format_timestamp`]).
//!
//! The header's `alg` is never read back: every token is verified as HS256.

pub mod config;
pub mod console;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod token;

pub use cookie::load_token;
pub use error::{ClaimsError, Error, Result};
pub use token::claims::Claims;
pub use token::header::Header;
pub use token::sign::build_token;
pub use token::verify::verify_token;
pub use token::{Segment, Token};
