//! Token creation, signing, and verification.
//! Used by: lib, handlers.

pub mod claims;
pub mod header;
pub mod sign;
pub mod verify;

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::token::claims::Claims;
use crate::token::header::Header;

/// One of the three dot-separated parts of a token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Header,
    Claims,
    Signature,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Header, Segment::Claims, Segment::Signature];

    pub fn index(self) -> usize {
        match self {
            Segment::Header => 0,
            Segment::Claims => 1,
            Segment::Signature => 2,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Segment::Header => "header",
            Segment::Claims => "claims",
            Segment::Signature => "signature",
        })
    }
}

/// A token in its structured form.
///
/// Built either by [`Token::encode`] or by [`Token::parse`]. Once built, the
/// three segments are the authoritative serialized form. The signing key is
/// never stored; it is passed to each operation that needs it.
#[derive(Debug, Clone)]
pub struct Token {
    header: Header,
    claims: Claims,
    segments: [String; 3],
}

impl Token {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }

    pub fn segment(&self, segment: Segment) -> &str {
        &self.segments[segment.index()]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [header, claims, signature] = &self.segments;
        write!(f, "{}.{}.{}", header, claims, signature)
    }
}

pub(crate) fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub(crate) fn decode_segment(segment: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_indices_follow_wire_order() {
        let indices: Vec<usize> = Segment::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn segment_names_are_lowercase() {
        assert_eq!(Segment::Claims.to_string(), "claims");
        assert_eq!(Segment::Signature.to_string(), "signature");
    }

    #[test]
    fn segments_encode_without_padding() {
        assert_eq!(encode_segment(b"a"), "YQ");
        assert_eq!(encode_segment(&[0xfb, 0xff]), "-_8");
    }

    #[test]
    fn padded_segment_rejected() {
        assert!(decode_segment("YQ==").is_err());
    }

    #[test]
    fn standard_alphabet_rejected() {
        assert!(decode_segment("+/8").is_err());
    }
}
