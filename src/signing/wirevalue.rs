//! Signed cookie wire format.
//!
//! ```text
//! base64url(value) "|" base64url(HMAC-SHA256(key, base64url(value)))
//! ```
//!
//! The MAC covers the base64url text of the value, not the raw bytes, on
//! both the write and the verify path. base64url is the padded URL-safe
//! alphabet, so both segments are valid cookie octets.

use crate::base::cookieerror::{CookieError, Result};
use crate::signing::{sign, verify};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};

/// Separator between the value and tag segments.
pub const SEPARATOR: char = '|';

/// A signed wire value split into its two encoded segments.
///
/// The value segment may be empty (the encoding of an empty value); the tag
/// segment never is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedValue<'a> {
    pub data: &'a str,
    pub tag: &'a str,
}

impl<'a> SignedValue<'a> {
    /// Split a wire string on its first separator.
    pub fn parse(wire: &'a str) -> Result<Self> {
        let (data, tag) = wire
            .split_once(SEPARATOR)
            .ok_or(CookieError::InvalidFormat)?;
        if tag.is_empty() || tag.contains(SEPARATOR) {
            return Err(CookieError::InvalidFormat);
        }
        Ok(Self { data, tag })
    }

    /// Decode both segments and check the tag; returns the original value.
    pub fn open(&self, key: &[u8]) -> Result<String> {
        let value = URL_SAFE.decode(self.data)?;
        let tag = URL_SAFE.decode(self.tag)?;

        if !verify(self.data.as_bytes(), &tag, key)? {
            return Err(CookieError::InvalidSignature);
        }

        String::from_utf8(value).map_err(CookieError::decode)
    }
}

/// Produce the signed wire form of `value`.
pub fn encode(value: &str, key: &[u8]) -> Result<String> {
    let data = URL_SAFE.encode(value.as_bytes());
    let tag = URL_SAFE.encode(sign(data.as_bytes(), key)?);
    Ok(format!("{data}{SEPARATOR}{tag}"))
}

/// Verify a signed wire string and return the value it carries.
pub fn decode(wire: &str, key: &[u8]) -> Result<String> {
    SignedValue::parse(wire)?.open(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"super-secret-key";

    #[test]
    fn test_encode_shape() {
        let wire = encode("test", KEY).unwrap();
        let parsed = SignedValue::parse(&wire).unwrap();
        assert_eq!(parsed.data, "dGVzdA==");
        // 32-byte tag, padded base64
        assert_eq!(parsed.tag.len(), 44);
    }

    #[test]
    fn test_roundtrip() {
        for value in ["test", "", "a|b|c", "ünïcødé", "read,write,execute"] {
            let wire = encode(value, KEY).unwrap();
            assert_eq!(decode(&wire, KEY).unwrap(), value);
        }
    }

    #[test]
    fn test_wrong_key() {
        let wire = encode("tok123", b"k").unwrap();
        assert!(matches!(
            decode(&wire, b"k2"),
            Err(CookieError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_tag_bytes() {
        let wire = encode("tok123", KEY).unwrap();
        let parsed = SignedValue::parse(&wire).unwrap();
        let tag = URL_SAFE.decode(parsed.tag).unwrap();

        for i in 0..tag.len() {
            let mut flipped = tag.clone();
            flipped[i] ^= 0x01;
            let forged = format!("{}|{}", parsed.data, URL_SAFE.encode(&flipped));
            assert!(
                matches!(decode(&forged, KEY), Err(CookieError::InvalidSignature)),
                "byte {i} flip was not detected"
            );
        }
    }

    #[test]
    fn test_tampered_value() {
        let wire = encode("user", KEY).unwrap();
        let parsed = SignedValue::parse(&wire).unwrap();
        let forged = format!("{}|{}", URL_SAFE.encode("admin"), parsed.tag);
        assert!(matches!(
            decode(&forged, KEY),
            Err(CookieError::InvalidSignature)
        ));
    }

    #[test]
    fn test_format_rejection() {
        for wire in ["", "novalue", "dGVzdA==", "dGVzdA==|", "a|b|c"] {
            assert!(
                matches!(decode(wire, KEY), Err(CookieError::InvalidFormat)),
                "{wire:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_decode_rejection() {
        let wire = encode("test", KEY).unwrap();
        let parsed = SignedValue::parse(&wire).unwrap();

        let bad_value = format!("!!!|{}", parsed.tag);
        assert!(matches!(
            decode(&bad_value, KEY),
            Err(CookieError::Decode { .. })
        ));

        let bad_tag = format!("{}|not*base64", parsed.data);
        assert!(matches!(
            decode(&bad_tag, KEY),
            Err(CookieError::Decode { .. })
        ));
    }

    #[test]
    fn test_non_utf8_value_is_decode_error() {
        let data = URL_SAFE.encode([0xff, 0xfe]);
        let tag = URL_SAFE.encode(sign(data.as_bytes(), KEY).unwrap());
        let wire = format!("{data}|{tag}");
        assert!(matches!(decode(&wire, KEY), Err(CookieError::Decode { .. })));
    }
}
