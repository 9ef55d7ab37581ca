//! Cookie value integrity.
//!
//! Signed cookies carry an HMAC-SHA256 tag next to the value so the server
//! can detect values altered while held by the client. Nothing here hides
//! the value: it is only base64url-encoded.
//!
//! - [`sign`] / [`verify`]: the raw MAC primitives
//! - [`wirevalue`]: the `base64url(value)|base64url(tag)` wire format

pub mod wirevalue;

use crate::base::cookieerror::Result;

/// Length in bytes of an HMAC-SHA256 tag.
pub const TAG_LEN: usize = 32;

/// HMAC-SHA256 tag.
pub type Tag = [u8; TAG_LEN];

/// Compute HMAC-SHA256 over `data` with `key`.
pub fn sign(data: &[u8], key: &[u8]) -> Result<Tag> {
    Ok(boring::hash::hmac_sha256(key, data)?)
}

/// Check `tag` against a freshly computed MAC of `data`.
///
/// The comparison runs in constant time for tags of the expected length.
pub fn verify(data: &[u8], tag: &[u8], key: &[u8]) -> Result<bool> {
    let expected = sign(data, key)?;
    if tag.len() != expected.len() {
        return Ok(false);
    }
    Ok(boring::memcmp::eq(&expected, tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    // HMAC-SHA256(key = "example key", data = "example data")
    const KNOWN_TAG: Tag = [
        143, 44, 153, 63, 34, 126, 71, 71, 60, 146, 137, 245, 195, 249, 153, 4, 171, 247, 130,
        233, 162, 23, 163, 57, 160, 123, 76, 145, 124, 34, 222, 55,
    ];

    #[test]
    fn test_sign_known_answer() {
        let tag = sign(b"example data", b"example key").unwrap();
        assert_eq!(tag, KNOWN_TAG);
    }

    #[test]
    fn test_verify_accepts_own_tag() {
        let tag = sign(b"example data", b"example key").unwrap();
        assert!(verify(b"example data", &tag, b"example key").unwrap());
    }

    #[test]
    fn test_verify_rejects_other_key() {
        let tag = sign(b"example data", b"example key").unwrap();
        assert!(!verify(b"example data", &tag, b"other key").unwrap());
    }

    #[test]
    fn test_verify_rejects_short_tag() {
        let tag = sign(b"example data", b"example key").unwrap();
        assert!(!verify(b"example data", &tag[..16], b"example key").unwrap());
        assert!(!verify(b"example data", &[], b"example key").unwrap());
    }
}
