use thiserror::Error;

/// Boxed error returned by custom type handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by cookie reads, writes and structure population.
///
/// "Missing" ([`CookieError::NotFound`]) and "tampered"
/// ([`CookieError::InvalidSignature`]) are always distinct kinds.
#[derive(Debug, Error)]
pub enum CookieError {
    // Read Errors
    #[error("cookie: named cookie not present: {name}")]
    NotFound { name: String },

    // Signed Value Errors
    #[error("cookie: invalid signed cookie format")]
    InvalidFormat,
    #[error("cookie: malformed signed cookie segment: {reason}")]
    Decode { reason: String },
    #[error("cookie: invalid cookie signature")]
    InvalidSignature,
    #[error("cookie: signed operation requires a signing key")]
    MissingSigningKey,
    #[error("cookie: signing failed: {reason}")]
    Signing { reason: String },

    // Population Errors
    #[error("cookie: cannot convert cookie {name} to {type_name}: {reason}")]
    Conversion {
        name: String,
        type_name: &'static str,
        reason: String,
    },
    #[error("cookie: unsupported type: {type_name}")]
    UnsupportedType { type_name: &'static str },
    #[error("cookie: destination must be a non-nil reference")]
    NonNilPointerRequired,
    #[error(transparent)]
    Custom(BoxError),

    // Write Errors
    #[error("cookie: transport rejected cookie {name}: {reason}")]
    Transport { name: String, reason: String },
}

impl CookieError {
    pub fn not_found(name: impl Into<String>) -> Self {
        CookieError::NotFound { name: name.into() }
    }

    pub fn decode(reason: impl ToString) -> Self {
        CookieError::Decode {
            reason: reason.to_string(),
        }
    }

    pub fn conversion(
        name: impl Into<String>,
        type_name: &'static str,
        reason: impl ToString,
    ) -> Self {
        CookieError::Conversion {
            name: name.into(),
            type_name,
            reason: reason.to_string(),
        }
    }

    /// True when the cookie was simply absent from the request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CookieError::NotFound { .. })
    }

    /// True for failures of the signed wire value: shape, encoding or tag.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            CookieError::InvalidFormat | CookieError::Decode { .. } | CookieError::InvalidSignature
        )
    }
}

impl From<boring::error::ErrorStack> for CookieError {
    fn from(err: boring::error::ErrorStack) -> Self {
        CookieError::Signing {
            reason: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for CookieError {
    fn from(err: base64::DecodeError) -> Self {
        CookieError::decode(err)
    }
}

pub type Result<T> = std::result::Result<T, CookieError>;
