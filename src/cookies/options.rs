use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// SameSite policy for an emitted cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameSite {
    /// No SameSite attribute is written.
    #[default]
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

impl SameSite {
    fn to_attribute(self) -> Option<cookie::SameSite> {
        match self {
            SameSite::Unspecified => None,
            SameSite::NoRestriction => Some(cookie::SameSite::None),
            SameSite::Lax => Some(cookie::SameSite::Lax),
            SameSite::Strict => Some(cookie::SameSite::Strict),
        }
    }
}

/// How a cookie is written.
///
/// Passed whole to each write: nothing is merged in behind the caller's
/// back. Use [`Options::merged_with`] to layer call-site options over a
/// shared defaults value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Path attribute. Empty omits it.
    pub path: String,
    /// Domain attribute. Empty makes the cookie host-only.
    pub domain: String,
    /// Absolute expiry.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
    /// Max-Age in seconds: 0 = session cookie, negative = delete now.
    pub max_age: i64,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    /// Route the value through the signing engine before it is written.
    pub signed: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: String::new(),
            expires: None,
            max_age: 0,
            secure: false,
            http_only: false,
            same_site: SameSite::Unspecified,
            signed: false,
        }
    }
}

impl Options {
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn expires(mut self, at: OffsetDateTime) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    /// Layer `self` over `defaults`.
    ///
    /// Every field of `self` that is set (non-empty, non-zero, `true`, not
    /// [`SameSite::Unspecified`]) wins; the rest come from `defaults`.
    /// Boolean flags can therefore only be switched on, never off.
    pub fn merged_with(&self, defaults: &Options) -> Options {
        Options {
            path: pick(!self.path.is_empty(), &self.path, &defaults.path).clone(),
            domain: pick(!self.domain.is_empty(), &self.domain, &defaults.domain).clone(),
            expires: self.expires.or(defaults.expires),
            max_age: *pick(self.max_age != 0, &self.max_age, &defaults.max_age),
            secure: self.secure || defaults.secure,
            http_only: self.http_only || defaults.http_only,
            same_site: *pick(
                self.same_site != SameSite::Unspecified,
                &self.same_site,
                &defaults.same_site,
            ),
            signed: self.signed || defaults.signed,
        }
    }

    /// Build the transport cookie for `name=value` with these attributes.
    ///
    /// `signed` is not an attribute and is ignored here; the caller has
    /// already encoded the value.
    pub fn to_cookie(&self, name: &str, value: String) -> cookie::Cookie<'static> {
        let mut c = cookie::Cookie::new(name.to_string(), value);

        if !self.path.is_empty() {
            c.set_path(self.path.clone());
        }
        if !self.domain.is_empty() {
            c.set_domain(self.domain.clone());
        }
        if let Some(at) = self.expires {
            c.set_expires(at);
        }
        match self.max_age {
            0 => {}
            n if n < 0 => c.set_max_age(Duration::ZERO),
            n => c.set_max_age(Duration::seconds(n)),
        }
        if self.secure {
            c.set_secure(true);
        }
        if self.http_only {
            c.set_http_only(true);
        }
        if let Some(same_site) = self.same_site.to_attribute() {
            c.set_same_site(same_site);
        }

        c
    }
}

fn pick<'a, T>(use_first: bool, first: &'a T, second: &'a T) -> &'a T {
    if use_first {
        first
    } else {
        second
    }
}
