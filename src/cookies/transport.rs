//! Read and write boundaries to the HTTP layer.
//!
//! The manager never touches sockets or header syntax directly. It looks
//! cookies up through a [`CookieSource`] and emits them through a
//! [`CookieSink`]. Implementations are provided for the `http` crate's
//! request/response types and for `cookie::CookieJar`.

use crate::base::cookieerror::{CookieError, Result};
use cookie::{Cookie, CookieJar};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue, Request, Response};

/// Named cookie lookup on an incoming request.
pub trait CookieSource {
    /// Value of the first cookie called `name`, if any, without surrounding
    /// double quotes.
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Destination for cookies emitted on an outgoing response.
pub trait CookieSink {
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<()>;
}

/// Reads `Cookie` request headers.
impl CookieSource for HeaderMap {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(|parsed| parsed.ok())
            .find(|c| c.name() == name)
            .map(|c| c.value_trimmed().to_string())
    }
}

impl<B> CookieSource for Request<B> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers().cookie(name)
    }
}

impl CookieSource for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).map(|c| c.value_trimmed().to_string())
    }
}

/// Appends one `Set-Cookie` header per cookie.
impl CookieSink for HeaderMap {
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<()> {
        let header =
            HeaderValue::from_str(&cookie.to_string()).map_err(|e| CookieError::Transport {
                name: cookie.name().to_string(),
                reason: e.to_string(),
            })?;
        self.append(SET_COOKIE, header);
        Ok(())
    }
}

impl<B> CookieSink for Response<B> {
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<()> {
        self.headers_mut().add_cookie(cookie)
    }
}

impl CookieSink for CookieJar {
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<()> {
        self.add(cookie);
        Ok(())
    }
}
