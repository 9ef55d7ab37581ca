//! Server-side cookie reading, writing and signing.
//!
//! # Architecture
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`Manager`](manager::Manager) | Signing key, custom converters, get/set/remove/populate |
//! | [`Options`](options::Options) | Attributes of an emitted cookie |
//! | [`CookieSource`](transport::CookieSource) | Named lookup on an incoming request |
//! | [`CookieSink`](transport::CookieSink) | Emission of `Set-Cookie` on a response |
//!
//! # Writing and reading back a signed cookie
//!
//! ```rust
//! use cookiekit::cookies::manager::Manager;
//! use cookiekit::cookies::options::Options;
//! use cookie::CookieJar;
//!
//! let manager = Manager::new().with_signing_key("super-secret-key");
//! let mut jar = CookieJar::new();
//!
//! manager.set_signed(&mut jar, "user", "alice", &Options::default())?;
//! assert_ne!(jar.get("user").unwrap().value(), "alice");
//! assert_eq!(manager.get_signed(&jar, "user")?, "alice");
//! # Ok::<(), cookiekit::base::cookieerror::CookieError>(())
//! ```

pub mod manager;
pub mod options;
pub mod transport;
