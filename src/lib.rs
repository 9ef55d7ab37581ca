//! # cookiekit
//!
//! Signed HTTP cookies for Rust servers, and declarative population of typed
//! structures from the cookies on a request.
//!
//! ## Features
//!
//! - **Signed Cookies**: HMAC-SHA256 tag (BoringSSL), constant-time verification
//! - **Typed Population**: strings, booleans, integers of every width, floats,
//!   comma-separated lists, RFC 3339 timestamps and UUIDs
//! - **Custom Converters**: per-type handlers registered on the manager
//! - **Transport Adapters**: `http` request/response types and `cookie::CookieJar`
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiekit::cookies::manager::Manager;
//! use cookiekit::populate::schema::{FromCookies, Schema};
//! use http::header::COOKIE;
//! use http::Request;
//!
//! #[derive(Default)]
//! struct User {
//!     name: String,
//!     permissions: Vec<String>,
//! }
//!
//! impl FromCookies for User {
//!     fn cookie_schema() -> Schema<Self> {
//!         Schema::new()
//!             .field("user_name", |u: &mut User| &mut u.name)
//!             .field("Permissions,omitempty", |u: &mut User| &mut u.permissions)
//!     }
//! }
//!
//! let req = Request::builder()
//!     .header(COOKIE, "user_name=Alice; Permissions=read,write")
//!     .body(())
//!     .unwrap();
//!
//! let manager = Manager::new();
//! let mut user = User::default();
//! manager.populate(&req, &mut user).unwrap();
//!
//! assert_eq!(user.name, "Alice");
//! assert_eq!(user.permissions, vec!["read", "write"]);
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`signing`] - HMAC tags and the signed wire format
//! - [`cookies`] - Manager, cookie options and transport adapters
//! - [`populate`] - Schemas, field conversion and the population engine
//!
//! ## Security
//!
//! Signing provides integrity, not confidentiality: signed values are only
//! base64url-encoded and remain readable by the client.

pub mod base;
pub mod cookies;
pub mod populate;
pub mod signing;
