//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): every failure kind surfaced by the crate
//! - [`Result`](cookieerror::Result): crate-wide result alias

pub mod cookieerror;
