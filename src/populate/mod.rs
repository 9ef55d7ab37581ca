//! Declarative population of typed structures from request cookies.
//!
//! A destination type describes its cookie-backed fields once, as a
//! [`Schema`](schema::Schema) of `(tag, field accessor)` pairs. Each tag
//! names the cookie and its handling:
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `name` | plain cookie, required |
//! | `name,signed` | value must carry a valid signature |
//! | `name,unsigned` | plain even if `signed` is also given |
//! | `name,omitempty` | absent cookie leaves the field untouched |
//!
//! The field's Rust type picks its conversion (see
//! [`FieldKind`](fieldkind::FieldKind)); custom converters registered on the
//! [`Manager`](crate::cookies::manager::Manager) take precedence.

pub mod descriptor;
pub mod engine;
pub mod fieldkind;
pub mod schema;
