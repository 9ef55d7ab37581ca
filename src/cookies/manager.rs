//! Cookie manager: signing key, custom converters and the public cookie
//! operations.
//!
//! A [`Manager`] is configured once and then shared read-only between
//! request handlers. Several managers with different keys can coexist, one
//! per trust domain.

use crate::base::cookieerror::{BoxError, CookieError, Result};
use crate::cookies::options::Options;
use crate::cookies::transport::{CookieSink, CookieSource};
use crate::populate::engine::populate_fields;
use crate::populate::schema::{Binding, FromCookies, Schema};
use crate::signing::wirevalue;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use zeroize::Zeroizing;

type CustomHandler =
    Arc<dyn Fn(&str) -> std::result::Result<Box<dyn Any + Send>, BoxError> + Send + Sync>;

/// Reads, writes and binds cookies under one signing key.
///
/// # Example
/// ```rust
/// use cookiekit::cookies::manager::Manager;
/// use cookiekit::cookies::options::Options;
/// use http::header::{COOKIE, SET_COOKIE};
/// use http::{Request, Response};
///
/// let manager = Manager::new().with_signing_key("k");
///
/// let mut resp = Response::new(());
/// manager
///     .set_signed(&mut resp, "Access-Token", "tok123", &Options::default())
///     .unwrap();
///
/// // The client sends the cookie back on its next request.
/// let set_cookie = resp.headers()[SET_COOKIE].to_str().unwrap();
/// let pair = set_cookie.split(';').next().unwrap();
/// let req = Request::builder().header(COOKIE, pair).body(()).unwrap();
///
/// assert_eq!(manager.get_signed(&req, "Access-Token").unwrap(), "tok123");
/// ```
#[derive(Clone, Default)]
pub struct Manager {
    /// HMAC key (zeroized on drop). `None` disables signed operations.
    signing_key: Option<Zeroizing<Vec<u8>>>,
    /// Converters keyed by the exact field type they produce.
    custom_handlers: HashMap<TypeId, CustomHandler>,
    /// Schemas of destination types, built on first use.
    schemas: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("signing_key", &self.signing_key.is_some())
            .field("custom_handlers_count", &self.custom_handlers.len())
            .field("cached_schemas_count", &self.schemas.len())
            .finish()
    }
}

impl Manager {
    /// Create a manager with no signing key and no custom handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HMAC key. An empty key leaves signing disabled.
    pub fn with_signing_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        let key = key.into();
        self.signing_key = if key.is_empty() {
            None
        } else {
            Some(Zeroizing::new(key))
        };
        self
    }

    /// Register a converter for fields of type `V`.
    ///
    /// It replaces the built-in conversion for `V`, if any. The converter's
    /// error is returned unchanged as [`CookieError::Custom`].
    pub fn with_custom_handler<V, F>(mut self, handler: F) -> Self
    where
        V: Any + Send,
        F: Fn(&str) -> std::result::Result<V, BoxError> + Send + Sync + 'static,
    {
        let erased: CustomHandler =
            Arc::new(move |raw: &str| handler(raw).map(|v| Box::new(v) as Box<dyn Any + Send>));
        self.custom_handlers.insert(TypeId::of::<V>(), erased);
        self
    }

    pub fn has_signing_key(&self) -> bool {
        self.signing_key.is_some()
    }

    fn key(&self) -> Result<&[u8]> {
        self.signing_key
            .as_deref()
            .map(Vec::as_slice)
            .ok_or(CookieError::MissingSigningKey)
    }

    /// Raw value of the cookie `name`.
    pub fn get(&self, source: &(impl CookieSource + ?Sized), name: &str) -> Result<String> {
        source
            .cookie(name)
            .ok_or_else(|| CookieError::not_found(name))
    }

    /// Verified value of the signed cookie `name`.
    pub fn get_signed(
        &self,
        source: &(impl CookieSource + ?Sized),
        name: &str,
    ) -> Result<String> {
        let key = self.key()?;
        let wire = self.get(source, name)?;
        wirevalue::decode(&wire, key).map_err(|e| {
            tracing::debug!(cookie = %name, error = %e, "signed cookie rejected");
            e
        })
    }

    /// Emit `name=value` with `options`, signing the value first when
    /// `options.signed` is set.
    pub fn set(
        &self,
        sink: &mut (impl CookieSink + ?Sized),
        name: &str,
        value: &str,
        options: &Options,
    ) -> Result<()> {
        let value = if options.signed {
            wirevalue::encode(value, self.key()?)?
        } else {
            value.to_string()
        };

        tracing::trace!(cookie = %name, signed = options.signed, "emitting cookie");
        sink.add_cookie(options.to_cookie(name, value))
    }

    /// [`set`](Self::set) with signing forced on.
    pub fn set_signed(
        &self,
        sink: &mut (impl CookieSink + ?Sized),
        name: &str,
        value: &str,
        options: &Options,
    ) -> Result<()> {
        let options = Options {
            signed: true,
            ..options.clone()
        };
        self.set(sink, name, value, &options)
    }

    /// Tell the client to delete `name`.
    ///
    /// Path and domain come from `options` and must match the ones the
    /// cookie was set with. Cookies already parsed from the current request
    /// are unaffected.
    pub fn remove(
        &self,
        sink: &mut (impl CookieSink + ?Sized),
        name: &str,
        options: &Options,
    ) -> Result<()> {
        let removal = Options {
            expires: Some(OffsetDateTime::UNIX_EPOCH),
            max_age: -1,
            signed: false,
            ..options.clone()
        };
        self.set(sink, name, "", &removal)
    }

    /// Fill `dest` from the request's cookies using `T`'s schema.
    pub fn populate<T: FromCookies>(
        &self,
        source: &(impl CookieSource + ?Sized),
        dest: &mut T,
    ) -> Result<()> {
        let schema = self.schema_for::<T>();
        self.populate_with(source, &schema, dest)
    }

    /// Like [`populate`](Self::populate), for callers whose destination may
    /// be missing. `None` fails with [`CookieError::NonNilPointerRequired`].
    pub fn populate_from_cookies<T: FromCookies>(
        &self,
        source: &(impl CookieSource + ?Sized),
        dest: Option<&mut T>,
    ) -> Result<()> {
        match dest {
            Some(dest) => self.populate(source, dest),
            None => Err(CookieError::NonNilPointerRequired),
        }
    }

    /// Fill `dest` using an explicit schema.
    pub fn populate_with<T>(
        &self,
        source: &(impl CookieSource + ?Sized),
        schema: &Schema<T>,
        dest: &mut T,
    ) -> Result<()> {
        populate_fields(
            schema,
            dest,
            |descriptor| {
                if descriptor.verify_signature() {
                    self.get_signed(source, &descriptor.name)
                } else {
                    self.get(source, &descriptor.name)
                }
            },
            |binding, raw| self.convert_field(binding, raw),
        )
    }

    fn convert_field<T>(&self, binding: &Binding<T>, raw: &str) -> Result<Box<dyn Any + Send>> {
        if let Some(handler) = self.custom_handlers.get(&binding.type_id()) {
            return handler(raw).map_err(CookieError::Custom);
        }
        binding.kind().convert(&binding.descriptor().name, raw)
    }

    fn schema_for<T: FromCookies>(&self) -> Arc<Schema<T>> {
        let id = TypeId::of::<T>();
        let cached = self.schemas.get(&id).map(|entry| entry.value().clone());
        let erased = match cached {
            Some(erased) => erased,
            None => {
                // Built with no shard lock held: a schema function may use the manager.
                let built: Arc<dyn Any + Send + Sync> = Arc::new(T::cookie_schema());
                self.schemas.entry(id).or_insert(built).clone()
            }
        };

        // Entries are keyed by the TypeId of their own schema type.
        erased
            .downcast::<Schema<T>>()
            .unwrap_or_else(|_| Arc::new(T::cookie_schema()))
    }
}
