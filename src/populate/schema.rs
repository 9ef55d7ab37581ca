use crate::base::cookieerror::{CookieError, Result};
use crate::populate::descriptor::CookieDescriptor;
use crate::populate::fieldkind::FieldKind;
use std::any::{type_name, Any, TypeId};
use std::fmt;

type Assign<T> = Box<dyn Fn(&mut T, Box<dyn Any + Send>) -> Result<()> + Send + Sync>;

/// One cookie-backed field of `T`.
pub struct Binding<T> {
    descriptor: CookieDescriptor,
    type_id: TypeId,
    kind: FieldKind,
    assign: Assign<T>,
}

impl<T> Binding<T> {
    pub fn descriptor(&self) -> &CookieDescriptor {
        &self.descriptor
    }

    /// Built-in conversion for the field's type.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Exact type of the field, used to look up custom handlers.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Move a converted value into the field.
    pub fn assign(&self, dest: &mut T, value: Box<dyn Any + Send>) -> Result<()> {
        (self.assign)(dest, value)
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("descriptor", &self.descriptor)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Declarative mapping from cookies to the fields of `T`.
///
/// Built once per type, in field declaration order, which is also the
/// order population runs in.
///
/// ```rust
/// use cookiekit::populate::schema::Schema;
///
/// #[derive(Default)]
/// struct Session {
///     token: String,
///     theme: String,
/// }
///
/// let schema = Schema::<Session>::new()
///     .field("Access-Token,signed", |s: &mut Session| &mut s.token)
///     .field("theme,omitempty", |s: &mut Session| &mut s.theme);
/// assert_eq!(schema.len(), 2);
/// ```
pub struct Schema<T> {
    bindings: Vec<Binding<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind the field reached through `accessor` to the cookie described by
    /// `tag` (`name[,signed][,unsigned][,omitempty]`).
    ///
    /// A tag with an empty name leaves the field unbound.
    pub fn field<V, F>(mut self, tag: &str, accessor: F) -> Self
    where
        V: Any + Send,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let Some(descriptor) = CookieDescriptor::parse(tag) else {
            return self;
        };

        let assign: Assign<T> = Box::new(move |dest: &mut T, value: Box<dyn Any + Send>| {
            let value = value
                .downcast::<V>()
                .map_err(|_| CookieError::UnsupportedType {
                    type_name: type_name::<V>(),
                })?;
            *accessor(dest) = *value;
            Ok(())
        });

        self.bindings.push(Binding {
            descriptor,
            type_id: TypeId::of::<V>(),
            kind: FieldKind::of::<V>(),
            assign,
        });
        self
    }
}

impl<T> Schema<T> {
    pub fn bindings(&self) -> &[Binding<T>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.bindings).finish()
    }
}

/// Types that can be filled from a request's cookies.
pub trait FromCookies: Sized + 'static {
    /// Field bindings for `Self`. Called once per manager and type.
    fn cookie_schema() -> Schema<Self>;
}
