use crate::base::cookieerror::Result;
use crate::populate::descriptor::CookieDescriptor;
use crate::populate::schema::{Binding, Schema};
use std::any::Any;

/// Fill `dest` field by field.
///
/// For each binding in declaration order: fetch the raw value, skip the
/// field if the cookie is absent and the binding is `omitempty`, convert,
/// assign. The first failure is returned as-is and later fields are left
/// untouched.
pub fn populate_fields<T, F, C>(
    schema: &Schema<T>,
    dest: &mut T,
    mut fetch: F,
    mut convert: C,
) -> Result<()>
where
    F: FnMut(&CookieDescriptor) -> Result<String>,
    C: FnMut(&Binding<T>, &str) -> Result<Box<dyn Any + Send>>,
{
    for binding in schema.bindings() {
        let descriptor = binding.descriptor();

        let raw = match fetch(descriptor) {
            Ok(raw) => raw,
            Err(e) if e.is_not_found() && descriptor.omit_empty => {
                tracing::debug!(cookie = %descriptor.name, "cookie absent, field left empty");
                continue;
            }
            Err(e) => {
                tracing::debug!(cookie = %descriptor.name, error = %e, "cookie population failed");
                return Err(e);
            }
        };

        let value = convert(binding, &raw).map_err(|e| {
            tracing::debug!(cookie = %descriptor.name, error = %e, "cookie conversion failed");
            e
        })?;
        binding.assign(dest, value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::cookieerror::CookieError;
    use std::collections::HashMap;

    #[derive(Debug, Default, PartialEq)]
    struct Form {
        first: i32,
        second: i32,
        note: String,
    }

    fn run(schema: &Schema<Form>, cookies: &[(&str, &str)], dest: &mut Form) -> Result<()> {
        let jar: HashMap<String, String> = cookies
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        populate_fields(
            schema,
            dest,
            |d| {
                jar.get(&d.name)
                    .cloned()
                    .ok_or_else(|| CookieError::not_found(&d.name))
            },
            |b, raw| b.kind().convert(&b.descriptor().name, raw),
        )
    }

    #[test]
    fn test_first_error_wins() {
        let schema = Schema::new()
            .field("first", |f: &mut Form| &mut f.first)
            .field("second", |f: &mut Form| &mut f.second)
            .field("note", |f: &mut Form| &mut f.note);

        let mut form = Form::default();
        let err = run(
            &schema,
            &[("first", "one"), ("second", "two"), ("note", "hi")],
            &mut form,
        )
        .unwrap_err();

        match err {
            CookieError::Conversion { name, .. } => assert_eq!(name, "first"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(form, Form::default());
    }

    #[test]
    fn test_missing_aborts_without_omitempty() {
        let schema = Schema::new()
            .field("first", |f: &mut Form| &mut f.first)
            .field("note", |f: &mut Form| &mut f.note);

        let mut form = Form::default();
        let err = run(&schema, &[("note", "hi")], &mut form).unwrap_err();
        assert!(err.is_not_found());
        assert!(form.note.is_empty());
    }

    #[test]
    fn test_omitempty_skips_and_continues() {
        let schema = Schema::new()
            .field("first,omitempty", |f: &mut Form| &mut f.first)
            .field("second", |f: &mut Form| &mut f.second);

        let mut form = Form {
            first: 9,
            ..Form::default()
        };
        run(&schema, &[("second", "2")], &mut form).unwrap();
        assert_eq!(form.first, 9);
        assert_eq!(form.second, 2);
    }

    #[test]
    fn test_omitempty_does_not_hide_conversion_errors() {
        let schema = Schema::new().field("first,omitempty", |f: &mut Form| &mut f.first);

        let mut form = Form::default();
        let err = run(&schema, &[("first", "x")], &mut form).unwrap_err();
        assert!(matches!(err, CookieError::Conversion { .. }));
    }
}
