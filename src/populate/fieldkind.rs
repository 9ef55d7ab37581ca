use crate::base::cookieerror::{CookieError, Result};
use std::any::{Any, TypeId};
use std::fmt::Display;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Built-in conversion rule for a field, resolved from the field's type
/// when the binding is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    TextList,
    I8List,
    I16List,
    I32List,
    I64List,
    IsizeList,
    U8List,
    U16List,
    U32List,
    U64List,
    UsizeList,
    Timestamp,
    Uuid,
    /// No built-in rule; only a custom handler can fill the field.
    Unsupported(&'static str),
}

macro_rules! resolve_kind {
    ($id:expr, $($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            if $id == TypeId::of::<$ty>() {
                return FieldKind::$kind;
            }
        )+
    };
}

impl FieldKind {
    pub fn of<V: Any>() -> Self {
        let id = TypeId::of::<V>();
        resolve_kind!(id,
            String => Text,
            bool => Bool,
            i8 => I8,
            i16 => I16,
            i32 => I32,
            i64 => I64,
            isize => Isize,
            u8 => U8,
            u16 => U16,
            u32 => U32,
            u64 => U64,
            usize => Usize,
            f32 => F32,
            f64 => F64,
            Vec<String> => TextList,
            Vec<i8> => I8List,
            Vec<i16> => I16List,
            Vec<i32> => I32List,
            Vec<i64> => I64List,
            Vec<isize> => IsizeList,
            Vec<u8> => U8List,
            Vec<u16> => U16List,
            Vec<u32> => U32List,
            Vec<u64> => U64List,
            Vec<usize> => UsizeList,
            OffsetDateTime => Timestamp,
            Uuid => Uuid,
        );
        FieldKind::Unsupported(std::any::type_name::<V>())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "String",
            FieldKind::Bool => "bool",
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::Isize => "isize",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::U64 => "u64",
            FieldKind::Usize => "usize",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::TextList => "Vec<String>",
            FieldKind::I8List => "Vec<i8>",
            FieldKind::I16List => "Vec<i16>",
            FieldKind::I32List => "Vec<i32>",
            FieldKind::I64List => "Vec<i64>",
            FieldKind::IsizeList => "Vec<isize>",
            FieldKind::U8List => "Vec<u8>",
            FieldKind::U16List => "Vec<u16>",
            FieldKind::U32List => "Vec<u32>",
            FieldKind::U64List => "Vec<u64>",
            FieldKind::UsizeList => "Vec<usize>",
            FieldKind::Timestamp => "OffsetDateTime",
            FieldKind::Uuid => "Uuid",
            FieldKind::Unsupported(name) => *name,
        }
    }

    /// Convert the raw cookie value of cookie `name` into a boxed value of
    /// the field's type.
    pub fn convert(&self, name: &str, raw: &str) -> Result<Box<dyn Any + Send>> {
        let kind = *self;
        let value: Box<dyn Any + Send> = match kind {
            FieldKind::Text => Box::new(raw.to_string()),
            FieldKind::Bool => Box::new(
                parse_bool(raw).ok_or_else(|| parse_error(kind, name, raw, "invalid syntax"))?,
            ),
            FieldKind::I8 => Box::new(parse_number::<i8>(kind, name, raw)?),
            FieldKind::I16 => Box::new(parse_number::<i16>(kind, name, raw)?),
            FieldKind::I32 => Box::new(parse_number::<i32>(kind, name, raw)?),
            FieldKind::I64 => Box::new(parse_number::<i64>(kind, name, raw)?),
            FieldKind::Isize => Box::new(parse_number::<isize>(kind, name, raw)?),
            FieldKind::U8 => Box::new(parse_number::<u8>(kind, name, raw)?),
            FieldKind::U16 => Box::new(parse_number::<u16>(kind, name, raw)?),
            FieldKind::U32 => Box::new(parse_number::<u32>(kind, name, raw)?),
            FieldKind::U64 => Box::new(parse_number::<u64>(kind, name, raw)?),
            FieldKind::Usize => Box::new(parse_number::<usize>(kind, name, raw)?),
            FieldKind::F32 => Box::new(parse_number::<f32>(kind, name, raw)?),
            FieldKind::F64 => Box::new(parse_number::<f64>(kind, name, raw)?),
            // No escaping: an embedded comma always splits.
            FieldKind::TextList => {
                Box::new(raw.split(',').map(str::to_string).collect::<Vec<_>>())
            }
            FieldKind::I8List => Box::new(parse_list::<i8>(kind, name, raw)?),
            FieldKind::I16List => Box::new(parse_list::<i16>(kind, name, raw)?),
            FieldKind::I32List => Box::new(parse_list::<i32>(kind, name, raw)?),
            FieldKind::I64List => Box::new(parse_list::<i64>(kind, name, raw)?),
            FieldKind::IsizeList => Box::new(parse_list::<isize>(kind, name, raw)?),
            FieldKind::U8List => Box::new(parse_list::<u8>(kind, name, raw)?),
            FieldKind::U16List => Box::new(parse_list::<u16>(kind, name, raw)?),
            FieldKind::U32List => Box::new(parse_list::<u32>(kind, name, raw)?),
            FieldKind::U64List => Box::new(parse_list::<u64>(kind, name, raw)?),
            FieldKind::UsizeList => Box::new(parse_list::<usize>(kind, name, raw)?),
            FieldKind::Timestamp => Box::new(
                OffsetDateTime::parse(raw, &Rfc3339)
                    .map_err(|e| parse_error(kind, name, raw, e))?,
            ),
            FieldKind::Uuid => {
                Box::new(Uuid::parse_str(raw).map_err(|e| parse_error(kind, name, raw, e))?)
            }
            FieldKind::Unsupported(type_name) => {
                return Err(CookieError::UnsupportedType { type_name })
            }
        };
        Ok(value)
    }
}

/// `1`/`0`, `t`/`f` and `true`/`false` in lower, upper or title case.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_number<N>(kind: FieldKind, name: &str, raw: &str) -> Result<N>
where
    N: FromStr,
    N::Err: Display,
{
    raw.parse::<N>()
        .map_err(|e| parse_error(kind, name, raw, e))
}

fn parse_error(kind: FieldKind, name: &str, raw: &str, reason: impl Display) -> CookieError {
    CookieError::conversion(name, kind.type_name(), format!("parsing {raw:?}: {reason}"))
}

fn parse_list<N>(kind: FieldKind, name: &str, raw: &str) -> Result<Vec<N>>
where
    N: FromStr,
    N::Err: Display,
{
    raw.split(',')
        .map(|element| parse_number::<N>(kind, name, element))
        .collect()
}
