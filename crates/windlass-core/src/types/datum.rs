//! Constant values.
//!
//! A [`Datum`] is a single value known at planning time: the payload of a
//! literal, or the value bound to a prepared-statement parameter.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::field_type::{FieldType, TypeKind, UNSIGNED_FLAG};

/// A constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    /// SQL NULL.
    Null,
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 64-bit integer.
    Uint64(u64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Datum {
    /// Returns true if this is NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the natural type of a literal holding this datum.
    ///
    /// Non-null literals are never NULL, so their type carries `NOT_NULL_FLAG`.
    #[must_use]
    pub fn literal_type(&self) -> FieldType {
        match self {
            Self::Null => FieldType::new(TypeKind::Null),
            Self::Int64(_) => FieldType::not_null(TypeKind::BigInt),
            Self::Uint64(_) => FieldType::not_null(TypeKind::BigInt).with_flag(UNSIGNED_FLAG),
            Self::Float64(_) => FieldType::not_null(TypeKind::Double),
            Self::String(s) => {
                let len = i32::try_from(s.chars().count()).unwrap_or(i32::MAX);
                FieldType::not_null(TypeKind::Varchar).with_flen(len)
            }
            Self::Bytes(b) => {
                let len = i32::try_from(b.len()).unwrap_or(i32::MAX);
                FieldType::not_null(TypeKind::Blob).with_flen(len)
            }
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u64> for Datum {
    fn from(v: u64) -> Self {
        Self::Uint64(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
