//! Column and expression types.
//!
//! A [`FieldType`] pairs a [`TypeKind`] with a set of flag bits. The flag that
//! matters most to the planner is [`NOT_NULL_FLAG`]: whether a value of this
//! type can be NULL is tracked as a flag rather than a separate wrapper type,
//! so that it travels unchanged onto the wire.
//!
//! # Example
//!
//! ```
//! use windlass_core::types::{FieldType, TypeKind, NOT_NULL_FLAG};
//!
//! let mut tp = FieldType::new(TypeKind::BigInt);
//! assert!(!tp.is_not_null());
//!
//! tp.set_flag(NOT_NULL_FLAG);
//! assert!(tp.is_not_null());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value can never be NULL.
pub const NOT_NULL_FLAG: u32 = 1;
/// Integer types only: the value is unsigned.
pub const UNSIGNED_FLAG: u32 = 1 << 5;

/// Length marker for types whose length is not known.
pub const UNSPECIFIED_LENGTH: i32 = -1;

/// Default character set for string types.
pub const DEFAULT_CHARSET: &str = "utf8mb4";
/// Collation id of `utf8mb4_bin`.
pub const DEFAULT_COLLATION_ID: i32 = 46;
/// Collation id of `binary`, used by every non-string type.
pub const BINARY_COLLATION_ID: i32 = 63;

/// The kinds of value a [`FieldType`] can describe.
///
/// [`TypeKind::code`] returns the MySQL protocol type code, which is also the
/// code sent to remote engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// The type of a bare NULL literal.
    Null,
    /// 8-bit integer.
    TinyInt,
    /// 16-bit integer.
    SmallInt,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Fixed point decimal.
    Decimal,
    /// Variable length string.
    Varchar,
    /// Binary large object.
    Blob,
    /// Calendar date.
    Date,
    /// Date and time.
    Datetime,
    /// Timestamp.
    Timestamp,
    /// Time of day or elapsed time.
    Duration,
    /// JSON document.
    Json,
    /// Bit field.
    Bit,
    /// Enumeration.
    Enum,
    /// Set of enumeration members.
    Set,
}

impl TypeKind {
    /// Returns the MySQL protocol type code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::TinyInt => 1,
            Self::SmallInt => 2,
            Self::Int => 3,
            Self::Float => 4,
            Self::Double => 5,
            Self::Null => 6,
            Self::Timestamp => 7,
            Self::BigInt => 8,
            Self::Date => 10,
            Self::Duration => 11,
            Self::Datetime => 12,
            Self::Varchar => 15,
            Self::Bit => 16,
            Self::Json => 245,
            Self::Decimal => 246,
            Self::Enum => 247,
            Self::Set => 248,
            Self::Blob => 252,
        }
    }

    /// Returns true for the integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::TinyInt | Self::SmallInt | Self::Int | Self::BigInt)
    }

    /// Returns true for the floating point kinds.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Returns true for integers, floats and decimals.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Decimal)
    }

    /// Returns true for the string kinds.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::Varchar | Self::Blob)
    }

    /// Default display length for a freshly created type of this kind.
    const fn default_flen(self) -> i32 {
        match self {
            Self::TinyInt => 4,
            Self::SmallInt => 6,
            Self::Int => 11,
            Self::BigInt => 20,
            Self::Float => 12,
            Self::Double => 22,
            Self::Decimal => 11,
            Self::Date => 10,
            Self::Datetime | Self::Timestamp => 19,
            Self::Duration => 10,
            Self::Bit => 1,
            Self::Null => 0,
            Self::Varchar | Self::Blob | Self::Json | Self::Enum | Self::Set => {
                UNSPECIFIED_LENGTH
            }
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Varchar => "VARCHAR",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Duration => "TIME",
            Self::Json => "JSON",
            Self::Bit => "BIT",
            Self::Enum => "ENUM",
            Self::Set => "SET",
        };
        write!(f, "{name}")
    }
}

/// A concrete type: kind, flags, display length and scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    /// The kind of value.
    pub kind: TypeKind,
    /// Flag bits (`NOT_NULL_FLAG`, `UNSIGNED_FLAG`, ...).
    pub flags: u32,
    /// Display length, or [`UNSPECIFIED_LENGTH`].
    pub flen: i32,
    /// Digits after the decimal point, or [`UNSPECIFIED_LENGTH`].
    pub decimal: i32,
    /// Character set name.
    pub charset: String,
    /// Collation id.
    pub collate: i32,
}

impl FieldType {
    /// Creates a nullable type of the given kind with default length and charset.
    #[must_use]
    pub fn new(kind: TypeKind) -> Self {
        let textual = kind.is_string() || matches!(kind, TypeKind::Enum | TypeKind::Set);
        let (charset, collate) = if textual {
            (DEFAULT_CHARSET.to_string(), DEFAULT_COLLATION_ID)
        } else {
            ("binary".to_string(), BINARY_COLLATION_ID)
        };
        let decimal = match kind {
            TypeKind::TinyInt | TypeKind::SmallInt | TypeKind::Int | TypeKind::BigInt => 0,
            _ => UNSPECIFIED_LENGTH,
        };
        Self { kind, flags: 0, flen: kind.default_flen(), decimal, charset, collate }
    }

    /// Creates a type that already carries `NOT_NULL_FLAG`.
    #[must_use]
    pub fn not_null(kind: TypeKind) -> Self {
        Self::new(kind).with_flag(NOT_NULL_FLAG)
    }

    /// Sets the display length.
    #[must_use]
    pub fn with_flen(mut self, flen: i32) -> Self {
        self.flen = flen;
        self
    }

    /// Sets the number of digits after the decimal point.
    #[must_use]
    pub fn with_decimal(mut self, decimal: i32) -> Self {
        self.decimal = decimal;
        self
    }

    /// Adds flag bits.
    #[must_use]
    pub fn with_flag(mut self, flag: u32) -> Self {
        self.flags |= flag;
        self
    }

    /// Adds flag bits in place.
    pub fn set_flag(&mut self, flag: u32) {
        self.flags |= flag;
    }

    /// Removes flag bits in place.
    pub fn del_flag(&mut self, flag: u32) {
        self.flags &= !flag;
    }

    /// Returns true if every bit of `flag` is set.
    #[must_use]
    pub const fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }

    /// Returns true if values of this type can never be NULL.
    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        self.has_flag(NOT_NULL_FLAG)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.has_flag(UNSIGNED_FLAG)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.flen != UNSPECIFIED_LENGTH && !matches!(self.kind, TypeKind::Null) {
            if self.decimal > 0 {
                write!(f, "({},{})", self.flen, self.decimal)?;
            } else {
                write!(f, "({})", self.flen)?;
            }
        }
        if self.is_unsigned() {
            write!(f, " UNSIGNED")?;
        }
        if self.is_not_null() {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}
