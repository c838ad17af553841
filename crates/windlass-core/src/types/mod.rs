//! Types and constant values shared by the planner crates.

mod datum;
mod field_type;

pub use datum::Datum;
pub use field_type::{
    FieldType, TypeKind, BINARY_COLLATION_ID, DEFAULT_CHARSET, DEFAULT_COLLATION_ID,
    NOT_NULL_FLAG, UNSIGNED_FLAG, UNSPECIFIED_LENGTH,
};
