//! Resolving constant arguments.
//!
//! Several window functions take an argument that must be a constant
//! non-negative integer (the `n` of `NTILE(n)`, the offset of `LAG`). The
//! planner resolves such arguments with [`uint64_from_constant`].

use super::{EvalContext, Expr};
use crate::types::Datum;

/// A constant that resolved to an unsigned integer or to NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintConstant {
    /// The constant is NULL.
    Null,
    /// The constant is a non-negative integer.
    Value(u64),
}

impl UintConstant {
    /// Returns true if the constant is NULL.
    #[must_use]
    pub const fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the constant is the integer zero (NULL is not zero).
    #[must_use]
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Value(0))
    }

    /// Returns the integer value, or `None` for NULL.
    #[must_use]
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Resolves `expr` to an unsigned integer constant.
///
/// Returns `None` when the expression is not a constant, is a parameter marker
/// with no bound value, holds a negative integer, or holds a non-integer
/// value. NULL resolves successfully to [`UintConstant::Null`].
#[must_use]
pub fn uint64_from_constant(ctx: &EvalContext, expr: &Expr) -> Option<UintConstant> {
    let Expr::Constant(con) = expr else {
        return None;
    };
    match con.eval(ctx).ok()? {
        Datum::Null => Some(UintConstant::Null),
        Datum::Int64(v) => u64::try_from(v).ok().map(UintConstant::Value),
        Datum::Uint64(v) => Some(UintConstant::Value(v)),
        Datum::Float64(_) | Datum::String(_) | Datum::Bytes(_) => None,
    }
}
