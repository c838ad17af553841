//! Planner-side expressions.
//!
//! [`Expr`] is the argument type of every function descriptor. The planner
//! only needs a handful of things from an expression: its type, whether it is
//! a constant (and which), whether a remote engine can evaluate it, and its
//! wire encoding. Those live in the submodules:
//!
//! - [`constant`] - resolving constants to unsigned integers
//! - [`pushdown`] - per-engine push-down capability
//! - [`wire`] - conversion to [`crate::wire::WireExpr`]
//!
//! # Example
//!
//! ```
//! use windlass_core::expr::Expr;
//! use windlass_core::types::{Datum, FieldType, TypeKind};
//!
//! let price = Expr::column(0, "price", FieldType::new(TypeKind::Decimal));
//! let offset = Expr::literal(Datum::Int64(2));
//!
//! assert!(!price.field_type().is_not_null());
//! assert!(offset.field_type().is_not_null());
//! assert!(offset.is_constant());
//! ```

pub mod constant;
pub mod pushdown;
pub mod wire;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Datum, FieldType};

pub use constant::{uint64_from_constant, UintConstant};
pub use pushdown::{
    can_expr_push_down, can_exprs_push_down, PushDownBlocklist, PushDownContext, StoreEngine,
};
pub use wire::WireConverter;

/// Evaluation state available while planning.
///
/// Holds the values bound to prepared-statement parameters. While a statement
/// is being prepared no values are bound, so every parameter marker is
/// unresolvable.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    params: Vec<Datum>,
}

impl EvalContext {
    /// Creates a context with no bound parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the given parameter values, indexed from zero.
    #[must_use]
    pub fn with_params(params: Vec<Datum>) -> Self {
        Self { params }
    }

    /// Returns the value bound to parameter `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnboundParameter`] if no value is bound.
    pub fn param(&self, index: usize) -> CoreResult<&Datum> {
        self.params.get(index).ok_or(CoreError::UnboundParameter(index))
    }
}

/// A reference to an input column by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Offset of the column in the input row.
    pub index: usize,
    /// Column name, for display only.
    pub name: String,
    /// Declared column type.
    pub ret_type: FieldType,
}

/// A `?` placeholder in a prepared statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamMarker {
    /// Zero-based position of the placeholder.
    pub index: usize,
}

/// A constant, either a literal or a parameter marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    /// The literal value. Ignored when `param` is set.
    pub value: Datum,
    /// Set when this constant stands for a prepared-statement parameter.
    pub param: Option<ParamMarker>,
    /// Type of the constant.
    pub ret_type: FieldType,
}

impl Constant {
    /// Returns the value of this constant, reading parameter markers from `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnboundParameter`] for a marker without a value.
    pub fn eval(&self, ctx: &EvalContext) -> CoreResult<Datum> {
        match self.param {
            Some(marker) => ctx.param(marker.index).cloned(),
            None => Ok(self.value.clone()),
        }
    }
}

/// A call to a scalar (row-at-a-time) function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarFunction {
    /// Lowercase function name.
    pub name: String,
    /// Arguments.
    pub args: Vec<Expr>,
    /// Result type.
    pub ret_type: FieldType,
}

/// An expression as seen by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Input column reference.
    Column(Column),
    /// Literal or parameter marker.
    Constant(Constant),
    /// Scalar function call.
    ScalarFunction(ScalarFunction),
}

impl Expr {
    /// Creates a column reference.
    #[must_use]
    pub fn column(index: usize, name: impl Into<String>, ret_type: FieldType) -> Self {
        Self::Column(Column { index, name: name.into(), ret_type })
    }

    /// Creates a literal whose type is derived from the value.
    #[must_use]
    pub fn literal(value: impl Into<Datum>) -> Self {
        let value = value.into();
        let ret_type = value.literal_type();
        Self::Constant(Constant { value, param: None, ret_type })
    }

    /// Creates a prepared-statement parameter marker of the given type.
    #[must_use]
    pub fn param(index: usize, ret_type: FieldType) -> Self {
        Self::Constant(Constant {
            value: Datum::Null,
            param: Some(ParamMarker { index }),
            ret_type,
        })
    }

    /// Creates a scalar function call.
    #[must_use]
    pub fn scalar(name: impl Into<String>, args: Vec<Expr>, ret_type: FieldType) -> Self {
        Self::ScalarFunction(ScalarFunction {
            name: name.into().to_lowercase(),
            args,
            ret_type,
        })
    }

    /// Returns the type of this expression.
    #[must_use]
    pub const fn field_type(&self) -> &FieldType {
        match self {
            Self::Column(c) => &c.ret_type,
            Self::Constant(c) => &c.ret_type,
            Self::ScalarFunction(f) => &f.ret_type,
        }
    }

    /// Returns true for literals and parameter markers.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(c) if c.name.is_empty() => write!(f, "column#{}", c.index),
            Self::Column(c) => write!(f, "{}", c.name),
            Self::Constant(Constant { param: Some(marker), .. }) => write!(f, "?{}", marker.index),
            Self::Constant(c) => write!(f, "{}", c.value),
            Self::ScalarFunction(func) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in func.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
