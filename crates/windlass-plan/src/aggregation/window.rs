//! Window function descriptors.
//!
//! [`WindowFuncDesc::new`] turns a parsed `f(args) OVER (...)` call into a
//! descriptor in three steps:
//!
//! 1. Constant argument checks. `NTILE(n)` and `NTH_VALUE(expr, n)` need a
//!    constant `n` that is NULL or positive, and `LEAD`/`LAG` need a constant
//!    non-NULL offset. A call that fails these is not an error; it is
//!    [`Admission::Rejected`] and the caller decides how to report it.
//! 2. Result type inference, shared with plain aggregates ([`BaseFuncDesc`]).
//! 3. Nullability. Ranking and counting functions never produce NULL; value
//!    functions may run off the edge of the partition and so are nullable.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use windlass_core::expr::{uint64_from_constant, UintConstant};
use windlass_core::types::NOT_NULL_FLAG;
use windlass_core::{EvalContext, Expr, FieldType};

use super::base::BaseFuncDesc;
use super::kind::WindowFuncKind;
use crate::error::PlanResult;

/// Why a call was not admitted as a window function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The argument at `position` is not a constant non-negative integer.
    UnresolvedConstant {
        /// Zero-based argument position.
        position: usize,
    },
    /// The argument at `position` is zero where a positive count is needed.
    ZeroNotAllowed {
        /// Zero-based argument position.
        position: usize,
    },
    /// The LEAD/LAG offset is NULL.
    NullOffset,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedConstant { position } => {
                write!(f, "argument {position} is not a constant unsigned integer")
            }
            Self::ZeroNotAllowed { position } => write!(f, "argument {position} must be positive"),
            Self::NullOffset => write!(f, "offset is NULL"),
        }
    }
}

/// Outcome of building a window function descriptor.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Admission {
    /// The call is a valid window function.
    Accepted(WindowFuncDesc),
    /// The call is well-formed but not a valid window invocation.
    Rejected(Rejection),
}

impl Admission {
    /// Returns the descriptor if the call was accepted.
    #[must_use]
    pub fn accepted(self) -> Option<WindowFuncDesc> {
        match self {
            Self::Accepted(desc) => Some(desc),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the rejection reason if the call was rejected.
    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    /// Returns true if the call was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// A window function call ready for planning.
///
/// Cloning produces an independent copy of the arguments and result type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFuncDesc {
    base: BaseFuncDesc,
}

impl WindowFuncDesc {
    /// Builds a descriptor for `name(args)`.
    ///
    /// With `skip_arg_checks` set the constant argument checks are skipped;
    /// the caller has already validated the call.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown function, a wrong argument count, or
    /// argument types with no result type. A call that fails the constant
    /// argument checks is `Ok(Admission::Rejected(_))`.
    ///
    /// Returns an [`Admission`] rather than `Self` because a well-formed call
    /// can still be refused without it being an error.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(
        ctx: &EvalContext,
        name: &str,
        args: Vec<Expr>,
        skip_arg_checks: bool,
    ) -> PlanResult<Admission> {
        let kind = WindowFuncKind::resolve(name, args.len())?;
        if !skip_arg_checks {
            if let Some(reason) = check_constant_args(ctx, kind, &args) {
                debug!(function = %kind, %reason, "window function call rejected");
                return Ok(Admission::Rejected(reason));
            }
        }

        let mut base = BaseFuncDesc::from_kind(kind, args)?;
        resolve_nullability(kind, &base.args, &mut base.ret_type);

        let desc = Self { base };
        trace!(function = %desc, ret_type = %desc.ret_type(), "built window function descriptor");
        Ok(Admission::Accepted(desc))
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Returns the function kind.
    #[must_use]
    pub const fn kind(&self) -> WindowFuncKind {
        self.base.kind
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args(&self) -> &[Expr] {
        &self.base.args
    }

    /// Returns the result type.
    #[must_use]
    pub const fn ret_type(&self) -> &FieldType {
        &self.base.ret_type
    }

    /// Returns the result type for rewrites that refine it, such as a
    /// NOT NULL filter above the window.
    pub fn ret_type_mut(&mut self) -> &mut FieldType {
        &mut self.base.ret_type
    }

    /// Returns the underlying function descriptor.
    #[must_use]
    pub const fn base(&self) -> &BaseFuncDesc {
        &self.base
    }
}

impl fmt::Display for WindowFuncDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, arg) in self.args().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

fn check_constant_args(
    ctx: &EvalContext,
    kind: WindowFuncKind,
    args: &[Expr],
) -> Option<Rejection> {
    match kind {
        WindowFuncKind::NthValue => check_positive_or_null(ctx, args, 1),
        WindowFuncKind::Ntile => check_positive_or_null(ctx, args, 0),
        WindowFuncKind::Lead | WindowFuncKind::Lag => {
            let offset = args.get(1)?;
            match uint64_from_constant(ctx, offset) {
                None => Some(Rejection::UnresolvedConstant { position: 1 }),
                Some(UintConstant::Null) => Some(Rejection::NullOffset),
                Some(UintConstant::Value(_)) => None,
            }
        }
        WindowFuncKind::RowNumber
        | WindowFuncKind::Rank
        | WindowFuncKind::DenseRank
        | WindowFuncKind::CumeDist
        | WindowFuncKind::PercentRank
        | WindowFuncKind::FirstValue
        | WindowFuncKind::LastValue
        | WindowFuncKind::Count
        | WindowFuncKind::Sum
        | WindowFuncKind::Avg
        | WindowFuncKind::Max
        | WindowFuncKind::Min
        | WindowFuncKind::BitAnd
        | WindowFuncKind::BitOr
        | WindowFuncKind::BitXor
        | WindowFuncKind::ApproxCountDistinct
        | WindowFuncKind::VarPop
        | WindowFuncKind::VarSamp
        | WindowFuncKind::StddevPop
        | WindowFuncKind::StddevSamp => None,
    }
}

/// The argument at `position` must be a constant that is NULL or above zero.
fn check_positive_or_null(ctx: &EvalContext, args: &[Expr], position: usize) -> Option<Rejection> {
    match args.get(position).and_then(|arg| uint64_from_constant(ctx, arg)) {
        None => Some(Rejection::UnresolvedConstant { position }),
        Some(n) if n.is_zero() => Some(Rejection::ZeroNotAllowed { position }),
        Some(_) => None,
    }
}

/// Sets or clears `NOT_NULL_FLAG` on the result type.
fn resolve_nullability(kind: WindowFuncKind, args: &[Expr], ret_type: &mut FieldType) {
    let not_null = match kind {
        WindowFuncKind::RowNumber
        | WindowFuncKind::Rank
        | WindowFuncKind::DenseRank
        | WindowFuncKind::CumeDist
        | WindowFuncKind::PercentRank
        | WindowFuncKind::Count
        | WindowFuncKind::ApproxCountDistinct
        | WindowFuncKind::BitAnd
        | WindowFuncKind::BitOr
        | WindowFuncKind::BitXor => true,
        // Off the edge of the partition LEAD/LAG return the default.
        WindowFuncKind::Lead | WindowFuncKind::Lag => matches!(
            args,
            [value, _, default]
                if value.field_type().is_not_null() && default.field_type().is_not_null()
        ),
        WindowFuncKind::Ntile
        | WindowFuncKind::FirstValue
        | WindowFuncKind::LastValue
        | WindowFuncKind::NthValue
        | WindowFuncKind::Sum
        | WindowFuncKind::Avg
        | WindowFuncKind::Max
        | WindowFuncKind::Min
        | WindowFuncKind::VarPop
        | WindowFuncKind::VarSamp
        | WindowFuncKind::StddevPop
        | WindowFuncKind::StddevSamp => false,
    };
    if not_null {
        ret_type.set_flag(NOT_NULL_FLAG);
    } else {
        ret_type.del_flag(NOT_NULL_FLAG);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windlass_core::{Datum, TypeKind};

    fn nullable_col() -> Expr {
        Expr::column(0, "a", FieldType::new(TypeKind::BigInt))
    }

    fn not_null_col() -> Expr {
        Expr::column(1, "b", FieldType::not_null(TypeKind::BigInt))
    }

    fn build(name: &str, args: Vec<Expr>) -> Admission {
        WindowFuncDesc::new(&EvalContext::new(), name, args, false).unwrap()
    }

    #[test]
    fn ntile_zero_is_rejected() {
        let admission = build("ntile", vec![Expr::literal(0i64)]);
        assert_eq!(admission.rejection(), Some(Rejection::ZeroNotAllowed { position: 0 }));
    }

    #[test]
    fn ntile_null_is_accepted() {
        let desc = build("ntile", vec![Expr::literal(Datum::Null)]).accepted().unwrap();
        assert_eq!(desc.kind(), WindowFuncKind::Ntile);
        assert!(!desc.ret_type().is_not_null());
    }

    #[test]
    fn nth_value_requires_constant_position() {
        let admission = build("nth_value", vec![nullable_col(), not_null_col()]);
        assert_eq!(admission.rejection(), Some(Rejection::UnresolvedConstant { position: 1 }));

        let admission = build("nth_value", vec![nullable_col(), Expr::literal(-1i64)]);
        assert_eq!(admission.rejection(), Some(Rejection::UnresolvedConstant { position: 1 }));

        assert!(build("nth_value", vec![nullable_col(), Expr::literal(2i64)]).is_accepted());
    }

    #[test]
    fn lag_offset_must_be_non_null() {
        let admission = build("lag", vec![nullable_col(), Expr::literal(Datum::Null)]);
        assert_eq!(admission.rejection(), Some(Rejection::NullOffset));

        assert!(build("lag", vec![nullable_col(), Expr::literal(0i64)]).is_accepted());
        assert!(build("lag", vec![nullable_col()]).is_accepted());
    }

    #[test]
    fn skip_arg_checks_admits_anything() {
        let ctx = EvalContext::new();
        let admission =
            WindowFuncDesc::new(&ctx, "ntile", vec![Expr::literal(0i64)], true).unwrap();
        assert!(admission.is_accepted());
    }

    #[test]
    fn ranking_is_never_null() {
        for name in ["row_number", "rank", "dense_rank", "cume_dist", "percent_rank"] {
            let desc = build(name, vec![]).accepted().unwrap();
            assert!(desc.ret_type().is_not_null(), "{name}");
        }
        let desc = build("count", vec![nullable_col()]).accepted().unwrap();
        assert!(desc.ret_type().is_not_null());
    }

    #[test]
    fn value_functions_are_nullable_even_over_not_null_input() {
        for name in ["first_value", "last_value", "max", "min"] {
            let desc = build(name, vec![not_null_col()]).accepted().unwrap();
            assert!(!desc.ret_type().is_not_null(), "{name}");
        }
    }

    #[test]
    fn lead_nullability_follows_value_and_default() {
        let desc =
            build("lead", vec![not_null_col(), Expr::literal(1i64), Expr::literal(0i64)]);
        assert!(desc.accepted().unwrap().ret_type().is_not_null());

        let desc =
            build("lead", vec![nullable_col(), Expr::literal(1i64), Expr::literal(0i64)]);
        assert!(!desc.accepted().unwrap().ret_type().is_not_null());

        let desc = build("lead", vec![not_null_col(), Expr::literal(1i64)]);
        assert!(!desc.accepted().unwrap().ret_type().is_not_null());
    }

    #[test]
    fn display() {
        let desc = build("sum", vec![Expr::column(2, "", FieldType::new(TypeKind::Int))]);
        assert_eq!(desc.accepted().unwrap().to_string(), "sum(column#2)");
    }

    #[test]
    fn clone_is_independent() {
        let desc = build("max", vec![nullable_col()]).accepted().unwrap();
        let mut copy = desc.clone();
        copy.base.ret_type.set_flag(NOT_NULL_FLAG);
        copy.base.args.clear();
        assert!(!desc.ret_type().is_not_null());
        assert_eq!(desc.args().len(), 1);
    }
}
