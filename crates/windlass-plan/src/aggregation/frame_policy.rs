//! Which window functions look at a frame, and which frame they get.
//!
//! Ranking and offset functions operate on the whole partition no matter
//! what frame is written, so any frame clause on them is ignored. `ROW_NUMBER`
//! additionally runs with a fixed one-row frame. Every other function
//! evaluates over its frame, defaulting to the SQL standard frame when the
//! window is ordered.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use tracing::debug;
use windlass_core::expr::{uint64_from_constant, Expr};
use windlass_core::{Datum, EvalContext};

use super::kind::WindowFuncKind;
use crate::ast::{FrameBound, FrameClause, FrameType, WindowSpec};
use crate::error::{PlanError, PlanResult};

/// Functions that ignore any frame clause.
static NO_FRAME_FUNCS: LazyLock<HashSet<WindowFuncKind>> = LazyLock::new(|| {
    [
        WindowFuncKind::CumeDist,
        WindowFuncKind::DenseRank,
        WindowFuncKind::Lag,
        WindowFuncKind::Lead,
        WindowFuncKind::Ntile,
        WindowFuncKind::PercentRank,
        WindowFuncKind::Rank,
        WindowFuncKind::RowNumber,
    ]
    .into_iter()
    .collect()
});

/// Functions that always run with a fixed frame.
static DEFAULT_FRAMES: LazyLock<HashMap<WindowFuncKind, FrameClause>> = LazyLock::new(|| {
    HashMap::from([(
        WindowFuncKind::RowNumber,
        FrameClause::rows(FrameBound::CurrentRow, FrameBound::CurrentRow),
    )])
});

impl WindowFuncKind {
    /// Returns true if the function's result depends on its frame.
    #[must_use]
    pub fn needs_frame(self) -> bool {
        !NO_FRAME_FUNCS.contains(&self)
    }

    /// Returns the fixed frame the function always runs with, if any.
    #[must_use]
    pub fn default_frame(self) -> Option<&'static FrameClause> {
        DEFAULT_FRAMES.get(&self)
    }
}

/// Returns true if the function named `name` evaluates over a frame.
///
/// Names are matched case-insensitively. Unknown names need a frame.
#[must_use]
pub fn needs_frame(name: &str) -> bool {
    WindowFuncKind::from_name(name).is_none_or(WindowFuncKind::needs_frame)
}

/// Returns the fixed frame the function named `name` runs with, if any.
#[must_use]
pub fn use_default_frame(name: &str) -> Option<&'static FrameClause> {
    WindowFuncKind::from_name(name).and_then(WindowFuncKind::default_frame)
}

/// The frame a window function will actually be evaluated with.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFrame {
    /// The frame, or `None` for the whole partition.
    pub frame: Option<FrameClause>,
    /// True if a frame clause was written but does not apply to the function.
    pub ignored_user_frame: bool,
}

/// Decides the frame for `kind` evaluated over `spec`.
///
/// - Functions that ignore frames drop the written clause and take their
///   fixed frame, if they have one.
/// - An ordered window with no clause gets
///   `RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`.
/// - `UNBOUNDED PRECEDING` to `UNBOUNDED FOLLOWING` becomes the whole
///   partition.
///
/// # Errors
///
/// Returns [`PlanError::InvalidFrame`] for a malformed clause, and a core
/// error if a frame offset refers to an unbound parameter.
pub fn resolve_frame(
    ctx: &EvalContext,
    kind: WindowFuncKind,
    spec: &WindowSpec,
) -> PlanResult<ResolvedFrame> {
    if !kind.needs_frame() {
        let ignored_user_frame = spec.frame.is_some();
        if let Some(frame) = &spec.frame {
            debug!(function = %kind, %frame, "frame clause ignored");
        }
        return Ok(ResolvedFrame { frame: kind.default_frame().cloned(), ignored_user_frame });
    }

    let frame = match &spec.frame {
        None if spec.has_order_by() => {
            Some(FrameClause::range(FrameBound::UnboundedPreceding, FrameBound::CurrentRow))
        }
        None => None,
        Some(frame) => {
            validate_frame(ctx, frame, spec)?;
            (!frame.is_whole_partition()).then(|| frame.clone())
        }
    };
    Ok(ResolvedFrame { frame, ignored_user_frame: false })
}

fn validate_frame(ctx: &EvalContext, frame: &FrameClause, spec: &WindowSpec) -> PlanResult<()> {
    let (start, end) = (&frame.extent.start, &frame.extent.end);
    if matches!(start, FrameBound::UnboundedFollowing) {
        return Err(PlanError::InvalidFrame("frame start cannot be UNBOUNDED FOLLOWING".into()));
    }
    if matches!(end, FrameBound::UnboundedPreceding) {
        return Err(PlanError::InvalidFrame("frame end cannot be UNBOUNDED PRECEDING".into()));
    }
    if start.rank() > end.rank() {
        return Err(PlanError::InvalidFrame(format!("frame starting at {start} ends before it")));
    }
    for bound in [start, end] {
        if let Some(offset) = bound.offset() {
            validate_offset(ctx, frame.frame_type, offset, spec)?;
        }
    }
    Ok(())
}

fn validate_offset(
    ctx: &EvalContext,
    frame_type: FrameType,
    offset: &Expr,
    spec: &WindowSpec,
) -> PlanResult<()> {
    let Expr::Constant(con) = offset else {
        return Err(PlanError::InvalidFrame(format!("frame offset {offset} is not a constant")));
    };
    let value = con.eval(ctx)?;
    match frame_type {
        FrameType::Rows => match uint64_from_constant(ctx, offset) {
            Some(n) if !n.is_null() => Ok(()),
            _ => Err(PlanError::InvalidFrame(format!(
                "ROWS frame offset {value} must be a non-negative integer"
            ))),
        },
        FrameType::Ranges => {
            if spec.order_by.len() != 1 {
                return Err(PlanError::InvalidFrame(
                    "RANGE frame with an offset requires exactly one ORDER BY expression".into(),
                ));
            }
            let negative = match value {
                Datum::Null => {
                    return Err(PlanError::InvalidFrame("RANGE frame offset is NULL".into()));
                }
                Datum::Int64(v) => v < 0,
                Datum::Uint64(_) => false,
                Datum::Float64(v) if v.is_nan() => {
                    return Err(PlanError::InvalidFrame(format!(
                        "RANGE frame offset {value} is not a number"
                    )));
                }
                Datum::Float64(v) => v < 0.0,
                Datum::String(_) | Datum::Bytes(_) => {
                    return Err(PlanError::InvalidFrame(format!(
                        "RANGE frame offset {value} is not numeric"
                    )));
                }
            };
            if negative {
                return Err(PlanError::InvalidFrame(format!(
                    "RANGE frame offset {value} is negative"
                )));
            }
            Ok(())
        }
    }
}
