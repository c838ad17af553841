//! Serializing window functions for a remote engine.

use tracing::debug;
use windlass_core::expr::WireConverter;
use windlass_core::wire::{ExprType, WireExpr};
use windlass_core::{Client, EvalContext};

use super::kind::WindowFuncKind;
use super::window::WindowFuncDesc;

impl WindowFuncKind {
    /// Returns the wire expression type of this function.
    #[must_use]
    pub const fn wire_type(self) -> ExprType {
        match self {
            Self::RowNumber => ExprType::RowNumber,
            Self::Rank => ExprType::Rank,
            Self::DenseRank => ExprType::DenseRank,
            Self::CumeDist => ExprType::CumeDist,
            Self::PercentRank => ExprType::PercentRank,
            Self::Ntile => ExprType::Ntile,
            Self::Lead => ExprType::Lead,
            Self::Lag => ExprType::Lag,
            Self::FirstValue => ExprType::FirstValue,
            Self::LastValue => ExprType::LastValue,
            Self::NthValue => ExprType::NthValue,
            Self::Count => ExprType::Count,
            Self::Sum => ExprType::Sum,
            Self::Avg => ExprType::Avg,
            Self::Max => ExprType::Max,
            Self::Min => ExprType::Min,
            Self::BitAnd => ExprType::AggBitAnd,
            Self::BitOr => ExprType::AggBitOr,
            Self::BitXor => ExprType::AggBitXor,
            Self::ApproxCountDistinct => ExprType::ApproxCountDistinct,
            Self::VarPop => ExprType::VarPop,
            Self::VarSamp => ExprType::VarSamp,
            Self::StddevPop => ExprType::StddevPop,
            Self::StddevSamp => ExprType::StddevSamp,
        }
    }
}

/// Converts `desc` into a wire expression for `client`.
///
/// Returns `None` if the client does not accept the function or any of its
/// arguments.
#[must_use]
pub fn window_func_to_wire(
    eval_ctx: &EvalContext,
    client: &dyn Client,
    desc: &WindowFuncDesc,
) -> Option<WireExpr> {
    let converter = WireConverter::new(client, eval_ctx);
    let tp = desc.kind().wire_type();
    if !converter.is_supported(tp) {
        debug!(function = %desc, ?tp, "window function not supported by client");
        return None;
    }
    let children = converter.exprs_to_wire(desc.args())?;
    Some(WireExpr::call(tp, children, desc.ret_type()))
}
