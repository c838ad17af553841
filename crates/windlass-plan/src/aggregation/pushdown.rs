//! Deciding whether a window function can run on a remote engine.

use tracing::debug;
use windlass_core::expr::can_exprs_push_down;
use windlass_core::StoreEngine;

use super::kind::WindowFuncKind;
use super::window::WindowFuncDesc;
use crate::config::PlanContext;

impl WindowFuncKind {
    /// Returns true if the columnar engine implements this function as a
    /// window function.
    #[must_use]
    pub const fn columnar_push_down_supported(self) -> bool {
        match self {
            Self::RowNumber
            | Self::Rank
            | Self::DenseRank
            | Self::Lead
            | Self::Lag
            | Self::FirstValue
            | Self::LastValue
            | Self::Sum
            | Self::Count
            | Self::Avg
            | Self::Max
            | Self::Min => true,
            Self::CumeDist
            | Self::PercentRank
            | Self::Ntile
            | Self::NthValue
            | Self::BitAnd
            | Self::BitOr
            | Self::BitXor
            | Self::ApproxCountDistinct
            | Self::VarPop
            | Self::VarSamp
            | Self::StddevPop
            | Self::StddevSamp => false,
        }
    }
}

impl WindowFuncDesc {
    /// Returns true if this function can be evaluated by `engine`.
    ///
    /// Every argument must be evaluable by the engine, the engine must run
    /// window operators, and the function must be one the engine implements.
    #[must_use]
    pub fn can_push_down(&self, ctx: &PlanContext, engine: StoreEngine) -> bool {
        if !ctx.config().window_push_down() {
            debug!(function = %self, "window push-down disabled");
            return false;
        }
        if !can_exprs_push_down(&ctx.push_down_ctx(), self.args(), engine) {
            debug!(function = %self, %engine, "window function arguments cannot be pushed down");
            return false;
        }
        if !engine.supports_window_operator() {
            debug!(function = %self, %engine, "engine has no window operator");
            return false;
        }
        if !self.kind().columnar_push_down_supported() {
            debug!(function = %self, %engine, "window function not implemented by engine");
            return false;
        }
        true
    }
}
