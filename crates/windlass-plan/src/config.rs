//! Planner configuration.

use serde::{Deserialize, Serialize};
use windlass_core::expr::PushDownBlocklist;
use windlass_core::{EvalContext, PushDownContext, StoreEngine};

/// Settings that affect window function planning.
///
/// ```
/// use windlass_core::StoreEngine;
/// use windlass_plan::PlanConfig;
///
/// let config = PlanConfig::new()
///     .without_window_push_down()
///     .with_blocked_function("substring", StoreEngine::Columnar);
/// assert!(!config.window_push_down());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    window_push_down: bool,
    push_down_blocklist: PushDownBlocklist,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self { window_push_down: true, push_down_blocklist: PushDownBlocklist::new() }
    }

    /// Keeps every window function on the local executor.
    #[must_use]
    pub const fn without_window_push_down(mut self) -> Self {
        self.window_push_down = false;
        self
    }

    /// Forbids pushing the scalar function `name` to `engine`.
    #[must_use]
    pub fn with_blocked_function(mut self, name: &str, engine: StoreEngine) -> Self {
        self.push_down_blocklist.block(name, engine);
        self
    }

    /// Returns true if window functions may be pushed down.
    #[must_use]
    pub const fn window_push_down(&self) -> bool {
        self.window_push_down
    }

    /// Returns the scalar function blocklist.
    #[must_use]
    pub const fn push_down_blocklist(&self) -> &PushDownBlocklist {
        &self.push_down_blocklist
    }
}

/// Per-statement planning state.
#[derive(Debug, Clone, Default)]
pub struct PlanContext {
    eval_ctx: EvalContext,
    config: PlanConfig,
}

impl PlanContext {
    /// Creates a context from bound parameters and configuration.
    #[must_use]
    pub const fn new(eval_ctx: EvalContext, config: PlanConfig) -> Self {
        Self { eval_ctx, config }
    }

    /// Returns the evaluation context.
    #[must_use]
    pub const fn eval_ctx(&self) -> &EvalContext {
        &self.eval_ctx
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Returns the context consulted by expression push-down checks.
    #[must_use]
    pub fn push_down_ctx(&self) -> PushDownContext<'_> {
        PushDownContext::new(&self.eval_ctx, &self.config.push_down_blocklist)
    }
}
