//! Window specifications.

use serde::{Deserialize, Serialize};
use windlass_core::Expr;

use super::frame::FrameClause;

/// An ORDER BY item of a window specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByExpr {
    /// The sort key.
    pub expr: Expr,
    /// Sort direction (true = ASC, false = DESC).
    pub asc: bool,
}

impl OrderByExpr {
    /// Creates an ascending order by item.
    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self { expr, asc: true }
    }

    /// Creates a descending order by item.
    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self { expr, asc: false }
    }
}

/// The `OVER (...)` clause of a window function call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderByExpr>,
    /// The frame clause, if one was written.
    pub frame: Option<FrameClause>,
}

impl WindowSpec {
    /// Creates an empty `OVER ()` specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a PARTITION BY expression.
    #[must_use]
    pub fn partition_by(mut self, expr: Expr) -> Self {
        self.partition_by.push(expr);
        self
    }

    /// Adds an ORDER BY item.
    #[must_use]
    pub fn order_by(mut self, item: OrderByExpr) -> Self {
        self.order_by.push(item);
        self
    }

    /// Sets the frame clause.
    #[must_use]
    pub fn with_frame(mut self, frame: FrameClause) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Returns true if the specification orders its partitions.
    #[must_use]
    pub fn has_order_by(&self) -> bool {
        !self.order_by.is_empty()
    }
}
