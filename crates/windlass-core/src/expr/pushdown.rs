//! Expression push-down capability.
//!
//! Before the planner delegates an operator to a remote engine it must know
//! that the engine can evaluate every expression the operator carries. This
//! module answers that question per [`StoreEngine`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EvalContext, Expr};
use crate::types::TypeKind;

/// Scalar functions the row store can evaluate.
static ROW_STORE_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "plus", "minus", "mul", "div", "mod", "eq", "ne", "lt", "le", "gt", "ge", "and", "or",
        "not", "isnull", "if", "ifnull", "coalesce", "case", "abs", "ceil", "floor", "round",
        "cast", "concat", "length", "lower", "upper", "substring", "like", "in", "year", "month",
        "day", "date_format", "json_extract", "json_unquote",
    ]
    .into_iter()
    .collect()
});

/// Scalar functions the columnar engine can evaluate.
static COLUMNAR_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "plus", "minus", "mul", "div", "mod", "eq", "ne", "lt", "le", "gt", "ge", "and", "or",
        "not", "isnull", "if", "ifnull", "coalesce", "case", "abs", "ceil", "floor", "round",
        "cast", "concat", "length", "lower", "upper", "substring", "like", "in", "year", "month",
        "day", "date_format",
    ]
    .into_iter()
    .collect()
});

/// A storage engine that can evaluate delegated work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreEngine {
    /// The row-oriented key-value store.
    RowStore,
    /// The columnar analytical engine.
    Columnar,
}

impl StoreEngine {
    /// Returns the engine's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RowStore => "rowstore",
            Self::Columnar => "columnar",
        }
    }

    /// Returns true if the engine can hold and evaluate values of `kind`.
    #[must_use]
    pub const fn supports_type(self, kind: TypeKind) -> bool {
        match self {
            Self::RowStore => true,
            Self::Columnar => {
                !matches!(kind, TypeKind::Bit | TypeKind::Enum | TypeKind::Set | TypeKind::Json)
            }
        }
    }

    /// Returns true if the engine implements the scalar function `name`.
    #[must_use]
    pub fn supports_scalar_function(self, name: &str) -> bool {
        match self {
            Self::RowStore => ROW_STORE_FUNCTIONS.contains(name),
            Self::Columnar => COLUMNAR_FUNCTIONS.contains(name),
        }
    }

    /// Returns true if the engine can run window operators at all.
    #[must_use]
    pub const fn supports_window_operator(self) -> bool {
        matches!(self, Self::Columnar)
    }
}

impl fmt::Display for StoreEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Functions an operator has forbidden from being pushed to specific engines.
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushDownBlocklist {
    entries: HashMap<String, HashSet<StoreEngine>>,
}

impl PushDownBlocklist {
    /// Creates an empty blocklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks `name` from being pushed to `engine`.
    pub fn block(&mut self, name: &str, engine: StoreEngine) {
        self.entries.entry(name.to_lowercase()).or_default().insert(engine);
    }

    /// Returns true if `name` may be pushed to `engine`.
    #[must_use]
    pub fn is_allowed(&self, name: &str, engine: StoreEngine) -> bool {
        self.entries.get(&name.to_lowercase()).is_none_or(|engines| !engines.contains(&engine))
    }

    /// Returns true if nothing is blocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a push-down decision may consult.
#[derive(Debug, Clone, Copy)]
pub struct PushDownContext<'a> {
    eval_ctx: &'a EvalContext,
    blocklist: &'a PushDownBlocklist,
}

impl<'a> PushDownContext<'a> {
    /// Creates a push-down context.
    #[must_use]
    pub const fn new(eval_ctx: &'a EvalContext, blocklist: &'a PushDownBlocklist) -> Self {
        Self { eval_ctx, blocklist }
    }

    /// Returns the evaluation context.
    #[must_use]
    pub const fn eval_ctx(&self) -> &'a EvalContext {
        self.eval_ctx
    }

    /// Returns the push-down blocklist.
    #[must_use]
    pub const fn blocklist(&self) -> &'a PushDownBlocklist {
        self.blocklist
    }
}

/// Returns true if every expression in `exprs` can be evaluated by `engine`.
#[must_use]
pub fn can_exprs_push_down(ctx: &PushDownContext<'_>, exprs: &[Expr], engine: StoreEngine) -> bool {
    exprs.iter().all(|expr| can_expr_push_down(ctx, expr, engine))
}

/// Returns true if `expr` can be evaluated by `engine`.
#[must_use]
pub fn can_expr_push_down(ctx: &PushDownContext<'_>, expr: &Expr, engine: StoreEngine) -> bool {
    if !engine.supports_type(expr.field_type().kind) {
        debug!(%expr, %engine, kind = %expr.field_type().kind, "type cannot be pushed down");
        return false;
    }
    match expr {
        Expr::Column(_) => true,
        Expr::Constant(con) => match con.param {
            // The remote side only ever sees the bound value.
            Some(marker) => ctx.eval_ctx().param(marker.index).is_ok(),
            None => true,
        },
        Expr::ScalarFunction(func) => {
            if !engine.supports_scalar_function(&func.name) {
                debug!(function = %func.name, %engine, "scalar function not supported by engine");
                return false;
            }
            if !ctx.blocklist().is_allowed(&func.name, engine) {
                debug!(function = %func.name, %engine, "scalar function is blocklisted");
                return false;
            }
            can_exprs_push_down(ctx, &func.args, engine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Datum, FieldType};

    fn int_col(index: usize) -> Expr {
        Expr::column(index, format!("c{index}"), FieldType::new(TypeKind::BigInt))
    }

    #[test]
    fn columns_and_literals_push_down() {
        let eval = EvalContext::new();
        let blocklist = PushDownBlocklist::new();
        let ctx = PushDownContext::new(&eval, &blocklist);

        let exprs = vec![int_col(0), Expr::literal(3i64)];
        assert!(can_exprs_push_down(&ctx, &exprs, StoreEngine::Columnar));
        assert!(can_exprs_push_down(&ctx, &exprs, StoreEngine::RowStore));
    }

    #[test]
    fn columnar_rejects_json_columns() {
        let eval = EvalContext::new();
        let blocklist = PushDownBlocklist::new();
        let ctx = PushDownContext::new(&eval, &blocklist);

        let doc = Expr::column(0, "doc", FieldType::new(TypeKind::Json));
        assert!(!can_expr_push_down(&ctx, &doc, StoreEngine::Columnar));
        assert!(can_expr_push_down(&ctx, &doc, StoreEngine::RowStore));
    }

    #[test]
    fn scalar_function_support_is_per_engine() {
        let eval = EvalContext::new();
        let blocklist = PushDownBlocklist::new();
        let ctx = PushDownContext::new(&eval, &blocklist);

        let varchar = FieldType::new(TypeKind::Varchar);
        let text = Expr::column(0, "t", varchar.clone());
        let extract = Expr::scalar("json_extract", vec![text.clone()], varchar.clone());
        assert!(can_expr_push_down(&ctx, &extract, StoreEngine::RowStore));
        assert!(!can_expr_push_down(&ctx, &extract, StoreEngine::Columnar));

        let upper = Expr::scalar("UPPER", vec![text], varchar);
        assert!(can_expr_push_down(&ctx, &upper, StoreEngine::Columnar));
    }

    #[test]
    fn blocklist_is_per_engine_and_case_insensitive() {
        let eval = EvalContext::new();
        let mut blocklist = PushDownBlocklist::new();
        blocklist.block("ABS", StoreEngine::Columnar);
        let ctx = PushDownContext::new(&eval, &blocklist);

        let abs = Expr::scalar("abs", vec![int_col(0)], FieldType::new(TypeKind::BigInt));
        assert!(!can_expr_push_down(&ctx, &abs, StoreEngine::Columnar));
        assert!(can_expr_push_down(&ctx, &abs, StoreEngine::RowStore));
    }

    #[test]
    fn nested_children_are_checked() {
        let eval = EvalContext::new();
        let blocklist = PushDownBlocklist::new();
        let ctx = PushDownContext::new(&eval, &blocklist);

        let bigint = FieldType::new(TypeKind::BigInt);
        let bad = Expr::scalar("no_such_fn", vec![int_col(0)], bigint.clone());
        let outer = Expr::scalar("abs", vec![bad], bigint);
        assert!(!can_expr_push_down(&ctx, &outer, StoreEngine::Columnar));
    }

    #[test]
    fn unbound_param_does_not_push_down() {
        let blocklist = PushDownBlocklist::new();
        let param = Expr::param(0, FieldType::new(TypeKind::BigInt));

        let unbound = EvalContext::new();
        let ctx = PushDownContext::new(&unbound, &blocklist);
        assert!(!can_expr_push_down(&ctx, &param, StoreEngine::Columnar));

        let bound = EvalContext::with_params(vec![Datum::Int64(1)]);
        let ctx = PushDownContext::new(&bound, &blocklist);
        assert!(can_expr_push_down(&ctx, &param, StoreEngine::Columnar));
    }
}
