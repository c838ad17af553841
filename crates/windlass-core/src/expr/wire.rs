//! Conversion of planner expressions into wire expressions.

use tracing::debug;

use super::{Column, Constant, EvalContext, Expr, ScalarFunction};
use crate::codec;
use crate::kv::{Client, RequestType};
use crate::types::{Datum, TypeKind};
use crate::wire::{ExprType, WireExpr};

/// Converts expressions into [`WireExpr`] trees for one remote client.
///
/// Conversion yields `None` whenever the client cannot accept some node; the
/// caller then keeps the work local.
#[derive(Clone, Copy)]
pub struct WireConverter<'a> {
    client: &'a dyn Client,
    eval_ctx: &'a EvalContext,
}

impl<'a> WireConverter<'a> {
    /// Creates a converter for `client`, resolving parameters from `eval_ctx`.
    #[must_use]
    pub fn new(client: &'a dyn Client, eval_ctx: &'a EvalContext) -> Self {
        Self { client, eval_ctx }
    }

    /// Returns true if the client accepts `tp` in select requests.
    #[must_use]
    pub fn is_supported(&self, tp: ExprType) -> bool {
        self.client.is_request_type_supported(RequestType::Select, tp.code())
    }

    /// Converts one expression.
    #[must_use]
    pub fn expr_to_wire(&self, expr: &Expr) -> Option<WireExpr> {
        match expr {
            Expr::Column(col) => self.column_to_wire(col),
            Expr::Constant(con) => self.constant_to_wire(con),
            Expr::ScalarFunction(func) => self.scalar_func_to_wire(func),
        }
    }

    /// Converts every expression, or returns `None` if any conversion fails.
    #[must_use]
    pub fn exprs_to_wire(&self, exprs: &[Expr]) -> Option<Vec<WireExpr>> {
        exprs.iter().map(|expr| self.expr_to_wire(expr)).collect()
    }

    fn column_to_wire(&self, col: &Column) -> Option<WireExpr> {
        if !self.is_supported(ExprType::ColumnRef) {
            debug!(column = %col.name, "column references not supported by remote client");
            return None;
        }
        if !is_wire_column_kind(col.ret_type.kind) {
            debug!(column = %col.name, kind = %col.ret_type.kind, "column type has no wire form");
            return None;
        }
        let mut val = Vec::with_capacity(8);
        codec::encode_int(&mut val, i64::try_from(col.index).ok()?);
        Some(WireExpr::leaf(ExprType::ColumnRef, val, &col.ret_type))
    }

    fn constant_to_wire(&self, con: &Constant) -> Option<WireExpr> {
        let datum = match con.eval(self.eval_ctx) {
            Ok(datum) => datum,
            Err(err) => {
                debug!(%err, "constant cannot be converted to wire form");
                return None;
            }
        };
        let (tp, val) = match datum {
            Datum::Null => (ExprType::Null, Vec::new()),
            Datum::Int64(v) => {
                let mut val = Vec::with_capacity(8);
                codec::encode_int(&mut val, v);
                (ExprType::Int64, val)
            }
            Datum::Uint64(v) => {
                let mut val = Vec::with_capacity(8);
                codec::encode_uint(&mut val, v);
                (ExprType::Uint64, val)
            }
            Datum::Float64(v) => {
                let mut val = Vec::with_capacity(8);
                codec::encode_float(&mut val, v);
                (ExprType::Float64, val)
            }
            Datum::String(s) => (ExprType::String, s.into_bytes()),
            Datum::Bytes(b) => (ExprType::Bytes, b),
        };
        if !self.is_supported(tp) {
            debug!(?tp, "constant type not supported by remote client");
            return None;
        }
        Some(WireExpr::leaf(tp, val, &con.ret_type))
    }

    fn scalar_func_to_wire(&self, func: &ScalarFunction) -> Option<WireExpr> {
        if !self.is_supported(ExprType::ScalarFunc) {
            return None;
        }
        let children = self.exprs_to_wire(&func.args)?;
        let mut wire = WireExpr::call(ExprType::ScalarFunc, children, &func.ret_type);
        wire.func_name = Some(func.name.clone());
        Some(wire)
    }
}

/// Returns true if a column of this kind can be referenced in a wire tree.
const fn is_wire_column_kind(kind: TypeKind) -> bool {
    !matches!(kind, TypeKind::Bit | TypeKind::Enum | TypeKind::Set | TypeKind::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::CapabilityClient;
    use crate::types::FieldType;

    #[test]
    fn column_ref_encodes_offset() {
        let client = CapabilityClient::columnar();
        let ctx = EvalContext::new();
        let conv = WireConverter::new(&client, &ctx);

        let wire = conv.expr_to_wire(&Expr::column(3, "a", FieldType::new(TypeKind::Int))).unwrap();
        assert_eq!(wire.tp, ExprType::ColumnRef);
        assert_eq!(codec::decode_int(&wire.val).unwrap(), 3);
    }

    #[test]
    fn column_ref_requires_client_support() {
        let client = CapabilityClient::columnar().without(ExprType::ColumnRef);
        let ctx = EvalContext::new();
        let conv = WireConverter::new(&client, &ctx);
        assert!(conv.expr_to_wire(&Expr::column(0, "a", FieldType::new(TypeKind::Int))).is_none());
    }

    #[test]
    fn unsupported_column_kind_fails() {
        let client = CapabilityClient::columnar();
        let ctx = EvalContext::new();
        let conv = WireConverter::new(&client, &ctx);

        for kind in [TypeKind::Bit, TypeKind::Enum, TypeKind::Set, TypeKind::Json] {
            let col = Expr::column(0, "a", FieldType::new(kind));
            assert!(conv.expr_to_wire(&col).is_none(), "{kind} column converted");
        }
        let col = Expr::column(0, "a", FieldType::new(TypeKind::Varchar));
        assert!(conv.expr_to_wire(&col).is_some());
    }

    #[test]
    fn constants_use_datum_type_tags() {
        let client = CapabilityClient::columnar();
        let ctx = EvalContext::new();
        let conv = WireConverter::new(&client, &ctx);

        let wire = conv.expr_to_wire(&Expr::literal(-7i64)).unwrap();
        assert_eq!(wire.tp, ExprType::Int64);
        assert_eq!(codec::decode_int(&wire.val).unwrap(), -7);

        let wire = conv.expr_to_wire(&Expr::literal("abc")).unwrap();
        assert_eq!(wire.tp, ExprType::String);
        assert_eq!(wire.val, b"abc");

        let wire = conv.expr_to_wire(&Expr::literal(Datum::Null)).unwrap();
        assert_eq!(wire.tp, ExprType::Null);
        assert!(wire.val.is_empty());
    }

    #[test]
    fn unsupported_constant_type_fails() {
        let client = CapabilityClient::columnar().without(ExprType::Float64);
        let ctx = EvalContext::new();
        let conv = WireConverter::new(&client, &ctx);
        assert!(conv.expr_to_wire(&Expr::literal(1.5f64)).is_none());
    }

    #[test]
    fn params_are_sent_as_bound_values() {
        let client = CapabilityClient::columnar();
        let param = Expr::param(0, FieldType::new(TypeKind::BigInt));

        let unbound = EvalContext::new();
        assert!(WireConverter::new(&client, &unbound).expr_to_wire(&param).is_none());

        let bound = EvalContext::with_params(vec![Datum::Uint64(9)]);
        let wire = WireConverter::new(&client, &bound).expr_to_wire(&param).unwrap();
        assert_eq!(wire.tp, ExprType::Uint64);
        assert_eq!(codec::decode_uint(&wire.val).unwrap(), 9);
    }

    #[test]
    fn scalar_function_failure_propagates() {
        let ctx = EvalContext::new();
        let bigint = FieldType::new(TypeKind::BigInt);
        let func = Expr::scalar(
            "plus",
            vec![Expr::column(0, "a", bigint.clone()), Expr::literal(1.5f64)],
            bigint,
        );

        let client = CapabilityClient::columnar();
        let wire = WireConverter::new(&client, &ctx).expr_to_wire(&func).unwrap();
        assert_eq!(wire.func_name.as_deref(), Some("plus"));
        assert_eq!(wire.children.len(), 2);

        let client = CapabilityClient::columnar().without(ExprType::Float64);
        assert!(WireConverter::new(&client, &ctx).expr_to_wire(&func).is_none());

        let client = CapabilityClient::columnar().without(ExprType::ScalarFunc);
        assert!(WireConverter::new(&client, &ctx).expr_to_wire(&func).is_none());
    }
}
