//! Function descriptors shared by aggregates and window functions.
//!
//! A [`BaseFuncDesc`] is a resolved call: canonical name, kind, arguments and
//! the inferred result type. Inference follows MySQL's rules for aggregates
//! evaluated over a window.

use serde::{Deserialize, Serialize};
use windlass_core::types::UNSIGNED_FLAG;
use windlass_core::{Expr, FieldType, TypeKind};

use super::kind::WindowFuncKind;
use crate::error::{PlanError, PlanResult};

/// Display length of BIGINT results produced by counting and ranking.
const BIGINT_RESULT_FLEN: i32 = 21;

/// Widest DECIMAL the planner produces.
const MAX_DECIMAL_WIDTH: i32 = 65;

/// Largest DECIMAL scale the planner produces.
const MAX_DECIMAL_SCALE: i32 = 30;

/// Extra scale AVG adds to its input.
const AVG_SCALE_INCREMENT: i32 = 4;

/// A resolved function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseFuncDesc {
    /// Canonical lowercase name.
    pub name: String,
    /// The function.
    pub kind: WindowFuncKind,
    /// Arguments in call order.
    pub args: Vec<Expr>,
    /// Inferred result type.
    pub ret_type: FieldType,
}

impl BaseFuncDesc {
    /// Resolves a call by name and infers its result type.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown, the argument count is wrong,
    /// or the argument types admit no result type.
    pub fn new(name: &str, args: Vec<Expr>) -> PlanResult<Self> {
        let kind = WindowFuncKind::resolve(name, args.len())?;
        Self::from_kind(kind, args)
    }

    /// Builds a descriptor for an already resolved kind.
    pub(crate) fn from_kind(kind: WindowFuncKind, args: Vec<Expr>) -> PlanResult<Self> {
        let ret_type = infer_ret_type(kind, &args)?;
        Ok(Self { name: kind.name().to_string(), kind, args, ret_type })
    }
}

fn bigint_result() -> FieldType {
    FieldType::new(TypeKind::BigInt).with_flen(BIGINT_RESULT_FLEN)
}

fn first_arg(kind: WindowFuncKind, args: &[Expr]) -> PlanResult<&FieldType> {
    args.first().map(Expr::field_type).ok_or_else(|| PlanError::TypeInference {
        function: kind.name().to_string(),
        reason: "missing argument".to_string(),
    })
}

/// Rejects argument kinds that have no numeric interpretation.
fn numeric_arg(kind: WindowFuncKind, args: &[Expr]) -> PlanResult<FieldType> {
    let arg = first_arg(kind, args)?;
    if arg.kind == TypeKind::Json {
        return Err(PlanError::TypeInference {
            function: kind.name().to_string(),
            reason: format!("{} argument is not numeric", arg.kind),
        });
    }
    Ok(arg.clone())
}

fn infer_ret_type(kind: WindowFuncKind, args: &[Expr]) -> PlanResult<FieldType> {
    let ret_type = match kind {
        WindowFuncKind::RowNumber
        | WindowFuncKind::Rank
        | WindowFuncKind::DenseRank
        | WindowFuncKind::Ntile
        | WindowFuncKind::Count
        | WindowFuncKind::ApproxCountDistinct => bigint_result(),
        WindowFuncKind::CumeDist | WindowFuncKind::PercentRank => FieldType::new(TypeKind::Double),
        WindowFuncKind::BitAnd | WindowFuncKind::BitOr | WindowFuncKind::BitXor => {
            numeric_arg(kind, args)?;
            bigint_result().with_flag(UNSIGNED_FLAG)
        }
        WindowFuncKind::Sum => {
            let arg = numeric_arg(kind, args)?;
            if arg.kind.is_integer() || arg.kind == TypeKind::Decimal {
                FieldType::new(TypeKind::Decimal)
                    .with_flen(MAX_DECIMAL_WIDTH)
                    .with_decimal(arg.decimal.clamp(0, MAX_DECIMAL_SCALE))
            } else {
                FieldType::new(TypeKind::Double)
            }
        }
        WindowFuncKind::Avg => {
            let arg = numeric_arg(kind, args)?;
            if arg.kind.is_integer() || arg.kind == TypeKind::Decimal {
                let scale = (arg.decimal.max(0) + AVG_SCALE_INCREMENT).min(MAX_DECIMAL_SCALE);
                FieldType::new(TypeKind::Decimal).with_flen(MAX_DECIMAL_WIDTH).with_decimal(scale)
            } else {
                FieldType::new(TypeKind::Double)
            }
        }
        WindowFuncKind::VarPop
        | WindowFuncKind::VarSamp
        | WindowFuncKind::StddevPop
        | WindowFuncKind::StddevSamp => {
            numeric_arg(kind, args)?;
            FieldType::new(TypeKind::Double)
        }
        WindowFuncKind::Max
        | WindowFuncKind::Min
        | WindowFuncKind::FirstValue
        | WindowFuncKind::LastValue
        | WindowFuncKind::NthValue => first_arg(kind, args)?.clone(),
        WindowFuncKind::Lead | WindowFuncKind::Lag => {
            let value = first_arg(kind, args)?;
            match args.get(2) {
                Some(default) => unify(value, default.field_type()),
                None => value.clone(),
            }
        }
    };
    Ok(ret_type)
}

/// The common type of a LEAD/LAG value and its default.
fn unify(value: &FieldType, default: &FieldType) -> FieldType {
    if value.kind == default.kind {
        let mut unified = value.clone();
        unified.flen = value.flen.max(default.flen);
        unified.decimal = value.decimal.max(default.decimal);
        if !default.is_unsigned() {
            unified.del_flag(UNSIGNED_FLAG);
        }
        return unified;
    }
    if value.kind == TypeKind::Null {
        return default.clone();
    }
    if default.kind == TypeKind::Null {
        return value.clone();
    }
    if value.kind.is_numeric() && default.kind.is_numeric() {
        if value.kind.is_float() || default.kind.is_float() {
            return FieldType::new(TypeKind::Double);
        }
        if value.kind.is_integer() && default.kind.is_integer() {
            return FieldType::new(TypeKind::BigInt);
        }
        let scale = value.decimal.max(default.decimal).clamp(0, MAX_DECIMAL_SCALE);
        return FieldType::new(TypeKind::Decimal).with_flen(MAX_DECIMAL_WIDTH).with_decimal(scale);
    }
    FieldType::new(TypeKind::Varchar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use windlass_core::Datum;

    fn col(kind: TypeKind) -> Expr {
        Expr::column(0, "c", FieldType::new(kind))
    }

    #[test]
    fn ranking_functions_return_bigint() {
        for name in ["row_number", "rank", "dense_rank"] {
            let desc = BaseFuncDesc::new(name, vec![]).unwrap();
            assert_eq!(desc.ret_type.kind, TypeKind::BigInt);
            assert_eq!(desc.ret_type.flen, 21);
        }
        let desc = BaseFuncDesc::new("percent_rank", vec![]).unwrap();
        assert_eq!(desc.ret_type.kind, TypeKind::Double);
    }

    #[test]
    fn name_is_canonical() {
        let desc = BaseFuncDesc::new("STDDEV", vec![col(TypeKind::Int)]).unwrap();
        assert_eq!(desc.name, "stddev_pop");
        assert_eq!(desc.kind, WindowFuncKind::StddevPop);
    }

    #[test]
    fn sum_and_avg_over_integers_are_decimal() {
        let sum = BaseFuncDesc::new("sum", vec![col(TypeKind::Int)]).unwrap();
        assert_eq!(sum.ret_type.kind, TypeKind::Decimal);
        assert_eq!(sum.ret_type.decimal, 0);

        let avg = BaseFuncDesc::new("avg", vec![col(TypeKind::Int)]).unwrap();
        assert_eq!(avg.ret_type.kind, TypeKind::Decimal);
        assert_eq!(avg.ret_type.decimal, 4);

        let avg = BaseFuncDesc::new("avg", vec![col(TypeKind::Double)]).unwrap();
        assert_eq!(avg.ret_type.kind, TypeKind::Double);
    }

    #[test]
    fn avg_scale_is_capped() {
        let wide = Expr::column(0, "d", FieldType::new(TypeKind::Decimal).with_decimal(28));
        let avg = BaseFuncDesc::new("avg", vec![wide]).unwrap();
        assert_eq!(avg.ret_type.decimal, 30);
    }

    #[test]
    fn bit_functions_are_unsigned() {
        let desc = BaseFuncDesc::new("bit_or", vec![col(TypeKind::Int)]).unwrap();
        assert!(desc.ret_type.is_unsigned());
    }

    #[test]
    fn value_functions_take_argument_type() {
        let arg = Expr::column(0, "s", FieldType::new(TypeKind::Varchar).with_flen(32));
        let desc = BaseFuncDesc::new("first_value", vec![arg]).unwrap();
        assert_eq!(desc.ret_type.kind, TypeKind::Varchar);
        assert_eq!(desc.ret_type.flen, 32);
    }

    #[test]
    fn lead_default_unifies_types() {
        let desc = BaseFuncDesc::new(
            "lead",
            vec![col(TypeKind::Int), Expr::literal(1i64), Expr::literal(0.5f64)],
        )
        .unwrap();
        assert_eq!(desc.ret_type.kind, TypeKind::Double);

        let desc = BaseFuncDesc::new(
            "lag",
            vec![col(TypeKind::Int), Expr::literal(1i64), Expr::literal("none")],
        )
        .unwrap();
        assert_eq!(desc.ret_type.kind, TypeKind::Varchar);

        let desc = BaseFuncDesc::new(
            "lag",
            vec![col(TypeKind::BigInt), Expr::literal(1i64), Expr::literal(Datum::Null)],
        )
        .unwrap();
        assert_eq!(desc.ret_type.kind, TypeKind::BigInt);
    }

    #[test]
    fn json_is_not_summable() {
        let err = BaseFuncDesc::new("sum", vec![col(TypeKind::Json)]).unwrap_err();
        assert!(matches!(err, PlanError::TypeInference { ref function, .. } if function == "sum"));

        assert!(BaseFuncDesc::new("max", vec![col(TypeKind::Json)]).is_ok());
    }

    #[test]
    fn unknown_and_arity_errors() {
        assert!(matches!(BaseFuncDesc::new("median", vec![]), Err(PlanError::UnknownFunction(_))));
        assert!(matches!(
            BaseFuncDesc::new("row_number", vec![col(TypeKind::Int)]),
            Err(PlanError::WrongArgumentCount { .. })
        ));
    }
}
