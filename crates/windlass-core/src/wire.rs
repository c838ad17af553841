//! Wire-level expression trees sent to remote engines.
//!
//! A [`WireExpr`] is engine-agnostic: a type tag, an encoded payload for
//! leaves, child expressions for calls, and the result's field type. The tree
//! serializes with serde; the transport picks the format.
//!
//! Type tags are stable numbers shared with the remote engines, grouped by
//! range: constants below 200, column references at 201, aggregate functions
//! from 3001, window functions from 5001 and scalar functions at 10000.

use serde::{Deserialize, Serialize};

use crate::types::FieldType;

/// The type tag of a [`WireExpr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum ExprType {
    /// NULL constant.
    Null = 0,
    /// Signed integer constant.
    Int64 = 1,
    /// Unsigned integer constant.
    Uint64 = 2,
    /// 32-bit float constant.
    Float32 = 3,
    /// 64-bit float constant.
    Float64 = 4,
    /// String constant.
    String = 5,
    /// Bytes constant.
    Bytes = 6,

    /// Reference to an input column by offset.
    ColumnRef = 201,

    /// `COUNT`.
    Count = 3001,
    /// `SUM`.
    Sum = 3002,
    /// `AVG`.
    Avg = 3003,
    /// `MIN`.
    Min = 3004,
    /// `MAX`.
    Max = 3005,
    /// `FIRST_ROW` (any value of the group).
    First = 3006,
    /// `BIT_AND`.
    AggBitAnd = 3008,
    /// `BIT_OR`.
    AggBitOr = 3009,
    /// `BIT_XOR`.
    AggBitXor = 3010,
    /// `STDDEV_POP`.
    StddevPop = 3013,
    /// `STDDEV_SAMP`.
    StddevSamp = 3014,
    /// `VAR_POP`.
    VarPop = 3015,
    /// `VAR_SAMP`.
    VarSamp = 3016,
    /// `APPROX_COUNT_DISTINCT`.
    ApproxCountDistinct = 3020,

    /// `ROW_NUMBER`.
    RowNumber = 5001,
    /// `RANK`.
    Rank = 5002,
    /// `DENSE_RANK`.
    DenseRank = 5003,
    /// `CUME_DIST`.
    CumeDist = 5004,
    /// `PERCENT_RANK`.
    PercentRank = 5005,
    /// `NTILE`.
    Ntile = 5006,
    /// `LEAD`.
    Lead = 5007,
    /// `LAG`.
    Lag = 5008,
    /// `FIRST_VALUE`.
    FirstValue = 5009,
    /// `LAST_VALUE`.
    LastValue = 5010,
    /// `NTH_VALUE`.
    NthValue = 5011,

    /// Scalar function call; the function is named by [`WireExpr::func_name`].
    ScalarFunc = 10000,
}

impl ExprType {
    /// Returns the numeric code of this tag.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }
}

/// The field type of a [`WireExpr`], in the layout remote engines expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFieldType {
    /// MySQL protocol type code.
    pub tp: i32,
    /// Flag bits.
    pub flag: u32,
    /// Display length.
    pub flen: i32,
    /// Digits after the decimal point.
    pub decimal: i32,
    /// Collation id.
    pub collate: i32,
    /// Character set name.
    pub charset: String,
}

impl From<&FieldType> for WireFieldType {
    fn from(tp: &FieldType) -> Self {
        Self {
            tp: tp.kind.code(),
            flag: tp.flags,
            flen: tp.flen,
            decimal: tp.decimal,
            collate: tp.collate,
            charset: tp.charset.clone(),
        }
    }
}

/// A node of a wire expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireExpr {
    /// Type tag.
    pub tp: ExprType,
    /// Encoded payload of a constant or column reference; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub val: Vec<u8>,
    /// Children, in argument order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WireExpr>,
    /// Function name for [`ExprType::ScalarFunc`] nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func_name: Option<String>,
    /// Result type of this node.
    pub field_type: Option<WireFieldType>,
}

impl WireExpr {
    /// Creates a leaf node with an encoded payload.
    #[must_use]
    pub fn leaf(tp: ExprType, val: Vec<u8>, field_type: &FieldType) -> Self {
        Self {
            tp,
            val,
            children: Vec::new(),
            func_name: None,
            field_type: Some(field_type.into()),
        }
    }

    /// Creates an inner node with children.
    #[must_use]
    pub fn call(tp: ExprType, children: Vec<WireExpr>, field_type: &FieldType) -> Self {
        Self { tp, val: Vec::new(), children, func_name: None, field_type: Some(field_type.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeKind, NOT_NULL_FLAG};

    #[test]
    fn codes_are_stable() {
        assert_eq!(ExprType::ColumnRef.code(), 201);
        assert_eq!(ExprType::Sum.code(), 3002);
        assert_eq!(ExprType::RowNumber.code(), 5001);
        assert_eq!(ExprType::NthValue.code(), 5011);
        assert_eq!(ExprType::ScalarFunc.code(), 10000);
    }

    #[test]
    fn field_type_carries_flags() {
        let tp = FieldType::not_null(TypeKind::BigInt).with_flen(21);
        let wire = WireFieldType::from(&tp);
        assert_eq!(wire.tp, 8);
        assert_eq!(wire.flag & NOT_NULL_FLAG, NOT_NULL_FLAG);
        assert_eq!(wire.flen, 21);
    }

    #[test]
    fn serializes_without_empty_fields() {
        let leaf = WireExpr::leaf(ExprType::Int64, vec![1], &FieldType::new(TypeKind::BigInt));
        let json = serde_json::to_value(&leaf).unwrap();
        assert!(json.get("children").is_none());
        assert!(json.get("func_name").is_none());
        assert_eq!(json["tp"], "Int64");
    }
}
