//! The closed set of functions that may appear in a window call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// A function usable with an `OVER` clause.
///
/// Covers the dedicated window functions and the aggregates that may be
/// evaluated over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindowFuncKind {
    // Ranking
    /// `ROW_NUMBER()`.
    RowNumber,
    /// `RANK()`.
    Rank,
    /// `DENSE_RANK()`.
    DenseRank,
    /// `CUME_DIST()`.
    CumeDist,
    /// `PERCENT_RANK()`.
    PercentRank,
    /// `NTILE(n)`.
    Ntile,

    // Value
    /// `LEAD(expr [, offset [, default]])`.
    Lead,
    /// `LAG(expr [, offset [, default]])`.
    Lag,
    /// `FIRST_VALUE(expr)`.
    FirstValue,
    /// `LAST_VALUE(expr)`.
    LastValue,
    /// `NTH_VALUE(expr, n)`.
    NthValue,

    // Aggregates
    /// `COUNT(expr, ...)`.
    Count,
    /// `SUM(expr)`.
    Sum,
    /// `AVG(expr)`.
    Avg,
    /// `MAX(expr)`.
    Max,
    /// `MIN(expr)`.
    Min,
    /// `BIT_AND(expr)`.
    BitAnd,
    /// `BIT_OR(expr)`.
    BitOr,
    /// `BIT_XOR(expr)`.
    BitXor,
    /// `APPROX_COUNT_DISTINCT(expr, ...)`.
    ApproxCountDistinct,
    /// `VAR_POP(expr)`, also spelled `VARIANCE`.
    VarPop,
    /// `VAR_SAMP(expr)`.
    VarSamp,
    /// `STDDEV_POP(expr)`, also spelled `STD` and `STDDEV`.
    StddevPop,
    /// `STDDEV_SAMP(expr)`.
    StddevSamp,
}

/// The number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Fewest arguments.
    pub min: usize,
    /// Most arguments, or `None` if unbounded.
    pub max: Option<usize>,
}

impl Arity {
    const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    const fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Returns true if `count` arguments are accepted.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{} to {max}", self.min),
            None => write!(f, "at least {}", self.min),
        }
    }
}

impl WindowFuncKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 24] = [
        Self::RowNumber,
        Self::Rank,
        Self::DenseRank,
        Self::CumeDist,
        Self::PercentRank,
        Self::Ntile,
        Self::Lead,
        Self::Lag,
        Self::FirstValue,
        Self::LastValue,
        Self::NthValue,
        Self::Count,
        Self::Sum,
        Self::Avg,
        Self::Max,
        Self::Min,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::ApproxCountDistinct,
        Self::VarPop,
        Self::VarSamp,
        Self::StddevPop,
        Self::StddevSamp,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RowNumber => "row_number",
            Self::Rank => "rank",
            Self::DenseRank => "dense_rank",
            Self::CumeDist => "cume_dist",
            Self::PercentRank => "percent_rank",
            Self::Ntile => "ntile",
            Self::Lead => "lead",
            Self::Lag => "lag",
            Self::FirstValue => "first_value",
            Self::LastValue => "last_value",
            Self::NthValue => "nth_value",
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
            Self::BitAnd => "bit_and",
            Self::BitOr => "bit_or",
            Self::BitXor => "bit_xor",
            Self::ApproxCountDistinct => "approx_count_distinct",
            Self::VarPop => "var_pop",
            Self::VarSamp => "var_samp",
            Self::StddevPop => "stddev_pop",
            Self::StddevSamp => "stddev_samp",
        }
    }

    /// Looks up a function by name, ignoring case and accepting aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "std" | "stddev" => return Some(Self::StddevPop),
            "variance" => return Some(Self::VarPop),
            _ => {}
        }
        Self::ALL.into_iter().find(|kind| kind.name() == lower)
    }

    /// Returns the accepted argument counts.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::RowNumber | Self::Rank | Self::DenseRank | Self::CumeDist | Self::PercentRank => {
                Arity::exactly(0)
            }
            Self::Ntile | Self::FirstValue | Self::LastValue => Arity::exactly(1),
            Self::Lead | Self::Lag => Arity::between(1, 3),
            Self::NthValue => Arity::exactly(2),
            Self::Count | Self::ApproxCountDistinct => Arity::at_least(1),
            Self::Sum
            | Self::Avg
            | Self::Max
            | Self::Min
            | Self::BitAnd
            | Self::BitOr
            | Self::BitXor
            | Self::VarPop
            | Self::VarSamp
            | Self::StddevPop
            | Self::StddevSamp => Arity::exactly(1),
        }
    }

    /// Resolves `name` and checks that it accepts `arg_count` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownFunction`] for an unrecognised name and
    /// [`PlanError::WrongArgumentCount`] for an arity mismatch.
    pub fn resolve(name: &str, arg_count: usize) -> PlanResult<Self> {
        let kind = Self::from_name(name).ok_or_else(|| PlanError::UnknownFunction(name.into()))?;
        let arity = kind.arity();
        if !arity.accepts(arg_count) {
            return Err(PlanError::WrongArgumentCount {
                function: kind.name().to_string(),
                expected: arity.to_string(),
                actual: arg_count,
            });
        }
        Ok(kind)
    }
}

impl FromStr for WindowFuncKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PlanError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for WindowFuncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
