//! Window frame clauses.
//!
//! A frame clause such as `ROWS BETWEEN 2 PRECEDING AND CURRENT ROW` selects
//! the rows of the partition, relative to the current row, that a window
//! function sees.

use std::fmt;

use serde::{Deserialize, Serialize};
use windlass_core::Expr;

/// Frame units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    /// Physical row offsets.
    Rows,
    /// Value ranges over the ORDER BY key.
    Ranges,
}

/// One end of a frame extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameBound {
    /// UNBOUNDED PRECEDING.
    UnboundedPreceding,
    /// N PRECEDING.
    Preceding(Box<Expr>),
    /// CURRENT ROW.
    CurrentRow,
    /// N FOLLOWING.
    Following(Box<Expr>),
    /// UNBOUNDED FOLLOWING.
    UnboundedFollowing,
}

impl FrameBound {
    /// Position of the bound on the preceding-to-following axis.
    pub(crate) const fn rank(&self) -> u8 {
        match self {
            Self::UnboundedPreceding => 0,
            Self::Preceding(_) => 1,
            Self::CurrentRow => 2,
            Self::Following(_) => 3,
            Self::UnboundedFollowing => 4,
        }
    }

    /// Returns the offset expression of a bounded PRECEDING/FOLLOWING bound.
    #[must_use]
    pub fn offset(&self) -> Option<&Expr> {
        match self {
            Self::Preceding(expr) | Self::Following(expr) => Some(expr),
            Self::UnboundedPreceding | Self::CurrentRow | Self::UnboundedFollowing => None,
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => write!(f, "UNBOUNDED PRECEDING"),
            Self::Preceding(expr) => write!(f, "{expr} PRECEDING"),
            Self::CurrentRow => write!(f, "CURRENT ROW"),
            Self::Following(expr) => write!(f, "{expr} FOLLOWING"),
            Self::UnboundedFollowing => write!(f, "UNBOUNDED FOLLOWING"),
        }
    }
}

/// The start and end bounds of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameExtent {
    /// Frame start.
    pub start: FrameBound,
    /// Frame end.
    pub end: FrameBound,
}

/// A complete frame clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameClause {
    /// ROWS or RANGE.
    pub frame_type: FrameType,
    /// Start and end bounds.
    pub extent: FrameExtent,
}

impl FrameClause {
    /// Creates a `ROWS BETWEEN start AND end` clause.
    #[must_use]
    pub const fn rows(start: FrameBound, end: FrameBound) -> Self {
        Self { frame_type: FrameType::Rows, extent: FrameExtent { start, end } }
    }

    /// Creates a `RANGE BETWEEN start AND end` clause.
    #[must_use]
    pub const fn range(start: FrameBound, end: FrameBound) -> Self {
        Self { frame_type: FrameType::Ranges, extent: FrameExtent { start, end } }
    }

    /// Returns true if the frame covers the whole partition.
    #[must_use]
    pub const fn is_whole_partition(&self) -> bool {
        matches!(
            (&self.extent.start, &self.extent.end),
            (FrameBound::UnboundedPreceding, FrameBound::UnboundedFollowing)
        )
    }
}

impl fmt::Display for FrameClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = match self.frame_type {
            FrameType::Rows => "ROWS",
            FrameType::Ranges => "RANGE",
        };
        write!(f, "{units} BETWEEN {} AND {}", self.extent.start, self.extent.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let frame = FrameClause::rows(
            FrameBound::Preceding(Box::new(Expr::literal(2i64))),
            FrameBound::CurrentRow,
        );
        assert_eq!(frame.to_string(), "ROWS BETWEEN 2 PRECEDING AND CURRENT ROW");
    }

    #[test]
    fn whole_partition() {
        let frame =
            FrameClause::range(FrameBound::UnboundedPreceding, FrameBound::UnboundedFollowing);
        assert!(frame.is_whole_partition());

        let frame = FrameClause::range(FrameBound::UnboundedPreceding, FrameBound::CurrentRow);
        assert!(!frame.is_whole_partition());
    }
}
