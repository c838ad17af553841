//! Window clause vocabulary.
//!
//! These are the parsed shapes of `OVER (...)` clauses that the window
//! function planner consumes.

pub mod frame;
pub mod window;

pub use frame::{FrameBound, FrameClause, FrameExtent, FrameType};
pub use window::{OrderByExpr, WindowSpec};
