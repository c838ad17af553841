//! Window function descriptors and the policies attached to them.
//!
//! - [`kind`] - the closed set of window-capable functions
//! - [`base`] - name resolution and result type inference
//! - [`window`] - descriptor construction and nullability
//! - [`frame_policy`] - frame requirements and frame resolution
//! - [`pushdown`] - remote engine eligibility
//! - [`wire`] - wire serialization

pub mod base;
pub mod frame_policy;
pub mod kind;
pub mod pushdown;
pub mod window;
pub mod wire;

pub use base::BaseFuncDesc;
pub use frame_policy::{needs_frame, resolve_frame, use_default_frame, ResolvedFrame};
pub use kind::{Arity, WindowFuncKind};
pub use window::{Admission, Rejection, WindowFuncDesc};
pub use wire::window_func_to_wire;
