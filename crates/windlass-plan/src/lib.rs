//! Windlass Plan
//!
//! Planning support for SQL window functions: validating calls, inferring
//! result types and nullability, choosing frames, and deciding whether a
//! window function can be delegated to the columnar engine.
//!
//! # Example
//!
//! ```
//! use windlass_core::{CapabilityClient, EvalContext, Expr, FieldType, StoreEngine, TypeKind};
//! use windlass_plan::aggregation::{window_func_to_wire, WindowFuncDesc};
//! use windlass_plan::PlanContext;
//!
//! let ctx = PlanContext::default();
//! let amount = Expr::column(0, "amount", FieldType::new(TypeKind::BigInt));
//!
//! let sum = WindowFuncDesc::new(ctx.eval_ctx(), "SUM", vec![amount], false)?
//!     .accepted()
//!     .expect("sum over a column is always admitted");
//! assert_eq!(sum.name(), "sum");
//! assert!(!sum.ret_type().is_not_null());
//!
//! if sum.can_push_down(&ctx, StoreEngine::Columnar) {
//!     let client = CapabilityClient::columnar();
//!     assert!(window_func_to_wire(ctx.eval_ctx(), &client, &sum).is_some());
//! }
//! # Ok::<(), windlass_plan::PlanError>(())
//! ```
//!
//! # Modules
//!
//! - [`aggregation`] - Window function descriptors and policies
//! - [`ast`] - Window specifications and frame clauses
//! - [`config`] - Planner configuration
//! - [`error`] - Error types ([`PlanError`])

#![deny(clippy::unwrap_used)]

pub mod aggregation;
pub mod ast;
pub mod config;
pub mod error;

pub use aggregation::{Admission, Rejection, WindowFuncDesc, WindowFuncKind};
pub use config::{PlanConfig, PlanContext};
pub use error::{PlanError, PlanResult};
