//! Windlass Core
//!
//! This crate provides the types that the Windlass planner crates share.
//!
//! # Overview
//!
//! - **Types**: [`FieldType`] with its nullability and sign flags, [`Datum`]
//!   for constant values
//! - **Expressions**: [`Expr`], the argument type of function descriptors,
//!   with constant resolution, push-down capability and wire conversion
//! - **Wire format**: [`WireExpr`] trees sent to remote engines and the
//!   comparable value [`codec`]
//! - **Remote clients**: the [`Client`] capability interface
//!
//! # Example
//!
//! ```
//! use windlass_core::expr::{uint64_from_constant, EvalContext, UintConstant};
//! use windlass_core::Expr;
//!
//! let ctx = EvalContext::new();
//! let n = Expr::literal(4i64);
//! assert_eq!(uint64_from_constant(&ctx, &n), Some(UintConstant::Value(4)));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Field types and datums
//! - [`expr`] - Planner expressions
//! - [`wire`] - Wire expression trees
//! - [`codec`] - Comparable value encoding
//! - [`kv`] - Remote client capabilities
//! - [`error`] - Error types ([`CoreError`])

#![deny(clippy::unwrap_used)]

pub mod codec;
pub mod error;
pub mod expr;
pub mod kv;
pub mod types;
pub mod wire;

pub use error::{CoreError, CoreResult};
pub use expr::{EvalContext, Expr, PushDownContext, StoreEngine};
pub use kv::{CapabilityClient, Client, RequestType};
pub use types::{Datum, FieldType, TypeKind};
pub use wire::{ExprType, WireExpr, WireFieldType};
