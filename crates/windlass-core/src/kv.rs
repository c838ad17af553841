//! Remote engine client capabilities.
//!
//! The planner never talks to a remote engine directly; it only asks the
//! engine's client which request shapes it understands. A [`Client`] answers
//! `(request type, sub-type)` queries, where the sub-type of a
//! [`RequestType::Select`] request is an [`ExprType`] code.

use std::collections::HashSet;

use crate::wire::ExprType;

/// The kind of request sent to a remote engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    /// Scan, filter, aggregate and window evaluation.
    Select,
}

/// Capability query interface of a remote engine client.
pub trait Client: Send + Sync {
    /// Returns true if the engine accepts `req_type` requests with the given
    /// sub-type.
    fn is_request_type_supported(&self, req_type: RequestType, sub_type: i64) -> bool;
}

/// A client whose capabilities are a fixed set of expression types.
///
/// Supports every [`RequestType::Select`] sub-type in its set.
#[derive(Debug, Clone, Default)]
pub struct CapabilityClient {
    supported: HashSet<i64>,
}

impl CapabilityClient {
    /// Creates a client that supports no expression types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that supports the given expression types.
    #[must_use]
    pub fn supporting(types: impl IntoIterator<Item = ExprType>) -> Self {
        Self { supported: types.into_iter().map(ExprType::code).collect() }
    }

    /// Creates a client with the capabilities of the columnar engine.
    #[must_use]
    pub fn columnar() -> Self {
        Self::supporting([
            ExprType::Null,
            ExprType::Int64,
            ExprType::Uint64,
            ExprType::Float32,
            ExprType::Float64,
            ExprType::String,
            ExprType::Bytes,
            ExprType::ColumnRef,
            ExprType::ScalarFunc,
            ExprType::Count,
            ExprType::Sum,
            ExprType::Avg,
            ExprType::Min,
            ExprType::Max,
            ExprType::First,
            ExprType::RowNumber,
            ExprType::Rank,
            ExprType::DenseRank,
            ExprType::Lead,
            ExprType::Lag,
            ExprType::FirstValue,
            ExprType::LastValue,
        ])
    }

    /// Adds support for an expression type.
    #[must_use]
    pub fn with(mut self, tp: ExprType) -> Self {
        self.supported.insert(tp.code());
        self
    }

    /// Removes support for an expression type.
    #[must_use]
    pub fn without(mut self, tp: ExprType) -> Self {
        self.supported.remove(&tp.code());
        self
    }
}

impl Client for CapabilityClient {
    fn is_request_type_supported(&self, req_type: RequestType, sub_type: i64) -> bool {
        match req_type {
            RequestType::Select => self.supported.contains(&sub_type),
        }
    }
}
