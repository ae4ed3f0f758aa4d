/*!
# Unified Error Type

This module provides the unified error enum for all Hyperstar operations,
consolidating lookup, validation, and engine-state failures for consistent
error handling and pattern matching.
*/

use std::error::Error;
use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HyperstarError>;

/// Unified error type for all Hyperstar operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HyperstarError {
    /// Vertex id not found in the graph
    VertexNotFound(String),

    /// Edge id not found in the graph
    EdgeNotFound(String),

    /// The requested destination cannot be reached from the origin
    NotReachable(String),

    /// An engine was run before its weights were set
    WeightsNotSet(String),

    /// An engine was re-run without calling `recover()` first
    NotRecovered(String),

    /// A weight array failed validation (length, sign, ordering, or finiteness)
    InvalidWeights(String),

    /// Invalid argument or parameter
    InvalidArgument(String),
}

impl HyperstarError {
    /// Creates a vertex not found error.
    pub fn vertex_not_found(message: impl Into<String>) -> Self {
        HyperstarError::VertexNotFound(message.into())
    }

    /// Creates an edge not found error.
    pub fn edge_not_found(message: impl Into<String>) -> Self {
        HyperstarError::EdgeNotFound(message.into())
    }

    /// Creates a not reachable error.
    pub fn not_reachable(message: impl Into<String>) -> Self {
        HyperstarError::NotReachable(message.into())
    }

    /// Creates a weights not set error.
    pub fn weights_not_set(message: impl Into<String>) -> Self {
        HyperstarError::WeightsNotSet(message.into())
    }

    /// Creates a not recovered error.
    pub fn not_recovered(message: impl Into<String>) -> Self {
        HyperstarError::NotRecovered(message.into())
    }

    /// Creates an invalid weights error.
    pub fn invalid_weights(message: impl Into<String>) -> Self {
        HyperstarError::InvalidWeights(message.into())
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        HyperstarError::InvalidArgument(message.into())
    }
}

impl fmt::Display for HyperstarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HyperstarError::VertexNotFound(msg) => write!(f, "Vertex not found: {}", msg),
            HyperstarError::EdgeNotFound(msg) => write!(f, "Edge not found: {}", msg),
            HyperstarError::NotReachable(msg) => write!(f, "Not reachable: {}", msg),
            HyperstarError::WeightsNotSet(msg) => write!(f, "Weights not set: {}", msg),
            HyperstarError::NotRecovered(msg) => write!(f, "Engine not recovered: {}", msg),
            HyperstarError::InvalidWeights(msg) => write!(f, "Invalid weights: {}", msg),
            HyperstarError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl Error for HyperstarError {}
