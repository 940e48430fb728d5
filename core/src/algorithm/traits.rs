//! Core algorithm trait definitions for the edmonds-flow engine
//!
//! Shared vocabulary of the crate: index and capacity aliases, the error
//! enums, and the parameterised `Algorithm` trait the solvers implement.
//!
//! # Key Design Principles
//! - Dense integer identifiers for vertices and edge slots
//! - Precondition failures surface as typed errors at construction time
//! - String-keyed parameters validated at the boundary
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Dense vertex index in `0..vertex_count`
pub type VertexId = usize;

/// Storage index of an edge inside the residual graph arena
pub type EdgeId = usize;

/// Edge capacity in the integral flow domain
pub type Capacity = i64;

/// Flow value, signed so that reverse edges can carry the mirrored amount
pub type Flow = i64;

/// Errors raised while building or solving a flow network
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Vertex {vertex} out of range for a network of {vertex_count} vertices")]
    InvalidVertex { vertex: VertexId, vertex_count: usize },

    #[error("Edge {edge} does not exist (network stores {edge_count} edges)")]
    InvalidEdge { edge: EdgeId, edge_count: usize },

    #[error("Negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity {
        from: VertexId,
        to: VertexId,
        capacity: Capacity,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Augmentation limit of {limit} reached before the flow became maximal")]
    AugmentationLimit { limit: usize },
}

/// Errors raised by parameter handling on solver front-ends
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Execution error: {0}")]
    ExecutionError(String),
}

impl From<FlowError> for AlgorithmError {
    fn from(error: FlowError) -> Self {
        AlgorithmError::ExecutionError(error.to_string())
    }
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Boolean,
    Enum(Vec<String>),
}

/// Description of a tunable solver parameter and its current value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Common surface shared by the flow solvers
///
/// Parameters are exchanged as strings so that front-ends (CLI flags, JSON
/// configuration) can forward user input without knowing the concrete solver.
pub trait Algorithm: Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. max_flow, matching)
    fn category(&self) -> &'static str;

    /// Returns a one-paragraph description with complexity guarantees
    fn description(&self) -> String;

    /// Returns the asymptotic complexity
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Returns all parameters as a name/value map
    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters()
            .into_iter()
            .map(|parameter| (parameter.name, parameter.value))
            .collect()
    }
}
