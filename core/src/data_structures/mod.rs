//! Graph storage used by the flow algorithms

pub mod residual_graph;

pub use self::residual_graph::{FlowEdge, ResidualGraph};
