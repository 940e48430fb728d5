//! Flow and Matching Correctness Verification
//!
//! Certificate checks run against a solved network. A flow passes when every
//! forward edge respects its capacity, every stored pair mirrors its flow,
//! interior vertices conserve flow, the claimed value matches the net flow out
//! of the source, and the residual cut from the source proves optimality.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;

use crate::algorithm::graph::augmenting_path::reachable_from;
use crate::algorithm::graph::matching::Matching;
use crate::algorithm::graph::max_flow::MinCut;
use crate::algorithm::traits::{EdgeId, Flow, FlowError, VertexId};
use crate::data_structures::residual_graph::{is_forward, pair, ResidualGraph};

/// Verification failures, one variant per violated property
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("Edge {edge} carries {flow} outside its capacity bound [0, {capacity}]")]
    CapacityViolated { edge: EdgeId, flow: Flow, capacity: Flow },

    #[error("Edge {edge} has flow {flow} but its pair carries {pair_flow}")]
    PairingViolated { edge: EdgeId, flow: Flow, pair_flow: Flow },

    #[error("Vertex {vertex} receives {inflow} but sends {outflow}")]
    ConservationViolated { vertex: VertexId, inflow: Flow, outflow: Flow },

    #[error("Claimed flow {claimed} differs from net source outflow {actual}")]
    ValueMismatch { claimed: Flow, actual: Flow },

    #[error("Sink is still reachable in the residual graph; flow is not maximal")]
    AugmentingPathRemains,

    #[error("Residual cut capacity {cut_capacity} differs from flow value {flow}")]
    CutMismatch { cut_capacity: Flow, flow: Flow },

    #[error("Left item {left} is assigned to incompatible right item {right}")]
    IncompatiblePair { left: usize, right: usize },

    #[error("Right item {right} is assigned more than once")]
    RightReused { right: usize },

    #[error("Matching covers {actual} left items but the adjacency has {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Matching has {size} pairs but reports flow {flow}")]
    SizeMismatch { size: usize, flow: Flow },

    #[error(transparent)]
    Network(#[from] FlowError),
}

/// Check that `graph` holds a maximum flow of value `value` from `source` to `sink`
pub fn verify_flow(
    graph: &ResidualGraph,
    source: VertexId,
    sink: VertexId,
    value: Flow,
) -> Result<(), VerificationError> {
    graph.check_vertex(source)?;
    graph.check_vertex(sink)?;

    for (id, edge) in graph.edges() {
        let pair_flow = graph.edge(pair(id)).flow;
        if edge.flow != -pair_flow {
            return Err(VerificationError::PairingViolated {
                edge: id,
                flow: edge.flow,
                pair_flow,
            });
        }
        if is_forward(id) && (edge.flow < 0 || edge.flow > edge.capacity) {
            return Err(VerificationError::CapacityViolated {
                edge: id,
                flow: edge.flow,
                capacity: edge.capacity,
            });
        }
    }

    for vertex in 0..graph.vertex_count() {
        if vertex == source || vertex == sink {
            continue;
        }
        let (inflow, outflow) = (graph.inflow(vertex), graph.outflow(vertex));
        if inflow != outflow {
            return Err(VerificationError::ConservationViolated {
                vertex,
                inflow,
                outflow,
            });
        }
    }

    let actual = graph.outflow(source) - graph.inflow(source);
    if actual != value {
        return Err(VerificationError::ValueMismatch { claimed: value, actual });
    }

    if source == sink {
        return Ok(());
    }

    if reachable_from(graph, source)[sink] {
        return Err(VerificationError::AugmentingPathRemains);
    }

    let cut = MinCut::from_residual(graph, source);
    if cut.capacity != value {
        return Err(VerificationError::CutMismatch {
            cut_capacity: cut.capacity,
            flow: value,
        });
    }

    Ok(())
}

/// Check that `matching` is an injective partial matching consistent with `adjacency`
pub fn verify_matching(
    adjacency: &[Vec<bool>],
    matching: &Matching,
) -> Result<(), VerificationError> {
    if matching.assignment.len() != adjacency.len() {
        return Err(VerificationError::WrongLength {
            expected: adjacency.len(),
            actual: matching.assignment.len(),
        });
    }

    let mut used = HashSet::new();
    for (left, right) in matching.pairs() {
        let compatible = adjacency[left].get(right).copied().unwrap_or(false);
        if !compatible {
            return Err(VerificationError::IncompatiblePair { left, right });
        }
        if !used.insert(right) {
            return Err(VerificationError::RightReused { right });
        }
    }

    let size = matching.size();
    if size as Flow != matching.max_flow {
        return Err(VerificationError::SizeMismatch {
            size,
            flow: matching.max_flow,
        });
    }

    Ok(())
}
