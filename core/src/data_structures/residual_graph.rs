//! Residual graph with index-paired reverse edges
//!
//! Every logical edge `(u, v, c)` is stored as two arena slots: the forward
//! edge at an even index and its reverse `(v, u, 0)` immediately after it.
//! The partner of any slot is found by flipping the lowest bit of its index,
//! so no back-pointers are kept and the ownership graph stays acyclic even
//! though the logical graph has cycles.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, Flow, FlowError, VertexId};

/// Flow edge representation with residual capacity tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source vertex
    pub from: VertexId,
    /// Target vertex
    pub to: VertexId,
    /// Original edge capacity (zero for reverse edges)
    pub capacity: Capacity,
    /// Current flow through edge
    pub flow: Flow,
}

impl FlowEdge {
    /// Create new flow edge with specified capacity and no flow
    pub fn new(from: VertexId, to: VertexId, capacity: Capacity) -> Self {
        Self {
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    /// Additional flow this edge can still carry
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// Whether the edge carries as much flow as its capacity allows
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }
}

/// Returns the storage index of the edge paired with `id`
#[inline]
pub fn pair(id: EdgeId) -> EdgeId {
    id ^ 1
}

/// Forward edges occupy even slots, their reverse partners odd ones
#[inline]
pub fn is_forward(id: EdgeId) -> bool {
    id & 1 == 0
}

/// Flow network representation with residual graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualGraph {
    /// Adjacency lists holding edge indices, in insertion order
    adjacency: Vec<Vec<EdgeId>>,
    /// All edges in the network, forward and reverse interleaved
    edges: Vec<FlowEdge>,
}

impl ResidualGraph {
    /// Create new flow network with specified vertex count and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    /// Number of vertices fixed at construction
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored edges, counting both members of every pair
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add edge to flow network together with its zero-capacity reverse
    ///
    /// Returns the index of the forward edge. The graph is left untouched when
    /// either endpoint is out of range or the capacity is negative.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        capacity: Capacity,
    ) -> Result<EdgeId, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if capacity < 0 {
            return Err(FlowError::NegativeCapacity { from, to, capacity });
        }

        let forward_edge_index = self.edges.len();
        let reverse_edge_index = forward_edge_index + 1;
        debug_assert!(is_forward(forward_edge_index));

        self.adjacency[from].push(forward_edge_index);
        self.adjacency[to].push(reverse_edge_index);

        self.edges.push(FlowEdge::new(from, to, capacity));
        self.edges.push(FlowEdge::new(to, from, 0));

        Ok(forward_edge_index)
    }

    /// Edge indices leaving `vertex`, in insertion order
    ///
    /// # Panics
    /// Panics if `vertex` is out of range.
    #[inline]
    pub fn edges_from(&self, vertex: VertexId) -> &[EdgeId] {
        &self.adjacency[vertex]
    }

    /// Read access to a stored edge
    ///
    /// # Panics
    /// Panics if `id` is not a valid edge index.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id]
    }

    /// Checked variant of [`ResidualGraph::edge`]
    pub fn try_edge(&self, id: EdgeId) -> Result<&FlowEdge, FlowError> {
        self.edges.get(id).ok_or(FlowError::InvalidEdge {
            edge: id,
            edge_count: self.edges.len(),
        })
    }

    /// Remaining capacity of edge `id` in the residual graph
    #[inline]
    pub fn residual_capacity(&self, id: EdgeId) -> Capacity {
        self.edges[id].residual_capacity()
    }

    /// Push `amount` units along `id`, mirroring them on the paired edge
    ///
    /// Callers own the `amount <= residual_capacity(id)` invariant; it is only
    /// checked in debug builds.
    #[inline]
    pub fn push_flow(&mut self, id: EdgeId, amount: Flow) {
        debug_assert!(
            amount <= self.edges[id].residual_capacity(),
            "push of {} exceeds residual capacity {} on edge {}",
            amount,
            self.edges[id].residual_capacity(),
            id
        );
        self.edges[id].flow += amount;
        self.edges[pair(id)].flow -= amount;
    }

    /// All stored edges with their indices
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges.iter().enumerate()
    }

    /// Only the edges created by `add_edge` calls, skipping reverse partners
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges.iter().enumerate().step_by(2)
    }

    /// Sum of flow on forward edges leaving `vertex`
    pub fn outflow(&self, vertex: VertexId) -> Flow {
        self.adjacency[vertex]
            .iter()
            .filter(|&&id| is_forward(id))
            .map(|&id| self.edges[id].flow)
            .sum()
    }

    /// Sum of flow on forward edges entering `vertex`
    pub fn inflow(&self, vertex: VertexId) -> Flow {
        // Reverse slots listed under `vertex` pair with the forward edges into it.
        self.adjacency[vertex]
            .iter()
            .filter(|&&id| !is_forward(id))
            .map(|&id| self.edges[pair(id)].flow)
            .sum()
    }

    /// Clear all flow while keeping the structure intact
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Validates that `vertex` belongs to the network
    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), FlowError> {
        if vertex < self.adjacency.len() {
            Ok(())
        } else {
            Err(FlowError::InvalidVertex {
                vertex,
                vertex_count: self.adjacency.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_edge_creation() {
        let edge = FlowEdge::new(0, 1, 10);
        assert_eq!(edge.from, 0);
        assert_eq!(edge.to, 1);
        assert_eq!(edge.capacity, 10);
        assert_eq!(edge.flow, 0);
        assert_eq!(edge.residual_capacity(), 10);
        assert!(!edge.is_saturated());
    }

    #[test]
    fn test_add_edge_stores_pair_at_adjacent_indices() {
        let mut graph = ResidualGraph::new(3);
        let first = graph.add_edge(0, 1, 10).unwrap();
        let second = graph.add_edge(1, 2, 5).unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, 2);
        assert_eq!(graph.edge_count(), 4);

        let reverse = graph.edge(pair(first));
        assert_eq!((reverse.from, reverse.to, reverse.capacity), (1, 0, 0));
        assert_eq!(pair(pair(first)), first);
        assert!(is_forward(second));
        assert!(!is_forward(pair(second)));
    }

    #[test]
    fn test_adjacency_keeps_insertion_order() {
        let mut graph = ResidualGraph::new(3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(0, 2, 1).unwrap();
        graph.add_edge(1, 2, 1).unwrap();

        assert_eq!(graph.edges_from(0), &[0, 2]);
        assert_eq!(graph.edges_from(1), &[1, 4]);
        assert_eq!(graph.edges_from(2), &[3, 5]);
    }

    #[test]
    fn test_add_edge_rejects_bad_input_without_mutation() {
        let mut graph = ResidualGraph::new(2);

        assert_eq!(
            graph.add_edge(0, 2, 1),
            Err(FlowError::InvalidVertex { vertex: 2, vertex_count: 2 })
        );
        assert_eq!(
            graph.add_edge(0, 1, -1),
            Err(FlowError::NegativeCapacity { from: 0, to: 1, capacity: -1 })
        );
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges_from(0).is_empty());
    }

    #[test]
    fn test_zero_capacity_edge_is_accepted() {
        let mut graph = ResidualGraph::new(2);
        let id = graph.add_edge(0, 1, 0).unwrap();
        assert_eq!(graph.residual_capacity(id), 0);
    }

    #[test]
    fn test_push_flow_mirrors_on_pair() {
        let mut graph = ResidualGraph::new(2);
        let id = graph.add_edge(0, 1, 7).unwrap();

        graph.push_flow(id, 4);
        assert_eq!(graph.edge(id).flow, 4);
        assert_eq!(graph.edge(pair(id)).flow, -4);
        assert_eq!(graph.residual_capacity(id), 3);
        assert_eq!(graph.residual_capacity(pair(id)), 4);

        // Cancelling through the reverse edge restores the original state.
        graph.push_flow(pair(id), 4);
        assert_eq!(graph.edge(id).flow, 0);
        assert_eq!(graph.edge(pair(id)).flow, 0);
    }

    #[test]
    fn test_inflow_outflow_and_reset() {
        let mut graph = ResidualGraph::new(3);
        let a = graph.add_edge(0, 1, 5).unwrap();
        let b = graph.add_edge(1, 2, 5).unwrap();
        graph.push_flow(a, 3);
        graph.push_flow(b, 3);

        assert_eq!(graph.outflow(0), 3);
        assert_eq!(graph.inflow(1), 3);
        assert_eq!(graph.outflow(1), 3);
        assert_eq!(graph.inflow(2), 3);

        graph.reset_flow();
        assert!(graph.edges().all(|(_, edge)| edge.flow == 0));
    }

    #[test]
    fn test_try_edge_and_forward_edges() {
        let mut graph = ResidualGraph::new(2);
        graph.add_edge(0, 1, 2).unwrap();
        graph.add_edge(1, 0, 3).unwrap();

        assert!(graph.try_edge(3).is_ok());
        assert_eq!(
            graph.try_edge(4),
            Err(FlowError::InvalidEdge { edge: 4, edge_count: 4 })
        );

        let forward: Vec<EdgeId> = graph.forward_edges().map(|(id, _)| id).collect();
        assert_eq!(forward, vec![0, 2]);
    }
}
