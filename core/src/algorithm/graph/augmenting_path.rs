//! Breadth-first augmenting path search over a residual graph
//!
//! BFS explores vertices in increasing edge-count order, so the first path
//! found is a shortest augmenting path. This is what bounds Edmonds-Karp to
//! O(V·E) augmentations.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, VertexId};
use crate::data_structures::residual_graph::ResidualGraph;

/// Source-to-sink path with positive residual capacity on every edge
///
/// Edges are kept in the order they were reconstructed: from the edge that
/// enters the sink back to the edge that leaves the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    edges: Vec<EdgeId>,
}

impl AugmentingPath {
    /// Edge ids in backward order (sink end first)
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Edge ids in travel order (source end first)
    pub fn forward(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Smallest residual capacity along the path, `None` for an empty path
    pub fn bottleneck(&self, graph: &ResidualGraph) -> Option<Capacity> {
        self.edges
            .iter()
            .map(|&id| graph.residual_capacity(id))
            .min()
    }
}

/// Outcome of a single search, with the work it took
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The path found, if the sink was reached
    pub path: Option<AugmentingPath>,
    /// Number of vertices taken off the BFS queue
    pub vertices_dequeued: usize,
}

/// Reusable BFS state so repeated searches do not reallocate
#[derive(Debug, Clone)]
pub struct AugmentingPathSearch {
    visited: Vec<bool>,
    parent_edge: Vec<Option<EdgeId>>,
    queue: VecDeque<VertexId>,
}

impl AugmentingPathSearch {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            visited: vec![false; vertex_count],
            parent_edge: vec![None; vertex_count],
            queue: VecDeque::with_capacity(vertex_count),
        }
    }

    /// Find a shortest augmenting path from `source` to `sink`
    ///
    /// Returns an empty path when `source == sink` and `None` when the sink is
    /// unreachable in the residual graph. Both endpoints must be valid
    /// vertices of `graph`.
    pub fn find(
        &mut self,
        graph: &ResidualGraph,
        source: VertexId,
        sink: VertexId,
    ) -> SearchOutcome {
        if source == sink {
            return SearchOutcome {
                path: Some(AugmentingPath::default()),
                vertices_dequeued: 0,
            };
        }

        let vertex_count = graph.vertex_count();
        if self.visited.len() != vertex_count {
            *self = Self::new(vertex_count);
        } else {
            self.visited.fill(false);
            self.parent_edge.fill(None);
            self.queue.clear();
        }

        self.visited[source] = true;
        self.queue.push_back(source);

        let mut vertices_dequeued = 0;
        let mut reached = false;

        'bfs: while let Some(vertex) = self.queue.pop_front() {
            vertices_dequeued += 1;

            for &edge_id in graph.edges_from(vertex) {
                let edge = graph.edge(edge_id);
                if edge.residual_capacity() <= 0 || self.visited[edge.to] {
                    continue;
                }

                self.visited[edge.to] = true;
                self.parent_edge[edge.to] = Some(edge_id);

                if edge.to == sink {
                    reached = true;
                    break 'bfs;
                }
                self.queue.push_back(edge.to);
            }
        }

        let path = reached.then(|| self.reconstruct(graph, source, sink));
        SearchOutcome {
            path,
            vertices_dequeued,
        }
    }

    /// Walk parent edges back from the sink
    fn reconstruct(
        &self,
        graph: &ResidualGraph,
        source: VertexId,
        sink: VertexId,
    ) -> AugmentingPath {
        let mut edges = Vec::new();
        let mut current = sink;
        while current != source {
            match self.parent_edge[current] {
                Some(edge_id) => {
                    edges.push(edge_id);
                    current = graph.edge(edge_id).from;
                }
                None => unreachable!("visited vertex {current} has no parent edge"),
            }
        }
        AugmentingPath { edges }
    }
}

/// Convenience wrapper running a one-off search
pub fn find_augmenting_path(
    graph: &ResidualGraph,
    source: VertexId,
    sink: VertexId,
) -> Option<AugmentingPath> {
    AugmentingPathSearch::new(graph.vertex_count())
        .find(graph, source, sink)
        .path
}

/// Vertices reachable from `source` over edges with positive residual capacity
pub fn reachable_from(graph: &ResidualGraph, source: VertexId) -> Vec<bool> {
    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::new();
    visited[source] = true;
    queue.push_back(source);

    while let Some(vertex) = queue.pop_front() {
        for &edge_id in graph.edges_from(vertex) {
            let edge = graph.edge(edge_id);
            if edge.residual_capacity() > 0 && !visited[edge.to] {
                visited[edge.to] = true;
                queue.push_back(edge.to);
            }
        }
    }

    visited
}
