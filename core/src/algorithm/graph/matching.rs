//! Bipartite Maximum Matching via Unit-Capacity Flow
//!
//! Reduces maximum bipartite matching to maximum flow: a source feeds every
//! left item, every right item drains into a sink, and each compatible
//! left/right pair becomes an edge. All capacities are one, so an integral
//! maximum flow saturates exactly the edges of a maximum matching.
//!
//! Vertex layout of the reduction network:
//!
//! ```text
//! 0                  source
//! 1 ..= L            left items
//! L + 1 ..= L + R    right items
//! L + R + 1          sink
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::{FlowMetrics, MaxFlowSolver};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmParameter, Capacity, Flow, FlowError,
    ParameterType, VertexId,
};
use crate::config::{BottleneckScan, SolverConfig};
use crate::data_structures::residual_graph::ResidualGraph;

const UNIT_CAPACITY: Capacity = 1;

/// Result of a bipartite matching run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    /// `assignment[i]` is the right item matched to left item `i`, if any
    pub assignment: Vec<Option<usize>>,
    /// Flow value of the reduction network, equal to the matching size
    pub max_flow: Flow,
}

impl Matching {
    /// Number of matched pairs
    pub fn size(&self) -> usize {
        self.assignment.iter().filter(|slot| slot.is_some()).count()
    }

    /// Matched `(left, right)` pairs in left order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(left, right)| right.map(|right| (left, right)))
    }

    /// 1-indexed right item per left item, `-1` when unmatched
    pub fn to_one_indexed(&self) -> Vec<i64> {
        self.assignment
            .iter()
            .map(|slot| slot.map_or(-1, |right| right as i64 + 1))
            .collect()
    }
}

/// Flow network built from a bipartite compatibility matrix
#[derive(Debug, Clone)]
pub struct MatchingNetwork {
    graph: ResidualGraph,
    num_left: usize,
    num_right: usize,
}

impl MatchingNetwork {
    /// Build the reduction network for `adjacency[left][right]`
    ///
    /// All rows must have the same length. Edges are added source→left first,
    /// then right→sink, then left→right in row-major order.
    pub fn from_adjacency(adjacency: &[Vec<bool>]) -> Result<Self, FlowError> {
        let num_left = adjacency.len();
        let num_right = adjacency.first().map_or(0, Vec::len);

        if let Some((row, values)) = adjacency
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != num_right)
        {
            return Err(FlowError::InvalidInput(format!(
                "adjacency row {} has {} columns, expected {}",
                row,
                values.len(),
                num_right
            )));
        }

        let mut network = Self {
            graph: ResidualGraph::new(num_left + num_right + 2),
            num_left,
            num_right,
        };
        let source = network.source();
        let sink = network.sink();

        for left in 0..num_left {
            let vertex = network.left_vertex(left);
            network.graph.add_edge(source, vertex, UNIT_CAPACITY)?;
        }
        for right in 0..num_right {
            let vertex = network.right_vertex(right);
            network.graph.add_edge(vertex, sink, UNIT_CAPACITY)?;
        }
        for (left, row) in adjacency.iter().enumerate() {
            for (right, &compatible) in row.iter().enumerate() {
                if compatible {
                    let from = network.left_vertex(left);
                    let to = network.right_vertex(right);
                    network.graph.add_edge(from, to, UNIT_CAPACITY)?;
                }
            }
        }

        Ok(network)
    }

    pub fn source(&self) -> VertexId {
        0
    }

    pub fn sink(&self) -> VertexId {
        self.num_left + self.num_right + 1
    }

    pub fn left_vertex(&self, left: usize) -> VertexId {
        1 + left
    }

    pub fn right_vertex(&self, right: usize) -> VertexId {
        1 + self.num_left + right
    }

    pub fn num_left(&self) -> usize {
        self.num_left
    }

    pub fn num_right(&self) -> usize {
        self.num_right
    }

    pub fn graph(&self) -> &ResidualGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ResidualGraph {
        &mut self.graph
    }

    fn left_index(&self, vertex: VertexId) -> Option<usize> {
        (1..=self.num_left).contains(&vertex).then(|| vertex - 1)
    }

    fn right_index(&self, vertex: VertexId) -> Option<usize> {
        let first = 1 + self.num_left;
        (first..first + self.num_right)
            .contains(&vertex)
            .then(|| vertex - first)
    }

    /// Reconstruct the assignment from saturated left→right forward edges
    ///
    /// Only even-indexed (forward) edges are inspected, so reverse partners
    /// carrying negative flow never produce spurious pairs.
    pub fn read_assignment(&self) -> Vec<Option<usize>> {
        let mut assignment = vec![None; self.num_left];
        for (_, edge) in self.graph.forward_edges() {
            if edge.capacity != UNIT_CAPACITY || edge.flow != UNIT_CAPACITY {
                continue;
            }
            let endpoints = (self.left_index(edge.from), self.right_index(edge.to));
            if let (Some(left), Some(right)) = endpoints {
                assignment[left] = Some(right);
            }
        }
        assignment
    }
}

/// Maximum bipartite matching solver backed by the Edmonds-Karp driver
#[derive(Debug, Clone)]
pub struct BipartiteMatcher {
    solver: MaxFlowSolver,
}

impl Default for BipartiteMatcher {
    fn default() -> Self {
        Self::with_config(SolverConfig {
            bottleneck_scan: BottleneckScan::UnitCapacity,
            collect_min_cut: false,
            ..SolverConfig::default()
        })
    }
}

impl BipartiteMatcher {
    /// Matcher using the unit-capacity bottleneck shortcut
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            solver: MaxFlowSolver::with_config(config),
        }
    }

    /// Metrics of the most recent run
    pub fn metrics(&self) -> &FlowMetrics {
        self.solver.metrics()
    }

    /// Compute a maximum matching for `adjacency[left][right]`
    pub fn find_matching(&mut self, adjacency: &[Vec<bool>]) -> Result<Matching, FlowError> {
        let mut network = MatchingNetwork::from_adjacency(adjacency)?;
        let (source, sink) = (network.source(), network.sink());

        let max_flow = self.solver.max_flow(network.graph_mut(), source, sink)?;
        let assignment = network.read_assignment();

        debug!(
            "Matched {} of {} left items against {} right items",
            max_flow,
            network.num_left(),
            network.num_right()
        );

        Ok(Matching {
            assignment,
            max_flow,
        })
    }
}

impl Algorithm for BipartiteMatcher {
    fn name(&self) -> &'static str {
        "Bipartite Matching (unit-capacity flow)"
    }

    fn category(&self) -> &'static str {
        "matching"
    }

    fn description(&self) -> String {
        "Maximum bipartite matching by reduction to unit-capacity maximum flow, \
         solved with Edmonds-Karp; at most min(L, R) augmentations of O(E) each."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V·E)".to_string(),
            space_complexity: "O(V + E)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        let config = self.solver.config();
        vec![
            AlgorithmParameter {
                name: "bottleneck_scan".to_string(),
                value: config.bottleneck_scan.to_string(),
                value_type: ParameterType::Enum(BottleneckScan::variants()),
            },
            AlgorithmParameter {
                name: "max_augmentations".to_string(),
                value: config
                    .max_augmentations
                    .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
                value_type: ParameterType::Integer,
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "bottleneck_scan" | "max_augmentations" => self.solver.set_parameter(name, value),
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: "unknown parameter".to_string(),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "bottleneck_scan" | "max_augmentations" => self.solver.get_parameter(name),
            _ => None,
        }
    }
}

/// Compute a maximum matching with the default matcher
pub fn find_matching(adjacency: &[Vec<bool>]) -> Result<Matching, FlowError> {
    BipartiteMatcher::new().find_matching(adjacency)
}
