//! Maximum Flow Algorithm Implementation
//!
//! Ford-Fulkerson driver using breadth-first (Edmonds-Karp) augmenting path
//! selection. Each round finds a shortest augmenting path in the residual
//! graph, pushes its bottleneck along every edge, and repeats until the sink
//! is unreachable. With shortest paths the number of rounds is O(V·E), and
//! each round costs O(E), giving O(V·E²) overall.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Instant;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::augmenting_path::{
    reachable_from, AugmentingPath, AugmentingPathSearch,
};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmParameter, Capacity, EdgeId, Flow,
    FlowError, ParameterType, VertexId,
};
use crate::config::{BottleneckScan, SolverConfig};
use crate::data_structures::residual_graph::ResidualGraph;

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Vertices taken off the BFS queue across all searches
    pub vertices_dequeued: usize,
    /// Wall-clock time spent in the driver loop
    pub execution_time_ms: f64,
}

/// Source/sink cut read off the final residual graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source over positive residual edges
    pub source_side: Vec<VertexId>,
    /// Forward edges crossing from the source side to the sink side
    pub cut_edges: Vec<EdgeId>,
    /// Total capacity of `cut_edges`
    pub capacity: Capacity,
}

impl MinCut {
    /// Extract the cut induced by residual reachability from `source`
    ///
    /// Once no augmenting path remains, every crossing forward edge is
    /// saturated and the cut capacity equals the flow value.
    pub fn from_residual(graph: &ResidualGraph, source: VertexId) -> Self {
        let reachable = reachable_from(graph, source);

        let source_side = reachable
            .iter()
            .enumerate()
            .filter_map(|(vertex, &on_source_side)| on_source_side.then_some(vertex))
            .collect();

        let cut_edges: Vec<EdgeId> = graph
            .forward_edges()
            .filter(|(_, edge)| reachable[edge.from] && !reachable[edge.to])
            .map(|(id, _)| id)
            .collect();

        let capacity = cut_edges.iter().map(|&id| graph.edge(id).capacity).sum();

        Self {
            source_side,
            cut_edges,
            capacity,
        }
    }
}

/// Maximum flow result with cut certificate and metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub max_flow: Flow,
    /// Minimum cut, when requested by the configuration
    pub min_cut: Option<MinCut>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

/// Edmonds-Karp maximum flow solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: SolverConfig,
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    /// Create a solver with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            metrics: FlowMetrics::default(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Metrics of the most recent run
    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Push flow from `source` to `sink` until no augmenting path remains
    ///
    /// The graph is mutated in place and holds a maximum flow on success. The
    /// returned value is the net flow leaving `source`. Flow already present in
    /// the graph is taken as the starting point.
    ///
    /// The `UnitCapacity` scan is refused with [`FlowError::InvalidInput`] on
    /// any network holding a forward edge of capacity above one.
    pub fn max_flow(
        &mut self,
        graph: &mut ResidualGraph,
        source: VertexId,
        sink: VertexId,
    ) -> Result<Flow, FlowError> {
        graph.check_vertex(source)?;
        graph.check_vertex(sink)?;
        self.check_scan(graph)?;

        let start_time = Instant::now();
        self.metrics = FlowMetrics::default();
        let mut search = AugmentingPathSearch::new(graph.vertex_count());

        loop {
            let outcome = search.find(graph, source, sink);
            self.metrics.vertices_dequeued += outcome.vertices_dequeued;

            let path = match outcome.path {
                Some(path) if !path.is_empty() => path,
                _ => break,
            };

            if let Some(limit) = self.config.max_augmentations {
                if self.metrics.augmentations >= limit {
                    self.metrics.execution_time_ms = elapsed_ms(start_time);
                    warn!(
                        "Augmentation limit {} reached ({} -> {}), flow is not maximal",
                        limit, source, sink
                    );
                    return Err(FlowError::AugmentationLimit { limit });
                }
            }

            let bottleneck = self.bottleneck(graph, &path);
            for &edge_id in path.edges() {
                graph.push_flow(edge_id, bottleneck);
            }
            self.metrics.augmentations += 1;

            trace!(
                "Augmentation {}: pushed {} along {} edges",
                self.metrics.augmentations,
                bottleneck,
                path.len()
            );
        }

        // Reverse slots carry minus the flow entering `source`, so this is the net outflow.
        let total: Flow = graph
            .edges_from(source)
            .iter()
            .map(|&edge_id| graph.edge(edge_id).flow)
            .sum();

        self.metrics.execution_time_ms = elapsed_ms(start_time);
        debug!(
            "Max flow {} -> {} = {} after {} augmentations ({} vertices dequeued)",
            source, sink, total, self.metrics.augmentations, self.metrics.vertices_dequeued
        );

        Ok(total)
    }

    /// Run [`MaxFlowSolver::max_flow`] and package the value with its certificate
    pub fn solve(
        &mut self,
        graph: &mut ResidualGraph,
        source: VertexId,
        sink: VertexId,
    ) -> Result<MaxFlowResult, FlowError> {
        let max_flow = self.max_flow(graph, source, sink)?;
        let min_cut = self
            .config
            .collect_min_cut
            .then(|| MinCut::from_residual(graph, source));

        Ok(MaxFlowResult {
            max_flow,
            min_cut,
            metrics: self.metrics.clone(),
        })
    }

    fn bottleneck(&self, graph: &ResidualGraph, path: &AugmentingPath) -> Capacity {
        match self.config.bottleneck_scan {
            BottleneckScan::FullPath => path.bottleneck(graph).unwrap_or(0),
            // Every positive residual is exactly one on a unit-capacity network.
            BottleneckScan::UnitCapacity => path
                .edges()
                .first()
                .map_or(0, |&edge_id| graph.residual_capacity(edge_id)),
        }
    }

    fn check_scan(&self, graph: &ResidualGraph) -> Result<(), FlowError> {
        if self.config.bottleneck_scan != BottleneckScan::UnitCapacity {
            return Ok(());
        }
        match graph.forward_edges().find(|(_, edge)| edge.capacity > 1) {
            Some((id, edge)) => {
                warn!(
                    "unit_capacity scan refused: edge {} ({} -> {}) has capacity {}",
                    id, edge.from, edge.to, edge.capacity
                );
                Err(FlowError::InvalidInput(format!(
                    "unit_capacity bottleneck scan needs unit capacities, edge {} has capacity {}",
                    id, edge.capacity
                )))
            }
            None => Ok(()),
        }
    }
}

fn elapsed_ms(start_time: Instant) -> f64 {
    start_time.elapsed().as_secs_f64() * 1000.0
}

/// Compute a maximum flow with the default configuration
pub fn max_flow(
    graph: &mut ResidualGraph,
    source: VertexId,
    sink: VertexId,
) -> Result<Flow, FlowError> {
    MaxFlowSolver::new().max_flow(graph, source, sink)
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Ford-Fulkerson maximum flow with breadth-first shortest augmenting paths \
         over an index-paired residual graph; O(V·E) augmentations of O(E) each."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V·E²)".to_string(),
            space_complexity: "O(V + E)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter {
                name: "bottleneck_scan".to_string(),
                value: self.config.bottleneck_scan.to_string(),
                value_type: ParameterType::Enum(BottleneckScan::variants()),
            },
            AlgorithmParameter {
                name: "max_augmentations".to_string(),
                value: self
                    .config
                    .max_augmentations
                    .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
                value_type: ParameterType::Integer,
            },
            AlgorithmParameter {
                name: "collect_min_cut".to_string(),
                value: self.config.collect_min_cut.to_string(),
                value_type: ParameterType::Boolean,
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "bottleneck_scan" => {
                self.config.bottleneck_scan =
                    value.parse().map_err(|_| AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: "bottleneck_scan must be full_path or unit_capacity".to_string(),
                    })?;
                Ok(())
            }
            "max_augmentations" => {
                self.config.max_augmentations = parse_limit(name, value)?;
                Ok(())
            }
            "collect_min_cut" => {
                self.config.collect_min_cut =
                    value.parse().map_err(|_| AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: "collect_min_cut must be true or false".to_string(),
                    })?;
                Ok(())
            }
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: "unknown parameter".to_string(),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| parameter.value)
    }
}

/// Parses an augmentation limit: a positive integer or `none`
fn parse_limit(name: &str, value: &str) -> Result<Option<usize>, AlgorithmError> {
    if value == "none" {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(Some(limit)),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: "must be a positive integer or none".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::residual_graph::pair;

    fn network(vertex_count: usize, edges: &[(VertexId, VertexId, Capacity)]) -> ResidualGraph {
        let mut graph = ResidualGraph::new(vertex_count);
        for &(from, to, capacity) in edges {
            graph.add_edge(from, to, capacity).unwrap();
        }
        graph
    }

    #[test]
    fn test_diamond_network() {
        let mut graph = network(4, &[(0, 1, 10), (1, 3, 5), (0, 2, 5), (2, 3, 10)]);
        assert_eq!(max_flow(&mut graph, 0, 3).unwrap(), 10);
    }

    #[test]
    fn test_disconnected_source_and_sink() {
        let mut graph = ResidualGraph::new(4);
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut graph, 0, 3).unwrap(), 0);
        assert_eq!(solver.metrics().augmentations, 0);
        assert_eq!(solver.metrics().vertices_dequeued, 1);
    }

    #[test]
    fn test_parallel_edges() {
        let mut graph = network(3, &[(0, 1, 3), (0, 1, 3), (1, 2, 5)]);
        assert_eq!(max_flow(&mut graph, 0, 2).unwrap(), 5);
    }

    #[test]
    fn test_source_equals_sink_does_no_work() {
        let mut graph = network(2, &[(0, 1, 4), (1, 0, 4)]);
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut graph, 1, 1).unwrap(), 0);
        assert_eq!(solver.metrics().augmentations, 0);
        assert!(graph.edges().all(|(_, edge)| edge.flow == 0));
    }

    #[test]
    fn test_cross_edge_is_not_needed_by_shortest_paths() {
        let mut graph = network(
            4,
            &[(0, 1, 1), (0, 2, 1), (1, 2, 1), (1, 3, 1), (2, 3, 1)],
        );
        assert_eq!(max_flow(&mut graph, 0, 3).unwrap(), 2);
    }

    #[test]
    fn test_classic_clrs_network() {
        let mut graph = network(
            6,
            &[
                (0, 1, 16),
                (0, 2, 13),
                (1, 2, 10),
                (2, 1, 4),
                (1, 3, 12),
                (3, 2, 9),
                (2, 4, 14),
                (4, 3, 7),
                (3, 5, 20),
                (4, 5, 4),
            ],
        );
        assert_eq!(max_flow(&mut graph, 0, 5).unwrap(), 23);
    }

    #[test]
    fn test_invariants_after_solve() {
        let mut graph = network(
            5,
            &[(0, 1, 4), (0, 2, 2), (1, 2, 3), (1, 3, 1), (2, 3, 5), (3, 4, 6), (2, 4, 1)],
        );
        let value = max_flow(&mut graph, 0, 4).unwrap();

        for (id, edge) in graph.edges() {
            assert_eq!(edge.flow, -graph.edge(pair(id)).flow);
        }
        for (_, edge) in graph.forward_edges() {
            assert!(0 <= edge.flow && edge.flow <= edge.capacity);
        }
        for vertex in 1..4 {
            assert_eq!(graph.inflow(vertex), graph.outflow(vertex));
        }
        assert_eq!(graph.inflow(4), value);
    }

    #[test]
    fn test_solve_reports_min_cut() {
        let mut graph = network(4, &[(0, 1, 10), (1, 3, 5), (0, 2, 5), (2, 3, 10)]);
        let result = MaxFlowSolver::new().solve(&mut graph, 0, 3).unwrap();

        assert_eq!(result.max_flow, 10);
        let cut = result.min_cut.unwrap();
        assert_eq!(cut.capacity, 10);
        assert_eq!(cut.source_side, vec![0, 1]);
        assert_eq!(cut.cut_edges, vec![2, 4]);
        assert_eq!(result.metrics.augmentations, 2);
    }

    #[test]
    fn test_min_cut_can_be_disabled() {
        let mut graph = network(2, &[(0, 1, 3)]);
        let config = SolverConfig {
            collect_min_cut: false,
            ..SolverConfig::default()
        };
        let result = MaxFlowSolver::with_config(config).solve(&mut graph, 0, 1).unwrap();
        assert_eq!(result.max_flow, 3);
        assert!(result.min_cut.is_none());
    }

    #[test]
    fn test_augmentation_limit() {
        let mut graph = network(4, &[(0, 1, 10), (1, 3, 5), (0, 2, 5), (2, 3, 10)]);
        let config = SolverConfig {
            max_augmentations: Some(1),
            ..SolverConfig::default()
        };
        let mut solver = MaxFlowSolver::with_config(config);

        assert_eq!(
            solver.max_flow(&mut graph, 0, 3),
            Err(FlowError::AugmentationLimit { limit: 1 })
        );
        assert_eq!(solver.metrics().augmentations, 1);
        assert_eq!(graph.outflow(0), 5);
    }

    #[test]
    fn test_invalid_terminals_are_rejected() {
        let mut graph = ResidualGraph::new(2);
        assert_eq!(
            max_flow(&mut graph, 0, 2),
            Err(FlowError::InvalidVertex { vertex: 2, vertex_count: 2 })
        );
    }

    #[test]
    fn test_value_is_net_of_flow_back_into_source() {
        let mut graph = network(3, &[(0, 1, 5), (1, 0, 5), (1, 2, 1)]);
        // Circulation 0 -> 1 -> 0 already present before the solve.
        graph.push_flow(0, 3);
        graph.push_flow(2, 3);

        let value = max_flow(&mut graph, 0, 2).unwrap();
        assert_eq!(value, 1);
        assert_eq!(graph.outflow(0), 4);
        assert_eq!(graph.inflow(0), 3);
        assert_eq!(graph.inflow(2), value);
        assert!(crate::validation::verify_flow(&graph, 0, 2, value).is_ok());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut graph = network(3, &[(0, 1, 2), (1, 2, 2)]);
        assert_eq!(max_flow(&mut graph, 0, 2).unwrap(), 2);
        let snapshot = graph.clone();

        // A second run finds no augmenting path and leaves every edge untouched.
        assert_eq!(max_flow(&mut graph, 0, 2).unwrap(), 2);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            snapshot.edges().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_unit_capacity_scan_on_unit_network() {
        let mut graph = network(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
        let config = SolverConfig {
            bottleneck_scan: BottleneckScan::UnitCapacity,
            ..SolverConfig::default()
        };
        assert_eq!(MaxFlowSolver::with_config(config).max_flow(&mut graph, 0, 3).unwrap(), 2);
    }

    #[test]
    fn test_unit_capacity_scan_rejects_wider_edges() {
        let mut graph = network(4, &[(0, 1, 10), (1, 3, 5), (0, 2, 5), (2, 3, 10)]);
        let config = SolverConfig {
            bottleneck_scan: BottleneckScan::UnitCapacity,
            ..SolverConfig::default()
        };
        let mut solver = MaxFlowSolver::with_config(config);

        assert!(matches!(
            solver.max_flow(&mut graph, 0, 3),
            Err(FlowError::InvalidInput(_))
        ));
        assert!(graph.edges().all(|(_, edge)| edge.flow == 0));

        solver.set_parameter("bottleneck_scan", "full_path").unwrap();
        assert_eq!(solver.max_flow(&mut graph, 0, 3).unwrap(), 10);
    }

    #[test]
    fn test_max_flow_solver_creation() {
        let solver = MaxFlowSolver::new();
        assert_eq!(solver.name(), "Edmonds-Karp");
        assert_eq!(solver.category(), "max_flow");
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = MaxFlowSolver::new();

        assert!(solver.set_parameter("bottleneck_scan", "unit_capacity").is_ok());
        assert_eq!(solver.get_parameter("bottleneck_scan").as_deref(), Some("unit_capacity"));

        assert!(solver.set_parameter("max_augmentations", "50").is_ok());
        assert_eq!(solver.config().max_augmentations, Some(50));
        assert!(solver.set_parameter("max_augmentations", "none").is_ok());
        assert_eq!(solver.get_parameter("max_augmentations").as_deref(), Some("none"));

        assert!(solver.set_parameter("collect_min_cut", "false").is_ok());
        assert_eq!(
            solver.get_parameters().get("collect_min_cut").map(String::as_str),
            Some("false")
        );

        // Test invalid parameters
        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert!(solver.set_parameter("max_augmentations", "0").is_err());
        assert!(solver.set_parameter("bottleneck_scan", "widest").is_err());
        assert!(solver.set_parameter("collect_min_cut", "maybe").is_err());
    }
}
