//! Direct maximum flow over an edge list
//!
//! Models evacuation through a road network: vertices are cities, edges are
//! one-way roads with a capacity, and the answer is how many people per hour
//! can move from the first city to the last. Endpoints in the edge list are
//! 1-indexed as they appear in the tabular input.

use log::debug;

use crate::algorithm::graph::max_flow::{MaxFlowResult, MaxFlowSolver};
use crate::algorithm::traits::{Capacity, Flow, FlowError, VertexId};
use crate::config::SolverConfig;
use crate::data_structures::residual_graph::ResidualGraph;

/// One road of the input: 1-indexed endpoints and a capacity
pub type RoadSpec = (usize, usize, Capacity);

/// Flow network from the first to the last city
#[derive(Debug, Clone)]
pub struct EvacuationNetwork {
    graph: ResidualGraph,
}

impl EvacuationNetwork {
    /// Build the network, rejecting endpoints outside `1..=vertex_count`
    pub fn from_edge_list(vertex_count: usize, roads: &[RoadSpec]) -> Result<Self, FlowError> {
        if vertex_count == 0 {
            return Err(FlowError::InvalidInput(
                "an evacuation network needs at least one city".to_string(),
            ));
        }

        let mut graph = ResidualGraph::new(vertex_count);
        for &(from, to, capacity) in roads {
            let from = to_zero_based(from, vertex_count)?;
            let to = to_zero_based(to, vertex_count)?;
            graph.add_edge(from, to, capacity)?;
        }

        debug!(
            "Evacuation network with {} cities and {} roads",
            vertex_count,
            roads.len()
        );

        Ok(Self { graph })
    }

    pub fn source(&self) -> VertexId {
        0
    }

    pub fn sink(&self) -> VertexId {
        self.graph.vertex_count() - 1
    }

    pub fn graph(&self) -> &ResidualGraph {
        &self.graph
    }

    /// Maximum flow from the first city to the last, default configuration
    pub fn max_flow(&mut self) -> Result<Flow, FlowError> {
        let (source, sink) = (self.source(), self.sink());
        MaxFlowSolver::new().max_flow(&mut self.graph, source, sink)
    }

    /// Full result (value, cut, metrics) with a caller-supplied configuration
    pub fn solve(&mut self, config: SolverConfig) -> Result<MaxFlowResult, FlowError> {
        let (source, sink) = (self.source(), self.sink());
        MaxFlowSolver::with_config(config).solve(&mut self.graph, source, sink)
    }
}

fn to_zero_based(vertex: usize, vertex_count: usize) -> Result<VertexId, FlowError> {
    if (1..=vertex_count).contains(&vertex) {
        Ok(vertex - 1)
    } else {
        Err(FlowError::InvalidVertex {
            vertex,
            vertex_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BottleneckScan;

    #[test]
    fn test_sample_network() {
        let roads = [(1, 2, 2), (2, 5, 5), (1, 3, 6), (3, 4, 2), (4, 5, 1), (3, 2, 3), (2, 4, 1)];
        let mut network = EvacuationNetwork::from_edge_list(5, &roads).unwrap();
        assert_eq!(network.max_flow().unwrap(), 6);
    }

    #[test]
    fn test_self_loops_and_parallel_roads() {
        let roads = [(1, 1, 10000), (1, 2, 1), (1, 2, 4)];
        let mut network = EvacuationNetwork::from_edge_list(2, &roads).unwrap();
        assert_eq!(network.max_flow().unwrap(), 5);
    }

    #[test]
    fn test_single_city_has_no_flow() {
        let mut network = EvacuationNetwork::from_edge_list(1, &[(1, 1, 3)]).unwrap();
        assert_eq!(network.source(), network.sink());
        assert_eq!(network.max_flow().unwrap(), 0);
    }

    #[test]
    fn test_rejects_out_of_range_and_empty() {
        assert_eq!(
            EvacuationNetwork::from_edge_list(3, &[(0, 2, 1)]).unwrap_err(),
            FlowError::InvalidVertex { vertex: 0, vertex_count: 3 }
        );
        assert_eq!(
            EvacuationNetwork::from_edge_list(3, &[(1, 4, 1)]).unwrap_err(),
            FlowError::InvalidVertex { vertex: 4, vertex_count: 3 }
        );
        assert!(matches!(
            EvacuationNetwork::from_edge_list(0, &[]),
            Err(FlowError::InvalidInput(_))
        ));
        assert!(matches!(
            EvacuationNetwork::from_edge_list(2, &[(1, 2, -5)]),
            Err(FlowError::NegativeCapacity { .. })
        ));
    }

    #[test]
    fn test_unit_capacity_config_is_refused() {
        let roads = [(1, 2, 10), (2, 4, 5), (1, 3, 5), (3, 4, 10)];
        let mut network = EvacuationNetwork::from_edge_list(4, &roads).unwrap();
        let config = SolverConfig {
            bottleneck_scan: BottleneckScan::UnitCapacity,
            ..SolverConfig::default()
        };

        assert!(matches!(network.solve(config), Err(FlowError::InvalidInput(_))));
        assert_eq!(network.max_flow().unwrap(), 10);
    }

    #[test]
    fn test_solve_returns_matching_cut() {
        let roads = [(1, 2, 10), (2, 4, 5), (1, 3, 5), (3, 4, 10)];
        let mut network = EvacuationNetwork::from_edge_list(4, &roads).unwrap();
        let result = network.solve(SolverConfig::default()).unwrap();
        assert_eq!(result.max_flow, 10);
        assert_eq!(result.min_cut.map(|cut| cut.capacity), Some(10));
    }
}
