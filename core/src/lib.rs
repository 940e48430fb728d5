//! edmonds-flow: maximum flow over index-paired residual graphs
//!
//! The engine stores every edge next to its zero-capacity reverse partner and
//! drives Ford-Fulkerson with breadth-first augmenting paths (Edmonds-Karp).
//! Two front-ends build networks for it: a bipartite matching reduction and a
//! direct edge-list network between the first and last vertex.
//!
//! ```
//! use edmonds_flow_core::{max_flow, ResidualGraph};
//!
//! let mut graph = ResidualGraph::new(4);
//! graph.add_edge(0, 1, 10).unwrap();
//! graph.add_edge(1, 3, 5).unwrap();
//! graph.add_edge(0, 2, 5).unwrap();
//! graph.add_edge(2, 3, 10).unwrap();
//! assert_eq!(max_flow(&mut graph, 0, 3).unwrap(), 10);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::*;
pub use crate::config::{BottleneckScan, ConfigError, SolverConfig};
pub use crate::data_structures::{FlowEdge, ResidualGraph};
pub use crate::validation::{verify_flow, verify_matching, VerificationError};
