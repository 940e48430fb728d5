//! Flow algorithms over the residual graph
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod augmenting_path;
pub mod evacuation;
pub mod matching;
pub mod max_flow;

pub use self::augmenting_path::{find_augmenting_path, AugmentingPath, AugmentingPathSearch};
pub use self::evacuation::{EvacuationNetwork, RoadSpec};
pub use self::matching::{find_matching, BipartiteMatcher, Matching, MatchingNetwork};
pub use self::max_flow::{max_flow, FlowMetrics, MaxFlowResult, MaxFlowSolver, MinCut};
