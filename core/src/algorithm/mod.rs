//! edmonds-flow Algorithm Framework
//! Maximum flow engine and its problem-specific front-ends
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod traits;
pub mod graph;

pub use self::traits::*;
pub use self::graph::*;
