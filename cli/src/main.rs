//! Command-line front-end for the edmonds-flow engine.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use edmonds_flow_core::{
    verify_flow, verify_matching, BipartiteMatcher, EvacuationNetwork, SolverConfig,
};

pub mod input;

#[derive(Parser)]
#[command(name = "edmonds-flow")]
#[command(about = "Maximum flow, bipartite matching and evacuation planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read the problem from this file instead of stdin
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Solver configuration as a JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Check the result against its certificate before printing it
    #[arg(long, global = true)]
    verify: bool,

    /// Print a JSON document instead of plain integers
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign left items to compatible right items (`L R` then an L x R 0/1 matrix)
    Matching,
    /// Maximum flow from city 1 to city n (`n m` then `m` lines `u v c`)
    Evacuation,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let text = read_input(cli.input.as_ref())?;
    let config = match &cli.config {
        Some(path) => Some(
            SolverConfig::from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
        ),
        None => None,
    };

    match cli.command {
        Commands::Matching => run_matching(&text, config, cli.verify, cli.json),
        Commands::Evacuation => run_evacuation(&text, config, cli.verify, cli.json),
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}

fn run_matching(text: &str, config: Option<SolverConfig>, verify: bool, json: bool) -> Result<()> {
    let adjacency = input::parse_adjacency(text).context("Malformed matching input")?;
    debug!(
        "Read {} x {} compatibility matrix",
        adjacency.len(),
        adjacency.first().map_or(0, Vec::len)
    );

    let mut matcher = match config {
        Some(config) => BipartiteMatcher::with_config(config),
        None => BipartiteMatcher::new(),
    };
    let matching = matcher
        .find_matching(&adjacency)
        .context("Matching failed")?;
    info!(
        "Matched {} of {} left items in {} augmentations",
        matching.size(),
        adjacency.len(),
        matcher.metrics().augmentations
    );

    if verify {
        verify_matching(&adjacency, &matching).context("Matching failed verification")?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&matching)?);
    } else {
        let line: Vec<String> = matching
            .to_one_indexed()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn run_evacuation(
    text: &str,
    config: Option<SolverConfig>,
    verify: bool,
    json: bool,
) -> Result<()> {
    let (vertex_count, roads) = input::parse_edge_list(text).context("Malformed evacuation input")?;
    let mut network = EvacuationNetwork::from_edge_list(vertex_count, &roads)
        .context("Invalid road network")?;

    let result = network
        .solve(config.unwrap_or_default())
        .context("Maximum flow computation failed")?;
    info!(
        "Maximum flow {} after {} augmentations ({:.3} ms)",
        result.max_flow, result.metrics.augmentations, result.metrics.execution_time_ms
    );

    if verify {
        verify_flow(network.graph(), network.source(), network.sink(), result.max_flow)
            .context("Flow failed verification")?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.max_flow);
    }
    Ok(())
}
