mod cli;
mod dot;
mod error;
mod moves;
mod progress;
mod puzzle;
mod traversal;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use dot::{default_graph_name, DotWriter};
use progress::ProgressSink;
use traversal::{traverse, TraversalConfig};

const PROGRESS_EVERY: usize = 1000;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let start = cli.start().context("invalid start board")?;
    let size = start.size();
    info!(size, solvable = start.is_solvable()?, "start board\n{}", start);
    if size >= 4 {
        let cells = size * size;
        let reachable = (1..=cells).map(|n| n as f64).product::<f64>() / 2.0;
        warn!(cells, reachable, "state count grows factorially with board size");
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let name = cli.name.clone().unwrap_or_else(|| default_graph_name(size));
    let writer = DotWriter::begin(out, &name, cli.edge_labels)?;

    let config = TraversalConfig {
        prune_settled: !cli.no_prune,
        node_limit: cli.max_nodes,
    };

    let stats = if cli.quiet {
        let mut writer = writer;
        let stats = traverse(start, &config, &mut writer)?;
        writer.finish()?;
        stats
    } else {
        let mut sink = ProgressSink::new(writer, PROGRESS_EVERY);
        let stats = traverse(start, &config, &mut sink)?;
        sink.finish()?;
        sink.into_inner().finish()?;
        stats
    };

    info!(
        nodes = stats.nodes,
        edges = stats.edges,
        max_depth = stats.max_depth,
        peak_frontier = stats.peak_frontier,
        pruned = stats.pruned,
        "graph complete"
    );
    Ok(())
}
