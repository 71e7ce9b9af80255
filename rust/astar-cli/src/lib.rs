use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use astar_core::{AStar, GraphDocument, WeightedGraph};

pub mod config;
pub mod report;

use config::Config;
use report::Report;

#[derive(Parser, Debug, Clone)]
#[command(name = "astar", version, about = "Shortest path over a JSON graph document with A*")]
pub struct Args {
    /// Graph document (JSON); falls back to ASTAR_GRAPH
    #[arg(long = "graph", value_name = "PATH")]
    pub graph: Option<PathBuf>,

    /// Node to search from
    #[arg(long = "start", value_name = "NODE")]
    pub start: String,

    /// Goal node; repeat for several, the nearest wins
    #[arg(long = "goal", value_name = "NODE", required = true)]
    pub goals: Vec<String>,

    /// Ignore the document's heuristic table. The table is only ever used when
    /// the search has a single goal equal to its `heuristic_goal`.
    #[arg(long = "dijkstra")]
    pub dijkstra: bool,

    /// Write the report here instead of stdout
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn load_graph(path: &Path) -> Result<GraphDocument> {
    let text = fs::read_to_string(path).with_context(|| format!("reading graph {}", path.display()))?;
    GraphDocument::from_json_str(&text).with_context(|| format!("parsing graph {}", path.display()))
}

pub fn run(args: &Args, cfg: &Config) -> Result<Report> {
    let Some(path) = args.graph.as_ref().or(cfg.default_graph.as_ref()) else {
        bail!("no graph given: pass --graph or set ASTAR_GRAPH");
    };
    let doc = load_graph(path)?;
    let graph = WeightedGraph::from_document(&doc).context("building graph")?;
    info!(path=%path.display(), nodes = graph.node_count(), edges = graph.edge_count(), directed = doc.directed, "graph_loaded");

    if !graph.contains(&args.start) {
        warn!(start=%args.start, "start node has no edges");
    }
    for goal in args.goals.iter().filter(|g| !graph.contains(g)) {
        warn!(goal=%goal, "goal node has no edges");
    }

    let mut query = graph.query(args.goals.iter().cloned());
    let table = if args.dijkstra { None } else { doc.heuristic_for(&args.goals) };
    if table.is_none() && !args.dijkstra && !doc.heuristic.is_empty() {
        warn!(heuristic_goal = ?doc.heuristic_goal, goals = ?args.goals, "heuristic table does not target these goals, ignoring it");
    }
    let informed = table.is_some();
    if let Some(table) = table {
        query = query.with_heuristic(table);
    }
    let result = AStar::new(query).run(args.start.clone()).context("search failed")?;
    let report = Report::from_result(&args.start, &args.goals, informed, &result).context("reconstructing path")?;
    info!(found = report.found, cost = ?report.cost, hops = report.path.len().saturating_sub(1), expanded = report.stats.expanded, "search_done");
    Ok(report)
}

pub fn write_report(report: &Report, out: Option<&Path>, pretty: bool) -> Result<()> {
    let json = if pretty { serde_json::to_string_pretty(report)? } else { serde_json::to_string(report)? };
    match out {
        Some(path) => {
            let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            writeln!(f, "{json}")?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
