use serde::Serialize;

use astar_core::{SearchResult, SearchStats};

/// JSON summary of one search, written to stdout or `--out`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub found: bool,
    pub start: String,
    pub goals: Vec<String>,
    /// Whether the document's heuristic table guided the search.
    pub informed: bool,
    pub goal: Option<String>,
    pub cost: Option<f64>,
    pub priority: Option<f64>,
    pub path: Vec<String>,
    pub stats: SearchStats,
}

impl Report {
    pub fn from_result(start: &str, goals: &[String], informed: bool, result: &SearchResult<String, f64>) -> astar_core::errors::Result<Self> {
        let found = result.found();
        Ok(Self {
            found: found.is_some(),
            start: start.to_string(),
            goals: goals.to_vec(),
            informed,
            goal: found.map(|f| f.node.clone()),
            cost: found.map(|f| f.cost),
            priority: found.map(|f| f.priority),
            path: result.path()?.unwrap_or_default(),
            stats: result.stats,
        })
    }
}
