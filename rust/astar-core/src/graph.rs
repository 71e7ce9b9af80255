use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::engine::{SearchSpace, TableHeuristic};
use crate::errors::{Result, SearchError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

/// On-disk description of a weighted graph plus optional per-node estimates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    /// Undirected unless set; an undirected edge is stored in both directions.
    pub directed: bool,
    pub edges: Vec<EdgeSpec>,
    /// Estimated distance of each node to `heuristic_goal`.
    pub heuristic: HashMap<String, f64>,
    /// The goal the `heuristic` table was computed for.
    pub heuristic_goal: Option<String>,
}

impl GraphDocument {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// The estimate table, if it was built for exactly this goal set.
    ///
    /// Estimates towards one node overestimate for any other target, so a
    /// table without a recorded goal, or for a different one, is never used.
    pub fn heuristic_for(&self, goals: &[String]) -> Option<TableHeuristic<String, f64>> {
        match (&self.heuristic_goal, goals) {
            (Some(target), [goal]) if target == goal && !self.heuristic.is_empty() => {
                Some(TableHeuristic::new(self.heuristic.clone()))
            }
            _ => None,
        }
    }
}

/// Adjacency lists keyed by node name. Edge order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct WeightedGraph {
    adjacency: HashMap<String, Vec<(String, f64)>>,
    edges: usize,
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: &GraphDocument) -> Result<Self> {
        let mut graph = Self::new();
        for e in &doc.edges {
            if doc.directed {
                graph.add_edge(&e.from, &e.to, e.cost)?;
            } else {
                graph.add_undirected_edge(&e.from, &e.to, e.cost)?;
            }
        }
        Ok(graph)
    }

    pub fn add_edge(&mut self, from: &str, to: &str, cost: f64) -> Result<()> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(SearchError::InvalidCost { from: from.to_string(), to: to.to_string(), cost: cost.to_string() });
        }
        self.adjacency.entry(to.to_string()).or_default();
        self.adjacency.entry(from.to_string()).or_default().push((to.to_string(), cost));
        self.edges += 1;
        Ok(())
    }

    pub fn add_undirected_edge(&mut self, a: &str, b: &str, cost: f64) -> Result<()> {
        self.add_edge(a, b, cost)?;
        self.add_edge(b, a, cost)
    }

    pub fn neighbors(&self, node: &str) -> &[(String, f64)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Directed edge count; an undirected edge counts twice.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn query<I>(&self, goals: I) -> GraphQuery<'_>
    where
        I: IntoIterator<Item = String>,
    {
        GraphQuery { graph: self, goals: goals.into_iter().collect(), heuristic: TableHeuristic::default() }
    }
}

/// A search over a [`WeightedGraph`] towards any node in a goal set.
#[derive(Clone, Debug)]
pub struct GraphQuery<'a> {
    graph: &'a WeightedGraph,
    goals: HashSet<String>,
    heuristic: TableHeuristic<String, f64>,
}

impl GraphQuery<'_> {
    pub fn with_heuristic(mut self, heuristic: TableHeuristic<String, f64>) -> Self {
        self.heuristic = heuristic;
        self
    }
}

impl SearchSpace for GraphQuery<'_> {
    type Node = String;
    type Cost = f64;

    fn is_goal(&self, node: &String) -> bool {
        self.goals.contains(node)
    }

    fn neighbors(&self, node: &String) -> impl IntoIterator<Item = (String, f64)> {
        self.graph.neighbors(node).iter().cloned()
    }

    fn heuristic(&self, node: &String) -> f64 {
        self.heuristic.estimate(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AStar;

    const DOC: &str = r#"{
        "edges": [
            {"from": "A", "to": "B", "cost": 1},
            {"from": "A", "to": "C", "cost": 4},
            {"from": "B", "to": "C", "cost": 1},
            {"from": "C", "to": "D", "cost": 1}
        ]
    }"#;

    #[test]
    fn parses_and_builds_undirected_by_default() {
        let doc = GraphDocument::from_json_str(DOC).unwrap();
        assert!(!doc.directed);
        assert!(doc.heuristic.is_empty());
        let g = WeightedGraph::from_document(&doc).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 8);
        assert_eq!(g.neighbors("D"), &[("C".to_string(), 1.0)]);
        assert!(g.neighbors("nowhere").is_empty());
    }

    #[test]
    fn heuristic_table_only_for_its_own_goal() {
        let mut doc = GraphDocument::from_json_str(DOC).unwrap();
        doc.heuristic = HashMap::from([("A".to_string(), 3.0)]);
        assert!(doc.heuristic_for(&["D".to_string()]).is_none());

        doc.heuristic_goal = Some("D".to_string());
        let h = doc.heuristic_for(&["D".to_string()]).unwrap();
        assert_eq!(h.estimate(&"A".to_string()), 3.0);
        assert!(doc.heuristic_for(&["A".to_string()]).is_none());
        assert!(doc.heuristic_for(&["D".to_string(), "C".to_string()]).is_none());
    }

    #[test]
    fn rejects_negative_and_nan_costs() {
        let mut g = WeightedGraph::new();
        assert!(matches!(g.add_edge("a", "b", -1.0), Err(SearchError::InvalidCost { .. })));
        assert!(matches!(g.add_edge("a", "b", f64::NAN), Err(SearchError::InvalidCost { .. })));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn directed_graph_has_no_way_back() {
        let mut doc = GraphDocument::from_json_str(DOC).unwrap();
        doc.directed = true;
        let g = WeightedGraph::from_document(&doc).unwrap();
        let res = AStar::new(g.query(["A".to_string()])).run("D".to_string()).unwrap();
        assert!(!res.is_found());
        let res = AStar::new(g.query(["D".to_string()])).run("A".to_string()).unwrap();
        assert_eq!(res.found().map(|f| f.cost), Some(3.0));
    }

    #[test]
    fn query_uses_heuristic_table() {
        let doc = GraphDocument::from_json_str(DOC).unwrap();
        let g = WeightedGraph::from_document(&doc).unwrap();
        let h: TableHeuristic<String, f64> =
            [("A".to_string(), 3.0), ("B".to_string(), 2.0), ("C".to_string(), 1.0)].into_iter().collect();
        let res = AStar::new(g.query(["D".to_string()]).with_heuristic(h)).run("A".to_string()).unwrap();
        let found = res.found().unwrap();
        assert_eq!(found.priority, 3.0);
        assert_eq!(
            res.path().unwrap().unwrap(),
            vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()]
        );
    }
}
