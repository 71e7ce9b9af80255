pub mod cost;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod path;

pub use cost::Cost;
pub use engine::{search, search_dijkstra, AStar, FnSpace, Found, Outcome, SearchResult, SearchSpace, SearchStats, TableHeuristic, UpdatableQueue};
pub use errors::SearchError;
pub use graph::{GraphDocument, GraphQuery, WeightedGraph};
pub use path::{reconstruct, ParentMap};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
