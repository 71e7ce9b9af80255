pub mod heuristics;
pub mod queue;
pub mod search;

pub use heuristics::TableHeuristic;
pub use queue::UpdatableQueue;
pub use search::{search, search_dijkstra, AStar, FnSpace, Found, Outcome, SearchResult, SearchSpace, SearchStats};
