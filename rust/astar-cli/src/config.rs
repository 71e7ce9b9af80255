use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Emit logs as JSON lines instead of the human format.
    pub log_json: bool,
    /// Graph used when `--graph` is not given.
    pub default_graph: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let log_json = env::var("ASTAR_LOG_JSON").ok().map(|s| parse_bool(&s)).unwrap_or(false);
        let default_graph = env::var("ASTAR_GRAPH").ok().filter(|s| !s.is_empty()).map(PathBuf::from);
        Self { log_json, default_graph }
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool(" TRUE "));
        assert!(parse_bool("on"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("nope"));
    }
}
