//! Traversal paths over paired document trees.
//!
//! A traversal path is a string of path codes read left to right from each root:
//!
//! | Code | Meaning |
//! |------|---------|
//! | `r` | stay at the current level (ends the path) |
//! | `c` | descend into children (chunks) |
//! | `m` | descend into matches |
//!
//! `"r"` evaluates the roots, `"c"` their children, `"cm"` the matches of their
//! children. A [`TraversalSpec`] holds several paths, compiled once; the
//! evaluator visits the terminal pairs of each path in order.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a traversal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCode {
    /// Stay at the current pair
    Root,
    /// Pair up children positionally; lengths must match
    Children,
    /// Pair up matches positionally; the shorter side bounds the pairs
    Matches,
}

impl PathCode {
    /// Parses a single path code character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(PathCode::Root),
            'c' => Some(PathCode::Children),
            'm' => Some(PathCode::Matches),
            _ => None,
        }
    }

    /// The character for this code.
    pub fn as_char(&self) -> char {
        match self {
            PathCode::Root => 'r',
            PathCode::Children => 'c',
            PathCode::Matches => 'm',
        }
    }
}

/// A compiled traversal path: the descent steps before the terminal level.
///
/// An empty path means the roots themselves are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TraversalPath {
    steps: Vec<PathCode>,
}

impl TraversalPath {
    /// Parses a path such as `"cm"`.
    ///
    /// Everything after the first `r` is ignored since `r` ends descent.
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidTraversalPath {
                path: path.to_string(),
                reason: "path is empty".to_string(),
            });
        }

        let mut steps = Vec::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            match PathCode::from_char(c) {
                Some(PathCode::Root) => break,
                Some(code) => steps.push(code),
                None => {
                    return Err(ConfigError::InvalidTraversalPath {
                        path: path.to_string(),
                        reason: format!("unknown path code {c:?}, expected one of 'r', 'c', 'm'"),
                    })
                }
            }
        }
        Ok(Self { steps })
    }

    /// Descent steps, in order.
    pub fn steps(&self) -> &[PathCode] {
        &self.steps
    }
}

impl fmt::Display for TraversalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("r");
        }
        self.steps
            .iter()
            .try_for_each(|code| write!(f, "{}", code.as_char()))
    }
}

/// Traversal paths as written in configuration.
///
/// Accepts either a comma-separated string (`"r,c"`) or a list (`["r", "c"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraversalPaths {
    /// Comma-separated paths
    Joined(String),
    /// One path per entry
    List(Vec<String>),
}

impl Default for TraversalPaths {
    fn default() -> Self {
        TraversalPaths::Joined(crate::config::DEFAULT_TRAVERSAL_PATH.to_string())
    }
}

impl From<&str> for TraversalPaths {
    fn from(value: &str) -> Self {
        TraversalPaths::Joined(value.to_string())
    }
}

impl From<Vec<&str>> for TraversalPaths {
    fn from(value: Vec<&str>) -> Self {
        TraversalPaths::List(value.into_iter().map(str::to_string).collect())
    }
}

/// An ordered, duplicate-free set of compiled traversal paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalSpec {
    paths: Vec<TraversalPath>,
}

impl TraversalSpec {
    /// Parses a comma-separated list of paths, e.g. `"r,c,cm"`.
    pub fn parse(paths: &str) -> Result<Self, ConfigError> {
        Self::from_paths(paths.split(','))
    }

    /// Compiles paths, dropping duplicates while keeping first-seen order.
    ///
    /// Paths are compared after compilation, so `"r"` and `"rc"` collapse.
    pub fn from_paths<'a, I>(paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut compiled: Vec<TraversalPath> = Vec::new();
        for raw in paths {
            let path = TraversalPath::parse(raw)?;
            if !compiled.contains(&path) {
                compiled.push(path);
            }
        }

        if compiled.is_empty() {
            return Err(ConfigError::InvalidTraversalPath {
                path: String::new(),
                reason: "no traversal path given".to_string(),
            });
        }
        Ok(Self { paths: compiled })
    }

    /// Only the roots.
    pub fn root() -> Self {
        Self {
            paths: vec![TraversalPath::default()],
        }
    }

    /// Compiled paths, in visiting order.
    pub fn paths(&self) -> &[TraversalPath] {
        &self.paths
    }
}

impl TryFrom<&TraversalPaths> for TraversalSpec {
    type Error = ConfigError;

    fn try_from(value: &TraversalPaths) -> Result<Self, Self::Error> {
        match value {
            TraversalPaths::Joined(paths) => TraversalSpec::parse(paths),
            TraversalPaths::List(paths) => {
                TraversalSpec::from_paths(paths.iter().map(String::as_str))
            }
        }
    }
}

impl fmt::Display for TraversalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert!(TraversalPath::parse("r").unwrap().steps().is_empty());
        assert_eq!(
            TraversalPath::parse("cm").unwrap().steps(),
            &[PathCode::Children, PathCode::Matches]
        );
        // r terminates descent
        assert_eq!(TraversalPath::parse("crm").unwrap().steps(), &[PathCode::Children]);
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        let err = TraversalPath::parse("cx").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTraversalPath { .. }));
        assert!(TraversalPath::parse("  ").is_err());
    }

    #[test]
    fn test_spec_deduplicates_in_order() {
        let spec = TraversalSpec::parse("c, r,c,rc,m").unwrap();
        assert_eq!(spec.to_string(), "c,r,m");
    }

    #[test]
    fn test_spec_from_configured_paths() {
        let joined = TraversalSpec::try_from(&TraversalPaths::from("r,cm")).unwrap();
        let list = TraversalSpec::try_from(&TraversalPaths::from(vec!["r", "cm"])).unwrap();
        assert_eq!(joined, list);
        assert_eq!(
            TraversalSpec::try_from(&TraversalPaths::default()).unwrap(),
            TraversalSpec::root()
        );
    }

    #[test]
    fn test_traversal_paths_serde_accepts_both_forms() {
        let joined: TraversalPaths = serde_json::from_str("\"r,c\"").unwrap();
        let list: TraversalPaths = serde_json::from_str("[\"r\", \"c\"]").unwrap();
        assert_eq!(joined, TraversalPaths::Joined("r,c".to_string()));
        assert_eq!(list, TraversalPaths::List(vec!["r".to_string(), "c".to_string()]));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(TraversalSpec::from_paths(Vec::<&str>::new()).is_err());
    }
}
