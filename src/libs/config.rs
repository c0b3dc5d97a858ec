use serde::{Deserialize, Serialize};

/// Run settings. Every field has a default, so a dataset may carry a partial `config`
/// object or none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Join through tagged repeat ends instead of plain open ends.
    pub repeats: bool,
    /// Read the tree as rooted: only clades guide the splits.
    pub rooted: bool,
    /// Worker threads for scoring.
    pub parallel: usize,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            repeats: false,
            rooted: false,
            parallel: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: ScaffoldConfig = serde_json::from_str(r#"{"repeats": true}"#).unwrap();
        assert_eq!(
            config,
            ScaffoldConfig {
                repeats: true,
                ..Default::default()
            }
        );
        let config: ScaffoldConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.parallel, 1);
    }
}
