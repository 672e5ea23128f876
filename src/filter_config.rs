use serde::{Deserialize, Serialize};
use std::{fmt::Display, fs, path::Path};

use crate::ConfigError;

pub const DEFAULT_MIN_TITLE_CHARS: usize = 15;
pub const DEFAULT_MIN_SUMMARY_CHARS: usize = 20;
pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 300;
pub const DEFAULT_ELLIPSIS: &str = "...";
pub const DEFAULT_SOURCE: &str = "Stock News";

/// Substrings that only show up in feed boilerplate or error entries.
pub const ARTIFACT_PATTERNS: &[&str] = &[
    "this feed is not available",
    "for the latest headlines",
    "this xml file",
    "ispermalink",
    "<item>",
    "<rss>",
    "xml feed is made available",
    "news-webmaster@google.com",
    "copyright",
    "all rights reserved",
];

/// A reason to drop an item before it is cleaned.
///
/// Matching is case-insensitive and runs on the raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiscardRule {
    /// Title or summary contains `pattern`.
    Contains { pattern: String },
    /// Trimmed title equals `value`.
    TitleEquals { value: String },
    /// Title has fewer than `min` chars. An absent title counts as empty.
    TitleShorterThan { min: usize },
}

impl DiscardRule {
    pub fn contains(pattern: &str) -> Self {
        DiscardRule::Contains {
            pattern: pattern.to_lowercase(),
        }
    }

    /// `title` and `summary` are expected lowercased already.
    pub(crate) fn matches(&self, title: &str, summary: &str) -> bool {
        match self {
            DiscardRule::Contains { pattern } => {
                let pattern = pattern.to_lowercase();
                title.contains(&pattern) || summary.contains(&pattern)
            }
            DiscardRule::TitleEquals { value } => title.trim() == value.to_lowercase(),
            DiscardRule::TitleShorterThan { min } => title.chars().count() < *min,
        }
    }
}

impl Display for DiscardRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardRule::Contains { pattern } => write!(f, "contains {pattern:?}"),
            DiscardRule::TitleEquals { value } => write!(f, "title equals {value:?}"),
            DiscardRule::TitleShorterThan { min } => write!(f, "title shorter than {min}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub rules: Vec<DiscardRule>,
    #[serde(default = "default_min_summary_chars")]
    pub min_summary_chars: usize,
    #[serde(default = "default_max_summary_chars")]
    pub max_summary_chars: usize,
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,
    #[serde(default = "default_source")]
    pub default_source: String,
}

fn default_min_summary_chars() -> usize {
    DEFAULT_MIN_SUMMARY_CHARS
}

fn default_max_summary_chars() -> usize {
    DEFAULT_MAX_SUMMARY_CHARS
}

fn default_ellipsis() -> String {
    DEFAULT_ELLIPSIS.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl FilterConfig {
    pub fn new(rules: Vec<DiscardRule>) -> Self {
        FilterConfig {
            rules,
            min_summary_chars: DEFAULT_MIN_SUMMARY_CHARS,
            max_summary_chars: DEFAULT_MAX_SUMMARY_CHARS,
            ellipsis: default_ellipsis(),
            default_source: default_source(),
        }
    }

    /// Loads a config from a `.json`/`.toml` path, or parses `config` itself
    /// as inline JSON (then TOML, when enabled).
    pub fn from_config(config: &str) -> Result<FilterConfig, ConfigError> {
        let parsed: FilterConfig = if Path::new(config).exists() {
            tracing::debug!(path = config, "loading filter config from file");
            let config_content = fs::read_to_string(config)?;
            if config.ends_with(".json") {
                serde_json::from_str(&config_content)?
            } else if config.ends_with(".toml") {
                #[cfg(feature = "toml_config")]
                {
                    toml::from_str(&config_content)?
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    return Err(ConfigError::TomlNotEnabled);
                }
            } else {
                return Err(ConfigError::UnsupportedFormat);
            }
        } else {
            serde_json::from_str(config).or_else(|json_err| {
                #[cfg(feature = "toml_config")]
                {
                    let _ = json_err;
                    toml::from_str(config).map_err(ConfigError::from)
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    Err(ConfigError::from(json_err))
                }
            })?
        };
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_summary_chars == 0 {
            return Err(ConfigError::Invalid(
                "max_summary_chars must be greater than zero".to_string(),
            ));
        }
        if let Some(rule) = self
            .rules
            .iter()
            .find(|rule| matches!(rule, DiscardRule::Contains { pattern } if pattern.is_empty()))
        {
            return Err(ConfigError::Invalid(format!(
                "rule `{rule}` would discard every item"
            )));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        let mut rules: Vec<DiscardRule> = ARTIFACT_PATTERNS
            .iter()
            .map(|pattern| DiscardRule::contains(pattern))
            .collect();
        rules.push(DiscardRule::TitleEquals {
            value: "false".to_string(),
        });
        rules.push(DiscardRule::TitleShorterThan {
            min: DEFAULT_MIN_TITLE_CHARS,
        });
        FilterConfig::new(rules)
    }
}

impl Display for FilterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_strict_rule_set() {
        let config = FilterConfig::default();
        assert_eq!(config.rules.len(), ARTIFACT_PATTERNS.len() + 2);
        assert!(config
            .rules
            .contains(&DiscardRule::TitleShorterThan { min: 15 }));
        assert_eq!(config.min_summary_chars, 20);
        assert_eq!(config.max_summary_chars, 300);
        assert_eq!(config.ellipsis, "...");
        assert_eq!(config.default_source, "Stock News");
    }

    #[test]
    fn rules_match_case_insensitively() {
        let rule = DiscardRule::Contains {
            pattern: "This XML File".to_string(),
        };
        assert!(rule.matches("", "this xml file does not appear to have style"));
        assert!(!rule.matches("quarterly results", "profits up"));

        let rule = DiscardRule::TitleEquals {
            value: "FALSE".to_string(),
        };
        assert!(rule.matches("  false ", ""));
        assert!(!rule.matches("false start for bourse", ""));
    }

    #[test]
    fn title_length_counts_chars() {
        let rule = DiscardRule::TitleShorterThan { min: 5 };
        assert!(rule.matches("abcd", ""));
        assert!(!rule.matches("ééééé", ""));
    }

    #[test]
    fn loads_inline_json_with_defaults() {
        let config = FilterConfig::from_config(
            r#"{
                "rules": [
                    { "type": "Contains", "pattern": "this feed" },
                    { "type": "TitleShorterThan", "min": 10 }
                ],
                "max_summary_chars": 120
            }"#,
        )
        .unwrap();

        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[1], DiscardRule::TitleShorterThan { min: 10 });
        assert_eq!(config.max_summary_chars, 120);
        assert_eq!(config.min_summary_chars, 20);
    }

    #[test]
    fn loads_json_file() {
        let path = std::env::temp_dir().join(format!("news_filter_{}.json", std::process::id()));
        fs::write(&path, FilterConfig::default().to_string()).unwrap();

        let config = FilterConfig::from_config(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn rejects_unknown_file_extension() {
        let path = std::env::temp_dir().join(format!("news_filter_{}.yaml", std::process::id()));
        fs::write(&path, "rules: []").unwrap();

        let result = FilterConfig::from_config(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::UnsupportedFormat)));
    }

    #[test]
    fn rejects_zero_summary_length() {
        let result = FilterConfig::from_config(r#"{ "rules": [], "max_summary_chars": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_contains_pattern() {
        let mut config = FilterConfig::default();
        config.rules.push(DiscardRule::contains(""));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[cfg(feature = "toml_config")]
    #[test]
    fn loads_inline_toml() {
        let config = FilterConfig::from_config(
            r#"
            ellipsis = " …"

            [[rules]]
            type = "TitleEquals"
            value = "false"
            "#,
        )
        .unwrap();
        assert_eq!(config.ellipsis, " …");
        assert_eq!(config.rules.len(), 1);
    }
}
