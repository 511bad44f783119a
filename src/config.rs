//! Lint configuration: include/exclude filters and per-rule severity overrides.
//!
//! Loaded from `awslint.json` (or `awslint.yaml` / `awslint.yml`):
//!
//! ```json
//! {
//!   "exclude": ["resource-class:AWS::S3::*"],
//!   "severity": { "resource-class": "error" }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;
use crate::errors::{LintError, Result};
use crate::reflect::loader::read_file_checked;

/// Config file names, in discovery order.
pub const CONFIG_FILES: &[&str] = &["awslint.json", "awslint.yaml", "awslint.yml"];

/// Severity override for a rule; `off` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Off,
    Info,
    Warning,
    Error,
}

impl Level {
    #[must_use]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Level::Off => None,
            Level::Info => Some(Severity::Info),
            Level::Warning => Some(Severity::Warning),
            Level::Error => Some(Severity::Error),
        }
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    severity: HashMap<String, Level>,
}

/// A `rule:scope` glob where `*` matches any run of characters.
#[derive(Debug, Clone)]
struct Pattern {
    re: Regex,
}

impl Pattern {
    fn compile(source: &str) -> Result<Self> {
        let body = source
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let re = Regex::new(&format!("^{body}$")).map_err(|e| LintError::Config {
            message: format!("invalid pattern '{source}': {e}"),
        })?;
        Ok(Self { re })
    }

    fn matches(&self, key: &str) -> bool {
        self.re.is_match(key)
    }
}

/// Configuration for the linter.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    severity: HashMap<String, Level>,
}

impl LintConfig {
    /// Empty config: every diagnostic is reported at its rule's default severity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config text; YAML when `yaml` is set, JSON otherwise.
    pub fn parse(content: &str, yaml: bool) -> Result<Self> {
        let file: ConfigFile = if yaml {
            serde_yaml_ng::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        let mut config = Self::new();
        for p in &file.include {
            config.include(p)?;
        }
        for p in &file.exclude {
            config.exclude(p)?;
        }
        config.severity = file.severity;
        Ok(config)
    }

    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_file_checked(path)?;
        let yaml = path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml");
        Self::parse(&content, yaml).map_err(|e| LintError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Locate a config file in `dir`.
    #[must_use]
    pub fn find(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    /// Report only diagnostics whose `rule:scope` key matches `pattern`.
    ///
    /// With no include patterns every key is included.
    pub fn include(&mut self, pattern: &str) -> Result<()> {
        self.include.push(Pattern::compile(pattern)?);
        Ok(())
    }

    /// Suppress diagnostics whose `rule:scope` key matches `pattern`.
    pub fn exclude(&mut self, pattern: &str) -> Result<()> {
        self.exclude.push(Pattern::compile(pattern)?);
        Ok(())
    }

    /// Set the severity for a specific rule.
    pub fn set_severity(&mut self, rule: &str, level: Level) {
        self.severity.insert(rule.to_string(), level);
    }

    /// Effective severity for a rule; `None` when the rule is turned off.
    #[must_use]
    pub fn effective_severity(&self, rule: &str, default: Severity) -> Option<Severity> {
        match self.severity.get(rule) {
            Some(level) => level.severity(),
            None => Some(default),
        }
    }

    /// Whether a diagnostic keyed `rule:scope` passes the include/exclude filters.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches(key));
        included && !self.exclude.iter().any(|p| p.matches(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_accepts_everything() {
        let config = LintConfig::new();
        assert!(config.accepts("resource-class:AWS::S3::Bucket"));
        assert_eq!(
            config.effective_severity("resource-class", Severity::Warning),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn exclude_glob() {
        let mut config = LintConfig::new();
        config.exclude("resource-class:AWS::S3::*").unwrap();
        assert!(!config.accepts("resource-class:AWS::S3::Bucket"));
        assert!(config.accepts("resource-class:AWS::SQS::Queue"));
    }

    #[test]
    fn exact_pattern_is_anchored() {
        let mut config = LintConfig::new();
        config.exclude("resource-class:AWS::S3::Bucket").unwrap();
        assert!(config.accepts("resource-class:AWS::S3::BucketPolicy"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let mut config = LintConfig::new();
        config.exclude("resource-class:AWS::S3::Bucket.").unwrap();
        assert!(config.accepts("resource-class:AWS::S3::Buckets"));
    }

    #[test]
    fn include_restricts_then_exclude_wins() {
        let mut config = LintConfig::new();
        config.include("resource-class:AWS::EC2::*").unwrap();
        config.exclude("*:AWS::EC2::VPC").unwrap();
        assert!(config.accepts("resource-class:AWS::EC2::Subnet"));
        assert!(!config.accepts("resource-class:AWS::EC2::VPC"));
        assert!(!config.accepts("resource-class:AWS::S3::Bucket"));
    }

    #[test]
    fn severity_override_and_off() {
        let mut config = LintConfig::new();
        config.set_severity("resource-class", Level::Error);
        assert_eq!(
            config.effective_severity("resource-class", Severity::Warning),
            Some(Severity::Error)
        );
        config.set_severity("resource-class", Level::Off);
        assert_eq!(config.effective_severity("resource-class", Severity::Warning), None);
    }

    #[test]
    fn parse_json() {
        let config = LintConfig::parse(
            r#"{"exclude": ["resource-class:AWS::IAM::*"], "severity": {"resource-class": "error"}}"#,
            false,
        )
        .unwrap();
        assert!(!config.accepts("resource-class:AWS::IAM::Role"));
        assert_eq!(
            config.effective_severity("resource-class", Severity::Warning),
            Some(Severity::Error)
        );
    }

    #[test]
    fn parse_yaml() {
        let config = LintConfig::parse("exclude:\n  - \"*\"\n", true).unwrap();
        assert!(!config.accepts("resource-class:AWS::S3::Bucket"));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(LintConfig::parse(r#"{"exlude": []}"#, false).is_err());
    }

    #[test]
    fn find_and_load_from_dir() {
        let dir = tempdir().unwrap();
        assert!(LintConfig::find(dir.path()).is_none());
        fs::write(dir.path().join("awslint.yml"), "severity:\n  resource-class: \"off\"\n").unwrap();
        let path = LintConfig::find(dir.path()).unwrap();
        let config = LintConfig::from_file(&path).unwrap();
        assert_eq!(config.effective_severity("resource-class", Severity::Warning), None);
    }

    #[test]
    fn bad_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("awslint.json");
        fs::write(&path, "{ not json").unwrap();
        let err = LintConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, LintError::Config { .. }), "got: {err:?}");
    }
}
