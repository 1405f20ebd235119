//! Lint configuration file (`.apiguard.yaml`) loader.
//!
//! ```yaml
//! operations:
//!   no_summary: warning
//!   parameter_order: off
//! ```
//!
//! Keys missing from the `operations` section are off. When no file is found
//! the recommended severities apply.

use std::path::{Path, PathBuf};

use apiguard_core::{Rule, RuleConfig, Severity};
use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".apiguard.yaml";

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Severities of the operation rules.
    #[serde(default)]
    pub operations: RuleConfig,
}

impl LintConfig {
    /// Load a configuration from a YAML/JSON file.
    pub fn load(path: &Path) -> Result<Self, LintError> {
        let content = std::fs::read_to_string(path).map_err(|e| LintError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Parse a configuration from YAML content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, LintError> {
        // An empty file deserializes as null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| LintError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Otherwise `.apiguard.yaml` in `dir` is used
    /// if present, falling back to the recommended severities.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self, LintError> {
        if let Some(path) = explicit {
            tracing::debug!(config = %path.display(), "loading configuration");
            return Self::load(path);
        }
        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(config = %candidate.display(), "loading configuration");
            return Self::load(&candidate);
        }
        Ok(Self {
            operations: RuleConfig::recommended(),
        })
    }

    /// Apply `key=severity` overrides on top of the loaded configuration.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<(), LintError> {
        for raw in overrides {
            let (rule, severity) = parse_override(raw.as_ref())?;
            self.operations.set(rule, severity);
        }
        Ok(())
    }
}

/// Parse a single `key=severity` override.
pub fn parse_override(raw: &str) -> Result<(Rule, Severity), LintError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| LintError::RuleOverride(raw.to_string(), "expected key=severity".into()))?;
    let rule = Rule::from_key(key.trim()).ok_or_else(|| {
        LintError::RuleOverride(raw.to_string(), format!("unknown rule '{}'", key.trim()))
    })?;
    let severity = Severity::parse(value).ok_or_else(|| {
        LintError::RuleOverride(
            raw.to_string(),
            format!("severity must be error, warning or off, got '{}'", value.trim()),
        )
    })?;
    Ok((rule, severity))
}
