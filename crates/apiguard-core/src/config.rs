//! Rule severity configuration.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::rules::Rule;

/// Disposition of a rule's findings.
///
/// Serialized lowercase; deserialized with [`Severity::parse`], so
/// configuration files accept any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    /// Rule is not evaluated.
    #[default]
    Off,
}

impl Severity {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Off => "off",
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Severity::parse(&raw)
            .ok_or_else(|| de::Error::unknown_variant(&raw, &["error", "warning", "off"]))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity of each operation rule.
///
/// Missing keys deserialize to `off`; unknown keys are ignored. Severity
/// values other than `error`, `warning`, `off` fail deserialization, so the
/// engine never sees an invalid one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub no_consumes_for_put_or_post: Severity,
    #[serde(default)]
    pub get_op_has_consumes: Severity,
    #[serde(default)]
    pub no_produces: Severity,
    #[serde(default)]
    pub no_operation_id: Severity,
    #[serde(default)]
    pub no_summary: Severity,
    #[serde(default)]
    pub no_array_responses: Severity,
    #[serde(default)]
    pub parameter_order: Severity,
}

impl RuleConfig {
    /// Every rule off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock severities used when no configuration is supplied.
    pub fn recommended() -> Self {
        Self {
            no_consumes_for_put_or_post: Severity::Error,
            get_op_has_consumes: Severity::Warning,
            no_produces: Severity::Error,
            no_operation_id: Severity::Warning,
            no_summary: Severity::Warning,
            no_array_responses: Severity::Error,
            parameter_order: Severity::Warning,
        }
    }

    /// Same severity for every rule.
    pub fn uniform(severity: Severity) -> Self {
        let mut config = Self::default();
        for rule in Rule::ALL {
            config.set(rule, severity);
        }
        config
    }

    pub fn severity(&self, rule: Rule) -> Severity {
        match rule {
            Rule::ConsumesRequired => self.no_consumes_for_put_or_post,
            Rule::ConsumesForbidden => self.get_op_has_consumes,
            Rule::ProducesRequired => self.no_produces,
            Rule::OperationIdRequired => self.no_operation_id,
            Rule::SummaryRequired => self.no_summary,
            Rule::NoArrayResponses => self.no_array_responses,
            Rule::ParameterOrder => self.parameter_order,
        }
    }

    pub fn set(&mut self, rule: Rule, severity: Severity) {
        let slot = match rule {
            Rule::ConsumesRequired => &mut self.no_consumes_for_put_or_post,
            Rule::ConsumesForbidden => &mut self.get_op_has_consumes,
            Rule::ProducesRequired => &mut self.no_produces,
            Rule::OperationIdRequired => &mut self.no_operation_id,
            Rule::SummaryRequired => &mut self.no_summary,
            Rule::NoArrayResponses => &mut self.no_array_responses,
            Rule::ParameterOrder => &mut self.parameter_order,
        };
        *slot = severity;
    }

    /// Builder-style variant of [`RuleConfig::set`].
    pub fn with(mut self, rule: Rule, severity: Severity) -> Self {
        self.set(rule, severity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parse() {
        assert_eq!(Severity::parse("error"), Some(Severity::Error));
        assert_eq!(Severity::parse("WARNING"), Some(Severity::Warning));
        assert_eq!(Severity::parse(" off "), Some(Severity::Off));
        assert_eq!(Severity::parse("info"), None);
    }

    #[test]
    fn missing_keys_default_to_off_and_unknown_keys_are_ignored() {
        let config: RuleConfig = serde_yaml::from_str(
            r#"
no_summary: error
no_such_rule: warning
"#,
        )
        .unwrap();
        assert_eq!(config.no_summary, Severity::Error);
        assert_eq!(config.parameter_order, Severity::Off);
        assert_eq!(config.severity(Rule::ConsumesRequired), Severity::Off);
    }

    #[test]
    fn invalid_severity_is_rejected() {
        let result: Result<RuleConfig, _> = serde_yaml::from_str("no_summary: fatal");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("fatal"), "{err}");

        let result: Result<RuleConfig, _> = serde_yaml::from_str("no_summary: 3");
        assert!(result.is_err());
    }

    #[test]
    fn severity_names_are_case_insensitive() {
        let config: RuleConfig = serde_yaml::from_str(
            r#"
no_summary: Error
parameter_order: WARNING
no_produces: " off "
"#,
        )
        .unwrap();
        assert_eq!(config.no_summary, Severity::Error);
        assert_eq!(config.parameter_order, Severity::Warning);
        assert_eq!(config.no_produces, Severity::Off);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let config = RuleConfig::new().with(Rule::SummaryRequired, Severity::Error);
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("no_summary: error"), "{yaml}");
    }

    #[test]
    fn set_and_severity_agree_for_every_rule() {
        for rule in Rule::ALL {
            let config = RuleConfig::new().with(rule, Severity::Warning);
            assert_eq!(config.severity(rule), Severity::Warning);
            for other in Rule::ALL.into_iter().filter(|r| *r != rule) {
                assert_eq!(config.severity(other), Severity::Off);
            }
        }
    }

    #[test]
    fn recommended_enables_every_rule() {
        let config = RuleConfig::recommended();
        assert!(Rule::ALL
            .iter()
            .all(|rule| config.severity(*rule) != Severity::Off));
    }

    #[test]
    fn uniform_sets_every_rule() {
        let config = RuleConfig::uniform(Severity::Error);
        assert!(Rule::ALL
            .iter()
            .all(|rule| config.severity(*rule) == Severity::Error));
    }
}
