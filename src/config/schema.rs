use crate::rules::{ConfigError, EditRule, RuleSet};
use serde::Deserialize;
use thiserror::Error;

/// Contents of a TOML rules file.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    /// Exclusion pattern used when none is given on the command line.
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub find: Option<String>,
    pub replace: Option<String>,
    pub value: Option<String>,
    pub suffix: Option<String>,
}

impl RulesFile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.rules.is_empty() {
            issues.push(ValidationIssue::EmptyRuleList);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let fields = [
                ("find", &rule.find),
                ("replace", &rule.replace),
                ("value", &rule.value),
                ("suffix", &rule.suffix),
            ];
            for (field, value) in fields {
                if value.is_none() {
                    issues.push(ValidationIssue::MissingField { index, field });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Build the rule set. Call [`RulesFile::validate`] first; missing fields
    /// are treated as empty strings here.
    pub fn to_rule_set(&self) -> Result<RuleSet, ConfigError> {
        self.rules
            .iter()
            .map(|rule| {
                EditRule::new(
                    rule.find.as_deref().unwrap_or_default(),
                    rule.replace.clone().unwrap_or_default(),
                    rule.value.clone().unwrap_or_default(),
                    rule.suffix.clone().unwrap_or_default(),
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map(RuleSet::new)
    }
}

/// Every problem found in a rules file, one per line when displayed.
#[derive(Error, Debug, Clone)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("rules file contains no rules")]
    EmptyRuleList,

    #[error("rule #{} missing required field '{field}'", .index + 1)]
    MissingField { index: usize, field: &'static str },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
