use crate::rules::errors::ConfigError;
use crate::rules::selector::{validate_attribute_name, Selector};

/// One find/replace transformation plus the filename token that marks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRule {
    pub selector: Selector,
    pub target_attribute: String,
    pub new_value: String,
    pub suffix_token: String,
}

impl EditRule {
    pub fn new(
        selector: &str,
        target_attribute: impl Into<String>,
        new_value: impl Into<String>,
        suffix_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let target_attribute = target_attribute.into();
        validate_attribute_name(&target_attribute)?;
        Ok(Self {
            selector: Selector::parse(selector)?,
            target_attribute,
            new_value: new_value.into(),
            suffix_token: suffix_token.into(),
        })
    }
}

/// Ordered rules. Order decides suffix concatenation and which rule wins when
/// two rules write the same attribute of the same element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<EditRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<EditRule>) -> Self {
        Self { rules }
    }

    /// Zip the four parallel argument lists into rules.
    ///
    /// Fails without touching anything else when the lists differ in length,
    /// or when a selector or attribute name is malformed.
    pub fn from_parallel<S: AsRef<str>>(
        finds: &[S],
        replaces: &[S],
        values: &[S],
        suffixes: &[S],
    ) -> Result<Self, ConfigError> {
        validate_lengths(finds.len(), replaces.len(), values.len(), suffixes.len())?;

        let rules = finds
            .iter()
            .zip(replaces)
            .zip(values)
            .zip(suffixes)
            .map(|(((find, replace), value), suffix)| {
                EditRule::new(
                    find.as_ref(),
                    replace.as_ref(),
                    value.as_ref(),
                    suffix.as_ref(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn rules(&self) -> &[EditRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditRule> {
        self.rules.iter()
    }

    /// `_tok` for every fired rule, in rule order.
    pub fn suffix_for(&self, fired: &[bool]) -> String {
        self.rules
            .iter()
            .zip(fired)
            .filter(|(_, fired)| **fired)
            .map(|(rule, _)| format!("_{}", rule.suffix_token))
            .collect()
    }
}

pub fn validate_lengths(
    finds: usize,
    replaces: usize,
    values: usize,
    suffixes: usize,
) -> Result<(), ConfigError> {
    if finds != replaces || finds != values || finds != suffixes {
        return Err(ConfigError::RuleCountMismatch {
            finds,
            replaces,
            values,
            suffixes,
        });
    }
    Ok(())
}
