use crate::rules::errors::ConfigError;
use std::fmt;

/// Attribute-equality predicate: an element matches when it carries
/// `attribute` with exactly `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    attribute: String,
    value: String,
}

impl Selector {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Result<Self, ConfigError> {
        let attribute = attribute.into();
        validate_attribute_name(&attribute)?;
        Ok(Self {
            attribute,
            value: value.into(),
        })
    }

    /// Parse `name='value'` or `name="value"`. A leading `@` is tolerated.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidSelector {
            input: input.to_string(),
            message: message.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);

        let (name, rest) = trimmed
            .split_once('=')
            .ok_or_else(|| invalid("expected attribute='value'"))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("missing attribute name"));
        }
        if !is_valid_attribute_name(name) {
            return Err(invalid("attribute name contains illegal characters"));
        }

        let rest = rest.trim();
        let mut chars = rest.chars();
        let quote = match chars.next() {
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return Err(invalid("value must be quoted")),
            None => return Err(invalid("missing value")),
        };

        let body = &rest[quote.len_utf8()..];
        let end = body
            .find(quote)
            .ok_or_else(|| invalid("unterminated quoted value"))?;
        if !body[end + quote.len_utf8()..].trim().is_empty() {
            return Err(invalid("unexpected text after quoted value"));
        }

        Ok(Self {
            attribute: name.to_string(),
            value: body[..end].to_string(),
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, attribute: &str, value: &str) -> bool {
        self.attribute == attribute && self.value == value
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.contains('\'') {
            write!(f, "{}=\"{}\"", self.attribute, self.value)
        } else {
            write!(f, "{}='{}'", self.attribute, self.value)
        }
    }
}

pub(crate) fn validate_attribute_name(name: &str) -> Result<(), ConfigError> {
    if is_valid_attribute_name(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidAttributeName {
            name: name.to_string(),
        })
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '=' | '\'' | '"' | '<' | '>' | '/' | '@'))
}
