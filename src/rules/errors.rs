use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "the number of find, replace, value, and suffix arguments must be the same \
         (find: {finds}, replace: {replaces}, value: {values}, suffix: {suffixes})"
    )]
    RuleCountMismatch {
        finds: usize,
        replaces: usize,
        values: usize,
        suffixes: usize,
    },

    #[error("at least one find/replace/value/suffix rule is required")]
    EmptyRuleSet,

    #[error("invalid selector '{input}': {message}")]
    InvalidSelector { input: String, message: String },

    #[error("invalid attribute name '{name}'")]
    InvalidAttributeName { name: String },

    #[error("failed to compile exclusion pattern {pattern}: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
