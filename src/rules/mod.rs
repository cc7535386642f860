pub mod errors;
pub mod ruleset;
pub mod selector;

pub use errors::ConfigError;
pub use ruleset::{validate_lengths, EditRule, RuleSet};
pub use selector::Selector;
