pub mod loader;
pub mod schema;

pub use loader::{load_from_path, load_from_str, RulesFileError};
pub use schema::{RuleDefinition, RulesFile, ValidationError, ValidationIssue};
