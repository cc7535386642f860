pub mod document;
pub mod encoding;
pub mod errors;

pub use document::{PathId, SvgDocument};
pub use errors::SvgError;

/// The only file extension the editor reads or writes.
pub const SVG_EXTENSION: &str = ".svg";
