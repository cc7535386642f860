use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("invalid attribute at byte {position}: {message}")]
    InvalidAttribute { position: usize, message: String },

    #[error("unclosed element <{name}> at end of document")]
    UnclosedElement { name: String },

    #[error("content is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("document has no root element")]
    MissingRoot,

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] quick_xml::Error),
}
