//! Source charset handling.
//!
//! Documents are edited as UTF-8. The source charset is taken from a byte
//! order mark first, then from the `encoding` of the XML declaration, and
//! defaults to UTF-8.

use crate::svg::errors::SvgError;
use encoding_rs::{Encoding, UTF_8};
use quick_xml::encoding::detect_encoding;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;

/// Source text decoded to UTF-8.
#[derive(Debug)]
pub struct DecodedSource<'a> {
    pub text: Cow<'a, str>,
    /// Charset the bytes were read as.
    pub encoding: &'static Encoding,
}

impl DecodedSource<'_> {
    pub fn is_utf8(&self) -> bool {
        self.encoding == UTF_8
    }
}

pub fn decode_source(bytes: &[u8]) -> Result<DecodedSource<'_>, SvgError> {
    let (encoding, bom_len) = match detect_encoding(bytes) {
        Some((encoding, bom_len)) if bom_len > 0 || encoding != UTF_8 => (encoding, bom_len),
        _ => (declared_encoding(bytes).unwrap_or(UTF_8), 0),
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or(SvgError::Decode {
            encoding: encoding.name(),
        })?;

    Ok(DecodedSource { text, encoding })
}

/// Charset named by the XML declaration, if the document starts with one.
///
/// A 16-bit label on ASCII-compatible bytes is read as UTF-8.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let mut reader = Reader::from_reader(bytes);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => decl.encoder().map(Encoding::output_encoding),
        _ => None,
    }
}
