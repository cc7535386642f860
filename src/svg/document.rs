use crate::rules::{EditRule, Selector};
use crate::svg::encoding::decode_source;
use crate::svg::errors::SvgError;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::{Reader, Writer};

const PATH_ELEMENT: &[u8] = b"path";

/// Handle to a `<path>` element inside one [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(usize);

#[derive(Debug, Clone)]
enum Node {
    Markup(Event<'static>),
    Path(PathId),
}

#[derive(Debug, Clone)]
struct PathElement {
    start: BytesStart<'static>,
    self_closing: bool,
    attributes: Vec<(String, String)>,
    dirty: bool,
}

impl PathElement {
    fn decode(
        start: BytesStart<'_>,
        self_closing: bool,
        reader: &Reader<&[u8]>,
        position: usize,
    ) -> Result<Self, SvgError> {
        Ok(Self {
            attributes: decode_attributes(&start, reader, position)?,
            start: start.into_owned(),
            self_closing,
            dirty: false,
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn render(&self) -> Event<'static> {
        if !self.dirty {
            return if self.self_closing {
                Event::Empty(self.start.clone())
            } else {
                Event::Start(self.start.clone())
            };
        }

        let name = String::from_utf8_lossy(self.start.name().as_ref()).into_owned();
        let mut start = BytesStart::new(name);
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.self_closing {
            Event::Empty(start)
        } else {
            Event::Start(start)
        }
    }
}

/// Parsed SVG document.
///
/// Everything except `<path>` start tags is kept as the reader produced it and
/// written back unchanged. Path elements carry their decoded attributes so they
/// can be queried and rewritten; an untouched path element is also written back
/// byte for byte.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    paths: Vec<PathElement>,
}

impl SvgDocument {
    /// Parse raw file contents in whatever charset they declare.
    ///
    /// A document read from another charset has its XML declaration rewritten
    /// to UTF-8, which is what [`serialize`](Self::serialize) produces.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SvgError> {
        let source = decode_source(bytes)?;
        let mut document = Self::parse(&source.text)?;
        if !source.is_utf8() {
            document.declare_utf8()?;
        }
        Ok(document)
    }

    pub fn parse(content: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(content);
        let mut nodes = Vec::new();
        let mut paths = Vec::new();
        let mut open: Vec<String> = Vec::new();
        let mut saw_root = false;

        loop {
            let position = reader.buffer_position();
            let event = reader.read_event().map_err(|err| SvgError::Syntax {
                position: reader.buffer_position(),
                message: err.to_string(),
            })?;

            match event {
                Event::Eof => break,
                Event::Start(start) => {
                    saw_root = true;
                    open.push(element_name(&start));
                    if is_path(&start) {
                        nodes.push(Node::Path(PathId(paths.len())));
                        paths.push(PathElement::decode(start, false, &reader, position)?);
                    } else {
                        nodes.push(Node::Markup(Event::Start(start.into_owned())));
                    }
                }
                Event::Empty(start) => {
                    saw_root = true;
                    if is_path(&start) {
                        nodes.push(Node::Path(PathId(paths.len())));
                        paths.push(PathElement::decode(start, true, &reader, position)?);
                    } else {
                        nodes.push(Node::Markup(Event::Empty(start.into_owned())));
                    }
                }
                Event::End(end) => {
                    open.pop();
                    nodes.push(Node::Markup(Event::End(end.into_owned())));
                }
                other => nodes.push(Node::Markup(other.into_owned())),
            }
        }

        if let Some(name) = open.pop() {
            return Err(SvgError::UnclosedElement { name });
        }
        if !saw_root {
            return Err(SvgError::MissingRoot);
        }

        Ok(Self { nodes, paths })
    }

    /// All `<path>` elements (any namespace prefix) matching `selector`, in
    /// document order.
    pub fn select_paths(&self, selector: &Selector) -> Vec<PathId> {
        self.paths
            .iter()
            .enumerate()
            .filter(|(_, path)| path.attribute(selector.attribute()) == Some(selector.value()))
            .map(|(idx, _)| PathId(idx))
            .collect()
    }

    /// Overwrite `name` on the element, appending it when absent.
    pub fn set_attribute(&mut self, id: PathId, name: &str, value: &str) {
        let Some(path) = self.paths.get_mut(id.0) else {
            return;
        };

        match path.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => {
                if existing != value {
                    *existing = value.to_string();
                    path.dirty = true;
                }
            }
            None => {
                path.attributes.push((name.to_string(), value.to_string()));
                path.dirty = true;
            }
        }
    }

    /// Apply one rule against the current state of the document.
    ///
    /// Returns how many elements the selector matched; a rule fires when this
    /// is non-zero even if the value written was already present.
    pub fn apply_rule(&mut self, rule: &EditRule) -> usize {
        let matches = self.select_paths(&rule.selector);
        for id in &matches {
            self.set_attribute(*id, &rule.target_attribute, &rule.new_value);
        }
        matches.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn declare_utf8(&mut self) -> Result<(), SvgError> {
        for node in &mut self.nodes {
            if let Node::Markup(Event::Decl(decl)) = node {
                *decl = utf8_declaration(decl)?;
                break;
            }
        }
        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SvgError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            match node {
                Node::Markup(event) => writer.write_event(event)?,
                Node::Path(id) => writer.write_event(self.paths[id.0].render())?,
            }
        }
        Ok(writer.into_inner())
    }
}

fn utf8_declaration(decl: &BytesDecl<'_>) -> Result<BytesDecl<'static>, SvgError> {
    let invalid = |err: quick_xml::Error| SvgError::Syntax {
        position: 0,
        message: err.to_string(),
    };

    let version = decl.version().map_err(invalid)?;
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(invalid)?
        .map(|value| lossy(&value));

    Ok(BytesDecl::new(
        &lossy(&version),
        Some("UTF-8"),
        standalone.as_deref(),
    ))
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn element_name(start: &BytesStart<'_>) -> String {
    lossy(start.name().as_ref())
}

fn is_path(start: &BytesStart<'_>) -> bool {
    start.local_name().as_ref() == PATH_ELEMENT
}

fn decode_attributes(
    start: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    position: usize,
) -> Result<Vec<(String, String)>, SvgError> {
    let invalid = |message: String| SvgError::InvalidAttribute { position, message };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| invalid(err.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| invalid(err.to_string()))?
            .to_string();
        let value = attr
            .decode_and_unescape_value(reader)
            .map_err(|err| invalid(err.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}
