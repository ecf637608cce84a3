/// Flat XML document manager
///
/// Documents have a single root element named [`XML_ROOT`] with one child
/// element per record key. There are no attributes, nested elements or
/// namespaces.

use super::{read_text, write_text, ResourceManager};
use crate::error::{ManagerError, Result};
use crate::record::{Record, Scalar};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Name of the root element of every written document
pub const XML_ROOT: &str = "root";

/// Create, populate, read and delete a flat XML document
#[derive(Debug, Clone)]
pub struct XmlFileManager {
    path: PathBuf,
}

/// A parsed document: its re-serialized text and its first-level children
struct FlatDocument {
    serialized: String,
    children: Vec<(String, String)>,
    nested: bool,
}

impl XmlFileManager {
    /// Bind a manager to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write `record` as `<root>` with one child per key, replacing any existing content
    ///
    /// Every value is written as its string form. Keys must be valid
    /// unprefixed element names.
    pub fn create_and_write(&self, record: &Record) -> Result<()> {
        if let Some(key) = record.keys().find(|k| !is_element_name(k)) {
            return Err(ManagerError::invalid_record(format!(
                "'{}' is not a valid XML element name",
                key
            )));
        }

        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Start(BytesStart::new(XML_ROOT)))
            .map_err(|e| self.xml_error(e))?;
        for (key, value) in record.iter() {
            let text = value.to_string();
            writer
                .write_event(Event::Start(BytesStart::new(key)))
                .map_err(|e| self.xml_error(e))?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(|e| self.xml_error(e))?;
            writer
                .write_event(Event::End(BytesEnd::new(key)))
                .map_err(|e| self.xml_error(e))?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(XML_ROOT)))
            .map_err(|e| self.xml_error(e))?;

        let text = String::from_utf8(writer.into_inner()).map_err(|e| self.xml_error(e))?;
        write_text(&self.path, &text)
    }

    /// Parse the document and return its serialized form
    pub fn read(&self) -> Result<String> {
        Ok(self.load()?.serialized)
    }

    /// Parse the document back into a record of text values
    ///
    /// Fails if any child element has children of its own.
    pub fn read_record(&self) -> Result<Record> {
        let document = self.load()?;
        if document.nested {
            return Err(self.xml_error("nested elements are not supported"));
        }
        Ok(document
            .children
            .into_iter()
            .map(|(name, text)| (name, Scalar::Text(text)))
            .collect())
    }

    fn load(&self) -> Result<FlatDocument> {
        let text = read_text(&self.path)?;
        let mut reader = Reader::from_str(&text);
        let mut writer = Writer::new(Vec::new());

        let mut depth = 0usize;
        let mut roots = 0usize;
        let mut nested = false;
        let mut children = Vec::new();
        let mut current: Option<(String, String)> = None;

        loop {
            let event = reader.read_event().map_err(|e| self.xml_error(e))?;
            match &event {
                Event::Start(start) => {
                    match depth {
                        0 => roots += 1,
                        1 => current = Some((self.element_name(start)?, String::new())),
                        _ => nested = true,
                    }
                    depth += 1;
                }
                Event::Empty(start) => match depth {
                    0 => roots += 1,
                    1 => children.push((self.element_name(start)?, String::new())),
                    _ => nested = true,
                },
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.xml_error("unexpected closing tag"))?;
                    if depth == 1 {
                        if let Some(child) = current.take() {
                            children.push(child);
                        }
                    }
                }
                Event::Text(t) => {
                    let content = t.unescape().map_err(|e| self.xml_error(e))?;
                    if depth == 0 && !content.trim().is_empty() {
                        return Err(self.xml_error("text outside the root element"));
                    }
                    if depth == 2 {
                        if let Some((_, value)) = current.as_mut() {
                            value.push_str(&content);
                        }
                    }
                }
                Event::CData(data) => {
                    if depth == 2 {
                        if let Some((_, value)) = current.as_mut() {
                            value.push_str(&String::from_utf8_lossy(data));
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            if roots > 1 {
                return Err(self.xml_error("more than one root element"));
            }
            writer.write_event(event).map_err(|e| self.xml_error(e))?;
        }

        if depth != 0 {
            return Err(self.xml_error("unclosed element at end of document"));
        }
        if roots == 0 {
            return Err(self.xml_error("no root element"));
        }

        let serialized = String::from_utf8(writer.into_inner()).map_err(|e| self.xml_error(e))?;
        Ok(FlatDocument {
            serialized,
            children,
            nested,
        })
    }

    fn element_name(&self, start: &BytesStart<'_>) -> Result<String> {
        std::str::from_utf8(start.name().as_ref())
            .map(str::to_string)
            .map_err(|e| self.xml_error(e))
    }

    fn xml_error<E: Display>(&self, error: E) -> ManagerError {
        ManagerError::parse(&self.path, "XML", error.to_string())
    }
}

impl ResourceManager for XmlFileManager {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Is `name` usable as an unprefixed element name?
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
