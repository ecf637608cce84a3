/// JSON document manager

use super::{read_text, write_text, ResourceManager};
use crate::error::{ManagerError, Result};
use crate::record::Record;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::path::{Path, PathBuf};

/// Indentation used for every JSON document written or printed
const INDENT: &[u8] = b"    ";

/// Create, populate, read and delete a JSON document
#[derive(Debug, Clone)]
pub struct JsonFileManager {
    path: PathBuf,
}

impl JsonFileManager {
    /// Bind a manager to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Serialize `record` with 4-space indentation, replacing any existing content
    pub fn create_and_write(&self, record: &Record) -> Result<()> {
        let value = record.to_json()?;
        let text = self.to_pretty(&value)?;
        write_text(&self.path, &text)
    }

    /// Parse the document and return it pretty-printed
    pub fn read(&self) -> Result<String> {
        let value = self.read_value()?;
        self.to_pretty(&value)
    }

    /// Parse the document back into a flat record
    pub fn read_record(&self) -> Result<Record> {
        let value = self.read_value()?;
        Record::from_json(&value)
    }

    fn read_value(&self) -> Result<Value> {
        let text = read_text(&self.path)?;
        serde_json::from_str(&text).map_err(|e| ManagerError::parse(&self.path, "JSON", e.to_string()))
    }

    fn to_pretty(&self, value: &Value) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        value
            .serialize(&mut serializer)
            .map_err(|e| ManagerError::parse(&self.path, "JSON", e.to_string()))?;
        String::from_utf8(buf).map_err(|e| ManagerError::parse(&self.path, "JSON", e.to_string()))
    }
}

impl ResourceManager for JsonFileManager {
    fn path(&self) -> &Path {
        &self.path
    }
}
