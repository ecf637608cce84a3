/// Console command words and line parsing

use std::fmt;

/// Top-level selector of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Volume report
    System,
    /// Plain text files
    File,
    /// JSON documents
    Json,
    /// Flat XML documents
    Xml,
    /// Zip archives
    Zip,
    /// Command overview
    Help,
    /// Leave the console
    Exit,
}

impl Category {
    /// Words accepted at the top-level prompt
    pub const WORDS: &'static [&'static str] =
        &["system", "file", "json", "xml", "zip", "help", "exit", "quit"];

    /// Parse a top-level word (case-insensitive)
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "system" => Some(Category::System),
            "file" => Some(Category::File),
            "json" => Some(Category::Json),
            "xml" => Some(Category::Xml),
            "zip" => Some(Category::Zip),
            "help" => Some(Category::Help),
            "exit" | "quit" => Some(Category::Exit),
            _ => None,
        }
    }
}

/// Operations on a plain text file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Create an empty file
    Create,
    /// Replace the content
    Write,
    /// Print the content
    Read,
    /// Remove the file
    Delete,
}

impl FileAction {
    /// Choices shown at the prompt
    pub const CHOICES: &'static str = "create, write, read, delete";

    /// Parse an action word
    pub fn parse(word: &str) -> Option<Self> {
        match normalize(word).as_str() {
            "create" => Some(FileAction::Create),
            "write" => Some(FileAction::Write),
            "read" => Some(FileAction::Read),
            "delete" => Some(FileAction::Delete),
            _ => None,
        }
    }
}

/// Operations on a JSON or XML document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    /// Create the document from a record
    CreateAndWrite,
    /// Print the document
    Read,
    /// Remove the document
    Delete,
}

impl DocumentAction {
    /// Choices shown at the prompt
    pub const CHOICES: &'static str = "create and write, read, delete";

    /// Parse an action phrase; `create` and `write` both mean create and write
    pub fn parse(phrase: &str) -> Option<Self> {
        match normalize(phrase).as_str() {
            "create and write" | "create" | "write" => Some(DocumentAction::CreateAndWrite),
            "read" => Some(DocumentAction::Read),
            "delete" => Some(DocumentAction::Delete),
            _ => None,
        }
    }
}

/// Operations on a zip archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipAction {
    /// Create an empty archive
    Create,
    /// Append a file
    AddFile,
    /// Extract and list members
    ExtractAndDisplay,
    /// Remove the archive and optionally a member's source file
    Delete,
}

impl ZipAction {
    /// Choices shown at the prompt
    pub const CHOICES: &'static str = "create, add file, extract and display, delete";

    /// Parse an action phrase; the first word alone is also accepted
    pub fn parse(phrase: &str) -> Option<Self> {
        match normalize(phrase).as_str() {
            "create" => Some(ZipAction::Create),
            "add file" | "add" => Some(ZipAction::AddFile),
            "extract and display" | "extract" => Some(ZipAction::ExtractAndDisplay),
            "delete" => Some(ZipAction::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::System => "system",
            Category::File => "file",
            Category::Json => "json",
            Category::Xml => "xml",
            Category::Zip => "zip",
            Category::Help => "help",
            Category::Exit => "exit",
        };
        write!(f, "{}", name)
    }
}

/// Lowercase and collapse runs of whitespace
fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How an answer typed at a follow-up prompt is cleaned up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Action phrases and filenames: surrounding whitespace is dropped
    Word,
    /// File content and records: kept exactly as typed
    Text,
}

impl Answer {
    /// Apply this answer kind to a line read from the prompt
    pub fn take(self, line: String) -> String {
        match self {
            Answer::Word => line.trim().to_string(),
            Answer::Text => line,
        }
    }
}

/// Parse command line input, respecting quoted strings
pub fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}
