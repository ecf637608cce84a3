/// Interactive file manager console

use std::collections::VecDeque;

use filemanager::command::{
    parse_command_line, Answer, Category, DocumentAction, FileAction, ZipAction,
};
use filemanager::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

/// Command completer for the top-level prompt
struct CommandCompleter {
    commands: &'static [&'static str],
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: Category::WORDS,
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Line editor plus the settings managers are created with
struct Console {
    editor: Editor<CommandCompleter, DefaultHistory>,
    settings: Settings,
}

/// Outcome of reading one top-level line
enum Line {
    Input(String),
    Skip,
    Quit,
}

impl Console {
    fn new(settings: Settings) -> rustyline::Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CommandCompleter::new()));

        if let Some(history_path) = &settings.history_file {
            let _ = editor.load_history(history_path);
        }

        Ok(Self { editor, settings })
    }

    fn save_history(&mut self) {
        if let Some(history_path) = &self.settings.history_file {
            let _ = self.editor.save_history(history_path);
        }
    }

    fn read_line(&mut self) -> Line {
        match self.editor.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    return Line::Skip;
                }
                let _ = self.editor.add_history_entry(line.as_str());
                Line::Input(line)
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Line::Skip
            }
            Err(ReadlineError::Eof) => Line::Quit,
            Err(err) => {
                println!("Error: {:?}", err);
                Line::Quit
            }
        }
    }

    /// Take the next inline argument, or prompt for it
    ///
    /// Returns `None` if the prompt was cancelled with Ctrl-C or Ctrl-D.
    fn arg(&mut self, args: &mut VecDeque<String>, prompt: &str) -> Option<String> {
        if let Some(arg) = args.pop_front() {
            return Some(arg);
        }
        self.ask(prompt, Answer::Word)
    }

    /// Prompt for one line; `None` if cancelled
    fn ask(&mut self, prompt: &str, answer: Answer) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Some(answer.take(line)),
            Err(_) => {
                println!("Cancelled.");
                None
            }
        }
    }

    fn run(&mut self) {
        loop {
            let input = match self.read_line() {
                Line::Input(input) => input,
                Line::Skip => continue,
                Line::Quit => break,
            };

            let mut args: VecDeque<String> = parse_command_line(&input).into();
            let Some(word) = args.pop_front() else {
                continue;
            };

            let result = match Category::parse(&word) {
                Some(Category::Exit) => break,
                Some(Category::Help) => {
                    print_help();
                    Ok(())
                }
                Some(Category::System) => {
                    system_info();
                    Ok(())
                }
                Some(Category::File) => self.file_command(&mut args),
                Some(Category::Json) => self.json_command(&mut args),
                Some(Category::Xml) => self.xml_command(&mut args),
                Some(Category::Zip) => self.zip_command(&mut args),
                None => {
                    println!("Invalid operation: {}. Type 'help' for available commands.", word);
                    Ok(())
                }
            };

            if let Err(e) = result {
                println!("Error: {}", e);
            }
        }

        self.save_history();
        println!("Goodbye!");
    }

    fn file_command(&mut self, args: &mut VecDeque<String>) -> Result<()> {
        let prompt = format!("Choose an operation ({}): ", FileAction::CHOICES);
        let Some(word) = self.arg(args, &prompt) else {
            return Ok(());
        };
        let Some(action) = FileAction::parse(&word) else {
            println!("Invalid operation. Please try again.");
            return Ok(());
        };
        let Some(filename) = self.arg(args, "Enter the filename: ") else {
            return Ok(());
        };

        let manager = PlainFileManager::new(&filename);
        match action {
            FileAction::Create => {
                manager.create()?;
                println!("File '{}' created.", filename);
            }
            FileAction::Write => {
                let Some(content) = self.rest(args, "Enter the content to write: ") else {
                    return Ok(());
                };
                manager.write(&content)?;
                println!("Content written to '{}'.", filename);
            }
            FileAction::Read => {
                let content = manager.read()?;
                println!("Content of '{}':", filename);
                println!("{}", content);
            }
            FileAction::Delete => {
                manager.delete()?;
                println!("File '{}' deleted.", filename);
            }
        }
        Ok(())
    }

    fn json_command(&mut self, args: &mut VecDeque<String>) -> Result<()> {
        let Some((action, filename)) = self.document_target(args) else {
            return Ok(());
        };

        let manager = JsonFileManager::new(&filename);
        match action {
            DocumentAction::CreateAndWrite => {
                let Some(record) = self.record(args)? else {
                    return Ok(());
                };
                manager.create_and_write(&record)?;
                println!("JSON data written to '{}'.", filename);
            }
            DocumentAction::Read => {
                println!("Content of '{}':", filename);
                println!("{}", manager.read()?);
            }
            DocumentAction::Delete => {
                manager.delete()?;
                println!("JSON file '{}' deleted.", filename);
            }
        }
        Ok(())
    }

    fn xml_command(&mut self, args: &mut VecDeque<String>) -> Result<()> {
        let Some((action, filename)) = self.document_target(args) else {
            return Ok(());
        };

        let manager = XmlFileManager::new(&filename);
        match action {
            DocumentAction::CreateAndWrite => {
                let Some(record) = self.record(args)? else {
                    return Ok(());
                };
                manager.create_and_write(&record)?;
                println!("XML data written to '{}'.", filename);
            }
            DocumentAction::Read => {
                println!("Content of '{}':", filename);
                println!("{}", manager.read()?);
            }
            DocumentAction::Delete => {
                manager.delete()?;
                println!("XML file '{}' deleted.", filename);
            }
        }
        Ok(())
    }

    /// Prompt for a document action and filename
    fn document_target(
        &mut self,
        args: &mut VecDeque<String>,
    ) -> Option<(DocumentAction, String)> {
        let prompt = format!("Choose an operation ({}): ", DocumentAction::CHOICES);
        let phrase = self.arg(args, &prompt)?;
        let Some(action) = DocumentAction::parse(&phrase) else {
            println!("Invalid operation. Please try again.");
            return None;
        };
        self.arg(args, "Enter the filename: ")
            .map(|filename| (action, filename))
    }

    /// Take all remaining inline arguments joined by spaces, or prompt
    fn rest(&mut self, args: &mut VecDeque<String>, prompt: &str) -> Option<String> {
        if args.is_empty() {
            self.ask(prompt, Answer::Text)
        } else {
            Some(args.drain(..).collect::<Vec<_>>().join(" "))
        }
    }

    fn record(&mut self, args: &mut VecDeque<String>) -> Result<Option<Record>> {
        match self.rest(args, "Enter the record (JSON object or key=value pairs): ") {
            Some(text) => Record::parse(&text).map(Some),
            None => Ok(None),
        }
    }

    fn zip_command(&mut self, args: &mut VecDeque<String>) -> Result<()> {
        let prompt = format!("Choose an operation ({}): ", ZipAction::CHOICES);
        let Some(phrase) = self.arg(args, &prompt) else {
            return Ok(());
        };
        let Some(action) = ZipAction::parse(&phrase) else {
            println!("Invalid operation. Please try again.");
            return Ok(());
        };
        let Some(archive_name) = self.arg(args, "Enter the archive filename: ") else {
            return Ok(());
        };

        let manager = self.settings.archive_manager(&archive_name);
        match action {
            ZipAction::Create => {
                manager.create_archive()?;
                println!("Archive '{}' created.", archive_name);
            }
            ZipAction::AddFile => {
                let Some(source) = self.arg(args, "Enter the filename to add: ") else {
                    return Ok(());
                };
                let member = manager.add_file(&source)?;
                println!(
                    "Added '{}' ({} bytes) to '{}'.",
                    member.name, member.size, archive_name
                );
            }
            ZipAction::ExtractAndDisplay => {
                let members = manager.extract_and_list()?;
                println!(
                    "Extracted '{}' to '{}':",
                    archive_name,
                    manager.extract_dir().display()
                );
                if members.is_empty() {
                    println!("  (empty archive)");
                }
                for member in members {
                    println!("  {} ({} bytes)", member.name, member.size);
                }
            }
            ZipAction::Delete => {
                let Some(source) = self.arg(
                    args,
                    "Enter the filename to delete with the archive (empty for none): ",
                ) else {
                    return Ok(());
                };
                manager.delete_files_and_archive(&source)?;
                if source.is_empty() {
                    println!("Archive '{}' deleted.", archive_name);
                } else {
                    println!("Archive '{}' and file '{}' deleted.", archive_name, source);
                }
            }
        }
        Ok(())
    }
}

fn system_info() {
    println!("Logical Drive Information:");
    for volume in DiskInfoReporter::new().report() {
        println!("{}", volume);
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  system                         - Show capacity and usage of mounted volumes");
    println!("  file [action] [name] [text]    - Plain text file ({})", FileAction::CHOICES);
    println!("  json [action] [name] [record]  - JSON document ({})", DocumentAction::CHOICES);
    println!("  xml [action] [name] [record]   - Flat XML document ({})", DocumentAction::CHOICES);
    println!("  zip [action] [archive] [file]  - Zip archive ({})", ZipAction::CHOICES);
    println!("  help                           - Show this help");
    println!("  quit, exit                     - Exit");
    println!();
    println!("Missing arguments are prompted for. Quote multi-word actions and names,");
    println!("e.g. json \"create and write\" user.json username=root importance_level=777");
    println!("JSON object records must be typed at the record prompt, not inline.");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    println!("=== File Manager ===");
    println!("Manage text, JSON, XML and zip files, or inspect mounted volumes.");
    println!("Type 'help' for available commands\n");

    let mut console = match Console::new(Settings::default()) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("Failed to create editor: {}", e);
            std::process::exit(1);
        }
    };
    console.run();
}
