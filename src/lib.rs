/*!
# filemanager

Create, read, write and delete plain text files, JSON documents, flat XML
documents and zip archives, and report usage of mounted volumes.

## Quick Start

```rust,no_run
use filemanager::{ArchiveManager, JsonFileManager, PlainFileManager, Record, ResourceManager};

// Plain text
let notes = PlainFileManager::new("demo.txt");
notes.write("Hello SSDLC!")?;
assert_eq!(notes.read()?, "Hello SSDLC!");

// JSON, keys keep their insertion order
let record = Record::new()
    .with("username", "root")
    .with("importance_level", 777);
let json = JsonFileManager::new("user.json");
json.create_and_write(&record)?;
println!("{}", json.read()?);

// Zip
let archive = ArchiveManager::new("demo.zip");
archive.create_archive()?;
archive.add_file("demo.txt")?;
for member in archive.extract_and_list()? {
    println!("{}: {} bytes", member.name, member.size);
}
archive.delete_files_and_archive("demo.txt")?;
json.delete()?;
# Ok::<(), filemanager::ManagerError>(())
```

## Modules

- `manager`: the file resource managers (plain, JSON, XML, zip)
- `record`: ordered key/value records used as JSON and XML payloads
- `disk`: mounted volume enumeration and usage
- `command`: console command words
- `config`: console defaults
- `error`: error types and Result alias
*/

#![warn(missing_docs)]

/// Console command words and line parsing
pub mod command;
/// Console defaults
pub mod config;
/// Mounted volume enumeration and usage reporting
pub mod disk;
/// Error types and Result alias
pub mod error;
/// File resource managers
pub mod manager;
/// Ordered key/value records
pub mod record;

// Re-export common types
pub use config::Settings;
pub use disk::{DiskInfoReporter, DiskUsage, Partition, SystemVolumes, Usage, Volume, VolumeSource};
pub use error::{ManagerError, Result};
pub use manager::{
    ArchiveManager, ArchiveMember, JsonFileManager, PlainFileManager, ResourceManager,
    XmlFileManager,
};
pub use record::{Record, Scalar};
