/// Integration tests for filemanager

use filemanager::*;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_plain_file_lifecycle() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manager = PlainFileManager::new(dir.path().join("demo.txt"));

    manager.create().expect("Failed to create file");
    manager.write("Hello SSDLC!").expect("Failed to write file");
    assert_eq!(manager.read().expect("Failed to read file"), "Hello SSDLC!");

    manager.delete().expect("Failed to delete file");
    let result = manager.read();
    assert!(matches!(result, Err(ManagerError::NotFound { .. })));
}

#[test]
fn test_json_record_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manager = JsonFileManager::new(dir.path().join("user.json"));

    let record = Record::parse(r#"{"username":"root","importance_level":777}"#)
        .expect("Failed to parse record");
    manager.create_and_write(&record).expect("Failed to write JSON");

    let text = manager.read().expect("Failed to read JSON");
    let username = text.find("\"username\": \"root\"").expect("username missing");
    let level = text
        .find("\"importance_level\": 777")
        .expect("importance_level missing");
    assert!(username < level);

    assert_eq!(manager.read_record().expect("Failed to read record"), record);
}

#[test]
fn test_xml_one_child_per_key() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manager = XmlFileManager::new(dir.path().join("user.xml"));

    let record = Record::new()
        .with("username", "root")
        .with("importance_level", 777)
        .with("ratio", 0.5);
    manager.create_and_write(&record).expect("Failed to write XML");

    let text = manager.read().expect("Failed to read XML");
    assert_eq!(
        text,
        "<root><username>root</username><importance_level>777</importance_level><ratio>0.5</ratio></root>"
    );

    let back = manager.read_record().expect("Failed to read record");
    assert_eq!(back.len(), 3);
    for (key, value) in record.iter() {
        assert_eq!(back.get(key).map(|v| v.to_string()), Some(value.to_string()));
    }
}

#[test]
fn test_archive_scenario() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let source = dir.path().join("demo.txt");
    fs::write(&source, "Hello SSDLC!").expect("Failed to write source");

    let manager = ArchiveManager::new(dir.path().join("demo.zip"))
        .relative_to(dir.path())
        .extract_to(dir.path().join("extracted"));

    manager.create_archive().expect("Failed to create archive");
    manager.add_file(&source).expect("Failed to add file");

    let members = manager.extract_and_list().expect("Failed to extract");
    assert_eq!(
        members,
        vec![ArchiveMember {
            name: "demo.txt".to_string(),
            size: 12
        }]
    );
    let extracted = dir.path().join("extracted").join("demo.txt");
    assert_eq!(fs::read_to_string(extracted).expect("Missing extracted file"), "Hello SSDLC!");

    manager
        .delete_files_and_archive(&source)
        .expect("Failed to delete archive and file");
    assert!(!manager.exists());
    assert!(!source.exists());

    let result = manager.delete_files_and_archive(&source);
    assert!(matches!(result, Err(ManagerError::NotFound { .. })));
}

#[test]
fn test_archive_append_is_additive() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let source = dir.path().join("demo.txt");
    fs::write(&source, "Hello SSDLC!").expect("Failed to write source");

    let manager = ArchiveManager::new(dir.path().join("demo.zip")).relative_to(dir.path());
    manager.create_archive().expect("Failed to create archive");
    for _ in 0..3 {
        manager.add_file(&source).expect("Failed to add file");
    }

    let members = manager.list().expect("Failed to list archive");
    assert_eq!(members.len(), 3);
    assert!(members.iter().all(|m| m.name == "demo.txt" && m.size == 12));
}

#[test]
fn test_delete_missing_is_not_found() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let managers: Vec<Box<dyn ResourceManager>> = vec![
        Box::new(PlainFileManager::new(dir.path().join("a.txt"))),
        Box::new(JsonFileManager::new(dir.path().join("a.json"))),
        Box::new(XmlFileManager::new(dir.path().join("a.xml"))),
        Box::new(ArchiveManager::new(dir.path().join("a.zip"))),
    ];

    for manager in &managers {
        let result = manager.delete();
        assert!(
            result.as_ref().is_err_and(|e| e.is_not_found()),
            "{} should be NotFound",
            manager.path().display()
        );
    }

    let remaining = fs::read_dir(dir.path()).expect("Failed to list dir").count();
    assert_eq!(remaining, 0);
}

#[test]
fn test_managers_on_same_path_last_writer_wins() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("shared.txt");
    let first = PlainFileManager::new(&path);
    let second = PlainFileManager::new(&path);

    first.write("first").expect("Failed to write");
    second.write("second").expect("Failed to write");
    assert_eq!(first.read().expect("Failed to read"), "second");
}

#[test]
fn test_system_volume_report() {
    let reporter = DiskInfoReporter::new();
    for volume in reporter.report() {
        let text = volume.to_string();
        assert!(text.contains("Drive:"));
        assert!(text.contains("File system type:"));
        match volume.usage {
            Usage::Known(usage) => assert!(usage.free <= usage.total),
            Usage::AccessDenied => assert!(text.contains("Access Denied.")),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_plain_write_read_identity(content in "(?s).{0,200}") {
        let dir = TempDir::new().unwrap();
        let manager = PlainFileManager::new(dir.path().join("prop.txt"));
        manager.write(&content).unwrap();
        prop_assert_eq!(manager.read().unwrap(), content);
    }

    #[test]
    fn prop_json_preserves_pairs(
        entries in prop::collection::vec(("[a-z_][a-z0-9_]{0,8}", "\\PC{0,20}"), 0..8)
    ) {
        let record: Record = entries.into_iter().collect();
        let dir = TempDir::new().unwrap();
        let manager = JsonFileManager::new(dir.path().join("prop.json"));
        manager.create_and_write(&record).unwrap();
        prop_assert_eq!(manager.read_record().unwrap(), record);
    }

    #[test]
    fn prop_xml_child_per_key(
        entries in prop::collection::vec(("[a-z_][a-z0-9_]{0,8}", "[a-zA-Z0-9 <>&'\"._-]{0,20}"), 0..8)
    ) {
        let record: Record = entries.into_iter().collect();
        let dir = TempDir::new().unwrap();
        let manager = XmlFileManager::new(dir.path().join("prop.xml"));
        manager.create_and_write(&record).unwrap();

        let back = manager.read_record().unwrap();
        prop_assert_eq!(back.keys().collect::<Vec<_>>(), record.keys().collect::<Vec<_>>());
        for (key, value) in record.iter() {
            prop_assert_eq!(back.get(key).map(|v| v.to_string()), Some(value.to_string()));
        }
    }
}
