mod common;

use std::fs;

use common::init_logging;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wikicorpus_core::{Batch, PageRecord};
use wikicorpus_engine::{load_corpus, BatchWriter, PersistError};

fn batch(index: usize, titles: &[&str]) -> Batch {
    Batch {
        index,
        records: titles
            .iter()
            .map(|t| PageRecord {
                url: format!("https://w.example.org/{t}"),
                title: t.to_string(),
                content: format!("{t} body"),
            })
            .collect(),
    }
}

#[test]
fn loads_batches_in_numeric_order() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let writer = BatchWriter::new(temp.path().to_path_buf());
    writer.write(&batch(10, &["J"])).unwrap();
    writer.write(&batch(2, &["C", "D"])).unwrap();
    writer.write(&batch(1, &["A", "B"])).unwrap();

    let load = load_corpus(temp.path()).unwrap();
    let titles: Vec<&str> = load.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "D", "J"]);
    assert_eq!(load.batch_files.len(), 3);
    assert!(load.skipped.is_empty());
}

#[test]
fn unreadable_batch_is_skipped_with_report() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let writer = BatchWriter::new(temp.path().to_path_buf());
    writer.write(&batch(1, &["A"])).unwrap();
    fs::write(temp.path().join("batch_2.json"), "[{\"url\": \"truncated").unwrap();
    fs::write(temp.path().join("batch_3.json"), r#"{"url": "x"}"#).unwrap();
    writer.write(&batch(4, &["D"])).unwrap();

    let load = load_corpus(temp.path()).unwrap();
    assert_eq!(load.records.len(), 2);
    assert_eq!(
        load.skipped.iter().map(|s| s.path.clone()).collect::<Vec<_>>(),
        vec![temp.path().join("batch_2.json"), temp.path().join("batch_3.json")]
    );
    assert!(!load.found_nothing());
}

#[test]
fn other_files_are_ignored() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("urls.txt"), "https://w.example.org/A\n").unwrap();
    fs::write(temp.path().join("notes.json"), "[]").unwrap();
    fs::create_dir(temp.path().join("batch_9.json")).unwrap();

    let load = load_corpus(temp.path()).unwrap();
    assert!(load.found_nothing());
    assert!(load.records.is_empty());
}

#[test]
fn missing_directory_is_reported() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("scraped_data");
    assert!(matches!(load_corpus(&missing), Err(PersistError::NotFound(p)) if p == missing));
}
