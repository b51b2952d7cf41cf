// =====================================================================
// File: integration_catalog.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 23, 2025
//
// Description:
//   Integration tests for the catalog index. These tests exercise the
//   full end-to-end flow of the system, including:
//
//   - Writing 64-byte records to a catalog file and loading them back
//   - Sorting the loaded store inside a session
//   - Prefix searches that fill the queue
//   - Building A1 trees by author and by page count, looking keys up
//     and reading the weighted height
//   - Handling missing files and truncated trailing records
// =====================================================================
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use bookindex::record::RECORD_SIZE;
use bookindex::{
    Codec, Found, KeyContext, KeyFamily, Record, Session, append_record, load_or_empty, load_records,
};
use tempfile::tempdir;

/// Writes a small catalog: (author, title, pages).
fn write_catalog(path: &Path) {
    let books = [
        ("Ivanov I I", "Roman_I_Ivanov", 320),
        ("Petrov P P", "Povest_P_Ivanchenko", 210),
        ("Ivanov I I", "Skazki_I_Ivanov", 120),
        ("Sidorov S", "Stihi_S_Ivashov", 98),
        ("Ivanov I I", "Pesni_I_Ivanov", 320),
        ("Kuznecov K", "Esse_K_Kuznecov", 400),
    ];
    for (author, title, pages) in books {
        let rec = Record::from_text(Codec::Cp866, author, title, "Nauka", 1999, pages);
        append_record(path, &rec).unwrap();
    }
}

fn surname_ctx() -> KeyContext {
    KeyContext::default().with_family(KeyFamily::Surname)
}


#[test]
fn test_load_search_and_build_by_author() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("testBase1.dat");
    write_catalog(&path);

    let store = load_records(&path).unwrap();
    assert_eq!(store.len(), 6);

    let mut session = Session::new(&store, surname_ctx());
    // Ivanov x3, Ivanchenko, Ivashov
    assert_eq!(session.search("iva").len(), 5);

    let tree = session.build_tree(KeyFamily::Author).unwrap();
    assert_eq!(tree.total_keys, 3);
    assert_eq!(tree.total_records, 5);
    assert_eq!(tree.root().unwrap().key.to_string(), "Ivanov I I");
    // Ivanov (3) at level 1, Petrov (1) at 2, Sidorov (1) at 3
    assert!((tree.weighted_height() - 1.6).abs() < 1e-9);

    match session.find("Sidorov_S").unwrap() {
        Some(Found::Text(hit)) => {
            assert_eq!(hit.level, 3);
            assert_eq!(hit.node.unwrap().weight, 2);
        }
        other => panic!("expected a text hit, got {other:?}"),
    }
}


#[test]
fn test_build_by_pages_and_lookup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("testBase1.dat");
    write_catalog(&path);

    let store = load_records(&path).unwrap();
    let mut session = Session::new(&store, surname_ctx());
    session.search("IVA");

    let tree = session.build_tree(KeyFamily::Pages).unwrap();
    let keys: Vec<String> = tree.in_order().iter().map(|n| n.key.to_string()).collect();
    assert_eq!(keys, ["98", "120", "210", "320"]);

    let found = session.find("320").unwrap().unwrap();
    assert_eq!(found.record_count(), 2);
    assert!(session.find("three hundred").is_err());
}


#[test]
fn test_records_survive_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("testBase1.dat");
    write_catalog(&path);

    let first = load_records(&path).unwrap();
    let second = load_records(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(Codec::Cp866.decode(&first[5].author), "Kuznecov K");
}


#[test]
fn test_truncated_tail_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("testBase1.dat");
    write_catalog(&path);

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[0u8; RECORD_SIZE - 1]).unwrap();
    drop(file);

    assert_eq!(load_records(&path).unwrap().len(), 6);
}


#[test]
fn test_missing_file_gives_empty_session() {
    let dir = tempdir().unwrap();
    let store = load_or_empty(dir.path().join("nothing.dat"));
    assert!(store.is_empty());

    let mut session = Session::new(&store, surname_ctx());
    assert!(session.search("Iva").is_empty());
    assert!(session.build_tree(KeyFamily::Author).is_none());
    assert!(session.find("Ivanov").unwrap().is_none());
}
