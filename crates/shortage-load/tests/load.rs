//! End-to-end load tests against a temporary SQLite database.

use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;
use tempfile::TempDir;

use shortage_ingest::{NormalizeOptions, SHORTAGE_CONTACTS_CSV, normalize};
use shortage_load::{LoadError, load, table_counts};

const NDC_DOC: &str = r#"{
    "results": [
        {
            "product_ndc": "0002-0152",
            "generic_name": "Insulin Lispro",
            "labeler_name": "Lilly",
            "packaging": [
                {"package_ndc": "0002-0152-01", "description": "1 vial"},
                {"package_ndc": "0002-0152-02", "description": "5 vials"}
            ]
        }
    ]
}"#;

const SHORTAGE_DOC: &str = r#"{
    "results": [
        {
            "package_ndc": "0002-0152-01",
            "generic_name": "Insulin Lispro",
            "company_name": "Lilly",
            "status": "Current",
            "contact_info": "shortages@lilly.example"
        }
    ]
}"#;

/// Normalize the two documents into a data directory.
fn normalize_docs(dir: &TempDir, ndc_doc: &str, shortage_doc: &str) -> PathBuf {
    let ndc = dir.path().join("ndc.json");
    let shortages = dir.path().join("shortages.json");
    fs::write(&ndc, ndc_doc).unwrap();
    fs::write(&shortages, shortage_doc).unwrap();
    let data_dir = dir.path().join("data");
    let outcome = normalize(&ndc, &shortages, &data_dir, NormalizeOptions::default()).unwrap();
    assert!(outcome.is_complete());
    data_dir
}

fn open_db(dir: &TempDir) -> Connection {
    Connection::open(dir.path().join("shortage.db")).unwrap()
}

#[test]
fn end_to_end_scenario() {
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, SHORTAGE_DOC);
    let mut conn = open_db(&dir);

    let report = load(&mut conn, &data_dir).unwrap();

    assert_eq!(report.verified.products, 1);
    assert_eq!(report.verified.packaging, 2);
    assert_eq!(report.verified.shortages, 1);
    assert_eq!(report.verified.contacts, 1);
    assert_eq!(report.inserted, report.verified);

    // The contact's foreign key resolves to the shortage's assigned id.
    let (contact_ref, shortage_id): (i64, i64) = conn
        .query_row(
            "SELECT c.shortage_id, s.shortage_id
             FROM shortage_contacts c
             JOIN raw_drug_shortages s ON s.shortage_id = c.shortage_id",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(contact_ref, shortage_id);
}

#[test]
fn contact_attaches_to_minimum_shortage_id() {
    let shortage_doc = r#"{
        "results": [
            {"package_ndc": "0002-0152-01", "status": "Current",
             "contact_info": "first@example.org"},
            {"package_ndc": "0002-0152-01", "status": "Resolved"},
            {"package_ndc": "0002-0152-02", "status": "Current"}
        ]
    }"#;
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, shortage_doc);
    let mut conn = open_db(&dir);

    load(&mut conn, &data_dir).unwrap();

    let min_id: i64 = conn
        .query_row(
            "SELECT MIN(shortage_id) FROM raw_drug_shortages WHERE package_ndc = '0002-0152-01'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let contact_ref: i64 = conn
        .query_row("SELECT shortage_id FROM shortage_contacts", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(contact_ref, min_id);
}

#[test]
fn rerun_yields_identical_contents() {
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, SHORTAGE_DOC);
    let mut conn = open_db(&dir);

    let first = load(&mut conn, &data_dir).unwrap();
    let second = load(&mut conn, &data_dir).unwrap();

    assert_eq!(first.verified, second.verified);
    let products: Vec<(String, Option<String>)> = conn
        .prepare("SELECT product_ndc, generic_name FROM raw_ndc ORDER BY product_ndc")
        .unwrap()
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        products,
        vec![("0002-0152".to_string(), Some("Insulin Lispro".to_string()))]
    );
}

#[test]
fn failed_contacts_step_rolls_back_whole_load() {
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, SHORTAGE_DOC);
    let mut conn = open_db(&dir);

    let first = load(&mut conn, &data_dir).unwrap();

    // Second run with a structurally broken contacts artifact: the contact
    // step fails inside the transaction, so the cleared-and-reinserted rows
    // from earlier steps must not persist either.
    fs::write(
        data_dir.join(SHORTAGE_CONTACTS_CSV),
        "package_ndc,contact_info\nonly-one-field\n",
    )
    .unwrap();
    let result = load(&mut conn, &data_dir);
    assert!(matches!(result, Err(LoadError::CsvRead { .. })));

    let counts = table_counts(&conn).unwrap();
    assert_eq!(counts, first.verified);
    let generic: Option<String> = conn
        .query_row("SELECT generic_name FROM raw_ndc", [], |row| row.get(0))
        .unwrap();
    assert_eq!(generic.as_deref(), Some("Insulin Lispro"));
}

#[test]
fn missing_artifact_aborts_before_any_mutation() {
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, SHORTAGE_DOC);
    fs::remove_file(data_dir.join(SHORTAGE_CONTACTS_CSV)).unwrap();
    let mut conn = open_db(&dir);

    let result = load(&mut conn, &data_dir);
    assert!(matches!(result, Err(LoadError::MissingCsv { .. })));

    // Preflight failed before schema creation or any insert.
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

#[test]
fn unmatched_contacts_are_dropped_at_load() {
    let shortage_doc = r#"{
        "results": [
            {"package_ndc": "0002-0152-01", "status": "Current"},
            {"package_ndc": "9999-0000-00", "contact_info": "orphan@example.org"}
        ]
    }"#;
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, shortage_doc);

    // Remove the orphan's shortage row so its package code has no match.
    let shortages_csv = data_dir.join("drug_shortages_core.csv");
    let text = fs::read_to_string(&shortages_csv).unwrap();
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !line.contains("9999-0000-00"))
        .collect();
    fs::write(&shortages_csv, kept.join("\n")).unwrap();

    let mut conn = open_db(&dir);
    let report = load(&mut conn, &data_dir).unwrap();
    assert_eq!(report.verified.shortages, 1);
    assert_eq!(report.verified.contacts, 0);
}

#[test]
fn empty_contacts_artifact_loads_zero_rows() {
    let dir = TempDir::new().unwrap();
    let data_dir = normalize_docs(&dir, NDC_DOC, SHORTAGE_DOC);
    fs::write(
        data_dir.join(SHORTAGE_CONTACTS_CSV),
        "package_ndc,contact_info\n",
    )
    .unwrap();

    let mut conn = open_db(&dir);
    let report = load(&mut conn, &data_dir).unwrap();
    assert_eq!(report.verified.contacts, 0);
    assert_eq!(report.verified.shortages, 1);
}

#[test]
fn artifacts_resolve_relative_to_data_dir() {
    // Loading from a directory with no artifacts fails on the first one.
    let dir = TempDir::new().unwrap();
    let mut conn = open_db(&dir);
    let result = load(&mut conn, &dir.path().join("empty"));
    assert!(matches!(result, Err(LoadError::MissingCsv { .. })));
}
