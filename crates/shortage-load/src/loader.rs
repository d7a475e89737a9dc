//! Transactional clear-and-reload of the four destination tables.
//!
//! The whole load is one unit: clears and inserts happen inside a single
//! transaction, so any failure leaves the previous table contents
//! untouched. Foreign-key enforcement is switched off around the load so
//! children and parents can be cleared without a cascading delete.

use std::path::Path;

use rusqlite::{Connection, Transaction, params};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use shortage_ingest::Artifacts;
use shortage_model::{NdcPackaging, NdcProduct, ShortageContact, ShortageRecord};

use crate::error::{LoadError, Result};
use crate::rekey::{min_id_mapping, rekey_contacts};
use crate::schema::{
    CLEAR_ORDER, RAW_DRUG_SHORTAGES, RAW_NDC, RAW_NDC_PACKAGING, SHORTAGE_CONTACTS, ensure_schema,
};

/// Row counts for the four destination tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub products: usize,
    pub packaging: usize,
    pub shortages: usize,
    pub contacts: usize,
}

impl TableCounts {
    /// (table name, count) pairs in load order.
    pub fn by_table(&self) -> [(&'static str, usize); 4] {
        [
            (RAW_NDC, self.products),
            (RAW_NDC_PACKAGING, self.packaging),
            (RAW_DRUG_SHORTAGES, self.shortages),
            (SHORTAGE_CONTACTS, self.contacts),
        ]
    }
}

/// Outcome of a completed load.
#[derive(Debug)]
pub struct LoadReport {
    /// Rows inserted inside the transaction.
    pub inserted: TableCounts,
    /// Rows counted back from the tables after commit. A mismatch with
    /// `inserted` is reported, not corrected.
    pub verified: TableCounts,
}

/// Replace the contents of the destination tables from the CSV artifacts
/// under `data_dir`.
///
/// Preflight verifies all four artifacts exist before any database
/// mutation. The clear and all inserts run in one transaction; contacts are
/// re-keyed onto the freshly assigned shortage ids before their insert.
pub fn load(conn: &mut Connection, data_dir: &Path) -> Result<LoadReport> {
    let artifacts = Artifacts::in_dir(data_dir);
    for path in artifacts.all() {
        if !path.exists() {
            return Err(LoadError::MissingCsv {
                path: path.to_path_buf(),
            });
        }
    }

    ensure_schema(conn)?;

    // The pragma cannot change inside a transaction, so it brackets the
    // transaction; enforcement is restored whether the load succeeds or not.
    conn.pragma_update(None, "foreign_keys", false)?;
    let result = load_within_transaction(conn, &artifacts);
    conn.pragma_update(None, "foreign_keys", true)?;
    let inserted = result?;

    let verified = table_counts(conn)?;
    info!(
        products = verified.products,
        packaging = verified.packaging,
        shortages = verified.shortages,
        contacts = verified.contacts,
        "load committed"
    );
    Ok(LoadReport { inserted, verified })
}

fn load_within_transaction(conn: &mut Connection, artifacts: &Artifacts) -> Result<TableCounts> {
    let tx = conn.transaction()?;

    // Children before parents.
    for table in CLEAR_ORDER {
        let cleared = tx.execute(&format!("DELETE FROM {table}"), [])?;
        debug!(table, cleared, "table cleared");
    }

    let products = insert_products(&tx, &artifacts.ndc_core)?;
    let packaging = insert_packaging(&tx, &artifacts.ndc_packaging)?;
    let shortages = insert_shortages(&tx, &artifacts.drug_shortages)?;
    let contacts = insert_contacts(&tx, &artifacts.shortage_contacts)?;

    tx.commit()?;
    Ok(TableCounts {
        products,
        packaging,
        shortages,
        contacts,
    })
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| LoadError::CsvRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?);
    }
    Ok(rows)
}

fn insert_products(tx: &Transaction<'_>, path: &Path) -> Result<usize> {
    let rows: Vec<NdcProduct> = read_rows(path)?;
    let mut stmt = tx.prepare(
        "INSERT INTO raw_ndc (product_ndc, generic_name, labeler_name, brand_name, finished,
                              marketing_category, dosage_form, route, product_type,
                              marketing_start_date, application_number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;
    for row in &rows {
        stmt.execute(params![
            row.product_ndc,
            row.generic_name,
            row.labeler_name,
            row.brand_name,
            row.finished,
            row.marketing_category,
            row.dosage_form,
            row.route,
            row.product_type,
            row.marketing_start_date,
            row.application_number,
        ])?;
    }
    debug!(table = RAW_NDC, rows = rows.len(), "table loaded");
    Ok(rows.len())
}

fn insert_packaging(tx: &Transaction<'_>, path: &Path) -> Result<usize> {
    let rows: Vec<NdcPackaging> = read_rows(path)?;
    let mut stmt = tx.prepare(
        "INSERT INTO raw_ndc_packaging (package_ndc, product_ndc, description,
                                        marketing_start_date)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in &rows {
        stmt.execute(params![
            row.package_ndc,
            row.product_ndc,
            row.description,
            row.marketing_start_date,
        ])?;
    }
    debug!(table = RAW_NDC_PACKAGING, rows = rows.len(), "table loaded");
    Ok(rows.len())
}

fn insert_shortages(tx: &Transaction<'_>, path: &Path) -> Result<usize> {
    let rows: Vec<ShortageRecord> = read_rows(path)?;
    let mut stmt = tx.prepare(
        "INSERT INTO raw_drug_shortages (package_ndc, generic_name, company_name, status,
                                         therapeutic_category, initial_posting_date,
                                         update_date, dosage_form, reason)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for row in &rows {
        stmt.execute(params![
            row.package_ndc,
            row.generic_name,
            row.company_name,
            row.status,
            row.therapeutic_category,
            row.initial_posting_date,
            row.update_date,
            row.dosage_form,
            row.reason,
        ])?;
    }
    debug!(table = RAW_DRUG_SHORTAGES, rows = rows.len(), "table loaded");
    Ok(rows.len())
}

/// Load contacts by re-keying package codes onto the shortage ids assigned
/// earlier in the same transaction. Contacts with no matching shortage are
/// dropped.
fn insert_contacts(tx: &Transaction<'_>, path: &Path) -> Result<usize> {
    let contacts: Vec<ShortageContact> = read_rows(path)?;
    if contacts.is_empty() {
        debug!(table = SHORTAGE_CONTACTS, rows = 0, "table loaded");
        return Ok(0);
    }

    let mut stmt = tx.prepare(
        "SELECT package_ndc, shortage_id FROM raw_drug_shortages
         WHERE package_ndc IS NOT NULL AND package_ndc <> ''",
    )?;
    let pairs = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let mapping = min_id_mapping(pairs);

    let rekeyed = rekey_contacts(&mapping, &contacts);
    let mut insert = tx.prepare(
        "INSERT INTO shortage_contacts (shortage_id, contact_info) VALUES (?1, ?2)",
    )?;
    for row in &rekeyed {
        insert.execute(params![row.shortage_id, row.contact_info])?;
    }
    debug!(
        table = SHORTAGE_CONTACTS,
        rows = rekeyed.len(),
        dropped = contacts.len() - rekeyed.len(),
        "table loaded"
    );
    Ok(rekeyed.len())
}

/// Count the rows currently in each destination table.
pub fn table_counts(conn: &Connection) -> Result<TableCounts> {
    let count = |table: &str| -> Result<usize> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n as usize)
    };
    Ok(TableCounts {
        products: count(RAW_NDC)?,
        packaging: count(RAW_NDC_PACKAGING)?,
        shortages: count(RAW_DRUG_SHORTAGES)?,
        contacts: count(SHORTAGE_CONTACTS)?,
    })
}
