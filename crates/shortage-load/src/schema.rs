//! Destination table definitions.
//!
//! Four tables: two parents (`raw_ndc`, `raw_drug_shortages`) and two
//! children (`raw_ndc_packaging`, `shortage_contacts`). The packaging to
//! product relationship is declared but deliberately not enforced at load
//! time; the contact to shortage relationship is a hard foreign key onto
//! the surrogate `shortage_id`.

use rusqlite::Connection;

use crate::error::Result;

/// Product table name.
pub const RAW_NDC: &str = "raw_ndc";
/// Packaging table name (child of `raw_ndc`).
pub const RAW_NDC_PACKAGING: &str = "raw_ndc_packaging";
/// Shortage table name; owns the surrogate `shortage_id`.
pub const RAW_DRUG_SHORTAGES: &str = "raw_drug_shortages";
/// Contact table name (child of `raw_drug_shortages`).
pub const SHORTAGE_CONTACTS: &str = "shortage_contacts";

/// All four tables in clear order: children before parents.
pub const CLEAR_ORDER: &[&str] = &[
    RAW_NDC_PACKAGING,
    SHORTAGE_CONTACTS,
    RAW_NDC,
    RAW_DRUG_SHORTAGES,
];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS raw_ndc (
    product_ndc          TEXT PRIMARY KEY,
    generic_name         TEXT,
    labeler_name         TEXT,
    brand_name           TEXT,
    finished             TEXT,
    marketing_category   TEXT,
    dosage_form          TEXT,
    route                TEXT,
    product_type         TEXT,
    marketing_start_date TEXT,
    application_number   TEXT
);

CREATE TABLE IF NOT EXISTS raw_ndc_packaging (
    package_ndc          TEXT PRIMARY KEY,
    product_ndc          TEXT REFERENCES raw_ndc (product_ndc),
    description          TEXT,
    marketing_start_date TEXT
);

CREATE TABLE IF NOT EXISTS raw_drug_shortages (
    shortage_id          INTEGER PRIMARY KEY AUTOINCREMENT,
    package_ndc          TEXT NOT NULL,
    generic_name         TEXT,
    company_name         TEXT,
    status               TEXT,
    therapeutic_category TEXT,
    initial_posting_date TEXT,
    update_date          TEXT,
    dosage_form          TEXT,
    reason               TEXT
);

CREATE TABLE IF NOT EXISTS shortage_contacts (
    contact_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    shortage_id  INTEGER NOT NULL REFERENCES raw_drug_shortages (shortage_id),
    contact_info TEXT NOT NULL
);
";

/// Create the destination tables if they do not exist.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
