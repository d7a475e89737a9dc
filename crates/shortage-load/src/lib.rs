//! Loader for the FDA shortage pipeline.
//!
//! Consumes the four CSV artifacts written by `shortage-ingest` and
//! replaces the contents of the destination tables in a single
//! transaction, re-keying contact rows onto the surrogate shortage ids
//! assigned during the same load.

pub mod error;
pub mod loader;
pub mod rekey;
pub mod schema;

pub use error::{LoadError, Result};
pub use loader::{LoadReport, TableCounts, load, table_counts};
pub use rekey::{min_id_mapping, rekey_contacts};
pub use schema::{
    CLEAR_ORDER, RAW_DRUG_SHORTAGES, RAW_NDC, RAW_NDC_PACKAGING, SHORTAGE_CONTACTS, ensure_schema,
};
