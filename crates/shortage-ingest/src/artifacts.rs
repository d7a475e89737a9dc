//! CSV artifact names and writing.
//!
//! The four artifacts are the contract between the normalizer and the
//! loader; their names and column sets are fixed.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{IngestError, Result};

/// Product table artifact.
pub const NDC_CORE_CSV: &str = "ndc_core.csv";
/// Packaging table artifact.
pub const NDC_PACKAGING_CSV: &str = "ndc_packaging.csv";
/// Shortage table artifact.
pub const DRUG_SHORTAGES_CSV: &str = "drug_shortages_core.csv";
/// Contact table artifact.
pub const SHORTAGE_CONTACTS_CSV: &str = "shortage_contacts.csv";

/// Paths of the four artifacts inside a data directory.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub ndc_core: PathBuf,
    pub ndc_packaging: PathBuf,
    pub drug_shortages: PathBuf,
    pub shortage_contacts: PathBuf,
}

impl Artifacts {
    /// Resolve the artifact paths under `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            ndc_core: data_dir.join(NDC_CORE_CSV),
            ndc_packaging: data_dir.join(NDC_PACKAGING_CSV),
            drug_shortages: data_dir.join(DRUG_SHORTAGES_CSV),
            shortage_contacts: data_dir.join(SHORTAGE_CONTACTS_CSV),
        }
    }

    /// All four paths, in load order.
    pub fn all(&self) -> [&Path; 4] {
        [
            &self.ndc_core,
            &self.ndc_packaging,
            &self.drug_shortages,
            &self.shortage_contacts,
        ]
    }
}

/// Column set of `ndc_core.csv`.
pub const PRODUCT_COLUMNS: &[&str] = &[
    "product_ndc",
    "generic_name",
    "labeler_name",
    "brand_name",
    "finished",
    "marketing_category",
    "dosage_form",
    "route",
    "product_type",
    "marketing_start_date",
    "application_number",
];

/// Column set of `ndc_packaging.csv`.
pub const PACKAGING_COLUMNS: &[&str] = &[
    "product_ndc",
    "package_ndc",
    "description",
    "marketing_start_date",
];

/// Column set of `drug_shortages_core.csv`.
pub const SHORTAGE_COLUMNS: &[&str] = &[
    "package_ndc",
    "generic_name",
    "company_name",
    "status",
    "therapeutic_category",
    "initial_posting_date",
    "update_date",
    "dosage_form",
    "reason",
];

/// Column set of `shortage_contacts.csv`.
pub const CONTACT_COLUMNS: &[&str] = &["package_ndc", "contact_info"];

/// Write rows to a CSV artifact, UTF-8 encoded.
///
/// The header row is written explicitly so an empty row set still produces
/// a well-formed artifact.
pub fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<usize> {
    let csv_err = |e: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source: e,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(columns).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;
    Ok(rows.len())
}
