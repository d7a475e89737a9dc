//! Normalizer for the FDA shortage pipeline.
//!
//! Turns the two raw JSON feeds (NDC directory, drug shortages) into four
//! flat CSV artifacts consumed by the loader. The two datasets are
//! independent: a failure in one is reported but does not abort the other,
//! and the overall outcome carries an explicit per-dataset status so the
//! orchestrator can tell a partial run from a complete one. Strict mode
//! turns any dataset failure into a hard error instead.

pub mod artifacts;
pub mod document;
pub mod error;
pub mod ndc;
pub mod shortage;

use std::path::Path;

use tracing::{error, info};

pub use artifacts::{
    Artifacts, CONTACT_COLUMNS, DRUG_SHORTAGES_CSV, NDC_CORE_CSV, NDC_PACKAGING_CSV,
    PACKAGING_COLUMNS, PRODUCT_COLUMNS, SHORTAGE_COLUMNS, SHORTAGE_CONTACTS_CSV, write_rows,
};
pub use document::read_results;
pub use error::{IngestError, Result};
pub use ndc::{normalize_packaging, normalize_products};
pub use shortage::{normalize_contacts, normalize_shortages};

/// Options controlling normalization behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Fail the whole step on any dataset failure instead of continuing
    /// with the other dataset.
    pub strict: bool,
}

/// Status of one dataset after normalization.
#[derive(Debug)]
pub enum DatasetOutcome {
    /// Both artifacts for the dataset were written.
    Normalized {
        /// Rows in the primary artifact (products / shortages).
        primary_rows: usize,
        /// Rows in the secondary artifact (packaging / contacts).
        secondary_rows: usize,
    },
    /// The dataset could not be processed; its artifacts were not written.
    Failed { error: String },
}

impl DatasetOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Per-dataset outcome of a normalization run.
#[derive(Debug)]
pub struct NormalizeOutcome {
    pub ndc: DatasetOutcome,
    pub shortages: DatasetOutcome,
}

impl NormalizeOutcome {
    /// True when exactly one of the two datasets failed.
    pub fn is_partial(&self) -> bool {
        self.ndc.is_failed() != self.shortages.is_failed()
    }

    /// True when both datasets failed.
    pub fn all_failed(&self) -> bool {
        self.ndc.is_failed() && self.shortages.is_failed()
    }

    /// True when both datasets normalized cleanly.
    pub fn is_complete(&self) -> bool {
        !self.ndc.is_failed() && !self.shortages.is_failed()
    }
}

/// Normalize both feeds into CSV artifacts under `data_dir`.
///
/// In the default (lenient) mode each dataset's failure is logged and
/// recorded in the outcome while the other dataset still proceeds. With
/// [`NormalizeOptions::strict`] the first dataset failure aborts the run.
pub fn normalize(
    ndc_json: &Path,
    shortage_json: &Path,
    data_dir: &Path,
    options: NormalizeOptions,
) -> Result<NormalizeOutcome> {
    std::fs::create_dir_all(data_dir).map_err(|e| IngestError::FileRead {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    let artifacts = Artifacts::in_dir(data_dir);

    let ndc = run_dataset("ndc", options, || normalize_ndc(ndc_json, &artifacts))?;
    let shortages = run_dataset("shortages", options, || {
        normalize_shortage_feed(shortage_json, &artifacts)
    })?;

    Ok(NormalizeOutcome { ndc, shortages })
}

fn run_dataset(
    dataset: &str,
    options: NormalizeOptions,
    run: impl FnOnce() -> Result<(usize, usize)>,
) -> Result<DatasetOutcome> {
    match run() {
        Ok((primary_rows, secondary_rows)) => {
            info!(dataset, primary_rows, secondary_rows, "dataset normalized");
            Ok(DatasetOutcome::Normalized {
                primary_rows,
                secondary_rows,
            })
        }
        Err(err) if options.strict => Err(err),
        Err(err) => {
            error!(dataset, error = %err, "dataset normalization failed, continuing");
            Ok(DatasetOutcome::Failed {
                error: err.to_string(),
            })
        }
    }
}

fn normalize_ndc(input: &Path, artifacts: &Artifacts) -> Result<(usize, usize)> {
    let records = read_results(input)?;
    let products = normalize_products(&records);
    let packaging = normalize_packaging(&records);
    let product_rows = write_rows(&artifacts.ndc_core, PRODUCT_COLUMNS, &products)?;
    let packaging_rows = write_rows(&artifacts.ndc_packaging, PACKAGING_COLUMNS, &packaging)?;
    Ok((product_rows, packaging_rows))
}

fn normalize_shortage_feed(input: &Path, artifacts: &Artifacts) -> Result<(usize, usize)> {
    let records = read_results(input)?;
    let shortages = normalize_shortages(&records);
    let contacts = normalize_contacts(&records);
    let shortage_rows = write_rows(&artifacts.drug_shortages, SHORTAGE_COLUMNS, &shortages)?;
    let contact_rows = write_rows(&artifacts.shortage_contacts, CONTACT_COLUMNS, &contacts)?;
    Ok((shortage_rows, contact_rows))
}
