//! Rows derived from the FDA drug-shortage feed.

use serde::{Deserialize, Serialize};

/// One reported shortage status entry for a package.
///
/// The source feed has no stable identifier; the database assigns a
/// surrogate `shortage_id` on insert. Rows without a usable `package_ndc`
/// are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageRecord {
    pub package_ndc: String,
    pub generic_name: Option<String>,
    pub company_name: Option<String>,
    pub status: Option<String>,
    pub therapeutic_category: Option<String>,
    pub initial_posting_date: Option<String>,
    pub update_date: Option<String>,
    /// Sourced from the feed's `presentation` field.
    pub dosage_form: Option<String>,
    /// Not available upstream; always empty.
    pub reason: Option<String>,
}

/// Free-text contact info for a shortage, keyed by package code in source
/// data. Re-keyed to a `shortage_id` before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageContact {
    pub package_ndc: String,
    pub contact_info: String,
}

/// A contact row after re-keying onto a shortage's surrogate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RekeyedContact {
    pub shortage_id: i64,
    pub contact_info: String,
}
