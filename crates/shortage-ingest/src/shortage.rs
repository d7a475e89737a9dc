//! Normalization of the drug-shortage feed.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use shortage_model::{ShortageContact, ShortageRecord, clean_code};

use crate::document::field_string;

/// Build the shortage table from feed records.
///
/// Rows without a usable `package_ndc` are dropped. The feed carries no
/// shortage reason, so that column is always empty; the dosage form comes
/// from the feed's `presentation` field.
pub fn normalize_shortages(records: &[Value]) -> Vec<ShortageRecord> {
    let mut shortages = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(package_ndc) = clean_code(field_string(record, "package_ndc").as_deref()) else {
            dropped += 1;
            continue;
        };
        shortages.push(ShortageRecord {
            package_ndc,
            generic_name: field_string(record, "generic_name"),
            company_name: field_string(record, "company_name"),
            status: field_string(record, "status"),
            therapeutic_category: field_string(record, "therapeutic_category"),
            initial_posting_date: field_string(record, "initial_posting_date"),
            update_date: field_string(record, "update_date"),
            dosage_form: field_string(record, "presentation"),
            reason: None,
        });
    }

    debug!(kept = shortages.len(), dropped, "normalized shortage rows");
    shortages
}

/// Extract contact rows from feed records.
///
/// One row per record with a non-empty `contact_info`, deduplicated by the
/// (package code, contact info) pair. Rows without a usable `package_ndc`
/// are dropped.
pub fn normalize_contacts(records: &[Value]) -> Vec<ShortageContact> {
    let mut seen = HashSet::new();
    let mut contacts = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(contact_info) = field_string(record, "contact_info") else {
            continue;
        };
        if contact_info.is_empty() {
            continue;
        }
        let Some(package_ndc) = clean_code(field_string(record, "package_ndc").as_deref()) else {
            dropped += 1;
            continue;
        };
        if !seen.insert((package_ndc.clone(), contact_info.clone())) {
            dropped += 1;
            continue;
        }
        contacts.push(ShortageContact {
            package_ndc,
            contact_info,
        });
    }

    debug!(kept = contacts.len(), dropped, "normalized contact rows");
    contacts
}
