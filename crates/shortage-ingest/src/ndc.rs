//! Normalization of the NDC directory feed.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use shortage_model::{NdcPackaging, NdcProduct, clean_code, clean_soft_code};

use crate::document::field_string;

/// Build the product table from NDC directory records.
///
/// Rows without a usable `product_ndc` are dropped; duplicates keep the
/// first record in source order.
pub fn normalize_products(records: &[Value]) -> Vec<NdcProduct> {
    let mut seen = HashSet::new();
    let mut products = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(product_ndc) = clean_code(field_string(record, "product_ndc").as_deref()) else {
            dropped += 1;
            continue;
        };
        if !seen.insert(product_ndc.clone()) {
            dropped += 1;
            continue;
        }
        products.push(NdcProduct {
            product_ndc,
            generic_name: field_string(record, "generic_name"),
            labeler_name: field_string(record, "labeler_name"),
            brand_name: field_string(record, "brand_name"),
            finished: field_string(record, "finished"),
            marketing_category: field_string(record, "marketing_category"),
            dosage_form: field_string(record, "dosage_form"),
            route: field_string(record, "route"),
            product_type: field_string(record, "product_type"),
            marketing_start_date: field_string(record, "marketing_start_date"),
            application_number: field_string(record, "application_number"),
        });
    }

    debug!(
        kept = products.len(),
        dropped, "normalized NDC product rows"
    );
    products
}

/// Flatten the nested packaging lists into one row per package.
///
/// Every product record contributes one row per entry of its `packaging`
/// array, carrying the parent's trimmed product code. Rows without a usable
/// `package_ndc` are dropped; duplicates keep the first row in source order.
pub fn normalize_packaging(records: &[Value]) -> Vec<NdcPackaging> {
    let mut seen = HashSet::new();
    let mut packages = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let product_ndc = clean_soft_code(field_string(record, "product_ndc").as_deref());
        let Some(Value::Array(entries)) = record.get("packaging") else {
            continue;
        };
        for entry in entries {
            let Some(package_ndc) = clean_code(field_string(entry, "package_ndc").as_deref())
            else {
                dropped += 1;
                continue;
            };
            if !seen.insert(package_ndc.clone()) {
                dropped += 1;
                continue;
            }
            packages.push(NdcPackaging {
                product_ndc: product_ndc.clone(),
                package_ndc,
                description: field_string(entry, "description"),
                marketing_start_date: field_string(entry, "marketing_start_date"),
            });
        }
    }

    debug!(kept = packages.len(), dropped, "normalized packaging rows");
    packages
}
