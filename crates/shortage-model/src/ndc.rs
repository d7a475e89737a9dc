//! Rows derived from the FDA NDC directory.

use serde::{Deserialize, Serialize};

/// One product-level entry from the NDC directory.
///
/// Keyed by `product_ndc`; the remaining columns are carried through from
/// the source record as opaque strings (list-valued source fields are kept
/// as their JSON rendering). Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NdcProduct {
    pub product_ndc: String,
    pub generic_name: Option<String>,
    pub labeler_name: Option<String>,
    pub brand_name: Option<String>,
    pub finished: Option<String>,
    pub marketing_category: Option<String>,
    pub dosage_form: Option<String>,
    pub route: Option<String>,
    pub product_type: Option<String>,
    pub marketing_start_date: Option<String>,
    pub application_number: Option<String>,
}

/// One sellable package flattened out of a product's nested packaging list.
///
/// Keyed by `package_ndc`. `product_ndc` is a soft reference to the parent
/// product; it is not validated against the product table at normalization
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NdcPackaging {
    pub product_ndc: Option<String>,
    pub package_ndc: String,
    pub description: Option<String>,
    pub marketing_start_date: Option<String>,
}
