//! Derived reporting views.
//!
//! Rebuilt after every load as the final pipeline stage. The dashboard
//! reads only these views, never the raw tables.

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

/// Wide denormalized view joining shortages to packaging and NDC product
/// attributes. Shortages whose package code has no NDC match still appear,
/// with the NDC columns null.
pub const SHORTAGES_WITH_NDC: &str = "shortages_with_ndc";

/// Per-manufacturer counts of currently-affected packages and products.
pub const CURRENT_MANUFACTURER_RISK: &str = "current_manufacturer_risk";

const VIEWS: &str = "
DROP VIEW IF EXISTS current_manufacturer_risk;
DROP VIEW IF EXISTS shortages_with_ndc;

CREATE VIEW shortages_with_ndc AS
SELECT
    s.shortage_id,
    s.package_ndc,
    s.generic_name          AS shortage_generic_name,
    s.company_name,
    s.status,
    s.therapeutic_category,
    s.initial_posting_date,
    s.update_date,
    s.dosage_form           AS shortage_dosage_form,
    s.reason,
    p.product_ndc,
    p.description           AS package_description,
    n.generic_name          AS ndc_generic_name,
    n.labeler_name,
    n.brand_name,
    n.dosage_form           AS ndc_dosage_form,
    n.route,
    n.marketing_category,
    n.marketing_start_date,
    n.application_number
FROM raw_drug_shortages s
LEFT JOIN raw_ndc_packaging p ON p.package_ndc = s.package_ndc
LEFT JOIN raw_ndc n ON n.product_ndc = p.product_ndc;

CREATE VIEW current_manufacturer_risk AS
SELECT
    company_name,
    COUNT(DISTINCT package_ndc) AS current_affected_packages,
    COUNT(DISTINCT product_ndc) AS current_affected_products
FROM shortages_with_ndc
WHERE status = 'Current' AND company_name IS NOT NULL
GROUP BY company_name;
";

/// Drop and recreate both reporting views.
pub fn create_views(conn: &Connection) -> Result<()> {
    conn.execute_batch(VIEWS)?;
    info!(
        wide = SHORTAGES_WITH_NDC,
        risk = CURRENT_MANUFACTURER_RISK,
        "reporting views created"
    );
    Ok(())
}
