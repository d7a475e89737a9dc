//! Aggregate queries forming the dashboard read contract.

use rusqlite::{Connection, params_from_iter};

use crate::error::Result;
use crate::filter::FilterSet;
use crate::views::{CURRENT_MANUFACTURER_RISK, SHORTAGES_WITH_NDC};

/// Headline counts over the wide view, after filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiSummary {
    pub total_shortages: i64,
    pub current_shortages: i64,
    pub manufacturers: i64,
    pub packages_affected: i64,
}

/// One row of the manufacturer impact ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerImpact {
    pub company_name: String,
    pub current_affected_packages: i64,
    pub current_affected_products: i64,
}

/// Compute the headline KPIs over `shortages_with_ndc`.
pub fn kpi_summary(conn: &Connection, filter: &FilterSet) -> Result<KpiSummary> {
    let sql = format!(
        "SELECT COUNT(*),
                COALESCE(SUM(status = 'Current'), 0),
                COUNT(DISTINCT company_name),
                COUNT(DISTINCT package_ndc)
         FROM {SHORTAGES_WITH_NDC} {}",
        filter.where_clause()
    );
    let summary = conn.query_row(&sql, params_from_iter(filter.params()), |row| {
        Ok(KpiSummary {
            total_shortages: row.get(0)?,
            current_shortages: row.get(1)?,
            manufacturers: row.get(2)?,
            packages_affected: row.get(3)?,
        })
    })?;
    Ok(summary)
}

/// Top manufacturers by currently-affected package count.
pub fn manufacturer_impact(conn: &Connection, limit: usize) -> Result<Vec<ManufacturerImpact>> {
    let sql = format!(
        "SELECT company_name, current_affected_packages, current_affected_products
         FROM {CURRENT_MANUFACTURER_RISK}
         ORDER BY current_affected_packages DESC, company_name
         LIMIT ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([limit as i64], |row| {
            Ok(ManufacturerImpact {
                company_name: row.get(0)?,
                current_affected_packages: row.get(1)?,
                current_affected_products: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Distinct non-null values of a view column, for populating filter
/// dropdowns. The column name comes from the closed
/// [`FilterColumn`](crate::filter::FilterColumn) enum; no user input
/// reaches the SQL text.
pub fn distinct_values(
    conn: &Connection,
    column: crate::filter::FilterColumn,
) -> Result<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT {col} FROM {SHORTAGES_WITH_NDC}
         WHERE {col} IS NOT NULL ORDER BY 1",
        col = column.sql_name()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(rows)
}
