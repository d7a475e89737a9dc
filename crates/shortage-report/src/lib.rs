//! Reporting layer for the FDA shortage pipeline.
//!
//! Owns the derived views the dashboard reads and the parameterized
//! filter/query surface over them. Everything here is read-only against
//! the loaded tables, apart from (re)creating the views themselves.

pub mod error;
pub mod filter;
pub mod queries;
pub mod views;

pub use error::{ReportError, Result};
pub use filter::{FilterColumn, FilterSet};
pub use queries::{KpiSummary, ManufacturerImpact, distinct_values, kpi_summary, manufacturer_impact};
pub use views::{CURRENT_MANUFACTURER_RISK, SHORTAGES_WITH_NDC, create_views};
