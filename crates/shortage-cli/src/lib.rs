//! CLI library components for the FDA shortage ETL.

pub mod logging;
