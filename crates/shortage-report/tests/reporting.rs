//! View and query tests over an in-memory database.

use rusqlite::Connection;

use shortage_load::ensure_schema;
use shortage_report::{
    FilterColumn, FilterSet, create_views, distinct_values, kpi_summary, manufacturer_impact,
};

fn seeded_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    conn.execute_batch(
        "
        INSERT INTO raw_ndc (product_ndc, generic_name, labeler_name, brand_name, route)
        VALUES ('0002-0152', 'Insulin Lispro', 'Lilly', 'Humalog', 'INJECTION'),
               ('0009-0001', 'Azithromycin', 'Pfizer', NULL, 'ORAL');

        INSERT INTO raw_ndc_packaging (package_ndc, product_ndc, description)
        VALUES ('0002-0152-01', '0002-0152', '1 vial'),
               ('0002-0152-02', '0002-0152', '5 vials'),
               ('0009-0001-01', '0009-0001', '30 tablets');

        INSERT INTO raw_drug_shortages (package_ndc, generic_name, company_name, status)
        VALUES ('0002-0152-01', 'Insulin Lispro', 'Lilly', 'Current'),
               ('0002-0152-02', 'Insulin Lispro', 'Lilly', 'Current'),
               ('0009-0001-01', 'Azithromycin', 'Pfizer', 'Resolved'),
               ('1111-2222-33', 'Unmatched Drug', 'Acme', 'Current');
        ",
    )
    .unwrap();
    create_views(&conn).unwrap();
    conn
}

#[test]
fn wide_view_keeps_unmatched_shortages() {
    let conn = seeded_db();
    let (total, with_ndc): (i64, i64) = conn
        .query_row(
            "SELECT COUNT(*), COUNT(product_ndc) FROM shortages_with_ndc",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(total, 4);
    assert_eq!(with_ndc, 3);
}

#[test]
fn manufacturer_risk_counts_current_only() {
    let conn = seeded_db();
    let rows = manufacturer_impact(&conn, 10).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].company_name, "Lilly");
    assert_eq!(rows[0].current_affected_packages, 2);
    assert_eq!(rows[0].current_affected_products, 1);
    // Pfizer's shortage is Resolved and must not appear.
    assert!(rows.iter().all(|r| r.company_name != "Pfizer"));
}

#[test]
fn kpis_respect_filters() {
    let conn = seeded_db();

    let unfiltered = kpi_summary(&conn, &FilterSet::new()).unwrap();
    assert_eq!(unfiltered.total_shortages, 4);
    assert_eq!(unfiltered.current_shortages, 3);
    assert_eq!(unfiltered.manufacturers, 3);
    assert_eq!(unfiltered.packages_affected, 4);

    let lilly = kpi_summary(
        &conn,
        &FilterSet::new().eq(FilterColumn::CompanyName, "Lilly"),
    )
    .unwrap();
    assert_eq!(lilly.total_shortages, 2);
    assert_eq!(lilly.manufacturers, 1);

    let current = kpi_summary(&conn, &FilterSet::new().current_only()).unwrap();
    assert_eq!(current.total_shortages, 3);
}

#[test]
fn views_are_rebuildable() {
    let conn = seeded_db();
    // A second create drops and recreates without error.
    create_views(&conn).unwrap();
    let rows = manufacturer_impact(&conn, 10).unwrap();
    assert!(!rows.is_empty());
}

#[test]
fn dropdown_values_are_distinct_and_sorted() {
    let conn = seeded_db();
    let companies = distinct_values(&conn, FilterColumn::CompanyName).unwrap();
    assert_eq!(companies, vec!["Acme", "Lilly", "Pfizer"]);
}

#[test]
fn hostile_filter_value_binds_safely() {
    let conn = seeded_db();
    let filter = FilterSet::new().eq(FilterColumn::CompanyName, "x'; DROP TABLE raw_ndc; --");
    let summary = kpi_summary(&conn, &filter).unwrap();
    assert_eq!(summary.total_shortages, 0);
    // Table is still there.
    let products: i64 = conn
        .query_row("SELECT COUNT(*) FROM raw_ndc", [], |row| row.get(0))
        .unwrap();
    assert_eq!(products, 2);
}
