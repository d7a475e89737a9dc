//! Human-readable summaries printed after commands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use shortage_load::LoadReport;
use shortage_report::{KpiSummary, ManufacturerImpact};

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Print per-table inserted and verified row counts.
pub fn print_load_report(report: &LoadReport) {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Inserted", "Verified"]);
    apply_table_style(&mut table);
    for ((name, inserted), (_, verified)) in report
        .inserted
        .by_table()
        .into_iter()
        .zip(report.verified.by_table())
    {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(inserted).set_alignment(CellAlignment::Right),
            Cell::new(verified).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

/// Print headline KPIs and the manufacturer impact ranking.
pub fn print_report(kpis: &KpiSummary, impact: &[ManufacturerImpact]) {
    println!(
        "Shortages: {} total, {} current | Manufacturers: {} | Packages affected: {}",
        kpis.total_shortages, kpis.current_shortages, kpis.manufacturers, kpis.packages_affected
    );

    let mut table = Table::new();
    table.set_header(vec!["Manufacturer", "Affected packages", "Affected products"]);
    apply_table_style(&mut table);
    for row in impact {
        table.add_row(vec![
            Cell::new(&row.company_name),
            Cell::new(row.current_affected_packages).set_alignment(CellAlignment::Right),
            Cell::new(row.current_affected_products).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}
