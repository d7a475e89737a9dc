//! Command implementations.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use shortage_ingest::{DatasetOutcome, NormalizeOptions, NormalizeOutcome, normalize};
use shortage_load::{ensure_schema, load};
use shortage_report::{FilterColumn, FilterSet, create_views, kpi_summary, manufacturer_impact};

use crate::cli::{DatabaseArgs, LoadArgs, NormalizeArgs, ReportArgs, RunArgs};
use crate::config::open_database;
use crate::summary::{print_load_report, print_report};

pub fn run_normalize(args: &NormalizeArgs) -> Result<()> {
    let outcome = normalize(
        &args.ndc_json,
        &args.shortage_json,
        &args.data_dir,
        NormalizeOptions {
            strict: args.strict,
        },
    )
    .context("normalize datasets")?;
    report_outcome(&outcome)
}

/// Surface the per-dataset outcome. A partial run warns but succeeds; both
/// datasets failing is a hard error.
fn report_outcome(outcome: &NormalizeOutcome) -> Result<()> {
    for (dataset, status) in [("ndc", &outcome.ndc), ("shortages", &outcome.shortages)] {
        match status {
            DatasetOutcome::Normalized {
                primary_rows,
                secondary_rows,
            } => info!(dataset, primary_rows, secondary_rows, "dataset complete"),
            DatasetOutcome::Failed { error } => warn!(dataset, error = %error, "dataset skipped"),
        }
    }
    if outcome.all_failed() {
        bail!("both datasets failed to normalize");
    }
    if outcome.is_partial() {
        warn!("normalization produced partial output; downstream load may fail preflight");
    }
    Ok(())
}

pub fn run_load(args: &LoadArgs) -> Result<()> {
    let mut conn = open_database(args.database.database.clone())?;
    let report = load(&mut conn, &args.data_dir).context("load artifacts")?;
    print_load_report(&report);
    Ok(())
}

pub fn run_views(args: &DatabaseArgs) -> Result<()> {
    let conn = open_database(args.database.clone())?;
    ensure_schema(&conn).context("ensure schema")?;
    create_views(&conn).context("create reporting views")?;
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<()> {
    let conn = open_database(args.database.database.clone())?;

    let mut filter = FilterSet::new();
    if args.current_only {
        filter = filter.current_only();
    }
    if let Some(manufacturer) = &args.manufacturer {
        filter = filter.eq(FilterColumn::CompanyName, manufacturer.clone());
    }
    if let Some(category) = &args.therapeutic_category {
        filter = filter.eq(FilterColumn::TherapeuticCategory, category.clone());
    }

    let kpis = kpi_summary(&conn, &filter).context("kpi summary")?;
    let impact = manufacturer_impact(&conn, args.limit).context("manufacturer impact")?;
    print_report(&kpis, &impact);
    Ok(())
}

/// Run the full pipeline: normalize, load, views. Each stage is timed and
/// logged; a stage failure stops the remaining stages.
pub fn run_pipeline(args: &RunArgs) -> Result<()> {
    let pipeline_span = info_span!("pipeline");
    let _pipeline_guard = pipeline_span.enter();
    let pipeline_start = Instant::now();

    stage("normalize", || {
        let outcome = normalize(
            &args.ndc_json,
            &args.shortage_json,
            &args.data_dir,
            NormalizeOptions {
                strict: args.strict,
            },
        )?;
        report_outcome(&outcome)
    })?;

    stage("load", || {
        let mut conn = open_database(args.database.database.clone())?;
        let report = load(&mut conn, &args.data_dir)?;
        print_load_report(&report);
        Ok(())
    })?;

    stage("views", || {
        let conn = open_database(args.database.database.clone())?;
        create_views(&conn)?;
        Ok(())
    })?;

    info!(
        duration_ms = pipeline_start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(())
}

fn stage(name: &str, run: impl FnOnce() -> Result<()>) -> Result<()> {
    let start = Instant::now();
    info!(stage = name, "stage started");
    match run() {
        Ok(()) => {
            info!(
                stage = name,
                duration_ms = start.elapsed().as_millis(),
                "stage complete"
            );
            Ok(())
        }
        Err(error) => {
            tracing::error!(
                stage = name,
                duration_ms = start.elapsed().as_millis(),
                error = %error,
                "stage failed, stopping pipeline"
            );
            Err(error)
        }
    }
}
