use std::path::PathBuf;

use anyhow::{Context, Result};
use olc_reconcile::{build_client_relationships, RelationshipInputs};
use olc_records::{Client, PizzaStatus, StatusType};
use olc_report::{render_client_relationships, CLIENT_REPORT_FILE};

use super::{emit, InputCounts, RunContext};
use crate::OutputFormat;

pub fn run(
    ctx: &RunContext,
    out: Option<PathBuf>,
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    // All inputs load before anything renders; a missing file aborts here.
    let clients: Vec<Client> = ctx.load()?;
    let pizza_statuses: Vec<PizzaStatus> = ctx.load()?;
    let status_types: Vec<StatusType> = ctx.load()?;

    let report = build_client_relationships(
        RelationshipInputs {
            clients: &clients,
            pizza_statuses: &pizza_statuses,
            status_types: &status_types,
        },
        ctx.settings.report.samples,
    );

    let body = match format {
        OutputFormat::Text => render_client_relationships(&report, ctx.width()),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("serialize report failed")?;
            format!("{json}\n")
        }
    };

    let target = out.or_else(|| {
        save.then(|| {
            let path = ctx.settings.output_dir.join(CLIENT_REPORT_FILE);
            match format {
                OutputFormat::Text => path,
                OutputFormat::Json => path.with_extension("json"),
            }
        })
    });

    let d = &report.discrepancies;
    tracing::info!(
        clients = report.clients.len(),
        pizza_statuses = report.totals.pizza_statuses,
        status_types = report.totals.status_types,
        orphaned = d.orphaned_pizza_statuses.total,
        without_pizza_status = d.status_types_without_pizza_status.total,
        "client relationships analyzed"
    );

    let counts = InputCounts::default()
        .add(&clients)
        .add(&pizza_statuses)
        .add(&status_types);
    emit(
        ctx,
        target.as_deref(),
        "client-relationships",
        &body,
        counts,
        Vec::new(),
    )
}
