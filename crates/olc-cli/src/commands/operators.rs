use anyhow::{bail, Result};
use olc_analytics::{
    certification_coverage, diagnose_operator, operator_distribution, overdue_summary,
    tracker_coverage,
};
use olc_records::{Certification, Operator, StatusTracker, StatusType};
use olc_report::{
    distribution_csv, render_certification_check, render_days_in_status,
    render_operator_summary, render_status_diagnostics, OPERATOR_REPORT_FILE,
    OPERATOR_SUMMARY_CSV,
};

use super::{emit, write_into, InputCounts, RunContext};

pub fn run_summary(ctx: &RunContext, save: bool, csv: bool) -> Result<()> {
    let operators: Vec<Operator> = ctx.load()?;
    let certifications: Vec<Certification> = ctx.load()?;
    let tracker: Vec<StatusTracker> = ctx.load()?;

    let dist = operator_distribution(&operators);
    let certs = certification_coverage(
        &operators,
        &certifications,
        ctx.settings.report.top_cert_types,
    );
    let history = tracker_coverage(&operators, &tracker);

    let body = render_operator_summary(&dist, &certs, &history, ctx.width());
    let csv_body = if csv { Some(distribution_csv(&dist)?) } else { None };

    let out_dir = &ctx.settings.output_dir;
    if save {
        let counts = InputCounts::default()
            .add(&operators)
            .add(&certifications)
            .add(&tracker);
        let companions = csv_body
            .map(|c| vec![(OPERATOR_SUMMARY_CSV, c)])
            .unwrap_or_default();
        let report_path = out_dir.join(OPERATOR_REPORT_FILE);
        return emit(
            ctx,
            Some(report_path.as_path()),
            "operator-summary",
            &body,
            counts,
            companions,
        );
    }

    print!("{body}");
    if let Some(c) = csv_body {
        let path = write_into(out_dir, OPERATOR_SUMMARY_CSV, &c)?;
        tracing::info!(path = %path.display(), "operator summary exported");
    }
    Ok(())
}

pub fn run_cert_check(ctx: &RunContext) -> Result<()> {
    let operators: Vec<Operator> = ctx.load()?;
    let certifications: Vec<Certification> = ctx.load()?;

    let certs = certification_coverage(
        &operators,
        &certifications,
        ctx.settings.report.top_cert_types,
    );
    print!("{}", render_certification_check(&certs, ctx.width()));
    Ok(())
}

pub fn run_days_in_status(ctx: &RunContext, operator_id: Option<&str>) -> Result<()> {
    let operators: Vec<Operator> = ctx.load()?;
    let status_types: Vec<StatusType> = ctx.load()?;
    let tracker: Vec<StatusTracker> = ctx.load()?;
    let overdue_days = ctx.settings.report.overdue_days;

    let body = match operator_id {
        Some(id) => {
            let Some(op) = operators.iter().find(|o| o.id.as_deref() == Some(id)) else {
                bail!("operator not found: {id}");
            };
            let d = diagnose_operator(op, &status_types, &tracker, ctx.as_of, overdue_days);
            render_status_diagnostics(&d, ctx.width())
        }
        None => {
            let s = overdue_summary(&operators, &status_types, &tracker, ctx.as_of, overdue_days);
            tracing::info!(
                operators = s.operators.len(),
                overdue = s.overdue,
                unknown = s.unknown,
                "days in status computed"
            );
            render_days_in_status(&s, ctx.width())
        }
    };

    print!("{body}");
    Ok(())
}
