use olc_analytics::{
    CertTypeGroup, CertificationCoverage, DaysInStatus, OperatorDistribution, OverdueSummary,
    StatusDiagnostics, TrackerCoverage,
};
use olc_records::StatusType;

use crate::text::{clip, or_na, ReportText};

/// Default file name when the operator summary is saved.
pub const OPERATOR_REPORT_FILE: &str = "operator_summary.txt";

const DATE_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Operator summary
// ---------------------------------------------------------------------------

pub fn render_operator_summary(
    dist: &OperatorDistribution,
    certs: &CertificationCoverage,
    tracker: &TrackerCoverage,
    width: usize,
) -> String {
    let mut t = ReportText::new(width);

    t.section("OPERATOR DATA SUMMARY").blank();
    t.line(format!("Total Operators: {}", dist.total)).blank();

    t.section("SUMMARY BY DIVISION");
    t.line(format!("{:<30} {:>10}", "Division", "Count")).rule();
    for (division, count) in &dist.by_division {
        t.line(format!("{division:<30} {count:>10}"));
    }
    t.blank();

    t.section("SUMMARY BY STATUS");
    t.line(format!("{:<40} {:>10}", "Status", "Count")).rule();
    for (status, count) in &dist.by_status {
        t.line(format!("{status:<40} {count:>10}"));
    }
    t.blank();

    t.section("DETAILED BREAKDOWN: DIVISION + STATUS");
    t.line(format!("{:<30} {:<40} {:>10}", "Division", "Status", "Count"))
        .rule();
    for row in dist.rows() {
        t.line(format!(
            "{:<30} {:<40} {:>10}",
            row.division, row.status, row.count
        ));
    }
    t.blank();

    t.section("CERTIFICATION SUMMARY").blank();
    t.line(format!("Total Certifications: {}", certs.total_certifications))
        .line(format!("  Operators with certifications: {}", certs.operators_with))
        .line(format!(
            "  Operators without certifications: {}",
            certs.operators_without
        ))
        .line(format!(
            "  Average certifications per operator: {}",
            certs.per_operator.average_display()
        ))
        .line(format!(
            "  Max certifications (single operator): {}",
            certs.per_operator.max
        ))
        .line(format!(
            "  Min certifications (single operator): {}",
            certs.per_operator.min
        ))
        .blank();

    t.line(format!("Top {} Certification Types:", certs.top_names.len()))
        .line(format!("{:<50} {:>10}", "Certification Name", "Count"))
        .rule();
    for n in &certs.top_names {
        t.line(format!("{:<50} {:>10}", clip(&n.name, 48), n.count));
    }
    t.blank();

    t.section("STATUS TRACKER SUMMARY").blank();
    t.line(format!("Total Status Tracker Records: {}", tracker.total_records))
        .line(format!(
            "  Operators with status history: {}",
            tracker.operators_with
        ))
        .line(format!(
            "  Operators without status history: {}",
            tracker.operators_without
        ))
        .line(format!(
            "  Average status changes per operator: {}",
            tracker.per_operator.average_display()
        ))
        .line(format!(
            "  Max status changes (single operator): {}",
            tracker.per_operator.max
        ))
        .blank();

    t.section("END OF REPORT");
    t.finish()
}

/// Certification linkage check: who has certifications, who does not.
pub fn render_certification_check(certs: &CertificationCoverage, width: usize) -> String {
    let mut t = ReportText::new(width);
    t.section("OPERATOR CERTIFICATION CHECK").blank();
    t.line(format!(
        "Operators with at least one certification: {}",
        certs.operators_with
    ))
    .line(format!(
        "Operators with zero certifications: {}",
        certs.operators_without
    ))
    .line(format!("Total Certifications: {}", certs.total_certifications))
    .line(format!(
        "Unique Operators linked in Certifications: {}",
        certs.unique_operator_ids
    ))
    .blank();

    t.line(format!(
        "Sample (first {} operators with certifications):",
        certs.certified_sample.len()
    ));
    for s in &certs.certified_sample {
        t.line(format!(
            "  - {} ({}): {} certs",
            s.name, s.division, s.certifications
        ));
    }
    t.finish()
}

// ---------------------------------------------------------------------------
// Days in status
// ---------------------------------------------------------------------------

fn outcome_text(o: &DaysInStatus) -> String {
    match o {
        DaysInStatus::Days {
            days,
            overdue: true,
            ..
        } => format!("{days} days OVERDUE"),
        DaysInStatus::Days { days, .. } => format!("{days} days"),
        DaysInStatus::NoMatchingStatusType => "Unknown (no matching StatusType)".to_string(),
        DaysInStatus::NoTrackerRecords { .. } => "Unknown (no tracker records)".to_string(),
    }
}

pub fn render_days_in_status(summary: &OverdueSummary, width: usize) -> String {
    let mut t = ReportText::new(width);
    t.section("DAYS IN STATUS").blank();
    t.line(format!("As of: {}", summary.as_of.format(DATE_FMT)))
        .line(format!("Overdue threshold: {} days", summary.overdue_days))
        .line(format!("Operators: {}", summary.operators.len()))
        .line(format!("  Overdue: {}", summary.overdue))
        .line(format!("  Unknown: {}", summary.unknown))
        .blank();

    t.line(format!(
        "{:<30} {:<15} {:<40} {}",
        "Operator", "Division", "Status", "Days in Status"
    ))
    .rule();
    for r in &summary.operators {
        t.line(format!(
            "{:<30} {:<15} {:<40} {}",
            clip(&r.name, 29),
            clip(&r.division, 14),
            clip(&r.status, 39),
            outcome_text(&r.outcome)
        ));
    }
    t.blank().section("END OF REPORT");
    t.finish()
}

pub fn render_status_diagnostics(d: &StatusDiagnostics, width: usize) -> String {
    let op = &d.operator;
    let mut t = ReportText::new(width);
    t.section("STATUS TRACKER ANALYSIS").blank();

    t.line("Operator:")
        .line(format!("   ID: {}", or_na(op.id.as_deref())))
        .line(format!("   Name: {}", op.display_name()))
        .line(format!("   Status: {}", or_na(op.status.as_deref())))
        .line(format!("   StatusName: {}", or_na(op.status_name.as_deref())))
        .line(format!("   DivisionID: {}", or_na(op.division_id.as_deref())))
        .blank();

    t.line(format!(
        "StatusTracker records for this operator: {}",
        d.tracker_record_count
    ));
    if !d.recent_records.is_empty() {
        t.line(format!(
            "   Recent records ({} most recent):",
            d.recent_records.len()
        ));
        for (i, r) in d.recent_records.iter().enumerate() {
            t.line(format!("   {}. StatusID: {}", i + 1, or_na(r.status_id.as_deref())))
                .line(format!(
                    "      Date: {}",
                    or_na(r.date.map(|v| v.format(DATE_FMT)))
                ))
                .line(format!("      DivisionID: {}", or_na(r.division_id.as_deref())));
        }
    }
    t.blank();

    match &d.matched_status_type {
        Some(st) => {
            t.line("Matching StatusType:")
                .line(format!("   ID: {}", or_na(st.id.as_deref())))
                .line(format!("   Status: {}", st.status_name()))
                .line(format!("   DivisionID: {}", st.division()))
                .line(format!(
                    "   PizzaStatusID: {}",
                    or_na(st.pizza_status_id.as_deref())
                ));
        }
        None => {
            t.line("No StatusType matches the operator's Status in its division.");
        }
    }
    t.line(format!("Days in status: {}", outcome_text(&d.outcome)));
    if let DaysInStatus::Days { since, .. } = &d.outcome {
        t.line(format!("   Since: {}", since.format(DATE_FMT)));
    }
    t.blank();

    if !d.status_ids.is_empty() {
        t.line(format!(
            "Unique StatusIDs in StatusTracker for this operator ({}):",
            d.status_ids.total
        ));
        for r in &d.status_ids.shown {
            t.line(format!(
                "   {} -> {}",
                r.status_id,
                r.resolved.as_deref().unwrap_or("(no matching StatusType)")
            ));
        }
        t.remainder("   ", d.status_ids.remainder()).blank();
    }

    t.line("Checks:");
    let mut clean = true;
    if let Some(found) = &d.case_only_match {
        clean = false;
        t.line("   ! Case sensitivity issue:")
            .line(format!("      Operator Status: '{}'", or_na(op.status.as_deref())))
            .line(format!("      StatusType Status: '{found}'"));
    }
    if d.status_name_mismatch {
        clean = false;
        t.line("   ! Status and StatusName differ:")
            .line(format!("      Status: {}", or_na(op.status.as_deref())))
            .line(format!("      StatusName: {}", or_na(op.status_name.as_deref())));
    }
    if clean {
        t.line("   none");
    }

    t.blank().section("END OF REPORT");
    t.finish()
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn render_cert_type_query(
    groups: &[CertTypeGroup],
    division: &str,
    active_only: bool,
    width: usize,
) -> String {
    let mut t = ReportText::new(width);
    t.section("CERT TYPE QUERY").blank();

    for g in groups {
        t.line(format!("WHERE DivisionID = '{division}'"))
            .line(format!("  AND PizzaStatusID = '{}'", g.pizza_status_id));
        if active_only {
            t.line("  AND isDeleted = false");
        }
        t.line(format!("Found {} matching CertType(s):", g.cert_types.len()))
            .blank();
        if g.cert_types.is_empty() {
            t.line("   No matching records found.").blank();
        }
        for (i, ct) in g.cert_types.iter().enumerate() {
            t.line(format!(
                "{}. {}",
                i + 1,
                ct.certification.as_deref().unwrap_or("N/A")
            ))
            .line(format!("   ID: {}", or_na(ct.id.as_deref())))
            .line(format!("   Description: {}", or_na(ct.description.as_deref())))
            .line(format!("   DivisionID: {}", or_na(ct.division_id.as_deref())))
            .line(format!(
                "   PizzaStatusID: {}",
                or_na(ct.pizza_status_id.as_deref())
            ))
            .line(format!("   isDeleted: {}", ct.is_deleted))
            .blank();
        }
        t.rule();
    }
    t.finish()
}

pub fn render_status_type_search(
    hits: &[StatusType],
    division: &str,
    needle: &str,
    width: usize,
) -> String {
    let mut t = ReportText::new(width);
    t.section(&format!(
        "StatusTypes for '{division}' with '{needle}' in Status: {}",
        hits.len()
    ));
    for st in hits {
        t.blank()
            .line(format!("Status: {}", st.status_name()))
            .line(format!("  ID: {}", or_na(st.id.as_deref())))
            .line(format!("  PizzaStatusID: {}", or_na(st.pizza_status_id.as_deref())))
            .line(format!("  DivisionID: {}", st.division()))
            .line(format!("  OrderID: {}", or_na(st.order_id)))
            .line(format!("  isDeleted: {}", st.is_deleted));
    }
    t.finish()
}
