use olc_reconcile::{ClientRelationshipsReport, ClientSection, Discrepancies, MemberEntry};
use olc_records::UNKNOWN;

use crate::text::{or_na, ReportText};

/// Default file name when the client report is saved.
pub const CLIENT_REPORT_FILE: &str = "client_relationships_analysis.txt";

pub fn render_client_relationships(report: &ClientRelationshipsReport, width: usize) -> String {
    let mut t = ReportText::new(width);

    t.section("CLIENT RELATIONSHIPS ANALYSIS").blank();
    t.line(format!("Total Clients: {}", report.totals.clients))
        .line(format!("Total PizzaStatuses: {}", report.totals.pizza_statuses))
        .line(format!("Total StatusTypes: {}", report.totals.status_types))
        .blank()
        .banner()
        .blank();

    for section in &report.clients {
        render_client(&mut t, section);
    }

    t.blank().section("STATISTICS").blank();
    render_discrepancies(&mut t, &report.discrepancies);

    t.blank().section("END OF REPORT");
    t.finish()
}

fn render_client(t: &mut ReportText, c: &ClientSection) {
    t.blank()
        .banner()
        .line(format!("CLIENT: {}", c.client_name))
        .line(format!("Client ID: {}", c.client_id))
        .line(format!("PizzaStatuses Count: {}", c.members.len()))
        .banner()
        .blank();

    for m in &c.members {
        render_member(t, m);
        t.blank();
    }
}

fn render_member(t: &mut ReportText, m: &MemberEntry) {
    let ps = &m.pizza_status;
    t.line(format!("  - PizzaStatus: {}", ps.status_name()))
        .line(format!("    ID: {}", or_na(ps.id.as_deref())))
        .line(format!("    Description: {}", ps.description_text()))
        .line(format!("    MobileAppOrder: {}", or_na(ps.mobile_app_order)))
        .line(format!(
            "    IsOperator: {}, IsProvider: {}",
            ps.is_operator, ps.is_provider
        ));

    if m.divisions.is_empty() {
        t.line("    -> NOT referenced by any StatusTypes");
        return;
    }

    t.line(format!(
        "    -> Referenced by {} StatusType(s):",
        m.reference_count()
    ));
    for d in &m.divisions {
        t.line(format!("       Division: {}", d.division));
        for st in &d.status_types {
            let deleted = if st.is_deleted { " [DELETED]" } else { "" };
            t.line(format!(
                "         * {} (Order: {}){}",
                st.status_name(),
                or_na(st.order_id),
                deleted
            ));
        }
    }
}

fn render_discrepancies(t: &mut ReportText, d: &Discrepancies) {
    let mut any = false;

    let s = &d.pizza_statuses_without_client;
    if !s.is_empty() {
        any = true;
        t.line(format!("! PizzaStatuses without ClientID: {}", s.total));
        for ps in &s.shown {
            t.line(format!(
                "   - {} (ID: {})",
                ps.status_name(),
                or_na(ps.id.as_deref())
            ));
        }
        t.remainder("   ", s.remainder()).blank();
    }

    let s = &d.status_types_without_pizza_status;
    if !s.is_empty() {
        any = true;
        t.line(format!("! StatusTypes without PizzaStatusID: {}", s.total));
        for st in &s.shown {
            t.line(format!("   - {} (Division: {})", st.status_name(), st.division()));
        }
        t.remainder("   ", s.remainder()).blank();
    }

    let s = &d.orphaned_pizza_statuses;
    if !s.is_empty() {
        any = true;
        t.line(format!(
            "! Orphaned PizzaStatuses (not referenced by StatusTypes): {}",
            s.total
        ));
        for o in &s.shown {
            t.line(format!(
                "   - {} - Client: {}",
                o.pizza_status.status_name(),
                o.client_name
            ));
        }
        t.remainder("   ", s.remainder()).blank();
    }

    let s = &d.dangling_pizza_status_refs;
    if !s.is_empty() {
        any = true;
        t.line(format!("! StatusTypes with unknown PizzaStatusID: {}", s.total));
        for st in &s.shown {
            t.line(format!(
                "   - {} (PizzaStatusID: {}, Division: {})",
                st.status_name(),
                st.pizza_status_id.as_deref().unwrap_or(UNKNOWN),
                st.division()
            ));
        }
        t.remainder("   ", s.remainder()).blank();
    }

    let s = &d.dangling_client_refs;
    if !s.is_empty() {
        any = true;
        t.line(format!("! PizzaStatuses with unknown ClientID: {}", s.total));
        for ps in &s.shown {
            t.line(format!(
                "   - {} (ClientID: {})",
                ps.status_name(),
                ps.client_id.as_deref().unwrap_or(UNKNOWN)
            ));
        }
        t.remainder("   ", s.remainder()).blank();
    }

    if !any {
        t.line("No discrepancies found.");
    }
}
