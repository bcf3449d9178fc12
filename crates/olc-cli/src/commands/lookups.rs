use anyhow::Result;
use olc_analytics::{find_status_types, query_cert_types, CertTypeQuery};
use olc_records::{CertType, StatusType};
use olc_report::{render_cert_type_query, render_status_type_search};

use super::RunContext;

pub fn run_cert_types(
    ctx: &RunContext,
    division: &str,
    pizza_status_ids: &[String],
    active_only: bool,
) -> Result<()> {
    let cert_types: Vec<CertType> = ctx.load()?;
    let groups = query_cert_types(
        &cert_types,
        CertTypeQuery {
            division,
            pizza_status_ids,
            active_only,
        },
    );
    print!(
        "{}",
        render_cert_type_query(&groups, division, active_only, ctx.width())
    );
    Ok(())
}

pub fn run_status_types(ctx: &RunContext, division: &str, needle: &str) -> Result<()> {
    let status_types: Vec<StatusType> = ctx.load()?;
    let hits = find_status_types(&status_types, division, needle);
    print!(
        "{}",
        render_status_type_search(&hits, division, needle, ctx.width())
    );
    Ok(())
}
