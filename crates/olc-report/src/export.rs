use anyhow::{Context, Result};
use olc_analytics::OperatorDistribution;

/// File name of the division/status export.
pub const OPERATOR_SUMMARY_CSV: &str = "operator_summary.csv";

const CSV_HEADER: [&str; 3] = ["Division", "Status", "Count"];

/// `Division,Status,Count` rows with RFC 4180 quoting.
pub fn distribution_csv(dist: &OperatorDistribution) -> Result<String> {
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(Vec::new());

    // Written by hand so an empty distribution still gets a header.
    w.write_record(CSV_HEADER).context("write csv header failed")?;
    for row in dist.rows() {
        w.serialize(&row)
            .with_context(|| format!("write csv row failed: {}/{}", row.division, row.status))?;
    }

    let bytes = w.into_inner().context("flush csv failed")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}
