use crate::config::{FilterConfig, load_ignore_list};
use crate::error::Result;
use crate::filter::IgnoreFilter;
use crate::parsers::parse_report;
use std::io::Write;

/// Run the whole filter over one raw link checker report.
///
/// Writes the filtered report as pretty JSON to `out` when unresolved links
/// remain. Returns `true` when nothing is left to report.
pub fn run<W: Write>(raw_report: &str, config: &FilterConfig, out: &mut W) -> Result<bool> {
    let report = parse_report(raw_report, &config.parse_options())?;
    ::log::debug!(
        "Parsed report with {} pages and {} error links",
        report.len(),
        report.error_count()
    );

    let rules = load_ignore_list(config)?;
    let filtered = IgnoreFilter::new(rules, config.verbose).apply(&report)?;

    if filtered.is_empty() {
        if config.verbose {
            ::log::info!("No unresolved links left after filtering");
        }
        return Ok(true);
    }

    let pretty = serde_json::to_string_pretty(&filtered)?;
    writeln!(out, "{}", pretty)?;
    Ok(false)
}
