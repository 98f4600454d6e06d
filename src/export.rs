use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use crate::config::Config;
use crate::plan::Course;
use crate::timeline::{Report, recompute};

/// Pretty JSON for a computed report. Non-finite numbers encode as `null`.
pub fn report_to_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).wrap_err("failed to encode timeline")
}

/// Headless pass: recompute `course` with the configured layout and encode it.
pub fn dump_report(course: &Course, config: &Config) -> Result<String> {
    let report = recompute(course, &config.timeline.layout_options());
    report_to_json(&report)
}
