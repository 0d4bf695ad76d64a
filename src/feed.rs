use std::io::Write;
use tracing::debug;

use crate::{
    event::EventRecord,
    render::{LIST_END, RenderError, render_record},
};

/// Printed under the header when the feed is empty.
const NO_ACTIVITY: &str = "No recent activity.";

/// Error type for producing a report.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Formats a user's activity feed as a bulleted report.
///
/// Records are rendered in arrival order. Every record is rendered before the
/// report is assembled, so a record that fails to render fails the whole
/// report.
///
/// Entries are separated by `;` and the last one ends with `.`. An entry that
/// ends in a bulleted list already carries its closing `.`, so it gets no
/// extra punctuation.
pub fn format_feed(username: &str, records: &[EventRecord]) -> Result<String, RenderError> {
    debug!("Formatting {} events", records.len());
    let entries = records
        .iter()
        .map(render_record)
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = format!("{username}'s GitHub activity:\n");
    if entries.is_empty() {
        report.push_str(NO_ACTIVITY);
        return Ok(report);
    }

    let last = entries.len() - 1;
    for (ix, entry) in entries.iter().enumerate() {
        report.push_str("• ");
        match (ix == last, entry.ends_with(LIST_END)) {
            (false, false) => report.push_str(&format!("{entry};\n\n")),
            (false, true) => report.push_str(&format!("{entry}\n\n")),
            (true, false) => report.push_str(&format!("{entry}.")),
            (true, true) => report.push_str(entry.trim_end()),
        }
    }
    Ok(report)
}

/// Formats the feed and writes it to `out` in one go. Nothing is written when
/// formatting fails.
pub fn write_feed<W: Write>(
    out: &mut W,
    username: &str,
    records: &[EventRecord],
) -> Result<(), FeedError> {
    let report = format_feed(username, records)?;
    writeln!(out, "{report}")?;
    out.flush()?;
    Ok(())
}
