//! Append-only, human-readable results log.
//!
//! One line per saved attempt:
//! `Name: <name> | Score: <score>/<total> | Time: <secs> sec`

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::results::{ResultManager, StudentResult};

/// Format one log line (without the trailing newline).
///
/// Control characters in the name are replaced with spaces so every attempt
/// stays on exactly one line.
pub fn format_line(result: &StudentResult) -> String {
    let name: String = result
        .student_name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    format!(
        "Name: {} | Score: {}/{} | Time: {:.0} sec",
        name, result.score, result.total_possible_marks, result.elapsed_secs
    )
}

/// Append every not-yet-logged record to `path` and mark them logged.
///
/// Returns the number of lines written. Nothing is marked unless the
/// whole batch was written and flushed.
pub fn append_unlogged(manager: &mut ResultManager, path: &Path) -> Result<usize> {
    let lines: Vec<String> = manager
        .unlogged()
        .map(|r| format_line(&r.result))
        .collect();
    if lines.is_empty() {
        return Ok(0);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open results log: {}", path.display()))?;

    let mut buf = String::new();
    for line in &lines {
        buf.push_str(line);
        buf.push('\n');
    }
    file.write_all(buf.as_bytes())
        .and_then(|_| file.flush())
        .with_context(|| format!("failed to write results log: {}", path.display()))?;

    manager.mark_all_logged();
    tracing::debug!(path = %path.display(), lines = lines.len(), "results appended");
    Ok(lines.len())
}
