//! HTML class report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use quizforge_core::report::{ClassReport, ClassRow};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a class report.
pub fn generate_html(report: &ClassReport, title: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizforge class report: {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Class report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Bank: <strong>{}</strong> | {} students | {}</p>\n",
        html_escape(title),
        report.summary.student_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n<tbody>\n");
    html.push_str(&format!(
        "<tr><th>Average score</th><td>{:.2}</td></tr>\n",
        report.summary.mean_score
    ));
    html.push_str(&format!(
        "<tr><th>Average percentage</th><td>{:.1}%</td></tr>\n",
        report.summary.mean_percentage
    ));
    html.push_str(&format!(
        "<tr><th>Average time</th><td>{:.2} s</td></tr>\n",
        report.summary.mean_time_secs
    ));
    if let Some(top) = &report.summary.top_performer {
        html.push_str(&format!(
            "<tr><th>Top performer</th><td>{} (Score: {})</td></tr>\n",
            html_escape(&top.name),
            top.score
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.rows.is_empty() {
        html.push_str(&generate_bar_chart(&report.rows));
    }

    html.push_str("</section>\n");

    // Per-student results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Students</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">ID</th><th onclick=\"sortTable(1)\">Name</th><th onclick=\"sortTable(2)\">Score</th><th onclick=\"sortTable(3)\">Percentage</th><th onclick=\"sortTable(4)\">Time (s)</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.rows {
        let class = if r.percentage >= 50.0 { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}/{}</td><td>{:.1}%</td><td>{:.2}</td></tr>\n",
            class,
            r.student_id,
            html_escape(&r.name),
            r.score,
            r.total_possible_marks,
            r.percentage,
            r.elapsed_secs
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Category accuracy
    if !report.categories.is_empty() {
        html.push_str("<section class=\"categories\">\n");
        html.push_str("<h2>Categories</h2>\n");
        html.push_str("<table>\n<thead><tr><th>Category</th><th>Correct</th><th>Accuracy</th></tr></thead>\n<tbody>\n");
        for (category, (correct, presented)) in &report.categories {
            let accuracy = if *presented == 0 {
                0.0
            } else {
                *correct as f64 * 100.0 / *presented as f64
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}/{}</td><td>{:.1}%</td></tr>\n",
                html_escape(category),
                correct,
                presented,
                accuracy
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML class report to a file.
pub fn write_html_report(report: &ClassReport, title: &str, path: &Path) -> Result<()> {
    let html = generate_html(report, title);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(rows: &[ClassRow]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, row) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = (row.percentage / 100.0).clamp(0.0, 1.0);
        let width = (fraction * max_width as f64) as usize;

        let color = if fraction >= 0.8 {
            "#22c55e"
        } else if fraction >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&row.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            row.percentage
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    if (!isNaN(na) && !isNaN(nb)) return asc ? na - nb : nb - na;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::results::{ResultManager, StudentResult};

    fn make_test_report() -> ClassReport {
        let mut manager = ResultManager::new();
        for (name, score, total, secs) in [("Ann", 3, 4, 30.0), ("<Bob>", 1, 4, 12.5)] {
            let result = StudentResult {
                score,
                total_possible_marks: total,
                elapsed_secs: secs,
                ..StudentResult::empty(name)
            };
            manager.record(result).unwrap();
        }
        ClassReport::from_manager(&manager).unwrap()
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report, "General Knowledge");

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("General Knowledge"));
        assert!(html.contains("Ann"));
        assert!(html.contains("3/4"));
        assert!(html.contains("Top performer"));
    }

    #[test]
    fn html_escapes_names() {
        let report = make_test_report();
        let html = generate_html(&report, "t");
        assert!(html.contains("&lt;Bob&gt;"));
        assert!(!html.contains("<Bob>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("class.html");

        write_html_report(&report, "t", &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
