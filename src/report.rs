use std::fmt::Write;

use crate::stats::Chart;

/// Width of the longest bar, in characters
const BAR_WIDTH: usize = 40;

/// Render a chart as horizontal text bars.
///
/// ```text
/// 24-70mm  ████████████████████ 12 (60.0%)
/// 85mm     ██████████            6 (30.0%)
/// ```
///
/// When the chart has highlighted labels only those bars carry a value.
pub fn render_chart(chart: &Chart, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    if chart.bars.is_empty() {
        let _ = writeln!(out, "No photos");
        return out;
    }

    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let max_count = chart.bars.iter().map(|b| b.count).max().unwrap_or(0);

    for bar in &chart.bars {
        let len = scaled_len(bar.count, max_count);
        let mut line = format!(
            "{:<label_width$}  {:<bar_width$}",
            bar.label,
            "█".repeat(len),
            label_width = label_width,
            bar_width = BAR_WIDTH
        );
        if chart.is_annotated(bar) {
            let _ = write!(line, " {} ({:.1}%)", bar.count, bar.percentage);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let _ = writeln!(out, "{} photos", chart.total);
    out
}

fn scaled_len(count: usize, max_count: usize) -> usize {
    if max_count == 0 {
        return 0;
    }
    let len = (count as f64 / max_count as f64 * BAR_WIDTH as f64).round() as usize;
    // Keep non-empty buckets visible
    if count > 0 {
        len.max(1)
    } else {
        len
    }
}
