//! Formatted terminal output for `bikes summary`.
//!
//! We keep formatting code in one place so the engine stays free of
//! presentation details and output changes are localized.

use std::collections::BTreeSet;

use csv::StringRecord;

use crate::analysis::{Filter, GroupMean, Kpis, Subset};
use crate::app::pipeline::Dashboard;
use crate::domain::{Category, Observation};

/// Width of the bar column in grouped tables.
const BAR_WIDTH: usize = 30;
/// Widest a raw-table cell may get before it is truncated.
const MAX_CELL: usize = 12;

/// Format the full report: filter, KPIs, grouped means and row previews.
pub fn format_dashboard(dash: &Dashboard<'_>, preview_rows: usize) -> String {
    let mut out = String::new();

    out.push_str("=== Bike Sharing Analysis Dashboard ===\n");
    out.push_str(&format_filter(&dash.filter));
    out.push('\n');
    out.push_str(&format_kpis(&dash.kpis));

    out.push_str("\nAverage rentals by weather:\n");
    out.push_str(&format_groups(&dash.by_weather, |k| k.label().to_string()));

    out.push_str("\nAverage rentals by season:\n");
    out.push_str(&format_groups(&dash.by_season, |k| k.label().to_string()));

    out.push_str("\nAverage rentals: working days vs weekends:\n");
    out.push_str(&format_groups(&dash.by_day_type, |k| k.label().to_string()));

    out.push_str("\nAverage hourly rental pattern:\n");
    out.push_str(&format_groups(&dash.hourly_pattern, |h| format!("{h:02}:00")));

    if preview_rows > 0 {
        out.push_str(&format!(
            "\nDaily data (first {} of {} rows):\n",
            preview_rows.min(dash.daily.len()),
            dash.daily.len()
        ));
        out.push_str(&format_rows(&dash.daily, preview_rows));

        out.push_str(&format!(
            "\nHourly data (first {} of {} rows):\n",
            preview_rows.min(dash.hourly.len()),
            dash.hourly.len()
        ));
        out.push_str(&format_rows(&dash.hourly, preview_rows));
    }

    out
}

/// One-line description of the active filter.
pub fn format_filter(filter: &Filter) -> String {
    format!(
        "Dates: {} to {} | Seasons: {} | Weather: {} | Day types: {}\n",
        filter.date_min,
        filter.date_max,
        describe_selection(&filter.seasons),
        describe_selection(&filter.weather),
        describe_selection(&filter.day_types),
    )
}

/// The four KPI lines.
pub fn format_kpis(kpis: &Kpis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<24}{:>12}\n", "Total Bike Rentals", fmt_thousands(kpis.total)));
    out.push_str(&format!(
        "{:<24}{:>12}\n",
        "Average Daily Rentals",
        fmt_opt(kpis.average)
    ));
    out.push_str(&format!(
        "{:<24}{:>12}\n",
        "Max Daily Rentals",
        fmt_opt(kpis.max.map(u64::from))
    ));
    out.push_str(&format!(
        "{:<24}{:>12}\n",
        "Total Days Analyzed",
        fmt_thousands(kpis.count as u64)
    ));
    out
}

fn format_groups<K: Copy>(groups: &[GroupMean<K>], label: impl Fn(K) -> String) -> String {
    if groups.is_empty() {
        return "  (no data)\n".to_string();
    }

    let max = groups.iter().map(|g| g.mean).fold(0.0, f64::max);
    let mut out = String::new();
    for g in groups {
        out.push_str(
            format!(
                "  {:<16} {:>8} {}\n",
                label(g.key),
                fmt_thousands(g.mean.round() as u64),
                bar(g.mean, max, BAR_WIDTH)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn format_rows<R: Observation>(subset: &Subset<'_, R>, limit: usize) -> String {
    if subset.is_empty() {
        return "  (no rows)\n".to_string();
    }

    let shown: Vec<&StringRecord> = subset.iter().take(limit).map(Observation::raw).collect();
    let widths: Vec<usize> = (0..subset.headers.len())
        .map(|col| {
            let header = subset.headers.get(col).map_or(0, |h| h.chars().count());
            shown
                .iter()
                .filter_map(|r| r.get(col))
                .map(|v| v.chars().count())
                .fold(header, usize::max)
                .min(MAX_CELL)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_record(subset.headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join(" ").trim_end());
    out.push('\n');
    for record in shown {
        out.push_str(&format_record(record, &widths));
    }
    out
}

fn format_record(record: &StringRecord, widths: &[usize]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(col, w)| format!("{:<w$}", truncate(record.get(col).unwrap_or(""), *w), w = *w))
        .collect();
    let mut line = cells.join(" ").trim_end().to_string();
    line.push('\n');
    line
}

fn describe_selection<C: Category>(selected: &BTreeSet<C>) -> String {
    if selected.is_empty() {
        return "none".to_string();
    }
    if selected.len() == C::ALL.len() {
        return "all".to_string();
    }
    let labels: Vec<&str> = selected.iter().map(|c| c.label()).collect();
    labels.join(", ")
}

/// `1234567` -> `1,234,567`.
pub fn fmt_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Thousands-separated value, or `n/a` when the metric is undefined.
pub fn fmt_opt(v: Option<u64>) -> String {
    v.map(fmt_thousands).unwrap_or_else(|| "n/a".to_string())
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if !(value.is_finite() && max.is_finite()) || max <= 0.0 {
        return String::new();
    }
    let n = ((value / max) * width as f64).round() as usize;
    "█".repeat(n.min(width))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
