use crate::error::Result;
use crate::render::{build_stats_html, build_subdivision_cards_html, build_table_body_html, js_list};
use crate::template::{replace_array_const, replace_between, replace_once, replace_region};
use crate::types::{DashboardData, PreviewRow, Record};
use crate::util::{
    format_as_of_date, format_daily_chart_label, format_indian_number, format_surveyed_header_date,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tabled::{settings::Style, Table};

const STATS_START: &str = r#"    <div class="stats-grid">"#;
const STATS_END: &str = "\n\n    <h2 style=\"margin: 30px 0 20px 0; padding-left: 10px;\">";
const CARDS_START: &str = r#"    <div class="subdivision-grid">"#;
const CARDS_END: &str = "\n\n    <!-- Charts: survey, approval, surveyors, daily progress -->";
const TBODY_OPEN: &str = "            <tbody>";
const TBODY_CLOSE: &str = "            </tbody>";

static AS_OF_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<p>Ludhiana District \| Data as of [^<]+</p>").expect("valid as-of regex")
});
static SURVEYED_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<th>Surveyed \([^)]+\)</th>").expect("valid header regex"));
static DAILY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"label: 'Plots Surveyed \([^']+\)'").expect("valid label regex"));

/// Apply every substitution to `html` in memory and return the new document.
pub fn render_document(html: &str, data: &DashboardData) -> Result<String> {
    let rows = &data.subdivisions;
    let totals = &data.totals;

    let html = replace_once(
        html,
        &AS_OF_LINE,
        &format!(
            "<p>Ludhiana District | Data as of {}</p>",
            format_as_of_date(data.report_date)
        ),
        "as-of date line",
    )?;
    tracing::debug!("Replaced as-of date line");

    let html = replace_between(&html, STATS_START, STATS_END, &build_stats_html(totals))?;
    let html = replace_between(&html, CARDS_START, CARDS_END, &build_subdivision_cards_html(rows))?;
    tracing::debug!("Replaced stat cards and {} subdivision cards", rows.len());

    let html = replace_once(
        &html,
        &SURVEYED_HEADER,
        &format!(
            "<th>Surveyed ({})</th>",
            format_surveyed_header_date(data.report_date)
        ),
        "surveyed column header",
    )?;
    let html = replace_region(&html, TBODY_OPEN, TBODY_CLOSE, &build_table_body_html(rows, totals))?;
    tracing::debug!("Replaced table body");

    let arrays: [(&'static str, String); 6] = [
        ("subdivisions", js_list(rows, |r| format!("'{}'", r.name))),
        ("surveyPercentages", js_list(rows, |r| format!("{:.2}", r.survey_percent))),
        ("approvalPercentages", js_list(rows, |r| format!("{:.2}", r.approval_percent))),
        ("totalSurveyors", js_list(rows, |r| r.total_surveyors)),
        ("inField", js_list(rows, |r| r.in_field)),
        ("dailyProgress", js_list(rows, |r| r.surveyed_today)),
    ];
    let mut html = html;
    for (name, values) in &arrays {
        html = replace_array_const(&html, *name, values)?;
    }
    tracing::debug!("Replaced {} chart arrays", arrays.len());

    replace_once(
        &html,
        &DAILY_LABEL,
        &format!(
            "label: 'Plots Surveyed ({})'",
            format_daily_chart_label(data.report_date)
        ),
        "daily progress chart label",
    )
}

/// Rewrite the dashboard at `path` in place. Nothing is written unless every
/// substitution succeeded.
pub fn update_html(path: &Path, data: &DashboardData) -> Result<()> {
    let html = std::fs::read_to_string(path)?;
    let updated = render_document(&html, data)?;
    std::fs::write(path, &updated)?;
    tracing::info!("Wrote {} bytes to {}", updated.len(), path.display());
    Ok(())
}

fn preview_row(r: &Record) -> PreviewRow {
    PreviewRow {
        name: r.name.clone(),
        uploaded_villages: r.uploaded_villages,
        uploaded_plots: format_indian_number(r.uploaded_plots),
        daily_target: format_indian_number(r.daily_target),
        surveyed_today: format_indian_number(r.surveyed_today),
        total_surveyed: format_indian_number(r.total_surveyed),
        survey_percent: format!("{:.2}", r.survey_percent),
        approved: format_indian_number(r.approved),
        approval_percent: format!("{:.2}", r.approval_percent),
        total_surveyors: r.total_surveyors,
        in_field: r.in_field,
    }
}

/// Markdown table of the extracted snapshot, totals last.
pub fn preview_table(data: &DashboardData) -> String {
    let rows: Vec<PreviewRow> = data
        .subdivisions
        .iter()
        .chain(std::iter::once(&data.totals))
        .map(preview_row)
        .collect();
    Table::new(rows).with(Style::markdown()).to_string()
}
