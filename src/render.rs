// HTML fragments for the dashboard regions that get replaced on every run.
//
// Each builder returns the full region including its own opening anchor, so
// the same markers are still there for the next run.
use crate::types::Record;
use crate::util::format_indian_number as indian;

pub fn survey_bar_class(percent: f64) -> &'static str {
    if percent >= 10.0 {
        "high"
    } else if percent >= 7.0 {
        "medium"
    } else {
        "low"
    }
}

pub fn approval_bar_class(percent: f64) -> &'static str {
    if percent >= 15.0 {
        "high"
    } else if percent >= 10.0 {
        "medium"
    } else {
        "low"
    }
}

pub fn survey_badge_class(percent: f64) -> &'static str {
    if percent >= 10.0 {
        "success"
    } else if percent >= 7.0 {
        "warning"
    } else {
        "danger"
    }
}

pub fn approval_badge_class(percent: f64) -> &'static str {
    if percent >= 20.0 {
        "success"
    } else if percent >= 10.0 {
        "warning"
    } else {
        "danger"
    }
}

pub fn build_stats_html(totals: &Record) -> String {
    format!(
        r#"    <div class="stats-grid">
        <div class="stat-card">
            <div class="stat-label">Total Uploaded Plots</div>
            <div class="stat-value">{uploaded}</div>
            <div class="stat-subtext">Across all sub-divisions</div>
        </div>
        <div class="stat-card success">
            <div class="stat-label">Total Surveyed</div>
            <div class="stat-value">{surveyed}</div>
            <div class="stat-subtext">{survey_pct:.2}% completion</div>
        </div>
        <div class="stat-card warning">
            <div class="stat-label">Approved by Supervisor</div>
            <div class="stat-value">{approved}</div>
            <div class="stat-subtext">{approval_pct:.2}% of surveyed</div>
        </div>
        <div class="stat-card danger">
            <div class="stat-label">Daily Target Required</div>
            <div class="stat-value">{target}</div>
            <div class="stat-subtext">To complete by 31st March</div>
        </div>
    </div>"#,
        uploaded = indian(totals.uploaded_plots),
        surveyed = indian(totals.total_surveyed),
        survey_pct = totals.survey_percent,
        approved = indian(totals.approved),
        approval_pct = totals.approval_percent,
        target = indian(totals.daily_target),
    )
}

fn subdivision_card(row: &Record) -> String {
    format!(
        r#"        <div class="subdivision-card">
            <h3>{name}</h3>
            <div class="progress-section">
                <div class="progress-label">
                    <span>Survey Progress</span>
                    <span><strong>{survey_pct:.2}%</strong></span>
                </div>
                <div class="progress-bar">
                    <div class="progress-fill {survey_class}" style="width: {survey_pct:.2}%;"></div>
                </div>
            </div>
            <div class="progress-section">
                <div class="progress-label">
                    <span>Approval Rate</span>
                    <span><strong>{approval_pct:.2}%</strong></span>
                </div>
                <div class="progress-bar">
                    <div class="progress-fill {approval_class}" style="width: {approval_pct:.2}%;"></div>
                </div>
            </div>
            <div class="detail-grid">
                <div class="detail-item">
                    <span class="detail-label">Total Plots</span>
                    <span class="detail-value">{plots}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">Surveyed Plots</span>
                    <span class="detail-value">{surveyed}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">Approved</span>
                    <span class="detail-value">{approved}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">Surveyors</span>
                    <span class="detail-value">{surveyors}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">In Field</span>
                    <span class="detail-value">{in_field}</span>
                </div>
            </div>
        </div>"#,
        name = row.name,
        survey_pct = row.survey_percent,
        survey_class = survey_bar_class(row.survey_percent),
        approval_pct = row.approval_percent,
        approval_class = approval_bar_class(row.approval_percent),
        plots = indian(row.uploaded_plots),
        surveyed = indian(row.total_surveyed),
        approved = indian(row.approved),
        surveyors = row.total_surveyors,
        in_field = row.in_field,
    )
}

pub fn build_subdivision_cards_html(rows: &[Record]) -> String {
    let mut blocks = vec![r#"    <div class="subdivision-grid">"#.to_string()];
    blocks.extend(rows.iter().map(subdivision_card));
    blocks.push("    </div>".to_string());
    blocks.join("\n")
}

fn table_row(row: &Record) -> String {
    format!(
        r#"                <tr>
                    <td><strong>{name}</strong></td>
                    <td>{villages}</td>
                    <td>{plots}</td>
                    <td>{target}</td>
                    <td>{today}</td>
                    <td>{surveyed}</td>
                    <td><span class="badge {survey_badge}">{survey_pct:.2}%</span></td>
                    <td>{approved}</td>
                    <td><span class="badge {approval_badge}">{approval_pct:.2}%</span></td>
                    <td>{surveyors}</td>
                    <td>{in_field}</td>
                </tr>"#,
        name = row.name,
        villages = row.uploaded_villages,
        plots = indian(row.uploaded_plots),
        target = indian(row.daily_target),
        today = indian(row.surveyed_today),
        surveyed = indian(row.total_surveyed),
        survey_badge = survey_badge_class(row.survey_percent),
        survey_pct = row.survey_percent,
        approved = indian(row.approved),
        approval_badge = approval_badge_class(row.approval_percent),
        approval_pct = row.approval_percent,
        surveyors = row.total_surveyors,
        in_field = row.in_field,
    )
}

fn totals_row(totals: &Record) -> String {
    format!(
        r#"                <tr>
                    <td><strong>Total</strong></td>
                    <td><strong>{villages}</strong></td>
                    <td><strong>{plots}</strong></td>
                    <td><strong>{target}</strong></td>
                    <td><strong>{today}</strong></td>
                    <td><strong>{surveyed}</strong></td>
                    <td><span class="badge {survey_badge}">{survey_pct:.2}%</span></td>
                    <td><strong>{approved}</strong></td>
                    <td><span class="badge {approval_badge}">{approval_pct:.2}%</span></td>
                    <td><strong>{surveyors}</strong></td>
                    <td><strong>{in_field}</strong></td>
                </tr>"#,
        villages = totals.uploaded_villages,
        plots = indian(totals.uploaded_plots),
        target = indian(totals.daily_target),
        today = indian(totals.surveyed_today),
        surveyed = indian(totals.total_surveyed),
        survey_badge = survey_badge_class(totals.survey_percent),
        survey_pct = totals.survey_percent,
        approved = indian(totals.approved),
        approval_badge = approval_badge_class(totals.approval_percent),
        approval_pct = totals.approval_percent,
        surveyors = totals.total_surveyors,
        in_field = totals.in_field,
    )
}

pub fn build_table_body_html(rows: &[Record], totals: &Record) -> String {
    let mut lines = vec!["            <tbody>".to_string()];
    lines.extend(rows.iter().map(table_row));
    lines.push(totals_row(totals));
    lines.push("            </tbody>".to_string());
    lines.join("\n")
}

/// Comma-separated items for a JS array literal.
pub fn js_list<T, F>(rows: &[Record], item: F) -> String
where
    F: Fn(&Record) -> T,
    T: std::fmt::Display,
{
    rows.iter()
        .map(|r| item(r).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, survey: f64, approval: f64) -> Record {
        Record {
            name: name.to_string(),
            uploaded_villages: 12,
            uploaded_plots: 123456,
            daily_target: 1500,
            surveyed_today: 320,
            total_surveyed: 12000,
            survey_percent: survey,
            approved: 2500,
            approval_percent: approval,
            total_surveyors: 40,
            in_field: 31,
        }
    }

    #[test]
    fn survey_thresholds() {
        assert_eq!(survey_bar_class(10.0), "high");
        assert_eq!(survey_bar_class(9.99), "medium");
        assert_eq!(survey_bar_class(7.0), "medium");
        assert_eq!(survey_bar_class(6.99), "low");
        assert_eq!(survey_badge_class(10.0), "success");
        assert_eq!(survey_badge_class(7.5), "warning");
        assert_eq!(survey_badge_class(0.0), "danger");
    }

    #[test]
    fn approval_thresholds() {
        assert_eq!(approval_bar_class(15.0), "high");
        assert_eq!(approval_bar_class(14.0), "medium");
        assert_eq!(approval_bar_class(9.99), "low");
        assert_eq!(approval_badge_class(20.0), "success");
        assert_eq!(approval_badge_class(19.99), "warning");
        assert_eq!(approval_badge_class(10.0), "warning");
        assert_eq!(approval_badge_class(9.0), "danger");
    }

    #[test]
    fn stats_cards_use_indian_grouping() {
        let html = build_stats_html(&record("Total", 9.72, 20.833));
        assert!(html.starts_with(r#"    <div class="stats-grid">"#));
        assert!(html.contains(r#"<div class="stat-value">1,23,456</div>"#));
        assert!(html.contains(r#"<div class="stat-value">12,000</div>"#));
        assert!(html.contains("9.72% completion"));
        assert!(html.contains("20.83% of surveyed"));
        assert!(html.contains(r#"<div class="stat-value">1,500</div>"#));
        assert!(html.ends_with("    </div>"));
    }

    #[test]
    fn cards_carry_bar_classes() {
        let html = build_subdivision_cards_html(&[record("Raikot", 12.5, 8.0)]);
        assert!(html.contains("<h3>Raikot</h3>"));
        assert!(html.contains(r#"<div class="progress-fill high" style="width: 12.50%;"></div>"#));
        assert!(html.contains(r#"<div class="progress-fill low" style="width: 8.00%;"></div>"#));
        assert!(html.contains(r#"<span class="detail-value">40</span>"#));
        assert_eq!(html.matches("subdivision-card\"").count(), 1);
    }

    #[test]
    fn table_body_ends_with_totals() {
        let rows = [record("Raikot", 12.5, 25.0), record("Khanna", 5.0, 12.0)];
        let html = build_table_body_html(&rows, &record("Total", 8.0, 20.0));
        assert!(html.starts_with("            <tbody>\n"));
        assert!(html.ends_with("\n            </tbody>"));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains(r#"<span class="badge success">12.50%</span>"#));
        assert!(html.contains(r#"<span class="badge warning">12.00%</span>"#));
        assert!(html.contains("<td><strong>Total</strong></td>"));
        assert!(html.contains("<td><strong>1,23,456</strong></td>"));
    }

    #[test]
    fn js_lists() {
        let rows = [record("Raikot", 12.5, 25.0), record("Khanna", 5.0, 12.345)];
        assert_eq!(js_list(&rows, |r| format!("'{}'", r.name)), "'Raikot', 'Khanna'");
        assert_eq!(js_list(&rows, |r| format!("{:.2}", r.approval_percent)), "25.00, 12.35");
        assert_eq!(js_list(&rows, |r| r.in_field), "31, 31");
    }
}
