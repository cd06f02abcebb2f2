use crate::error::{DashboardError, Result};
use crate::types::{DashboardData, Field, Record};
use crate::util::{
    cell_date, cell_text, display_name, normalize_name, normalize_text, parse_date_tokens, round2,
    to_int, to_percent, CANONICAL_ORDER,
};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

pub type ColumnMap = HashMap<Field, usize>;

struct ColumnRule {
    matches: fn(&str) -> bool,
    field: Field,
}

fn names_subdivision(h: &str) -> bool {
    h.contains("sub district") || h.contains("tehsil")
}

/// Header rules, tried top to bottom for every header cell. The first rule
/// that matches claims the cell.
static COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule { matches: |h| names_subdivision(h) && h.contains("name"), field: Field::Name },
    ColumnRule { matches: |h| h.contains("targeted plots"), field: Field::TargetedPlots },
    ColumnRule { matches: |h| h.contains("uploaded village"), field: Field::UploadedVillages },
    ColumnRule { matches: |h| h.contains("uploaded plots"), field: Field::UploadedPlots },
    ColumnRule { matches: |h| h.contains("required target plots"), field: Field::DailyTarget },
    ColumnRule { matches: |h| h.contains("surveyed plots on"), field: Field::SurveyedToday },
    ColumnRule { matches: |h| h.contains("total surveyed plots"), field: Field::TotalSurveyed },
    ColumnRule {
        matches: |h| h.contains("percentage") && h.contains("surveyed") && !h.contains("approved"),
        field: Field::SurveyPercent,
    },
    ColumnRule { matches: |h| h.contains("approved by supervisor"), field: Field::Approved },
    ColumnRule {
        matches: |h| h.contains("percentage") && h.contains("approved"),
        field: Field::ApprovalPercent,
    },
    ColumnRule { matches: |h| h.contains("total private surveyors"), field: Field::TotalSurveyors },
    ColumnRule { matches: |h| h.contains("surveyors in fields on"), field: Field::InField },
];

/// Open the workbook and return the first worksheet as rows of cells,
/// indexed from A1 even when the used range starts further in.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Data>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DashboardError::EmptyWorkbook)??;
    Ok(anchor_at_a1(&range))
}

fn anchor_at_a1(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((row0, col0)) = range.start() else {
        return Vec::new();
    };
    let mut rows: Vec<Vec<Data>> = vec![Vec::new(); row0 as usize];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; col0 as usize];
        cells.extend(row.iter().cloned());
        rows.push(cells);
    }
    rows
}

pub fn read_excel_data(path: &Path) -> Result<DashboardData> {
    let rows = read_rows(path)?;
    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    build_dashboard_data(&rows)
}

/// Index of the first row that carries all of the header keywords.
pub fn detect_header_row(rows: &[Vec<Data>]) -> Result<usize> {
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(normalize_text)
            .filter(|c| !c.is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }
        let joined = cells.join(" | ");
        if names_subdivision(&joined)
            && joined.contains("uploaded village")
            && joined.contains("uploaded plots")
            && joined.contains("surveyed")
            && joined.contains("approved")
        {
            return Ok(i);
        }
    }
    Err(DashboardError::HeaderNotFound)
}

pub fn map_columns(header: &[Data]) -> Result<ColumnMap> {
    let mut col = ColumnMap::new();
    for (idx, cell) in header.iter().enumerate() {
        let h = normalize_text(cell);
        if h.is_empty() {
            continue;
        }
        if let Some(rule) = COLUMN_RULES.iter().find(|rule| (rule.matches)(&h)) {
            col.insert(rule.field, idx);
        }
    }

    let missing: Vec<&'static str> = Field::REQUIRED
        .iter()
        .filter(|f| !col.contains_key(*f))
        .map(|f| f.key())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::MissingColumns(missing));
    }
    Ok(col)
}

/// The first date found in the top five rows, else a date in the
/// "surveyed plots on ..." header.
pub fn extract_report_date(
    rows: &[Vec<Data>],
    header: &[Data],
    col: &ColumnMap,
) -> Result<NaiveDate> {
    if let Some(date) = rows.iter().take(5).flatten().find_map(cell_date) {
        return Ok(date);
    }

    col.get(&Field::SurveyedToday)
        .and_then(|idx| header.get(*idx))
        .and_then(|cell| parse_date_tokens(&cell_text(cell)))
        .ok_or(DashboardError::ReportDateNotFound)
}

fn cell<'a>(row: &'a [Data], col: &ColumnMap, field: Field) -> &'a Data {
    col.get(&field)
        .and_then(|idx| row.get(*idx))
        .unwrap_or(&Data::Empty)
}

fn parse_record(row: &[Data], col: &ColumnMap, name: String) -> Record {
    Record {
        name,
        uploaded_villages: to_int(cell(row, col, Field::UploadedVillages)),
        uploaded_plots: to_int(cell(row, col, Field::UploadedPlots)),
        daily_target: to_int(cell(row, col, Field::DailyTarget)),
        surveyed_today: to_int(cell(row, col, Field::SurveyedToday)),
        total_surveyed: to_int(cell(row, col, Field::TotalSurveyed)),
        survey_percent: to_percent(cell(row, col, Field::SurveyPercent)),
        approved: to_int(cell(row, col, Field::Approved)),
        approval_percent: to_percent(cell(row, col, Field::ApprovalPercent)),
        total_surveyors: to_int(cell(row, col, Field::TotalSurveyors)),
        in_field: to_int(cell(row, col, Field::InField)),
    }
}

/// Split the data rows into subdivision records and an optional totals row.
pub fn extract_records(data_rows: &[Vec<Data>], col: &ColumnMap) -> (Vec<Record>, Option<Record>) {
    let mut subdivisions = Vec::new();
    let mut totals = None;

    for row in data_rows {
        let raw_name = cell_text(cell(row, col, Field::Name));
        let raw_name = raw_name.trim();
        if raw_name.is_empty() {
            continue;
        }
        let record = parse_record(row, col, display_name(raw_name));
        if normalize_name(raw_name) == "total" {
            totals = Some(record);
        } else {
            subdivisions.push(record);
        }
    }
    (subdivisions, totals)
}

/// Canonical subdivisions first, in their fixed order, then the rest by
/// name. A canonical name seen twice keeps its last row.
pub fn order_subdivisions(records: Vec<Record>) -> Vec<Record> {
    let mut by_name: HashMap<String, Record> = HashMap::new();
    let mut extras = Vec::new();
    for r in records {
        if CANONICAL_ORDER.contains(&r.name.as_str()) {
            by_name.insert(r.name.clone(), r);
        } else {
            extras.push(r);
        }
    }

    let mut ordered: Vec<Record> = CANONICAL_ORDER
        .iter()
        .filter_map(|name| by_name.remove(*name))
        .collect();
    extras.sort_by(|a, b| a.name.cmp(&b.name));
    ordered.extend(extras);
    ordered
}

fn percent_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

pub fn compute_totals(records: &[Record]) -> Record {
    let sum = |f: fn(&Record) -> i64| records.iter().map(f).sum::<i64>();
    let uploaded_plots = sum(|r| r.uploaded_plots);
    let total_surveyed = sum(|r| r.total_surveyed);
    let approved = sum(|r| r.approved);
    Record {
        name: "Total".to_string(),
        uploaded_villages: sum(|r| r.uploaded_villages),
        uploaded_plots,
        daily_target: sum(|r| r.daily_target),
        surveyed_today: sum(|r| r.surveyed_today),
        total_surveyed,
        survey_percent: percent_of(total_surveyed, uploaded_plots),
        approved,
        approval_percent: percent_of(approved, total_surveyed),
        total_surveyors: sum(|r| r.total_surveyors),
        in_field: sum(|r| r.in_field),
    }
}

pub fn build_dashboard_data(rows: &[Vec<Data>]) -> Result<DashboardData> {
    let header_idx = detect_header_row(rows)?;
    let header = &rows[header_idx];
    let col = map_columns(header)?;
    let report_date = extract_report_date(rows, header, &col)?;
    tracing::info!("Header row at {}, report date {}", header_idx + 1, report_date);

    let (subdivisions, totals) = extract_records(&rows[header_idx + 1..], &col);
    if subdivisions.is_empty() {
        return Err(DashboardError::NoSubdivisionRows);
    }
    let subdivisions = order_subdivisions(subdivisions);

    let totals = match totals {
        Some(t) => t,
        None => {
            tracing::info!("No total row in sheet; summing {} subdivisions", subdivisions.len());
            compute_totals(&subdivisions)
        }
    };

    tracing::info!("Extracted {} subdivisions", subdivisions.len());
    Ok(DashboardData { report_date, subdivisions, totals })
}
