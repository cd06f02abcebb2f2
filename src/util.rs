// Helpers for normalizing spreadsheet cells and formatting values.
//
// Everything that has to tolerate messy spreadsheet input lives here so the
// loader and renderer can work with plain integers, floats and dates.
use calamine::Data;
use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Fixed display order of the known subdivisions.
pub const CANONICAL_ORDER: [&str; 7] = [
    "Raikot",
    "Khanna",
    "Ludhiana (East)",
    "Payal",
    "Jagraon",
    "Samrala",
    "Ludhiana (West)",
];

/// Normalized raw name (see [`normalize_name`]) to display name.
static DISPLAY_NAME_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("raikot", "Raikot"),
        ("khanna", "Khanna"),
        ("payal", "Payal"),
        ("jagraon", "Jagraon"),
        ("samrala", "Samrala"),
        ("ludhianaeast", "Ludhiana (East)"),
        ("ludhianawest", "Ludhiana (West)"),
    ])
});

static DATE_TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})").expect("valid date regex"));

/// Text of a cell as it appears in the sheet. Empty cells give "".
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Collapse whitespace (including embedded newlines), trim and lowercase.
pub fn normalize_text(cell: &Data) -> String {
    cell_text(cell)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lowercase and keep only ASCII letters and digits, so "Ludhiana (East)"
/// and "LUDHIANA EAST" compare equal.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn display_name(raw: &str) -> String {
    match DISPLAY_NAME_MAP.get(normalize_name(raw).as_str()) {
        Some(name) => (*name).to_string(),
        None => raw.trim().to_string(),
    }
}

/// Coerce a cell into a number, treating anything that isn't one as zero.
///
/// - Numeric cells pass through; booleans count as 1 or 0.
/// - Text is trimmed and thousands separators (`","`) are stripped.
/// - Blank, `"-"`, unparseable and non-finite values give `0.0`.
pub fn parse_number(cell: &Data) -> f64 {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) => {
            let s = s.trim().replace(',', "");
            if s.is_empty() || s == "-" {
                return 0.0;
            }
            s.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn to_int(cell: &Data) -> i64 {
    parse_number(cell).round_ties_even() as i64
}

pub fn to_percent(cell: &Data) -> f64 {
    round2(parse_number(cell))
}

/// Round to two decimals on the exact decimal value of `n`, so 0.015 (stored
/// as 0.01499...) goes down rather than up.
pub fn round2(n: f64) -> f64 {
    format!("{:.2}", n).parse().unwrap_or(0.0)
}

/// Group digits the South-Asian way: the last three digits form one group,
/// the rest are grouped in pairs (`12,34,567`).
pub fn format_indian_number(n: i64) -> String {
    let grouped = n.unsigned_abs().to_formatted_string(&Locale::en_IN);
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn ordinal(n: u32) -> String {
    // Teens first: 11th, 12th, 13th.
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

/// Find the first `d-m-y` / `d/m/y` token in free text. Two-digit years are
/// taken as 20xx. A token that isn't a real calendar date gives `None`.
pub fn parse_date_tokens(text: &str) -> Option<NaiveDate> {
    let caps = DATE_TOKENS.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Date carried by a cell: date-typed cells directly, anything else by
/// searching its text for a date token.
pub fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::Empty => None,
        // Time-of-day and duration cells carry no calendar date.
        Data::DateTime(dt) if dt.is_duration() || dt.as_f64() < 1.0 => None,
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        other => parse_date_tokens(&cell_text(other)),
    }
}

/// "5th January 2024"
pub fn format_as_of_date(date: NaiveDate) -> String {
    format!("{} {}", ordinal(date.day()), date.format("%B %Y"))
}

/// "5-1-24"
pub fn format_surveyed_header_date(date: NaiveDate) -> String {
    format!("{}-{}-{:02}", date.day(), date.month(), date.year() % 100)
}

/// "5th Jan"
pub fn format_daily_chart_label(date: NaiveDate) -> String {
    format!("{} {}", ordinal(date.day()), date.format("%b"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn non_numeric_cells_coerce_to_zero() {
        assert_eq!(parse_number(&Data::Empty), 0.0);
        assert_eq!(parse_number(&text("")), 0.0);
        assert_eq!(parse_number(&text("  - ")), 0.0);
        assert_eq!(parse_number(&text("n/a")), 0.0);
        assert_eq!(parse_number(&text("NaN")), 0.0);
        assert_eq!(to_int(&text("pending")), 0);
        assert_eq!(to_percent(&text("-")), 0.0);
    }

    #[test]
    fn numeric_text_is_cleaned() {
        assert_eq!(parse_number(&text(" 1,23,456 ")), 123456.0);
        assert_eq!(parse_number(&Data::Int(42)), 42.0);
        assert_eq!(parse_number(&Data::Bool(true)), 1.0);
        assert_eq!(to_int(&Data::Float(10.6)), 11);
        assert_eq!(to_int(&Data::Float(2.5)), 2);
        assert_eq!(to_percent(&Data::Float(12.3456)), 12.35);
    }

    #[test]
    fn two_decimal_rounding_follows_stored_value() {
        assert_eq!(to_percent(&Data::Float(0.015)), 0.01);
        assert_eq!(round2(3.0 / 20000.0 * 100.0), 0.01);
        assert_eq!(round2(18.75), 18.75);
        assert_eq!(round2(-2.345678), -2.35);
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(format_indian_number(0), "0");
        assert_eq!(format_indian_number(999), "999");
        assert_eq!(format_indian_number(1000), "1,000");
        assert_eq!(format_indian_number(100000), "1,00,000");
        assert_eq!(format_indian_number(1234567), "12,34,567");
        assert_eq!(format_indian_number(-1234567), "-12,34,567");
        assert_eq!(format_indian_number(-42), "-42");
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (20, "20th"),
            (21, "21st"),
            (22, "22nd"),
            (31, "31st"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }

    #[test]
    fn date_tokens() {
        assert_eq!(
            parse_date_tokens("Status as on 05/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_date_tokens("Surveyed Plots on 7-3-25"),
            NaiveDate::from_ymd_opt(2025, 3, 7)
        );
        assert_eq!(parse_date_tokens("31-02-2024"), None);
        assert_eq!(parse_date_tokens("no date here"), None);
    }

    #[test]
    fn cell_dates() {
        assert_eq!(
            cell_date(&Data::DateTimeIso("2024-02-29T00:00:00".to_string())),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(cell_date(&Data::Float(45296.0)), None);
        assert_eq!(cell_date(&Data::Empty), None);
    }

    #[test]
    fn date_renderings() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_as_of_date(d), "5th January 2024");
        assert_eq!(format_surveyed_header_date(d), "5-1-24");
        assert_eq!(format_daily_chart_label(d), "5th Jan");

        let d = NaiveDate::from_ymd_opt(2025, 12, 22).unwrap();
        assert_eq!(format_as_of_date(d), "22nd December 2025");
        assert_eq!(format_surveyed_header_date(d), "22-12-25");
        assert_eq!(format_daily_chart_label(d), "22nd Dec");
    }

    #[test]
    fn names_are_canonicalized() {
        assert_eq!(normalize_name("Ludhiana (East)"), "ludhianaeast");
        assert_eq!(display_name("  LUDHIANA west "), "Ludhiana (West)");
        assert_eq!(display_name("  Sidhwan Bet "), "Sidhwan Bet");
        assert_eq!(normalize_text(&text("Sub  District\nName ")), "sub district name");
    }
}
