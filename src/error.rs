use thiserror::Error;

/// Every way a dashboard update can fail. Each variant names what was
/// expected but not found, so the message alone is enough to fix the input.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook has no worksheets.")]
    EmptyWorkbook,

    #[error("Could not detect header row in Excel sheet.")]
    HeaderNotFound,

    #[error("Missing expected columns in Excel header: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("Could not determine report date from Excel.")]
    ReportDateNotFound,

    #[error("No subdivision rows found in Excel data.")]
    NoSubdivisionRows,

    #[error("Start marker not found: {0}")]
    StartMarkerNotFound(String),

    #[error("End marker not found after start marker: {0}")]
    EndMarkerNotFound(String),

    #[error("Pattern not found in HTML: {0}")]
    PatternNotFound(&'static str),

    #[error("JS array constant not found: {0}")]
    ArrayNotFound(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
