use chrono::NaiveDate;
use tabled::Tabled;

/// Semantic column keys recognized in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    // Recognized so these columns are claimed first, never rendered.
    TargetedPlots,
    UploadedVillages,
    UploadedPlots,
    DailyTarget,
    SurveyedToday,
    TotalSurveyed,
    SurveyPercent,
    Approved,
    ApprovalPercent,
    TotalSurveyors,
    InField,
}

impl Field {
    /// Keys that must be present in the header, in the order they are
    /// reported when missing.
    pub const REQUIRED: [Field; 11] = [
        Field::Name,
        Field::UploadedVillages,
        Field::UploadedPlots,
        Field::DailyTarget,
        Field::SurveyedToday,
        Field::TotalSurveyed,
        Field::SurveyPercent,
        Field::Approved,
        Field::ApprovalPercent,
        Field::TotalSurveyors,
        Field::InField,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::TargetedPlots => "targeted_plots",
            Field::UploadedVillages => "uploaded_villages",
            Field::UploadedPlots => "uploaded_plots",
            Field::DailyTarget => "daily_target",
            Field::SurveyedToday => "surveyed_today",
            Field::TotalSurveyed => "total_surveyed",
            Field::SurveyPercent => "survey_percent",
            Field::Approved => "approved",
            Field::ApprovalPercent => "approval_percent",
            Field::TotalSurveyors => "total_surveyors",
            Field::InField => "in_field",
        }
    }
}

/// One subdivision's metrics. The totals row uses the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub uploaded_villages: i64,
    pub uploaded_plots: i64,
    pub daily_target: i64,
    pub surveyed_today: i64,
    pub total_surveyed: i64,
    pub survey_percent: f64,
    pub approved: i64,
    pub approval_percent: f64,
    pub total_surveyors: i64,
    pub in_field: i64,
}

/// Everything the renderer needs, extracted from one spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub report_date: NaiveDate,
    pub subdivisions: Vec<Record>,
    pub totals: Record,
}

#[derive(Debug, Tabled, Clone)]
pub struct PreviewRow {
    #[tabled(rename = "Subdivision")]
    pub name: String,
    #[tabled(rename = "Villages")]
    pub uploaded_villages: i64,
    #[tabled(rename = "UploadedPlots")]
    pub uploaded_plots: String,
    #[tabled(rename = "DailyTarget")]
    pub daily_target: String,
    #[tabled(rename = "SurveyedToday")]
    pub surveyed_today: String,
    #[tabled(rename = "TotalSurveyed")]
    pub total_surveyed: String,
    #[tabled(rename = "Survey%")]
    pub survey_percent: String,
    #[tabled(rename = "Approved")]
    pub approved: String,
    #[tabled(rename = "Approval%")]
    pub approval_percent: String,
    #[tabled(rename = "Surveyors")]
    pub total_surveyors: i64,
    #[tabled(rename = "InField")]
    pub in_field: i64,
}
