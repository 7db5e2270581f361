use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Calendar day format used by the daily series and the report's Date
/// column.
pub const DAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Compact publication timestamp carried by news feed entries,
/// e.g. `20240308T130000`.
const NEWS_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]T[hour][minute][second]");

/// One trading day of provider data.
///
/// Prices and volume are kept verbatim as the provider returned them;
/// parsing them to floating point would lose precision for no benefit.
/// News fields stay `None` until enrichment attaches a headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: Date,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub news_title: Option<String>,
    pub news_summary: Option<String>,
}

impl DailyRecord {
    pub fn new(
        date: Date,
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            date,
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: volume.into(),
            news_title: None,
            news_summary: None,
        }
    }

    /// ISO calendar day for the report's Date column.
    pub fn iso_date(&self) -> String {
        self.date
            .format(&DAY_FORMAT)
            .unwrap_or_else(|_| self.date.to_string())
    }
}

/// One entry from the provider news feed. The publication timestamp is
/// kept raw; [`NewsItem::published_date`] derives the calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub time_published: String,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        time_published: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            time_published: time_published.into(),
        }
    }

    /// Calendar day the item was published, or `None` when the
    /// timestamp does not match the provider's compact format.
    pub fn published_date(&self) -> Option<Date> {
        PrimitiveDateTime::parse(&self.time_published, &NEWS_TIME_FORMAT)
            .ok()
            .map(|published| published.date())
    }
}
