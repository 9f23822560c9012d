//! Calendar helpers: month keys, period filters and date parsing

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use warungbook_config::DishPeriod;

/// Indonesian month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

/// Name of a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "",
    }
}

/// Today's date on the wall clock of the host
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar month key, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl YearMonth {
    /// Create a key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing the given date
    pub fn of(date: &NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// The preceding month
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Indonesian month name
    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Display label such as "Januari 2024"
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    /// Every month from `start` to `end`, both included
    pub fn range_inclusive(start: YearMonth, end: YearMonth) -> Vec<YearMonth> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Anything recorded on a calendar date
pub trait Dated {
    fn date(&self) -> NaiveDate;

    fn year(&self) -> i32 {
        self.date().year()
    }

    fn year_month(&self) -> YearMonth {
        YearMonth::of(&self.date())
    }
}

/// Relative period evaluated against a reference day
pub trait PeriodFilter {
    /// Check if a date falls inside the period as seen from `today`
    fn contains(&self, date: &NaiveDate, today: &NaiveDate) -> bool;

    /// Human-readable description of the period
    fn description(&self) -> &'static str;
}

impl PeriodFilter for DishPeriod {
    fn contains(&self, date: &NaiveDate, today: &NaiveDate) -> bool {
        let current = YearMonth::of(today);
        match self {
            DishPeriod::All => true,
            DishPeriod::ThisMonth => YearMonth::of(date) == current,
            DishPeriod::LastMonth => YearMonth::of(date) == current.pred(),
            DishPeriod::ThisYear => date.year() == today.year(),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            DishPeriod::All => "Semua Waktu",
            DishPeriod::ThisMonth => "Bulan Ini",
            DishPeriod::LastMonth => "Bulan Lalu",
            DishPeriod::ThisYear => "Tahun Ini",
        }
    }
}

/// Parse an entry date given as `YYYY-MM-DD` or as a timestamp
///
/// Timestamps with an offset are moved to the local timezone before the
/// calendar day is taken.
pub fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.date())
}

/// Serde helper for required entry dates
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_entry_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Serde helper for optional dates in drafts; blank strings count as missing
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_entry_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
    }
}
