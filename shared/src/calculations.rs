//! Calendar and yield arithmetic for weekly production planning
//!
//! Week numbering counts elapsed seven-day blocks since January 1st,
//! rounded up. This is the numbering printed on batch paperwork at the
//! mill; it is not ISO 8601. January 1st itself lands in week 0 and leap
//! years can reach week 53.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A selectable production week with its calendar window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekOption {
    pub week: u32,
    pub year: i32,
    /// Display label, e.g. "Week 7 / 2025"
    pub label: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

/// Production week number of a date
pub fn production_week(date: NaiveDate) -> u32 {
    let jan_first = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap();
    let days = (date - jan_first).num_days();
    // ceil(days / 7); January 1st gives 0
    ((days + 6) / 7) as u32
}

/// Batch number printed on production paperwork (BATCH-YYYY-WNN)
pub fn batch_number(week: u32, year: i32) -> String {
    format!("BATCH-{}-W{:02}", year, week)
}

/// First and last day of a production week
///
/// Week 1 starts on January 1st; week 0 therefore resolves to the final
/// week of the previous December.
pub fn week_date_range(week: u32, year: i32) -> (NaiveDate, NaiveDate) {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let starts_on = jan_first + Duration::days((week as i64 - 1) * 7);
    let ends_on = starts_on + Duration::days(6);
    (starts_on, ends_on)
}

/// Selectable weeks for the production planning screen
///
/// Ten weeks back through two weeks ahead of the given date, wrapping
/// across year boundaries on a fixed 52-week year.
pub fn week_options(today: NaiveDate) -> Vec<WeekOption> {
    let current = production_week(today) as i64;
    let mut options = Vec::new();

    for offset in -10..=2 {
        let mut week = current + offset;
        let mut year = today.year();
        if week <= 0 {
            week += 52;
            year -= 1;
        } else if week > 52 {
            week -= 52;
            year += 1;
        }

        let week = week as u32;
        let (starts_on, ends_on) = week_date_range(week, year);
        options.push(WeekOption {
            week,
            year,
            label: format!("Week {} / {}", week, year),
            starts_on,
            ends_on,
        });
    }

    options
}

/// Output volume as a percentage of input volume
pub fn efficiency_percent(total_input: Decimal, total_output: Decimal) -> Decimal {
    if total_input.is_zero() {
        return Decimal::ZERO;
    }
    (total_output / total_input) * Decimal::from(100)
}

/// Part as a percentage of a whole, zero when the whole is zero
pub fn share_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole) * Decimal::from(100)
}
