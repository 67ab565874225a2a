//! Month keys and the 6x7 month grid.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date_math::start_of_week;

/// Rows in a month grid.
pub const GRID_ROWS: usize = 6;
/// Columns (weekdays) in a month grid.
pub const GRID_COLS: usize = 7;

/// A calendar month.
///
/// Always refers to a month chrono can represent; construction clamps the
/// month number to `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Shift by `delta` months, carrying into the year.
    pub fn add_months(self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn prev(self) -> Self {
        self.add_months(-1)
    }

    pub fn next(self) -> Self {
        self.add_months(1)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Six consecutive Monday-based weeks covering a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: MonthKey,
    pub rows: [[NaiveDate; GRID_COLS]; GRID_ROWS],
}

impl MonthGrid {
    /// Build the grid for `month`, starting on the Monday on/before the 1st.
    pub fn build(month: MonthKey) -> Self {
        let origin = start_of_week(month.first_day());
        let mut rows = [[origin; GRID_COLS]; GRID_ROWS];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = origin + Duration::days((r * GRID_COLS + c) as i64);
            }
        }
        Self { month, rows }
    }

    /// First date shown (always a Monday).
    pub fn first(&self) -> NaiveDate {
        self.rows[0][0]
    }

    /// Last date shown (always a Sunday).
    pub fn last(&self) -> NaiveDate {
        self.rows[GRID_ROWS - 1][GRID_COLS - 1]
    }

    /// All 42 dates in row-major order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first() && date <= self.last()
    }

    /// Row index of the week containing `date`, if shown.
    pub fn row_of(&self, date: NaiveDate) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(&date))
    }

    /// Whether `date` belongs to the grid's own month (as opposed to the
    /// leading/trailing days of the neighbours).
    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        self.month.contains(date)
    }
}

/// Month grid for `month` (1-12, clamped) of `year`.
pub fn month_grid(month: u32, year: i32) -> MonthGrid {
    MonthGrid::build(MonthKey::new(year, month))
}
