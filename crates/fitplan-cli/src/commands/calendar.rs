use chrono::NaiveDate;
use clap::Subcommand;
use fitplan_core::calendar::{month_grid, start_of_week, week_number, MonthKey};
use serde_json::json;

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// ISO-8601 week number of a date
    WeekNumber {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Monday of the week containing a date
    WeekStart {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// 6x7 Monday-first grid for a month
    MonthGrid {
        #[arg(long)]
        year: i32,
        /// Month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
}

pub fn run(action: CalendarAction) -> CommandResult {
    match action {
        CalendarAction::WeekNumber { date } => print_json(&json!({
            "date": date,
            "week": week_number(date),
        })),
        CalendarAction::WeekStart { date } => print_json(&json!({
            "date": date,
            "weekStart": start_of_week(date),
        })),
        CalendarAction::MonthGrid { year, month } => {
            let grid = month_grid(month, year);
            print_json(&json!({
                "month": MonthKey::new(year, month).to_string(),
                "first": grid.first(),
                "last": grid.last(),
                "rows": grid.rows,
            }))
        }
    }
}
