use chrono::NaiveDate;
use clap::Subcommand;
use fitplan_core::days::{DayWindowProvider, WeeklyTemplateSource, WindowSpan};
use fitplan_core::Config;
use serde_json::json;

use super::{print_json, today_or, CommandResult};

#[derive(Subcommand)]
pub enum WindowAction {
    /// Print every day of the window around a reference date
    Show {
        /// Reference date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Days before the reference date (defaults to config)
        #[arg(long)]
        before: Option<u32>,
        /// Days after the reference date (defaults to config)
        #[arg(long)]
        after: Option<u32>,
    },
}

pub fn run(action: WindowAction) -> CommandResult {
    match action {
        WindowAction::Show {
            today,
            before,
            after,
        } => {
            let config = Config::load_or_default();
            let today = today_or(today);
            let span = WindowSpan {
                days_before: before.unwrap_or(config.window.days_before),
                days_after: after.unwrap_or(config.window.days_after),
            };
            let rest = config.window.rest_day_policy();
            let source = WeeklyTemplateSource::new(rest.weekdays.clone());
            let provider = DayWindowProvider::new(today, span, rest, Box::new(source));
            let window = provider.window();

            let days: Vec<_> = window
                .days()
                .iter()
                .enumerate()
                .map(|(index, day)| {
                    json!({
                        "index": index,
                        "isToday": day.is_today(today),
                        "day": day,
                    })
                })
                .collect();

            print_json(&json!({
                "reference": window.reference(),
                "len": window.len(),
                "todayIndex": window.index_of(today),
                "days": days,
            }))
        }
    }
}
