use chrono::NaiveDate;
use clap::Subcommand;
use fitplan_core::days::WeeklyTemplateSource;
use fitplan_core::{Config, Event, PagerId, PlansScreen, RecordingHaptics};
use serde_json::json;

use super::{print_json, today_or, CommandResult};

/// Frame interval used to drive animations.
const FRAME_MS: u64 = 16;
/// Give up on a simulation that never comes to rest.
const MAX_SIM_MS: u64 = 60_000;

#[derive(Subcommand)]
pub enum SimulateAction {
    /// Release a horizontal pan on the day carousel
    Swipe {
        /// Pan translation at release, in px (negative = toward next day)
        #[arg(long, allow_hyphen_values = true)]
        translation: f64,
        /// Pan velocity at release, in px/s
        #[arg(long, allow_hyphen_values = true)]
        velocity: f64,
        /// Screen width in px (defaults to config)
        #[arg(long)]
        width: Option<f64>,
        /// Mount date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Select a date as if tapped in the week strip
    Select {
        /// Date to select (YYYY-MM-DD)
        date: NaiveDate,
        /// Mount date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

pub fn run(action: SimulateAction) -> CommandResult {
    let config = Config::load_or_default();
    let haptics = RecordingHaptics::new();

    match action {
        SimulateAction::Swipe {
            translation,
            velocity,
            width,
            today,
        } => {
            let mut screen = mount(today_or(today), &config, &haptics);
            let mut events = Vec::new();
            if let Some(width) = width {
                events.extend(screen.set_layout_width(width, 0));
            }
            screen.pan_start();
            screen.pan_update(translation);
            let phase = screen.carousel().phase();
            screen.pan_end(translation, velocity, 0);
            let release = screen.carousel().phase();
            tracing::debug!(?phase, ?release, "swipe released");

            let now = run_to_rest(&mut screen, 0, &mut events)?;
            report(&screen, &haptics, events, now, Some(json!(release)))
        }
        SimulateAction::Select { date, today } => {
            let mut screen = mount(today_or(today), &config, &haptics);
            let mut events = screen.tap_week_day(date, 0);
            let now = run_to_rest(&mut screen, 0, &mut events)?;
            report(&screen, &haptics, events, now, None)
        }
    }
}

fn mount(today: NaiveDate, config: &Config, haptics: &RecordingHaptics) -> PlansScreen {
    let source = WeeklyTemplateSource::new(config.window.rest_days.clone());
    PlansScreen::mount(today, config, Box::new(source), Box::new(haptics.clone()))
}

fn run_to_rest(screen: &mut PlansScreen, mut now: u64, events: &mut Vec<Event>) -> Result<u64, String> {
    while screen.is_animating() {
        now += FRAME_MS;
        events.extend(screen.tick(now));
        if now > MAX_SIM_MS {
            return Err(format!("screen still animating after {MAX_SIM_MS} ms"));
        }
    }
    Ok(now)
}

fn report(
    screen: &PlansScreen,
    haptics: &RecordingHaptics,
    events: Vec<Event>,
    now: u64,
    release: Option<serde_json::Value>,
) -> CommandResult {
    print_json(&json!({
        "release": release,
        "events": events,
        "settledAtMs": now,
        "selectedDate": screen.selected_date(),
        "dayIndex": screen.selected_day_index(),
        "weekIndex": screen.week_index(),
        "mainWeekIndex": screen.week_pager(PagerId::Main).current_index(),
        "stickyWeekIndex": screen.week_pager(PagerId::Sticky).current_index(),
        "haptics": haptics.count(),
        "selectedDay": screen.selected_day(),
    }))
}
