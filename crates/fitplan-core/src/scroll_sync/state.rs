use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::days::WorkoutDayWindow;
use crate::feedback::ImpactStyle;
use crate::pager::{PagerId, CENTER_WEEK_PAGE};

/// Where a day selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOrigin {
    /// Committed by the day card carousel.
    Swipe,
    /// Tapped in either week strip.
    WeekStrip,
    /// Tapped in the expanded month grid.
    MonthGrid,
    /// Selected by the host application (e.g. "back to today").
    Programmatic,
}

/// What to do when a selected date's week is outside the five week pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekSyncOverflow {
    /// Leave the week strips where they are.
    #[default]
    Skip,
    /// Regenerate the day window and week strips around the selected date.
    Recenter,
}

/// Navigation state of one mounted Plans screen. Written only by the
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub week_index: usize,
    pub day_index: usize,
    pub suppress_next_week_sync: bool,
    /// Week both strips were last told to scroll to, until one arrives.
    pub pending_week_target: Option<usize>,
    /// Day shown by the detail view when it lies outside the window.
    pub displayed_date: Option<NaiveDate>,
    pub month_expanded: bool,
    /// A carousel pan or its release animation is running.
    pub swipe_in_progress: bool,
}

impl SyncState {
    /// Centred state for a freshly generated window.
    pub fn mounted(window: &WorkoutDayWindow) -> Self {
        Self {
            week_index: CENTER_WEEK_PAGE,
            day_index: window.index_of_reference(),
            suppress_next_week_sync: false,
            pending_week_target: None,
            displayed_date: None,
            month_expanded: false,
            swipe_in_progress: false,
        }
    }
}

/// Side effects requested by the coordinator, applied by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncCommand {
    ScrollWeekPager { pager: PagerId, index: usize },
    JumpCarousel { day_index: usize },
    FocusMonth { date: NaiveDate },
    Haptic { style: ImpactStyle },
    RegenerateWindow { around: NaiveDate },
}
