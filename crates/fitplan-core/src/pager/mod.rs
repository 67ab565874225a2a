//! Week and month pagers.

mod track;
pub mod month;
pub mod week;

use serde::{Deserialize, Serialize};

pub use month::{CollapseReport, MonthPager, MonthPagerEvent, CENTER_MONTH_PAGE, MONTH_PAGE_COUNT};
pub use track::SnapConfig;
pub use week::{
    week_page_for, ScrollOutcome, WeekPager, WeekPagerState, CENTER_WEEK_PAGE, WEEK_PAGE_COUNT,
};

/// The two week strips on the Plans screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagerId {
    /// Full header.
    Main,
    /// Compact header pinned while the day list scrolls.
    Sticky,
}

impl PagerId {
    pub fn other(self) -> Self {
        match self {
            PagerId::Main => PagerId::Sticky,
            PagerId::Sticky => PagerId::Main,
        }
    }

    pub const ALL: [PagerId; 2] = [PagerId::Main, PagerId::Sticky];
}

/// Settle notifications from a week pager, tagged by cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PagerEvent {
    /// The user dragged the pager to a new page.
    UserSettle { index: usize },
    /// A `scroll_to_index` command finished.
    ProgrammaticArrival { index: usize },
    /// A drag interrupted the scroll toward `index`; no arrival will follow.
    ProgrammaticCancelled { index: usize },
}

impl PagerEvent {
    pub fn index(self) -> usize {
        match self {
            PagerEvent::UserSettle { index }
            | PagerEvent::ProgrammaticArrival { index }
            | PagerEvent::ProgrammaticCancelled { index } => index,
        }
    }
}
