//! Three-page month carousel (previous / focused / next).
//!
//! Grids are derived from the focused month only and rebuilt only when that
//! month changes. After a swipe lands on an outer page the focus shifts by
//! one month and the track jumps back to the middle page without animating,
//! so the user never sees the recentre.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::track::{PageTrack, SnapConfig};
use crate::calendar::{start_of_week, MonthGrid, MonthKey};

pub const MONTH_PAGE_COUNT: usize = 3;
pub const CENTER_MONTH_PAGE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonthPagerEvent {
    /// The focused month moved after a swipe.
    MonthChanged { month: MonthKey },
}

/// Where the week strip should land when the month view collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapseReport {
    pub month: MonthKey,
    /// Monday of the week to show.
    pub week_start: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct MonthPager {
    focused: MonthKey,
    grids: [MonthGrid; MONTH_PAGE_COUNT],
    grid_generation: u64,
    track: PageTrack,
    expanded: bool,
    selected: Option<NaiveDate>,
}

impl MonthPager {
    pub fn new(focus: NaiveDate, page_width: f64, snap: SnapConfig) -> Self {
        let focused = MonthKey::of(focus);
        Self {
            focused,
            grids: build_grids(focused),
            grid_generation: 0,
            track: PageTrack::new(MONTH_PAGE_COUNT, CENTER_MONTH_PAGE, page_width, snap),
            expanded: false,
            selected: Some(focus),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn focused_month(&self) -> MonthKey {
        self.focused
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Previous, focused and next month grids.
    pub fn grids(&self) -> &[MonthGrid; MONTH_PAGE_COUNT] {
        &self.grids
    }

    pub fn focused_grid(&self) -> &MonthGrid {
        &self.grids[CENTER_MONTH_PAGE]
    }

    /// Incremented each time the grids are rebuilt.
    pub fn grid_generation(&self) -> u64 {
        self.grid_generation
    }

    pub fn current_page(&self) -> usize {
        self.track.nearest_page()
    }

    pub fn offset_px(&self) -> f64 {
        self.track.offset()
    }

    pub fn is_animating(&self) -> bool {
        self.track.is_animating()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_page_width(&mut self, page_width: f64) {
        self.track.set_page_width(page_width);
        self.track.jump_to(CENTER_MONTH_PAGE);
    }

    /// Open the month view focused on the month containing `date`.
    pub fn expand(&mut self, date: NaiveDate) {
        self.expanded = true;
        self.selected = Some(date);
        self.focus_month(MonthKey::of(date));
        self.track.jump_to(CENTER_MONTH_PAGE);
    }

    /// Close the month view and report the week the strip should show.
    ///
    /// A snap still in flight is landed first, so the report names the
    /// month it was heading to. The selected day's week wins when it lies in
    /// the focused month; otherwise the week containing the 1st of the
    /// focused month.
    pub fn collapse(&mut self) -> CollapseReport {
        self.expanded = false;
        if let Some(landing) = self.track.animation_target() {
            self.land_on(landing);
        }
        self.track.jump_to(CENTER_MONTH_PAGE);
        let anchor = self
            .selected
            .filter(|date| self.focused.contains(*date))
            .unwrap_or_else(|| self.focused.first_day());
        CollapseReport {
            month: self.focused,
            week_start: start_of_week(anchor),
        }
    }

    /// Keep the focused month on `date` (e.g. after a day swipe).
    pub fn focus_on(&mut self, date: NaiveDate) {
        self.selected = Some(date);
        self.focus_month(MonthKey::of(date));
    }

    /// Record a tap on a grid cell. Selection never rebuilds grids.
    pub fn select_day(&mut self, date: NaiveDate) -> NaiveDate {
        self.selected = Some(date);
        date
    }

    pub fn drag_start(&mut self) {
        if self.expanded {
            self.track.begin_drag();
        }
    }

    pub fn drag_update(&mut self, translation: f64) {
        self.track.drag_to(translation);
    }

    pub fn drag_end(&mut self, velocity: f64, now_ms: u64) {
        if let Some(target) = self.track.release(CENTER_MONTH_PAGE, velocity) {
            self.track.animate_to(target, now_ms);
        }
    }

    /// Advance the snap animation; on landing at an outer page, shift the
    /// focused month and recentre silently.
    pub fn tick(&mut self, now_ms: u64) -> Option<MonthPagerEvent> {
        let landed = self.track.tick(now_ms)?;
        self.land_on(landed)
    }

    pub fn halt(&mut self) {
        self.track.jump_to(CENTER_MONTH_PAGE);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn land_on(&mut self, page: usize) -> Option<MonthPagerEvent> {
        let shift = page as i32 - CENTER_MONTH_PAGE as i32;
        if shift == 0 {
            return None;
        }
        self.focus_month(self.focused.add_months(shift));
        self.track.jump_to(CENTER_MONTH_PAGE);
        tracing::debug!(month = %self.focused, "month pager shifted focus");
        Some(MonthPagerEvent::MonthChanged {
            month: self.focused,
        })
    }

    fn focus_month(&mut self, month: MonthKey) {
        if month == self.focused {
            return;
        }
        self.focused = month;
        self.grids = build_grids(month);
        self.grid_generation += 1;
    }
}

fn build_grids(focused: MonthKey) -> [MonthGrid; MONTH_PAGE_COUNT] {
    [
        MonthGrid::build(focused.prev()),
        MonthGrid::build(focused),
        MonthGrid::build(focused.next()),
    ]
}
