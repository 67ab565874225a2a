//! Five-page week strip.
//!
//! Page 2 is the week containing the reference day at mount; pages 0-1 and
//! 3-4 are the two weeks either side. The strip is never recentred during
//! a session.
//!
//! ## State Transitions
//!
//! ```text
//! AtRest(i) --drag_start--> UserDragging --drag_end--> UserSnapping(j) --tick--> AtRest(j)
//!                                                          emits UserSettle(j) if j != i
//! AtRest(i) --scroll_to_index(t)--> ProgrammaticScrolling(t) --tick--> AtRest(t)
//!                                                          emits ProgrammaticArrival(t)
//! ProgrammaticScrolling(t) --drag_start--> UserDragging
//!                                                          emits ProgrammaticCancelled(t)
//! ```
//!
//! While any animation is running, further `scroll_to_index` commands are
//! deferred and only the latest one is kept. A drag that cancelled a
//! programmatic scroll always ends in a `UserSettle`, even when it lands
//! back on the page it started from.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::track::{PageTrack, SnapConfig};
use super::{PagerEvent, PagerId};
use crate::calendar::{start_of_week, weeks_between};

/// Number of week pages.
pub const WEEK_PAGE_COUNT: usize = 5;
/// Page showing the reference week.
pub const CENTER_WEEK_PAGE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WeekPagerState {
    AtRest { index: usize },
    UserDragging { from_index: usize },
    UserSnapping { target_index: usize },
    ProgrammaticScrolling { target_index: usize },
}

/// What `scroll_to_index` did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollOutcome {
    /// An animation toward the index started.
    Started,
    /// Another animation is running; the command will run after it.
    Deferred,
    /// Already at (or already heading to) the index.
    NoOp,
    /// Index outside `[0, 5)`; nothing scrolls.
    OutOfRange,
}

#[derive(Debug, Clone)]
pub struct WeekPager {
    id: PagerId,
    anchor_week: NaiveDate,
    track: PageTrack,
    state: WeekPagerState,
    /// Last index this pager came to rest on.
    settled_index: usize,
    pending: Option<usize>,
    /// The current gesture cancelled a programmatic scroll.
    interrupted: bool,
    animations_started: u64,
}

impl WeekPager {
    /// Create a pager centred on the week containing `today`.
    pub fn new(id: PagerId, today: NaiveDate, page_width: f64, snap: SnapConfig) -> Self {
        Self {
            id,
            anchor_week: start_of_week(today),
            track: PageTrack::new(WEEK_PAGE_COUNT, CENTER_WEEK_PAGE, page_width, snap),
            state: WeekPagerState::AtRest {
                index: CENTER_WEEK_PAGE,
            },
            settled_index: CENTER_WEEK_PAGE,
            pending: None,
            interrupted: false,
            animations_started: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> PagerId {
        self.id
    }

    pub fn state(&self) -> WeekPagerState {
        self.state
    }

    /// Index of the page the pager last settled on.
    pub fn current_index(&self) -> usize {
        self.settled_index
    }

    pub fn offset_px(&self) -> f64 {
        self.track.offset()
    }

    /// Fractional page under the viewport, for rendering.
    pub fn page_position(&self) -> f64 {
        self.track.page_position()
    }

    pub fn is_animating(&self) -> bool {
        self.track.is_animating()
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.pending
    }

    /// Number of scroll animations (snaps included) started so far.
    pub fn animations_started(&self) -> u64 {
        self.animations_started
    }

    /// Monday shown on page `index`.
    pub fn week_start(&self, index: usize) -> NaiveDate {
        let delta = index as i64 - CENTER_WEEK_PAGE as i64;
        self.anchor_week + Duration::weeks(delta)
    }

    /// The seven dates shown on page `index`.
    pub fn week_dates(&self, index: usize) -> [NaiveDate; 7] {
        let start = self.week_start(index);
        std::array::from_fn(|i| start + Duration::days(i as i64))
    }

    /// Page showing `date`, if it is within the five loaded weeks.
    pub fn index_for_date(&self, date: NaiveDate) -> Option<usize> {
        week_page_for(self.anchor_week, date)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a new layout width. Running animations and drags land
    /// immediately and still report how they settled.
    pub fn set_page_width(&mut self, page_width: f64) -> Vec<PagerEvent> {
        self.track.set_page_width(page_width);
        let mut events = Vec::new();
        match self.state {
            WeekPagerState::ProgrammaticScrolling { target_index } => {
                self.track.jump_to(target_index);
                self.settled_index = target_index;
                self.state = WeekPagerState::AtRest {
                    index: target_index,
                };
                events.push(PagerEvent::ProgrammaticArrival {
                    index: target_index,
                });
            }
            WeekPagerState::UserSnapping { target_index } => {
                self.track.jump_to(target_index);
                events.extend(self.finish_user_settle(target_index));
            }
            WeekPagerState::UserDragging { .. } => {
                let landed = self.track.nearest_page();
                self.track.jump_to(landed);
                events.extend(self.finish_user_settle(landed));
            }
            WeekPagerState::AtRest { .. } => {}
        }
        if let Some(next) = self.pending.take() {
            if next != self.settled_index {
                self.track.jump_to(next);
                self.settled_index = next;
                self.state = WeekPagerState::AtRest { index: next };
                events.push(PagerEvent::ProgrammaticArrival { index: next });
            }
        }
        events
    }

    /// Animate to `index` on behalf of the coordinator.
    pub fn scroll_to_index(&mut self, index: usize, now_ms: u64) -> ScrollOutcome {
        if index >= WEEK_PAGE_COUNT {
            tracing::warn!(pager = ?self.id, index, "ignoring out-of-range week scroll");
            return ScrollOutcome::OutOfRange;
        }

        match self.state {
            WeekPagerState::ProgrammaticScrolling { target_index }
            | WeekPagerState::UserSnapping { target_index } => {
                if target_index == index {
                    self.pending = None;
                    ScrollOutcome::NoOp
                } else {
                    self.pending = Some(index);
                    ScrollOutcome::Deferred
                }
            }
            WeekPagerState::UserDragging { .. } => {
                self.pending = Some(index);
                ScrollOutcome::Deferred
            }
            WeekPagerState::AtRest { index: at } => {
                if at == index {
                    self.pending = None;
                    return ScrollOutcome::NoOp;
                }
                self.start_programmatic(index, now_ms);
                ScrollOutcome::Started
            }
        }
    }

    /// Grab the strip. Emits `ProgrammaticCancelled` when this interrupts a
    /// commanded scroll.
    pub fn drag_start(&mut self) -> Vec<PagerEvent> {
        let mut events = Vec::new();
        let from_index = match self.state {
            WeekPagerState::AtRest { index } => index,
            WeekPagerState::UserSnapping { .. } => self.track.nearest_page(),
            WeekPagerState::ProgrammaticScrolling { target_index } => {
                tracing::debug!(
                    pager = ?self.id,
                    target_index,
                    "drag interrupted programmatic scroll"
                );
                self.pending = None;
                self.interrupted = true;
                events.push(PagerEvent::ProgrammaticCancelled {
                    index: target_index,
                });
                self.track.nearest_page()
            }
            WeekPagerState::UserDragging { .. } => return events,
        };
        self.track.begin_drag();
        self.state = WeekPagerState::UserDragging { from_index };
        events
    }

    /// Cumulative horizontal translation since `drag_start`.
    pub fn drag_update(&mut self, translation: f64) {
        if matches!(self.state, WeekPagerState::UserDragging { .. }) {
            self.track.drag_to(translation);
        }
    }

    /// Release the drag and start the snap. The settle is reported by
    /// `tick` once the snap completes.
    pub fn drag_end(&mut self, velocity: f64, now_ms: u64) {
        let WeekPagerState::UserDragging { from_index } = self.state else {
            return;
        };
        let Some(target) = self.track.release(from_index, velocity) else {
            return;
        };

        self.track.animate_to(target, now_ms);
        self.animations_started += 1;
        self.state = WeekPagerState::UserSnapping {
            target_index: target,
        };
    }

    /// Advance animations. Emits `UserSettle` when a snap completes on a new
    /// page and `ProgrammaticArrival` when a commanded scroll completes,
    /// then starts any deferred command.
    pub fn tick(&mut self, now_ms: u64) -> Vec<PagerEvent> {
        let mut events = Vec::new();
        if self.track.tick(now_ms).is_none() {
            return events;
        }

        match self.state {
            WeekPagerState::ProgrammaticScrolling { target_index } => {
                self.state = WeekPagerState::AtRest {
                    index: target_index,
                };
                self.settled_index = target_index;
                tracing::debug!(pager = ?self.id, index = target_index, "programmatic arrival");
                events.push(PagerEvent::ProgrammaticArrival {
                    index: target_index,
                });
            }
            WeekPagerState::UserSnapping { target_index } => {
                events.extend(self.finish_user_settle(target_index));
            }
            WeekPagerState::AtRest { .. } | WeekPagerState::UserDragging { .. } => {}
        }

        if let Some(next) = self.pending.take() {
            if next != self.settled_index {
                self.start_programmatic(next, now_ms);
            }
        }
        events
    }

    /// Drop pending commands and animations, leaving the pager at rest on
    /// its last settled page. Nothing is emitted.
    pub fn halt(&mut self) {
        self.pending = None;
        self.interrupted = false;
        self.track.jump_to(self.settled_index);
        self.state = WeekPagerState::AtRest {
            index: self.settled_index,
        };
    }

    /// Re-anchor on a new reference day and return to the centre page.
    pub fn recenter(&mut self, today: NaiveDate) {
        self.anchor_week = start_of_week(today);
        self.settled_index = CENTER_WEEK_PAGE;
        self.halt();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finish_user_settle(&mut self, index: usize) -> Option<PagerEvent> {
        self.state = WeekPagerState::AtRest { index };
        let report = index != self.settled_index || self.interrupted;
        self.interrupted = false;
        let from = std::mem::replace(&mut self.settled_index, index);
        if !report {
            return None;
        }
        tracing::debug!(pager = ?self.id, from, to = index, "user settle");
        Some(PagerEvent::UserSettle { index })
    }

    fn start_programmatic(&mut self, index: usize, now_ms: u64) {
        self.track.animate_to(index, now_ms);
        self.animations_started += 1;
        self.state = WeekPagerState::ProgrammaticScrolling {
            target_index: index,
        };
    }
}

/// Page index for the week containing `date`, given the Monday of the
/// centre week. `None` when it falls outside the five pages.
pub fn week_page_for(anchor_week: NaiveDate, date: NaiveDate) -> Option<usize> {
    let index = CENTER_WEEK_PAGE as i64 + weeks_between(anchor_week, date);
    (0..WEEK_PAGE_COUNT as i64)
        .contains(&index)
        .then_some(index as usize)
}
