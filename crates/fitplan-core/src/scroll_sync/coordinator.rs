//! Single writer of the Plans screen's navigation state.
//!
//! Pagers and the carousel never touch `SyncState`; they report through
//! tagged events and the coordinator answers with `SyncCommand`s. Week
//! strips can only be moved by the coordinator or by the user, and a
//! `ProgrammaticArrival` is never re-broadcast, which is what keeps the
//! strips and the carousel from chasing each other.

use std::sync::Arc;

use chrono::NaiveDate;

use super::state::{DayOrigin, SyncCommand, SyncState, WeekSyncOverflow};
use crate::calendar::start_of_week;
use crate::days::WorkoutDayWindow;
use crate::feedback::ImpactStyle;
use crate::pager::{week_page_for, CollapseReport, PagerEvent, PagerId, WEEK_PAGE_COUNT};

#[derive(Debug, Clone)]
pub struct ScrollSyncCoordinator {
    /// Monday of the week on page 2.
    anchor_week: NaiveDate,
    window: Arc<WorkoutDayWindow>,
    state: SyncState,
    overflow: WeekSyncOverflow,
}

impl ScrollSyncCoordinator {
    pub fn new(window: Arc<WorkoutDayWindow>, overflow: WeekSyncOverflow) -> Self {
        Self {
            anchor_week: start_of_week(window.reference()),
            state: SyncState::mounted(&window),
            window,
            overflow,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn window(&self) -> &Arc<WorkoutDayWindow> {
        &self.window
    }

    /// Date the detail view should show.
    pub fn selected_date(&self) -> NaiveDate {
        self.state.displayed_date.unwrap_or_else(|| {
            self.window
                .get(self.state.day_index)
                .map(|day| day.date)
                .unwrap_or(self.window.reference())
        })
    }

    /// Week page for `date`, relative to the mount-time reference week.
    pub fn target_week_index(&self, date: NaiveDate) -> Option<usize> {
        week_page_for(self.anchor_week, date)
    }

    // ── Inputs ───────────────────────────────────────────────────────

    /// Resolve `date` against the window and select it.
    pub fn select_date(&mut self, date: NaiveDate, origin: DayOrigin) -> Vec<SyncCommand> {
        match self.window.index_of(date) {
            Some(index) => self.on_day_selected(index, origin),
            None => self.on_date_outside_window(date),
        }
    }

    /// A day inside the window was selected.
    ///
    /// Swipes already moved the carousel; every other origin asks it to
    /// jump. Both week strips follow to the day's week.
    pub fn on_day_selected(&mut self, day_index: usize, origin: DayOrigin) -> Vec<SyncCommand> {
        let day_index = self.window.clamp_index(day_index as i64);
        let Some(date) = self.window.get(day_index).map(|day| day.date) else {
            return Vec::new();
        };

        let changed = day_index != self.state.day_index || self.state.displayed_date.is_some();
        self.state.day_index = day_index;
        self.state.displayed_date = None;
        tracing::debug!(day_index, %date, ?origin, changed, "day selected");

        let mut commands = Vec::new();
        if changed {
            if origin != DayOrigin::Swipe {
                commands.push(SyncCommand::JumpCarousel { day_index });
            }
            commands.push(SyncCommand::Haptic {
                style: ImpactStyle::Light,
            });
        }
        self.sync_weeks_to(date, &mut commands);
        if self.state.month_expanded {
            commands.push(SyncCommand::FocusMonth { date });
        }
        commands
    }

    /// A week strip settled or gave up a commanded scroll.
    pub fn on_week_pager_event(&mut self, pager: PagerId, event: PagerEvent) -> Vec<SyncCommand> {
        match event {
            PagerEvent::ProgrammaticArrival { index } => {
                self.state.week_index = index.min(WEEK_PAGE_COUNT - 1);
                if self.state.pending_week_target == Some(index) {
                    self.state.pending_week_target = None;
                }
                if self.state.suppress_next_week_sync {
                    self.state.suppress_next_week_sync = false;
                    tracing::debug!(?pager, index, "arrival consumed week sync suppression");
                }
                Vec::new()
            }
            PagerEvent::ProgrammaticCancelled { index } => {
                // The strip now belongs to the user; its UserSettle re-syncs
                // the other one.
                self.state.pending_week_target = None;
                self.state.suppress_next_week_sync = false;
                tracing::debug!(?pager, index, "week sync cancelled by drag");
                Vec::new()
            }
            PagerEvent::UserSettle { index } => {
                if self.state.suppress_next_week_sync {
                    self.state.suppress_next_week_sync = false;
                    tracing::debug!(?pager, index, "settle consumed week sync suppression");
                    return Vec::new();
                }
                let index = index.min(WEEK_PAGE_COUNT - 1);
                let changed = index != self.state.week_index;
                self.state.week_index = index;
                tracing::debug!(?pager, index, changed, "user week scroll");

                let mut commands = vec![SyncCommand::ScrollWeekPager {
                    pager: pager.other(),
                    index,
                }];
                if changed {
                    commands.push(SyncCommand::Haptic {
                        style: ImpactStyle::Light,
                    });
                }
                commands
            }
        }
    }

    /// A date with no slot in the window was picked.
    ///
    /// The detail view shows it directly; the carousel index is left alone
    /// and week sync happens only if the week is one of the five pages.
    pub fn on_date_outside_window(&mut self, date: NaiveDate) -> Vec<SyncCommand> {
        let changed = self.state.displayed_date != Some(date);
        self.state.displayed_date = Some(date);
        tracing::debug!(%date, "selected date outside day window");

        let mut commands = Vec::new();
        if changed {
            commands.push(SyncCommand::Haptic {
                style: ImpactStyle::Light,
            });
        }
        self.sync_weeks_to(date, &mut commands);
        if self.state.month_expanded {
            commands.push(SyncCommand::FocusMonth { date });
        }
        commands
    }

    /// Track whether the carousel is mid-swipe.
    pub fn on_swipe_activity(&mut self, in_progress: bool) {
        if self.state.swipe_in_progress != in_progress {
            tracing::debug!(in_progress, "carousel swipe activity");
            self.state.swipe_in_progress = in_progress;
        }
    }

    pub fn on_month_expanded(&mut self) {
        self.state.month_expanded = true;
    }

    /// The month view closed; bring both strips to the reported week.
    pub fn on_month_collapsed(&mut self, report: CollapseReport) -> Vec<SyncCommand> {
        self.state.month_expanded = false;
        let mut commands = Vec::new();
        self.sync_weeks_to(report.week_start, &mut commands);
        commands
    }

    /// Adopt a regenerated window. Every held index is reset.
    pub fn on_window_regenerated(&mut self, window: Arc<WorkoutDayWindow>) {
        let month_expanded = self.state.month_expanded;
        self.anchor_week = start_of_week(window.reference());
        self.state = SyncState::mounted(&window);
        self.state.month_expanded = month_expanded;
        self.window = window;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn sync_weeks_to(&mut self, date: NaiveDate, commands: &mut Vec<SyncCommand>) {
        let Some(target) = self.target_week_index(date) else {
            match self.overflow {
                WeekSyncOverflow::Skip => {
                    tracing::debug!(%date, "week outside loaded pages, skipping week sync");
                }
                WeekSyncOverflow::Recenter => {
                    commands.push(SyncCommand::RegenerateWindow { around: date });
                }
            }
            return;
        };

        let current = self
            .state
            .pending_week_target
            .unwrap_or(self.state.week_index);
        if target == current {
            return;
        }

        for pager in PagerId::ALL {
            commands.push(SyncCommand::ScrollWeekPager {
                pager,
                index: target,
            });
        }
        self.state.suppress_next_week_sync = true;
        self.state.pending_week_target = Some(target);
    }
}
