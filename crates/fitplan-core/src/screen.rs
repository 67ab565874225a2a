//! One mounted Plans screen.
//!
//! Owns both week strips, the month view, the day carousel and the
//! coordinator, and routes between them:
//!
//! ```text
//! carousel DayCommitted ─────────────▶ coordinator.on_day_selected(Swipe)
//! pager ProgrammaticArrival/Cancelled ▶ coordinator.on_week_pager_event
//! pager UserSettle ──▶ debouncer ────▶ coordinator.on_week_pager_event
//! taps / expand / collapse ──────────▶ coordinator
//! coordinator SyncCommand ───────────▶ pagers, carousel, month view, haptics
//! ```
//!
//! Time is always supplied by the caller. After [`PlansScreen::unmount`]
//! every input is a no-op that returns no events.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::carousel::{CarouselEvent, DayCardCarousel};
use crate::days::{CalendarDay, DayWindowProvider, WorkoutDayWindow, WorkoutSource};
use crate::events::Event;
use crate::feedback::{notify, Haptics};
use crate::motion::Debouncer;
use crate::pager::{MonthPager, MonthPagerEvent, PagerEvent, PagerId, WeekPager};
use crate::scroll_sync::{DayOrigin, ScrollSyncCoordinator, SyncCommand, SyncState};
use crate::storage::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    date: NaiveDate,
    week_index: usize,
}

pub struct PlansScreen {
    session_id: Uuid,
    provider: DayWindowProvider,
    main: WeekPager,
    sticky: WeekPager,
    month: MonthPager,
    carousel: DayCardCarousel,
    coordinator: ScrollSyncCoordinator,
    settles: Debouncer<PagerId, usize>,
    haptics: Box<dyn Haptics>,
    haptics_enabled: bool,
    mounted: bool,
}

impl PlansScreen {
    /// Generate the day window around `today` and build every component
    /// centred on it.
    pub fn mount(
        today: NaiveDate,
        config: &Config,
        source: Box<dyn WorkoutSource>,
        haptics: Box<dyn Haptics>,
    ) -> Self {
        let provider = DayWindowProvider::new(
            today,
            config.window.span(),
            config.window.rest_day_policy(),
            source,
        );
        let window = provider.window();
        let week_snap = config.week_pager.snap();
        let week_width = config.week_pager.page_width;
        let carousel = DayCardCarousel::new(
            window.index_of_reference(),
            window.len(),
            config.carousel.carousel(),
        );
        let coordinator = ScrollSyncCoordinator::new(window, config.week_pager.overflow);
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, %today, "plans screen mounted");

        Self {
            session_id,
            provider,
            main: WeekPager::new(PagerId::Main, today, week_width, week_snap),
            sticky: WeekPager::new(PagerId::Sticky, today, week_width, week_snap),
            month: MonthPager::new(
                today,
                config.month_pager.page_width,
                config.month_pager.snap(),
            ),
            carousel,
            coordinator,
            settles: Debouncer::new(config.week_pager.settle_debounce_ms),
            haptics,
            haptics_enabled: config.feedback.haptics_enabled,
            mounted: true,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn window(&self) -> Arc<WorkoutDayWindow> {
        self.provider.window()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.coordinator.selected_date()
    }

    /// Day shown by the detail view, including dates outside the window.
    pub fn selected_day(&self) -> CalendarDay {
        self.provider.day_for(self.selected_date())
    }

    /// Carousel slot of the selected day; `None` when it is outside the window.
    pub fn selected_day_index(&self) -> Option<usize> {
        let state = self.coordinator.state();
        state.displayed_date.is_none().then_some(state.day_index)
    }

    pub fn is_swipe_in_progress(&self) -> bool {
        self.coordinator.state().swipe_in_progress
    }

    pub fn week_index(&self) -> usize {
        self.coordinator.state().week_index
    }

    pub fn day_index(&self) -> usize {
        self.coordinator.state().day_index
    }

    pub fn sync_state(&self) -> &SyncState {
        self.coordinator.state()
    }

    pub fn week_pager(&self, pager: PagerId) -> &WeekPager {
        match pager {
            PagerId::Main => &self.main,
            PagerId::Sticky => &self.sticky,
        }
    }

    pub fn month_pager(&self) -> &MonthPager {
        &self.month
    }

    pub fn carousel(&self) -> &DayCardCarousel {
        &self.carousel
    }

    pub fn is_month_expanded(&self) -> bool {
        self.month.is_expanded()
    }

    /// Earliest time a debounced week settle becomes due.
    pub fn next_settle_due_ms(&self) -> Option<u64> {
        self.settles.next_due_ms()
    }

    /// Whether anything still needs `tick` calls.
    pub fn is_animating(&self) -> bool {
        self.mounted
            && (self.main.is_animating()
                || self.sticky.is_animating()
                || self.month.is_animating()
                || self.carousel.is_transition_in_progress()
                || !self.settles.is_empty())
    }

    // ── Layout ───────────────────────────────────────────────────────

    /// Apply a new screen width to every pager and the carousel.
    pub fn set_layout_width(&mut self, width: f64, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::Programmatic, now_ms, |screen, events| {
            for pager in PagerId::ALL {
                let arrivals = screen.pager_mut(pager).set_page_width(width);
                screen.route_pager_events(pager, arrivals, now_ms, events);
            }
            screen.month.set_page_width(width);
            screen.carousel.set_screen_width(width);
        })
    }

    // ── Week strips ──────────────────────────────────────────────────

    pub fn week_drag_start(&mut self, pager: PagerId, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::WeekStrip, now_ms, |screen, events| {
            let cancelled = screen.pager_mut(pager).drag_start();
            screen.route_pager_events(pager, cancelled, now_ms, events);
        })
    }

    pub fn week_drag_update(&mut self, pager: PagerId, translation: f64) {
        if self.mounted {
            self.pager_mut(pager).drag_update(translation);
        }
    }

    /// Release a week strip. Its settle is delivered by later `tick`s.
    pub fn week_drag_end(&mut self, pager: PagerId, velocity: f64, now_ms: u64) {
        if self.mounted {
            self.pager_mut(pager).drag_end(velocity, now_ms);
        }
    }

    /// A day cell in either week strip was tapped.
    pub fn tap_week_day(&mut self, date: NaiveDate, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::WeekStrip, now_ms, |screen, events| {
            let commands = screen.coordinator.select_date(date, DayOrigin::WeekStrip);
            screen.apply(commands, now_ms, events);
        })
    }

    // ── Month view ───────────────────────────────────────────────────

    pub fn expand_month(&mut self, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::MonthGrid, now_ms, |screen, events| {
            if screen.month.is_expanded() {
                return;
            }
            let selected = screen.coordinator.selected_date();
            screen.month.expand(selected);
            screen.coordinator.on_month_expanded();
            events.push(Event::MonthToggled {
                expanded: true,
                at_ms: now_ms,
            });
        })
    }

    pub fn collapse_month(&mut self, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::MonthGrid, now_ms, |screen, events| {
            if !screen.month.is_expanded() {
                return;
            }
            let focused = screen.month.focused_month();
            let report = screen.month.collapse();
            if report.month != focused {
                events.push(Event::MonthChanged {
                    month: report.month,
                    at_ms: now_ms,
                });
            }
            events.push(Event::MonthToggled {
                expanded: false,
                at_ms: now_ms,
            });
            let commands = screen.coordinator.on_month_collapsed(report);
            screen.apply(commands, now_ms, events);
        })
    }

    pub fn toggle_month(&mut self, now_ms: u64) -> Vec<Event> {
        if self.month.is_expanded() {
            self.collapse_month(now_ms)
        } else {
            self.expand_month(now_ms)
        }
    }

    pub fn month_drag_start(&mut self) {
        if self.mounted {
            self.month.drag_start();
        }
    }

    pub fn month_drag_update(&mut self, translation: f64) {
        if self.mounted {
            self.month.drag_update(translation);
        }
    }

    pub fn month_drag_end(&mut self, velocity: f64, now_ms: u64) {
        if self.mounted {
            self.month.drag_end(velocity, now_ms);
        }
    }

    /// A cell in the expanded month grid was tapped.
    pub fn tap_month_day(&mut self, date: NaiveDate, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::MonthGrid, now_ms, |screen, events| {
            screen.month.select_day(date);
            let commands = screen.coordinator.select_date(date, DayOrigin::MonthGrid);
            screen.apply(commands, now_ms, events);
        })
    }

    // ── Day carousel ─────────────────────────────────────────────────

    /// Returns `false` when the gesture is ignored because a release
    /// animation is still running.
    pub fn pan_start(&mut self) -> bool {
        if !self.mounted || !self.carousel.pan_start() {
            return false;
        }
        self.coordinator.on_swipe_activity(true);
        true
    }

    pub fn pan_update(&mut self, translation_x: f64) {
        if self.mounted {
            self.carousel.pan_update(translation_x);
        }
    }

    pub fn pan_end(&mut self, translation_x: f64, velocity_x: f64, now_ms: u64) {
        if self.mounted {
            self.carousel.pan_end(translation_x, velocity_x, now_ms);
        }
    }

    // ── Host ─────────────────────────────────────────────────────────

    /// Select `date` on behalf of the host (e.g. "back to today").
    pub fn select_date(&mut self, date: NaiveDate, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::Programmatic, now_ms, |screen, events| {
            let commands = screen.coordinator.select_date(date, DayOrigin::Programmatic);
            screen.apply(commands, now_ms, events);
        })
    }

    /// Advance every animation by one frame and deliver due settles.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Event> {
        self.observe(DayOrigin::Swipe, now_ms, |screen, events| {
            if let Some(CarouselEvent::DayCommitted { day_index, .. }) =
                screen.carousel.tick(now_ms)
            {
                let commands = screen
                    .coordinator
                    .on_day_selected(day_index, DayOrigin::Swipe);
                screen.apply(commands, now_ms, events);
            }

            for pager in PagerId::ALL {
                let arrivals = screen.pager_mut(pager).tick(now_ms);
                screen.route_pager_events(pager, arrivals, now_ms, events);
            }

            if let Some(MonthPagerEvent::MonthChanged { month }) = screen.month.tick(now_ms) {
                events.push(Event::MonthChanged {
                    month,
                    at_ms: now_ms,
                });
            }

            screen.flush_settles(now_ms, events);
        })
    }

    /// Cancel pending scroll commands, debounce timers and animations.
    pub fn unmount(&mut self, now_ms: u64) -> Vec<Event> {
        if !self.mounted {
            return Vec::new();
        }
        self.settles.clear();
        self.main.halt();
        self.sticky.halt();
        self.month.halt();
        self.carousel.halt();
        self.coordinator.on_swipe_activity(false);
        self.mounted = false;
        tracing::info!(session_id = %self.session_id, "plans screen unmounted");
        vec![Event::ScreenUnmounted {
            session_id: self.session_id,
            at_ms: now_ms,
        }]
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn pager_mut(&mut self, pager: PagerId) -> &mut WeekPager {
        match pager {
            PagerId::Main => &mut self.main,
            PagerId::Sticky => &mut self.sticky,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            date: self.coordinator.selected_date(),
            week_index: self.coordinator.state().week_index,
        }
    }

    /// Run `step` if mounted, then report day and week changes it caused.
    fn observe(
        &mut self,
        origin: DayOrigin,
        now_ms: u64,
        step: impl FnOnce(&mut Self, &mut Vec<Event>),
    ) -> Vec<Event> {
        if !self.mounted {
            return Vec::new();
        }
        let before = self.snapshot();
        let mut events = Vec::new();
        step(self, &mut events);
        self.coordinator
            .on_swipe_activity(self.carousel.is_transition_in_progress());

        let after = self.snapshot();
        if after.date != before.date {
            events.push(Event::DaySelected {
                date: after.date,
                day_index: self.selected_day_index(),
                origin,
                at_ms: now_ms,
            });
        }
        if after.week_index != before.week_index {
            events.push(Event::WeekChanged {
                index: after.week_index,
                at_ms: now_ms,
            });
        }
        events
    }

    fn route_pager_events(
        &mut self,
        pager: PagerId,
        pager_events: Vec<PagerEvent>,
        now_ms: u64,
        events: &mut Vec<Event>,
    ) {
        for event in pager_events {
            match event {
                PagerEvent::ProgrammaticArrival { .. }
                | PagerEvent::ProgrammaticCancelled { .. } => {
                    let commands = self.coordinator.on_week_pager_event(pager, event);
                    self.apply(commands, now_ms, events);
                }
                PagerEvent::UserSettle { index } => {
                    self.settles.push(pager, index, now_ms);
                }
            }
        }
        self.flush_settles(now_ms, events);
    }

    fn flush_settles(&mut self, now_ms: u64, events: &mut Vec<Event>) {
        for (pager, index) in self.settles.drain_ready(now_ms) {
            let commands = self
                .coordinator
                .on_week_pager_event(pager, PagerEvent::UserSettle { index });
            self.apply(commands, now_ms, events);
        }
    }

    fn apply(&mut self, commands: Vec<SyncCommand>, now_ms: u64, events: &mut Vec<Event>) {
        for command in commands {
            match command {
                SyncCommand::ScrollWeekPager { pager, index } => {
                    let outcome = self.pager_mut(pager).scroll_to_index(index, now_ms);
                    tracing::debug!(?pager, index, ?outcome, "week scroll command");
                }
                SyncCommand::JumpCarousel { day_index } => self.carousel.jump_to(day_index),
                SyncCommand::FocusMonth { date } => self.month.focus_on(date),
                SyncCommand::Haptic { style } => {
                    if self.haptics_enabled {
                        notify(self.haptics.as_mut(), style);
                    }
                }
                SyncCommand::RegenerateWindow { around } => {
                    self.regenerate(around, now_ms, events);
                }
            }
        }
    }

    fn regenerate(&mut self, around: NaiveDate, now_ms: u64, events: &mut Vec<Event>) {
        let window = self.provider.jump_to(around);
        self.settles.clear();
        self.main.recenter(around);
        self.sticky.recenter(around);
        self.carousel
            .reset(window.index_of_reference(), window.len());
        if self.month.is_expanded() {
            self.month.focus_on(around);
        }
        events.push(Event::WindowRegenerated {
            reference: window.reference(),
            generation: window.generation(),
            at_ms: now_ms,
        });
        self.coordinator.on_window_regenerated(window);
    }
}

impl std::fmt::Debug for PlansScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlansScreen")
            .field("session_id", &self.session_id)
            .field("mounted", &self.mounted)
            .field("provider", &self.provider)
            .field("state", self.coordinator.state())
            .finish()
    }
}
