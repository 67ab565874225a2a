//! The fixed window of days shared by the calendar and the day carousel.
//!
//! Both components index into the same `WorkoutDayWindow`, so "day N" always
//! means the same date. The window is generated once per mount and handed
//! out behind an `Arc`; regeneration only happens on an explicit jump.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::workout::{WorkoutSource, WorkoutSummary};
use crate::calendar::{date_at_index, index_of_date, weekday_label};

/// Weekdays on which no training is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestDayPolicy {
    pub weekdays: Vec<Weekday>,
}

impl Default for RestDayPolicy {
    fn default() -> Self {
        Self {
            weekdays: vec![Weekday::Wed, Weekday::Sun],
        }
    }
}

impl RestDayPolicy {
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&date.weekday())
    }
}

/// One day of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday_label: String,
    pub day_of_month: u32,
    pub is_rest_day: bool,
    pub workouts: Vec<WorkoutSummary>,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, rest_days: &RestDayPolicy, source: &dyn WorkoutSource) -> Self {
        Self {
            date,
            weekday_label: weekday_label(date.weekday()).to_string(),
            day_of_month: date.day(),
            is_rest_day: rest_days.is_rest_day(date),
            workouts: source.workouts_for(date),
        }
    }

    /// Evaluated at query time so a session spanning midnight never shows a
    /// stale marker.
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// Window dimensions relative to the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub days_before: u32,
    pub days_after: u32,
}

impl Default for WindowSpan {
    fn default() -> Self {
        Self {
            days_before: 14,
            days_after: 20,
        }
    }
}

impl WindowSpan {
    /// Number of days covered, reference day included.
    pub fn day_count(&self) -> usize {
        self.days_before as usize + self.days_after as usize + 1
    }
}

/// Consecutive days `[reference - days_before, reference + days_after]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDayWindow {
    reference: NaiveDate,
    span: WindowSpan,
    generation: u64,
    days: Vec<CalendarDay>,
}

impl WorkoutDayWindow {
    pub fn generate(
        reference: NaiveDate,
        span: WindowSpan,
        rest_days: &RestDayPolicy,
        source: &dyn WorkoutSource,
        generation: u64,
    ) -> Self {
        let start = reference - chrono::Duration::days(span.days_before as i64);
        let days = (0..span.day_count())
            .map(|i| CalendarDay::new(date_at_index(start, i), rest_days, source))
            .collect();
        Self {
            reference,
            span,
            generation,
            days,
        }
    }

    /// The "today" this window was centred on when generated.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn span(&self) -> WindowSpan {
        self.span
    }

    /// Bumped on each regeneration; indices from older generations are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn index_of_reference(&self) -> usize {
        self.span.days_before as usize
    }

    pub fn first_date(&self) -> NaiveDate {
        self.days.first().map(|d| d.date).unwrap_or(self.reference)
    }

    pub fn last_date(&self) -> NaiveDate {
        self.days.last().map(|d| d.date).unwrap_or(self.reference)
    }

    pub fn get(&self, index: usize) -> Option<&CalendarDay> {
        self.days.get(index)
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        index_of_date(self.first_date(), self.len(), date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// Clamp an arbitrary index into the window.
    pub fn clamp_index(&self, index: i64) -> usize {
        index.clamp(0, self.len().saturating_sub(1) as i64) as usize
    }
}

/// Generates the window on mount and hands out the same instance until an
/// explicit jump.
pub struct DayWindowProvider {
    span: WindowSpan,
    rest_days: RestDayPolicy,
    source: Box<dyn WorkoutSource>,
    current: Arc<WorkoutDayWindow>,
}

impl DayWindowProvider {
    pub fn new(
        today: NaiveDate,
        span: WindowSpan,
        rest_days: RestDayPolicy,
        source: Box<dyn WorkoutSource>,
    ) -> Self {
        let current = Arc::new(WorkoutDayWindow::generate(
            today, span, &rest_days, source.as_ref(), 0,
        ));
        tracing::info!(%today, len = current.len(), "generated day window");
        Self {
            span,
            rest_days,
            source,
            current,
        }
    }

    /// The current window. Same `Arc` on every call until `jump_to`.
    pub fn window(&self) -> Arc<WorkoutDayWindow> {
        Arc::clone(&self.current)
    }

    pub fn rest_days(&self) -> &RestDayPolicy {
        &self.rest_days
    }

    /// Day record for `date`, built on demand when it lies outside the window.
    pub fn day_for(&self, date: NaiveDate) -> CalendarDay {
        match self.current.index_of(date).and_then(|i| self.current.get(i)) {
            Some(day) => day.clone(),
            None => CalendarDay::new(date, &self.rest_days, self.source.as_ref()),
        }
    }

    /// Regenerate around `date`. Invalidates every index into the old window.
    pub fn jump_to(&mut self, date: NaiveDate) -> Arc<WorkoutDayWindow> {
        let generation = self.current.generation() + 1;
        self.current = Arc::new(WorkoutDayWindow::generate(
            date,
            self.span,
            &self.rest_days,
            self.source.as_ref(),
            generation,
        ));
        tracing::info!(%date, generation, "regenerated day window");
        self.window()
    }
}

impl std::fmt::Debug for DayWindowProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayWindowProvider")
            .field("span", &self.span)
            .field("rest_days", &self.rest_days)
            .field("reference", &self.current.reference())
            .field("generation", &self.current.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::days::workout::{EmptySource, WeeklyTemplateSource};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn provider(today: NaiveDate) -> DayWindowProvider {
        DayWindowProvider::new(
            today,
            WindowSpan::default(),
            RestDayPolicy::default(),
            Box::new(EmptySource),
        )
    }

    #[test]
    fn default_window_has_today_at_fourteen() {
        let today = d(2024, 1, 15);
        let window = provider(today).window();
        assert_eq!(window.len(), 35);
        assert!(window.get(14).unwrap().is_today(today));
        assert_eq!(window.index_of_reference(), 14);
        assert_eq!(window.first_date(), d(2024, 1, 1));
        assert_eq!(window.last_date(), d(2024, 2, 4));
    }

    #[test]
    fn days_are_consecutive() {
        let window = provider(d(2024, 2, 27)).window();
        for pair in window.days().windows(2) {
            assert_eq!(pair[1].date - pair[0].date, chrono::Duration::days(1));
        }
    }

    #[test]
    fn window_identity_is_stable_until_jump() {
        let mut provider = provider(d(2024, 1, 15));
        let first = provider.window();
        let again = provider.window();
        assert!(Arc::ptr_eq(&first, &again));

        let jumped = provider.jump_to(d(2024, 3, 1));
        assert!(!Arc::ptr_eq(&first, &jumped));
        assert_eq!(jumped.generation(), 1);
        assert_eq!(jumped.index_of(d(2024, 3, 1)), Some(14));
    }

    #[test]
    fn rest_days_and_labels_follow_weekday() {
        let rest = RestDayPolicy::default();
        let source = WeeklyTemplateSource::new(rest.weekdays.clone());
        let day = CalendarDay::new(d(2024, 1, 17), &rest, &source);
        assert!(day.is_rest_day);
        assert!(day.workouts.is_empty());
        assert_eq!(day.weekday_label, "Wed");
        assert_eq!(day.day_of_month, 17);

        let day = CalendarDay::new(d(2024, 1, 18), &rest, &source);
        assert!(!day.is_rest_day);
        assert_eq!(day.workouts.len(), 1);
    }

    #[test]
    fn is_today_is_evaluated_against_the_given_date() {
        let window = provider(d(2024, 1, 15)).window();
        let day = window.get(14).unwrap();
        assert!(day.is_today(d(2024, 1, 15)));
        // Same session, after midnight.
        assert!(!day.is_today(d(2024, 1, 16)));
        assert!(window.get(15).unwrap().is_today(d(2024, 1, 16)));
    }

    #[test]
    fn day_for_builds_days_outside_the_window() {
        let provider = provider(d(2024, 1, 15));
        let inside = provider.day_for(d(2024, 1, 20));
        assert_eq!(inside, provider.window().get(19).unwrap().clone());

        let outside = provider.day_for(d(2024, 3, 12));
        assert_eq!(outside.date, d(2024, 3, 12));
        assert_eq!(outside.weekday_label, "Tue");
        assert!(!provider.window().contains(d(2024, 3, 12)));
    }

    #[test]
    fn clamp_index_stays_inside() {
        let window = provider(d(2024, 1, 15)).window();
        assert_eq!(window.clamp_index(-3), 0);
        assert_eq!(window.clamp_index(100), 34);
        assert_eq!(window.clamp_index(7), 7);
    }
}
