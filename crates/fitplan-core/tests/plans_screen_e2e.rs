//! End-to-end navigation scenarios on a mounted Plans screen.
//!
//! Every scenario mounts on Monday 2024-01-15 with the default config:
//! a 35-day window (2024-01-01 ..= 2024-02-04), week pages starting
//! 2024-01-01 / 01-08 / 01-15 / 01-22 / 01-29.

use chrono::NaiveDate;
use fitplan_core::{
    Config, DayOrigin, Event, FeedbackError, Haptics, ImpactStyle, PagerId, PlansScreen,
    RecordingHaptics, WeeklyTemplateSource,
};
use fitplan_core::calendar::week_number;
use fitplan_core::days::EmptySource;

// ============================================================================
// Test Helpers
// ============================================================================

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2024, 1, 15)
}

fn mount() -> (PlansScreen, RecordingHaptics) {
    let haptics = RecordingHaptics::new();
    let screen = PlansScreen::mount(
        today(),
        &Config::default(),
        Box::new(EmptySource),
        Box::new(haptics.clone()),
    );
    (screen, haptics)
}

/// Tick at 60 fps until nothing is moving. Returns the collected events
/// and the final timestamp.
fn settle(screen: &mut PlansScreen, mut now: u64) -> (Vec<Event>, u64) {
    let mut events = Vec::new();
    while screen.is_animating() {
        now += 16;
        events.extend(screen.tick(now));
        assert!(now < 60_000, "screen never came to rest");
    }
    (events, now)
}

fn animations(screen: &PlansScreen) -> (u64, u64) {
    (
        screen.week_pager(PagerId::Main).animations_started(),
        screen.week_pager(PagerId::Sticky).animations_started(),
    )
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn mount_centres_everything_on_today() {
    let (screen, _) = mount();
    let window = screen.window();
    assert_eq!(week_number(today()), 3);
    assert_eq!(window.len(), 35);
    assert!(window.get(14).unwrap().is_today(today()));
    assert_eq!(screen.week_index(), 2);
    assert_eq!(screen.carousel().day_index(), 14);
    assert_eq!(screen.month_pager().focused_month().to_string(), "2024-01");
}

#[test]
fn month_selection_scrolls_both_strips_once() {
    let (mut screen, haptics) = mount();
    screen.expand_month(0);

    let events = screen.tap_month_day(d(2024, 1, 22), 10);
    assert!(events.contains(&Event::DaySelected {
        date: d(2024, 1, 22),
        day_index: Some(21),
        origin: DayOrigin::MonthGrid,
        at_ms: 10,
    }));
    assert_eq!(screen.sync_state().pending_week_target, Some(3));
    assert!(screen.sync_state().suppress_next_week_sync);
    assert_eq!(animations(&screen), (1, 1));
    assert_eq!(screen.carousel().day_index(), 21);

    let (events, _) = settle(&mut screen, 10);
    let week_changes: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::WeekChanged { .. }))
        .collect();
    assert_eq!(week_changes.len(), 1);
    assert_eq!(screen.week_index(), 3);
    assert!(!screen.sync_state().suppress_next_week_sync);
    assert_eq!(screen.sync_state().pending_week_target, None);

    // Arrivals never fan back out into more scrolls.
    assert_eq!(animations(&screen), (1, 1));
    assert_eq!(screen.week_pager(PagerId::Main).current_index(), 3);
    assert_eq!(screen.week_pager(PagerId::Sticky).current_index(), 3);
    assert_eq!(haptics.impacts(), vec![ImpactStyle::Light]);
}

#[test]
fn swipe_commits_day_then_syncs_weeks() {
    let (mut screen, haptics) = mount();
    screen.select_date(d(2024, 1, 21), 0);
    assert_eq!(screen.day_index(), 20);
    assert_eq!(animations(&screen), (0, 0));

    assert!(screen.pan_start());
    screen.pan_update(-150.0);
    assert_eq!(screen.carousel().preview().map(|p| p.day_index), Some(21));
    screen.pan_end(-150.0, -700.0, 100);
    assert!(screen.is_swipe_in_progress());

    // The day only changes once the exit animation is done, and the week
    // strips wait for it.
    let mut now = 100;
    let mut committed_at = None;
    while screen.is_swipe_in_progress() {
        assert_eq!(screen.day_index(), 20);
        assert_eq!(animations(&screen), (0, 0));
        now += 16;
        for event in screen.tick(now) {
            if let Event::DaySelected { day_index, origin, .. } = event {
                assert_eq!(day_index, Some(21));
                assert_eq!(origin, DayOrigin::Swipe);
                committed_at = Some(now);
            }
        }
        assert!(now < 10_000);
    }
    assert!(committed_at.is_some());
    assert_eq!(screen.day_index(), 21);
    assert_eq!(animations(&screen), (1, 1));

    settle(&mut screen, now);
    assert_eq!(screen.week_index(), 3);
    assert_eq!(animations(&screen), (1, 1));
    assert_eq!(screen.carousel().translation(), 0.0);
    assert_eq!(haptics.count(), 2);
}

#[test]
fn swipe_past_last_day_springs_back() {
    let (mut screen, haptics) = mount();
    screen.select_date(d(2024, 2, 4), 0);
    let (_, now) = settle(&mut screen, 0);
    assert_eq!(screen.day_index(), 34);
    let before = haptics.count();

    assert!(screen.pan_start());
    screen.pan_update(-200.0);
    assert!(screen.carousel().preview().is_none());
    screen.pan_end(-200.0, -900.0, now);
    settle(&mut screen, now);

    assert_eq!(screen.day_index(), 34);
    assert_eq!(screen.carousel().day_index(), 34);
    assert_eq!(screen.carousel().translation(), 0.0);
    assert_eq!(haptics.count(), before);
}

#[test]
fn reselecting_the_same_day_is_silent() {
    let (mut screen, haptics) = mount();
    let first = screen.tap_week_day(d(2024, 1, 18), 0);
    assert!(!first.is_empty());
    let (_, now) = settle(&mut screen, 0);

    assert!(screen.tap_week_day(d(2024, 1, 18), now).is_empty());
    assert!(screen.select_date(d(2024, 1, 18), now).is_empty());
    assert_eq!(haptics.count(), 1);
    assert_eq!(animations(&screen), (0, 0));
}

#[test]
fn strips_follow_a_user_scroll_without_changing_day() {
    let (mut screen, _) = mount();
    screen.week_drag_start(PagerId::Sticky, 0);
    screen.week_drag_update(PagerId::Sticky, 250.0);
    screen.week_drag_end(PagerId::Sticky, 0.0, 0);
    settle(&mut screen, 0);

    assert_eq!(screen.week_index(), 1);
    assert_eq!(screen.week_pager(PagerId::Main).current_index(), 1);
    assert_eq!(screen.day_index(), 14);
    assert_eq!(screen.selected_date(), today());
}

fn assert_strips_agree(screen: &PlansScreen) {
    let main = screen.week_pager(PagerId::Main).current_index();
    let sticky = screen.week_pager(PagerId::Sticky).current_index();
    assert_eq!(main, sticky, "week strips diverged");
    assert_eq!(screen.week_index(), main);
    assert_eq!(screen.sync_state().pending_week_target, None);
    assert!(!screen.sync_state().suppress_next_week_sync);
}

#[test]
fn user_drag_during_sync_takes_both_strips() {
    let (mut screen, _) = mount();
    screen.tap_week_day(d(2024, 1, 29), 0);
    assert!(screen.sync_state().suppress_next_week_sync);

    // Grab the main strip before the commanded scroll lands.
    screen.tick(16);
    screen.week_drag_start(PagerId::Main, 16);
    assert!(!screen.sync_state().suppress_next_week_sync);
    screen.week_drag_update(PagerId::Main, 300.0);
    screen.week_drag_end(PagerId::Main, 0.0, 32);
    settle(&mut screen, 32);

    assert_strips_agree(&screen);
    assert_eq!(screen.week_index(), 1);
    assert_eq!(screen.day_index(), 28);
}

#[test]
fn drag_released_in_place_during_sync_keeps_strips_together() {
    let (mut screen, _) = mount();
    screen.tap_week_day(d(2024, 1, 22), 0);
    screen.tick(40);
    screen.week_drag_start(PagerId::Main, 40);
    screen.week_drag_update(PagerId::Main, 0.0);
    screen.week_drag_end(PagerId::Main, 0.0, 40);
    let (_, now) = settle(&mut screen, 40);
    assert_strips_agree(&screen);
    assert_eq!(screen.week_index(), 2);

    // A later selection in the abandoned week still scrolls both strips.
    screen.tap_week_day(d(2024, 1, 23), now);
    assert_eq!(screen.sync_state().pending_week_target, Some(3));
    settle(&mut screen, now);
    assert_strips_agree(&screen);
    assert_eq!(screen.week_index(), 3);
}

#[test]
fn queued_user_settle_is_absorbed_by_a_newer_sync() {
    let (mut screen, haptics) = mount();
    screen.week_drag_start(PagerId::Sticky, 0);
    screen.week_drag_update(PagerId::Sticky, -300.0);
    screen.week_drag_end(PagerId::Sticky, 0.0, 0);
    let mut now = 0;
    while now < 250 {
        now += 16;
        screen.tick(now);
    }
    assert_eq!(screen.next_settle_due_ms(), Some(336));

    // Index 7 is 2024-01-08, on week page 1.
    screen.tap_week_day(d(2024, 1, 8), now);
    assert!(screen.sync_state().suppress_next_week_sync);
    settle(&mut screen, now);

    assert_strips_agree(&screen);
    assert_eq!(screen.week_index(), 1);
    assert_eq!(screen.day_index(), 7);
    assert_eq!(haptics.count(), 1);
}

#[test]
fn date_outside_window_keeps_strips_still() {
    let (mut screen, _) = mount();
    screen.expand_month(0);
    screen.tap_month_day(d(2024, 3, 12), 0);

    assert_eq!(screen.selected_day().date, d(2024, 3, 12));
    assert_eq!(screen.selected_day_index(), None);
    assert_eq!(animations(&screen), (0, 0));
    assert_eq!(screen.month_pager().focused_month().to_string(), "2024-03");
}

#[test]
fn failing_haptics_never_block_navigation() {
    struct Broken;
    impl Haptics for Broken {
        fn impact(&mut self, _style: ImpactStyle) -> Result<(), FeedbackError> {
            Err(FeedbackError::Rejected("engine busy".into()))
        }
    }

    let mut screen = PlansScreen::mount(
        today(),
        &Config::default(),
        Box::new(WeeklyTemplateSource::new(Vec::new())),
        Box::new(Broken),
    );
    screen.tap_week_day(d(2024, 1, 23), 0);
    settle(&mut screen, 0);
    assert_eq!(screen.week_index(), 3);
    assert!(!screen.selected_day().workouts.is_empty());
}

#[test]
fn unmount_mid_animation_drops_pending_work() {
    let (mut screen, haptics) = mount();
    screen.tap_week_day(d(2024, 1, 30), 0);
    screen.week_drag_start(PagerId::Sticky, 5);
    screen.week_drag_update(PagerId::Sticky, -300.0);
    screen.week_drag_end(PagerId::Sticky, 0.0, 5);
    assert!(screen.week_pager(PagerId::Sticky).is_animating());

    let events = screen.unmount(10);
    assert_eq!(screen.next_settle_due_ms(), None);
    assert_eq!(events.len(), 1);
    assert!(!screen.is_mounted());
    assert!(screen.tick(500).is_empty());
    assert!(screen.toggle_month(600).is_empty());
    assert!(screen.set_layout_width(320.0, 700).is_empty());
    assert_eq!(screen.week_index(), 2);
    assert_eq!(haptics.count(), 1);
}
