//! # Fitplan Core Library
//!
//! This library provides the navigation engine behind the Fitplan "Plans"
//! screen: a five-page week strip (rendered twice, as the main header and
//! a sticky header), an expandable three-page month view, and a swipeable
//! day card carousel, all kept in agreement about which day is selected.
//! The engine is UI-agnostic. Hosts feed it gestures and animation frames
//! with their own clock and render from its read models; the CLI binary
//! drives the same engine headlessly.
//!
//! ## Architecture
//!
//! - **Calendar**: ISO week numbers, week starts and 6x7 month grids
//! - **Days**: the fixed window of days shared by every view
//! - **Pagers**: week and month paging state machines
//! - **Carousel**: spring-driven day card paging
//! - **Scroll sync**: the single writer of navigation state
//! - **Screen**: one mounted Plans screen wiring the above together
//!
//! ## Key Components
//!
//! - [`PlansScreen`]: Entry point for hosts
//! - [`ScrollSyncCoordinator`]: Reconciles pagers and carousel
//! - [`WeekPager`] / [`MonthPager`]: Paging state machines
//! - [`DayCardCarousel`]: Day-to-day swipe state machine
//! - [`Config`]: Engine configuration management

pub mod calendar;
pub mod carousel;
pub mod days;
pub mod error;
pub mod events;
pub mod feedback;
pub mod motion;
pub mod pager;
pub mod screen;
pub mod scroll_sync;
pub mod storage;

pub use calendar::{month_grid, start_of_week, week_number, MonthGrid, MonthKey};
pub use carousel::{CarouselConfig, CarouselEvent, CarouselPhase, DayCardCarousel, SwipeDirection};
pub use days::{
    CalendarDay, DayWindowProvider, WeeklyTemplateSource, WindowSpan, WorkoutDayWindow,
    WorkoutSource, WorkoutSummary,
};
pub use error::{ConfigError, CoreError, FeedbackError};
pub use events::Event;
pub use feedback::{Haptics, ImpactStyle, NoopHaptics, RecordingHaptics};
pub use pager::{MonthPager, PagerEvent, PagerId, WeekPager};
pub use screen::PlansScreen;
pub use scroll_sync::{DayOrigin, ScrollSyncCoordinator, SyncCommand, SyncState, WeekSyncOverflow};
pub use storage::Config;
