//! Day records shared by the week calendar and the day carousel.

pub mod window;
pub mod workout;

pub use window::{CalendarDay, DayWindowProvider, RestDayPolicy, WindowSpan, WorkoutDayWindow};
pub use workout::{EmptySource, Exercise, WeeklyTemplateSource, WorkoutSource, WorkoutSummary};
