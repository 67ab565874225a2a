//! Cross-view synchronization of the week strips, month view and day carousel.

pub mod coordinator;
pub mod state;

pub use coordinator::ScrollSyncCoordinator;
pub use state::{DayOrigin, SyncCommand, SyncState, WeekSyncOverflow};
