//! Animation and timing primitives driven by caller-supplied timestamps.

pub mod debounce;
pub mod spring;
pub mod tween;

pub use debounce::Debouncer;
pub use spring::{Spring, SpringConfig};
pub use tween::{ease_out_cubic, Tween};
