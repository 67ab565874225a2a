//! Horizontal page track shared by the week and month pagers.
//!
//! Offsets follow the usual scroll convention: page `i` sits at
//! `-i * page_width`, so dragging the finger left (negative translation)
//! moves toward higher page indices.

use serde::{Deserialize, Serialize};

use crate::motion::Tween;

/// Release thresholds and animation timing for a pager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Fraction of the page width a drag must exceed to change page.
    pub distance_fraction: f64,
    /// Release speed (px/s) that changes page regardless of distance.
    pub velocity_threshold: f64,
    /// Duration of snap and programmatic scroll animations.
    pub animation_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            distance_fraction: 0.5,
            velocity_threshold: 300.0,
            animation_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    base_offset: f64,
    translation: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct PageTrack {
    page_count: usize,
    page_width: f64,
    offset: f64,
    drag: Option<Drag>,
    animation: Option<Tween>,
    snap: SnapConfig,
}

impl PageTrack {
    pub(crate) fn new(page_count: usize, initial_page: usize, page_width: f64, snap: SnapConfig) -> Self {
        let mut track = Self {
            page_count: page_count.max(1),
            page_width: page_width.max(0.0),
            offset: 0.0,
            drag: None,
            animation: None,
            snap,
        };
        track.offset = track.offset_for(track.clamp_page(initial_page));
        track
    }

    pub(crate) fn offset(&self) -> f64 {
        self.offset
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub(crate) fn animation_target(&self) -> Option<usize> {
        self.animation.map(|a| self.page_at(a.to()))
    }

    pub(crate) fn clamp_page(&self, page: usize) -> usize {
        page.min(self.page_count - 1)
    }

    pub(crate) fn offset_for(&self, page: usize) -> f64 {
        -self.page_width * page as f64
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        let min = self.offset_for(self.page_count - 1);
        offset.clamp(min, 0.0)
    }

    fn page_at(&self, offset: f64) -> usize {
        if self.page_width <= f64::EPSILON {
            return 0;
        }
        let page = (-offset / self.page_width).round();
        if !page.is_finite() {
            return 0;
        }
        page.clamp(0.0, (self.page_count - 1) as f64) as usize
    }

    /// Page nearest to the current visual offset.
    pub(crate) fn nearest_page(&self) -> usize {
        self.page_at(self.offset)
    }

    /// Fractional page position, e.g. `2.4` while dragging from 2 toward 3.
    pub(crate) fn page_position(&self) -> f64 {
        if self.page_width <= f64::EPSILON {
            return 0.0;
        }
        -self.offset / self.page_width
    }

    /// Re-layout with a new page width, keeping the same page centred.
    pub(crate) fn set_page_width(&mut self, page_width: f64) {
        let page = self.nearest_page();
        self.page_width = page_width.max(0.0);
        self.animation = None;
        self.drag = None;
        self.offset = self.offset_for(page);
    }

    /// Place the track on `page` without animating.
    pub(crate) fn jump_to(&mut self, page: usize) {
        self.animation = None;
        self.drag = None;
        self.offset = self.offset_for(self.clamp_page(page));
    }

    /// Start a drag from wherever the track currently is, cancelling any
    /// running animation.
    pub(crate) fn begin_drag(&mut self) {
        self.animation = None;
        self.drag = Some(Drag {
            base_offset: self.offset,
            translation: 0.0,
        });
    }

    /// Move by the cumulative `translation` since the drag began.
    pub(crate) fn drag_to(&mut self, translation: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.translation = translation;
            let base = drag.base_offset;
            self.offset = self.clamp_offset(base + translation);
        }
    }

    /// End the drag and pick the page to snap to.
    ///
    /// `origin` is the page the gesture is measured against. Returns `None`
    /// when no drag was in progress.
    pub(crate) fn release(&mut self, origin: usize, velocity: f64) -> Option<usize> {
        let drag = self.drag.take()?;
        let translation = drag.translation;
        let fast = velocity.abs() > self.snap.velocity_threshold;
        let far = translation.abs() > self.snap.distance_fraction * self.page_width;

        let direction = if fast {
            -velocity.signum()
        } else if far {
            -translation.signum()
        } else {
            0.0
        };

        let target = if direction > 0.0 {
            self.clamp_page(origin + 1)
        } else if direction < 0.0 {
            origin.saturating_sub(1)
        } else {
            self.clamp_page(origin)
        };
        Some(target)
    }

    /// Animate toward `page`. A zero-length animation finishes on the next tick.
    pub(crate) fn animate_to(&mut self, page: usize, now_ms: u64) {
        let to = self.offset_for(self.clamp_page(page));
        self.animation = Some(Tween::new(self.offset, to, now_ms, self.snap.animation_ms));
    }

    /// Advance the running animation. Returns the destination page when it
    /// completes during this frame.
    pub(crate) fn tick(&mut self, now_ms: u64) -> Option<usize> {
        let animation = self.animation?;
        self.offset = animation.value_at(now_ms);
        if animation.is_finished(now_ms) {
            self.animation = None;
            self.offset = animation.to();
            return Some(self.page_at(animation.to()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> PageTrack {
        PageTrack::new(5, 2, 300.0, SnapConfig::default())
    }

    #[test]
    fn starts_on_initial_page() {
        let track = track();
        assert_eq!(track.offset(), -600.0);
        assert_eq!(track.nearest_page(), 2);
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let mut track = track();
        track.begin_drag();
        track.drag_to(-100.0);
        assert_eq!(track.release(2, -50.0), Some(2));
    }

    #[test]
    fn long_drag_moves_one_page() {
        let mut track = track();
        track.begin_drag();
        track.drag_to(-200.0);
        assert_eq!(track.release(2, 0.0), Some(3));

        track.begin_drag();
        track.drag_to(160.0);
        assert_eq!(track.release(2, 0.0), Some(1));
    }

    #[test]
    fn fast_flick_moves_one_page_in_velocity_direction() {
        let mut track = track();
        track.begin_drag();
        track.drag_to(-20.0);
        assert_eq!(track.release(2, -900.0), Some(3));
    }

    #[test]
    fn snapping_is_clamped_at_edges() {
        let mut track = PageTrack::new(5, 4, 300.0, SnapConfig::default());
        track.begin_drag();
        track.drag_to(-250.0);
        assert_eq!(track.offset(), -1200.0);
        assert_eq!(track.release(4, -1000.0), Some(4));

        let mut track = PageTrack::new(5, 0, 300.0, SnapConfig::default());
        track.begin_drag();
        track.drag_to(250.0);
        assert_eq!(track.release(0, 1000.0), Some(0));
    }

    #[test]
    fn animation_reports_destination_once() {
        let mut track = track();
        track.animate_to(3, 1_000);
        assert!(track.tick(1_100).is_none());
        assert_eq!(track.tick(1_250), Some(3));
        assert_eq!(track.offset(), -900.0);
        assert!(track.tick(1_300).is_none());
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let mut track = track();
        assert_eq!(track.release(2, -1000.0), None);
    }
}
