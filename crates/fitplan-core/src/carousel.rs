//! Gesture-driven day card carousel.
//!
//! Driven by continuous pan coordinates rather than discrete swipe events.
//!
//! ## Phases
//!
//! ```text
//! Idle -> Tracking -> Committing -> Idle     (day index moves by one after the exit spring settles)
//!                  \-> SnappingBack -> Idle  (day index unchanged)
//! ```
//!
//! The day index only changes once the outgoing card has fully left the
//! screen, so content never pops mid-animation.

use serde::{Deserialize, Serialize};

use crate::motion::{Spring, SpringConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub screen_width: f64,
    /// Fraction of the screen width past which a release commits.
    pub commit_fraction: f64,
    /// Release speed (px/s) past which a release commits.
    pub commit_velocity: f64,
    /// Scale of a neighbour preview when it first appears.
    pub preview_min_scale: f64,
    pub spring: SpringConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            screen_width: 375.0,
            commit_fraction: 0.3,
            commit_velocity: 500.0,
            preview_min_scale: 0.9,
            spring: SpringConfig::default(),
        }
    }
}

/// Which neighbour a swipe moves toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Finger moves left; the next day slides in from the right.
    Next,
    /// Finger moves right; the previous day slides in from the left.
    Previous,
}

impl SwipeDirection {
    fn exit_translation(self, screen_width: f64) -> f64 {
        match self {
            SwipeDirection::Next => -screen_width,
            SwipeDirection::Previous => screen_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CarouselPhase {
    Idle,
    Tracking,
    Committing { direction: SwipeDirection },
    SnappingBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselEvent {
    /// Exit animation finished and the carousel now shows `day_index`.
    DayCommitted {
        day_index: usize,
        direction: SwipeDirection,
    },
}

/// Visual state of a neighbour card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub day_index: usize,
    pub scale: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone)]
pub struct DayCardCarousel {
    config: CarouselConfig,
    day_index: usize,
    day_count: usize,
    phase: CarouselPhase,
    spring: Spring,
    last_frame_ms: Option<u64>,
}

impl DayCardCarousel {
    pub fn new(day_index: usize, day_count: usize, config: CarouselConfig) -> Self {
        let day_count = day_count.max(1);
        Self {
            config,
            day_index: day_index.min(day_count - 1),
            day_count,
            phase: CarouselPhase::Idle,
            spring: Spring::new(0.0),
            last_frame_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn day_index(&self) -> usize {
        self.day_index
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Horizontal translation of the current card.
    pub fn translation(&self) -> f64 {
        self.spring.value()
    }

    pub fn is_transition_in_progress(&self) -> bool {
        self.phase != CarouselPhase::Idle
    }

    /// Neighbour card revealed by the current translation, if any.
    ///
    /// Dragging left reveals the next day, dragging right the previous one.
    pub fn preview(&self) -> Option<Preview> {
        let translation = self.translation();
        if translation < 0.0 {
            self.preview_for(SwipeDirection::Next)
        } else if translation > 0.0 {
            self.preview_for(SwipeDirection::Previous)
        } else {
            None
        }
    }

    /// Visual state of the neighbour on `side`. `None` at the ends of the
    /// window or while that side is not being revealed.
    pub fn preview_for(&self, side: SwipeDirection) -> Option<Preview> {
        let translation = self.translation();
        let neighbour = match side {
            SwipeDirection::Next if translation < 0.0 => {
                (self.day_index + 1 < self.day_count).then_some(self.day_index + 1)
            }
            SwipeDirection::Previous if translation > 0.0 => self.day_index.checked_sub(1),
            _ => None,
        }?;

        let progress = self.reveal_progress();
        let min_scale = self.config.preview_min_scale.clamp(0.0, 1.0);
        Some(Preview {
            day_index: neighbour,
            scale: min_scale + (1.0 - min_scale) * progress,
            opacity: progress,
        })
    }

    /// `|translation| / screen_width`, clamped to `[0, 1]`.
    pub fn reveal_progress(&self) -> f64 {
        if self.config.screen_width <= f64::EPSILON {
            return 0.0;
        }
        (self.translation().abs() / self.config.screen_width).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a pan. Ignored (returns `false`) while a release animation is
    /// still running.
    pub fn pan_start(&mut self) -> bool {
        match self.phase {
            CarouselPhase::Idle => {
                self.phase = CarouselPhase::Tracking;
                true
            }
            CarouselPhase::Tracking => true,
            CarouselPhase::Committing { .. } | CarouselPhase::SnappingBack => false,
        }
    }

    /// Follow the cumulative pan translation 1:1.
    pub fn pan_update(&mut self, translation_x: f64) {
        if self.phase == CarouselPhase::Tracking {
            self.spring.snap_to(translation_x);
        }
    }

    /// Release the pan and decide between committing and snapping back.
    pub fn pan_end(&mut self, translation_x: f64, velocity_x: f64, now_ms: u64) -> CarouselPhase {
        if self.phase != CarouselPhase::Tracking {
            return self.phase;
        }
        self.spring.snap_to(translation_x);
        self.last_frame_ms = Some(now_ms);

        let direction = self.commit_direction(translation_x, velocity_x);
        self.phase = match direction {
            Some(direction) => {
                let exit = direction.exit_translation(self.config.screen_width);
                self.spring.animate_to(exit, velocity_x);
                tracing::debug!(?direction, from = self.day_index, "carousel committing");
                CarouselPhase::Committing { direction }
            }
            None => {
                self.spring.animate_to(0.0, velocity_x);
                CarouselPhase::SnappingBack
            }
        };
        self.phase
    }

    /// Advance the release spring by one animation frame.
    pub fn tick(&mut self, now_ms: u64) -> Option<CarouselEvent> {
        if !matches!(
            self.phase,
            CarouselPhase::Committing { .. } | CarouselPhase::SnappingBack
        ) {
            return None;
        }
        let last = self.last_frame_ms.replace(now_ms).unwrap_or(now_ms);
        let dt_secs = now_ms.saturating_sub(last) as f64 / 1000.0;
        if !self.spring.update(dt_secs, self.config.spring) {
            return None;
        }

        let phase = std::mem::replace(&mut self.phase, CarouselPhase::Idle);
        self.spring.snap_to(0.0);
        self.last_frame_ms = None;

        match phase {
            CarouselPhase::Committing { direction } => {
                self.day_index = match direction {
                    SwipeDirection::Next => self.day_index + 1,
                    SwipeDirection::Previous => self.day_index - 1,
                };
                Some(CarouselEvent::DayCommitted {
                    day_index: self.day_index,
                    direction,
                })
            }
            _ => None,
        }
    }

    /// Show `day_index` at rest, dropping any gesture or animation.
    pub fn jump_to(&mut self, day_index: usize) {
        self.day_index = day_index.min(self.day_count - 1);
        self.halt();
    }

    /// Adopt a regenerated window.
    pub fn reset(&mut self, day_index: usize, day_count: usize) {
        self.day_count = day_count.max(1);
        self.jump_to(day_index);
    }

    pub fn set_screen_width(&mut self, screen_width: f64) {
        self.config.screen_width = screen_width.max(0.0);
        self.halt();
    }

    /// Stop at rest on the current index.
    pub fn halt(&mut self) {
        self.phase = CarouselPhase::Idle;
        self.spring.snap_to(0.0);
        self.last_frame_ms = None;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn commit_direction(&self, translation_x: f64, velocity_x: f64) -> Option<SwipeDirection> {
        let past_distance =
            translation_x.abs() > self.config.commit_fraction * self.config.screen_width;
        let past_velocity = velocity_x.abs() > self.config.commit_velocity;

        let sign = if past_velocity {
            velocity_x
        } else if past_distance {
            translation_x
        } else {
            return None;
        };

        let direction = if sign < 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Previous
        };

        let blocked = match direction {
            SwipeDirection::Next => self.day_index + 1 >= self.day_count,
            SwipeDirection::Previous => self.day_index == 0,
        };
        if blocked {
            tracing::debug!(?direction, index = self.day_index, "swipe past window edge");
            return None;
        }
        Some(direction)
    }
}
