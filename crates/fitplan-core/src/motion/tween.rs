//! Fixed-duration eased scroll used by pagers.

/// Cubic ease-out over `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    started_at_ms: u64,
    duration_ms: u64,
}

impl Tween {
    pub fn new(from: f64, to: f64, started_at_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            started_at_ms,
            duration_ms,
        }
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    /// Progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn value_at(&self, now_ms: u64) -> f64 {
        let eased = ease_out_cubic(self.progress(now_ms));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_reaches_target_at_duration() {
        let tween = Tween::new(0.0, -375.0, 1_000, 250);
        assert_eq!(tween.value_at(1_000), 0.0);
        assert!(tween.value_at(1_125) < -300.0);
        assert_eq!(tween.value_at(1_250), -375.0);
        assert!(tween.is_finished(1_250));
        assert!(!tween.is_finished(1_249));
    }

    #[test]
    fn zero_duration_is_immediately_done() {
        let tween = Tween::new(5.0, 10.0, 100, 0);
        assert!(tween.is_finished(100));
        assert_eq!(tween.value_at(100), 10.0);
    }
}
