//! Haptic feedback collaborator.
//!
//! Each committed day or week transition asks for one light impact.
//! Delivery is fire-and-forget: a failure is logged and never touches
//! navigation state.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

/// Platform haptics engine.
pub trait Haptics {
    fn impact(&mut self, style: ImpactStyle) -> Result<(), FeedbackError>;
}

/// Haptics disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn impact(&mut self, _style: ImpactStyle) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Records every impact; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    log: Rc<RefCell<Vec<ImpactStyle>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn impacts(&self) -> Vec<ImpactStyle> {
        self.log.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl Haptics for RecordingHaptics {
    fn impact(&mut self, style: ImpactStyle) -> Result<(), FeedbackError> {
        self.log.borrow_mut().push(style);
        Ok(())
    }
}

/// Deliver `style`, logging and swallowing any failure.
pub fn notify(haptics: &mut dyn Haptics, style: ImpactStyle) {
    if let Err(e) = haptics.impact(style) {
        tracing::warn!(error = %e, ?style, "haptic feedback dropped");
    }
}
