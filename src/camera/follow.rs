//! Follow camera: orbits a moving subject at a polar offset.
//!
//! Position is reassigned every tick from the subject's live position;
//! nothing here is tweened.

use serde::{Deserialize, Serialize};

use super::CameraTarget;

/// Orbit offset around the subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarOffset {
    /// Radians around the vertical axis (0 = behind the subject on +Z)
    pub angle: f32,
    pub distance: f32,
    pub height: f32,
}

impl Default for PolarOffset {
    fn default() -> Self {
        Self {
            angle: 0.0,
            distance: 5.0,
            height: 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FollowCamera {
    offset: PolarOffset,
    subject: [f32; 3],
}

impl FollowCamera {
    pub fn new(offset: PolarOffset) -> Self {
        Self {
            offset,
            subject: [0.0; 3],
        }
    }

    pub fn offset(&self) -> PolarOffset {
        self.offset
    }

    /// Unbounded; the trig in `target` wraps it.
    pub fn rotate(&mut self, delta: f32) {
        self.offset.angle += delta;
    }

    pub fn track(&mut self, subject: [f32; 3]) {
        self.subject = subject;
    }

    pub fn target(&self) -> CameraTarget {
        let PolarOffset {
            angle,
            distance,
            height,
        } = self.offset;
        let s = self.subject;
        CameraTarget {
            position: [
                s[0] + angle.sin() * distance,
                s[1] + height,
                s[2] + angle.cos() * distance,
            ],
            look_at: s,
        }
    }
}
