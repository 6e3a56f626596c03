//! Focus zoom: pulls the camera in along Z while an item is focused.
//!
//! The depth to return to is captured the first time focus turns on and
//! kept for the lifetime of the zoom, even if the camera has moved since.
//! After the return the zoom keeps holding that depth until the rig moves
//! the camera itself and calls `release`.

use serde::{Deserialize, Serialize};

use crate::render::tween::{Tween, TweenConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub enabled: bool,
    /// Camera Z while focused
    pub close_depth: f32,
    pub tween: TweenConfig,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            close_depth: 1.0,
            tween: TweenConfig {
                duration: 0.8,
                ..TweenConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FocusZoom {
    cfg: ZoomConfig,
    initial_depth: Option<f32>,
    depth: Option<Tween>,
    focused: bool,
}

impl FocusZoom {
    pub fn new(cfg: ZoomConfig) -> Self {
        Self {
            cfg,
            initial_depth: None,
            depth: None,
            focused: false,
        }
    }

    pub fn initial_depth(&self) -> Option<f32> {
        self.initial_depth
    }

    /// Current zoom-driven depth, if the zoom is holding the camera.
    /// Stays `Some(initial_depth)` after the return until `release`.
    pub fn depth(&self) -> Option<f32> {
        self.depth.as_ref().map(Tween::value)
    }

    pub fn is_animating(&self) -> bool {
        self.depth.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// React to a focus change. `camera_depth` is the un-zoomed camera Z,
    /// recorded only on the very first activation.
    pub fn set_focus(&mut self, focused: bool, camera_depth: f32) {
        if !self.cfg.enabled || focused == self.focused {
            return;
        }
        self.focused = focused;
        let initial = *self.initial_depth.get_or_insert(camera_depth);
        let to = if focused { self.cfg.close_depth } else { initial };
        let TweenConfig { duration, ease } = self.cfg.tween;
        match self.depth.as_mut() {
            Some(t) => t.retarget(to, duration),
            None => self.depth = Some(Tween::new(camera_depth, to, duration, ease)),
        }
        log::debug!("focus zoom → {to:.2} (focused: {focused})");
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(t) = self.depth.as_mut() {
            t.advance(dt);
        }
    }

    /// Hand the camera back to the rig. No-op while focused. Returns the
    /// depth that was being held, for the rig to continue from.
    pub fn release(&mut self) -> Option<f32> {
        if self.focused {
            return None;
        }
        let held = self.depth.take().map(|t| t.value());
        if let Some(z) = held {
            log::debug!("focus zoom released at {z:.2}");
        }
        held
    }

    /// Overwrite the Z of an un-zoomed camera position.
    pub fn apply(&self, mut position: [f32; 3]) -> [f32; 3] {
        if let Some(z) = self.depth() {
            position[2] = z;
        }
        position
    }
}
