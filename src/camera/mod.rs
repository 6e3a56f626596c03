//! Camera policy.
//!
//! Two interchangeable rigs, picked at construction:
//! - `waypoint` - fixed tour between preset viewpoints
//! - `follow`   - orbit a live subject at an adjustable polar offset
//!
//! `zoom` layers the focus close-up on top of either rig.

pub mod follow;
pub mod waypoint;
pub mod zoom;

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselError;
use crate::render::tween::TweenConfig;

use follow::{FollowCamera, PolarOffset};
use waypoint::WaypointTour;

/// Where the camera should be and what it should look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

/// Camera strategy as configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CameraMode {
    Tour {
        waypoints: Vec<[f32; 3]>,
        look_at: [f32; 3],
        #[serde(default)]
        tween: TweenConfig,
    },
    Follow {
        #[serde(default)]
        offset: PolarOffset,
        /// Radians per rotate command when bound to a key
        #[serde(default = "default_rotate_step")]
        rotate_step: f32,
    },
}

fn default_rotate_step() -> f32 {
    0.1
}

impl Default for CameraMode {
    fn default() -> Self {
        Self::Tour {
            waypoints: vec![[0.0, 0.0, 2.0], [3.0, 3.0, 3.0], [-3.0, 2.0, 4.0]],
            look_at: [0.0, 0.0, 0.0],
            tween: TweenConfig {
                duration: 1.5,
                ..TweenConfig::default()
            },
        }
    }
}

impl CameraMode {
    pub fn follow() -> Self {
        Self::Follow {
            offset: PolarOffset::default(),
            rotate_step: default_rotate_step(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CameraMode::Tour { .. } => "tour",
            CameraMode::Follow { .. } => "follow",
        }
    }

    /// Step used by the default key bindings for rotate-left/right.
    pub fn rotate_step(&self) -> f32 {
        match self {
            CameraMode::Follow { rotate_step, .. } => *rotate_step,
            CameraMode::Tour { .. } => default_rotate_step(),
        }
    }
}

/// Live camera strategy.
#[derive(Debug, Clone)]
pub enum CameraRig {
    Tour(WaypointTour),
    Follow(FollowCamera),
}

impl CameraRig {
    pub fn from_mode(mode: &CameraMode) -> Result<Self, CarouselError> {
        Ok(match mode {
            CameraMode::Tour {
                waypoints,
                look_at,
                tween,
            } => CameraRig::Tour(WaypointTour::new(waypoints.clone(), *look_at, *tween)?),
            CameraMode::Follow { offset, .. } => CameraRig::Follow(FollowCamera::new(*offset)),
        })
    }

    /// Un-zoomed target for this tick.
    pub fn target(&self) -> CameraTarget {
        match self {
            CameraRig::Tour(t) => t.target(),
            CameraRig::Follow(f) => f.target(),
        }
    }
}
