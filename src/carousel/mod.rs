//! Carousel presentation controller.
//!
//! Owns the `CarouselState` and the strategies picked at construction
//! (navigation, layout, camera rig, focus zoom). Commands go in through
//! `apply` (immediately) or `push` (queued until the next `tick`); each tick
//! returns a `Frame` of targets for the host's animation engine.
//!
//! Nothing here fails at runtime. Commands that would break an invariant are
//! dropped and reported as `Outcome::Ignored`.

pub mod navigation;

use std::collections::VecDeque;

use thiserror::Error;

use crate::camera::zoom::FocusZoom;
use crate::camera::{CameraRig, CameraTarget};
use crate::config::StageConfig;
use crate::input::Command;
use crate::render::layout::{self, LayoutMode, LayoutTarget};

use navigation::{Direction, NavigationPolicy};

/// Construction errors. The controller itself never fails once built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CarouselError {
    #[error("a carousel needs at least one item")]
    Empty,
    #[error("camera tour has no waypoints")]
    NoWaypoints,
    #[error("tween duration must be positive, got {0}")]
    InvalidDuration(f32),
}

/// Opaque content reference (image path, model id, ...) with its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub index: usize,
    pub id: String,
}

impl Item {
    pub fn new(index: usize, id: impl Into<String>) -> Self {
        Self {
            index,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CarouselState {
    pub items: Vec<Item>,
    pub current_index: usize,
    /// Close-up mode on the current item
    pub focused: bool,
    /// A waypoint flight is in progress
    pub transitioning: bool,
}

impl CarouselState {
    pub fn new(items: Vec<Item>) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(Self {
            items,
            current_index: 0,
            focused: false,
            transitioning: false,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> &Item {
        &self.items[self.current_index]
    }
}

/// Whether a command changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }
}

/// Everything the host needs for one rendered frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub layout: Vec<LayoutTarget>,
    pub camera: CameraTarget,
    pub current_index: usize,
    pub focused: bool,
    pub transitioning: bool,
    /// Waypoint the tour is parked on (tour rig only)
    pub waypoint: Option<usize>,
    pub debug_overlay: bool,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    state: CarouselState,
    navigation: NavigationPolicy,
    layout: LayoutMode,
    rig: CameraRig,
    zoom: FocusZoom,
    pending: VecDeque<Command>,
    debug_overlay: bool,
}

impl Carousel {
    /// Build a carousel over `ids`, in order.
    pub fn new<I, S>(ids: I, cfg: &StageConfig) -> Result<Self, CarouselError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<Item> = ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| Item::new(i, id))
            .collect();
        let state = CarouselState::new(items)?;
        for d in [cfg.zoom.tween.duration, cfg.tween.duration] {
            if d.is_nan() || d <= 0.0 {
                return Err(CarouselError::InvalidDuration(d));
            }
        }
        let rig = CameraRig::from_mode(&cfg.camera)?;

        log::info!(
            "carousel: {} items, {:?} navigation, {} layout, {} camera",
            state.len(),
            cfg.navigation.edge,
            cfg.layout.name(),
            cfg.camera.name(),
        );

        Ok(Self {
            state,
            navigation: cfg.navigation,
            layout: cfg.layout,
            rig,
            zoom: FocusZoom::new(cfg.zoom),
            pending: VecDeque::new(),
            debug_overlay: false,
        })
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn zoom(&self) -> &FocusZoom {
        &self.zoom
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Queue a command for the next `tick`.
    pub fn push(&mut self, cmd: Command) {
        self.pending.push_back(cmd);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply one command right away.
    pub fn apply(&mut self, cmd: Command) -> Outcome {
        let outcome: Outcome = match cmd {
            Command::Prev => self.navigation.advance(&mut self.state, Direction::Previous),
            Command::Next => self.navigation.advance(&mut self.state, Direction::Next),
            Command::ToggleFocus { item } => {
                let changed = self.navigation.toggle_focus(&mut self.state, item);
                if changed {
                    let depth = self.rig.target().position[2];
                    self.zoom.set_focus(self.state.focused, depth);
                }
                changed
            }
            Command::RotateCamera(delta) => match &mut self.rig {
                CameraRig::Follow(f) => {
                    f.rotate(delta);
                    self.zoom.release();
                    true
                }
                CameraRig::Tour(_) => false,
            },
            Command::SelectWaypoint(index) => match &mut self.rig {
                CameraRig::Tour(t) => {
                    // depart from what is on screen, held zoom depth included
                    let from = self.zoom.apply(t.target().position);
                    let started = t.move_to_from(index, from);
                    if started {
                        self.zoom.release();
                    }
                    self.state.transitioning = t.is_transitioning();
                    started
                }
                CameraRig::Follow(_) => false,
            },
            Command::ToggleDebugOverlay => {
                self.debug_overlay = !self.debug_overlay;
                true
            }
        }
        .into();

        match outcome {
            Outcome::Applied => log::debug!(
                "{cmd:?} → item {} (focused: {})",
                self.state.current_index,
                self.state.focused
            ),
            Outcome::Ignored => log::debug!("{cmd:?} ignored"),
        }
        outcome
    }

    /// One update cycle: drain queued commands in arrival order, track the
    /// follow subject, advance camera flights and the zoom by `dt` seconds.
    pub fn tick(&mut self, dt: f32, subject: Option<[f32; 3]>) -> Frame {
        while let Some(cmd) = self.pending.pop_front() {
            self.apply(cmd);
        }

        match &mut self.rig {
            CameraRig::Follow(f) => {
                if let Some(s) = subject {
                    f.track(s);
                }
            }
            CameraRig::Tour(t) => {
                if let Some(w) = t.tick(dt) {
                    log::debug!("camera landed on waypoint {w}");
                }
                self.state.transitioning = t.is_transitioning();
            }
        }
        self.zoom.tick(dt);

        self.frame()
    }

    /// Targets for the current state, without advancing time.
    pub fn frame(&self) -> Frame {
        Frame {
            layout: self.layout_targets(),
            camera: self.camera_target(),
            current_index: self.state.current_index,
            focused: self.state.focused,
            transitioning: self.state.transitioning,
            waypoint: match &self.rig {
                CameraRig::Tour(t) => Some(t.current_waypoint()),
                CameraRig::Follow(_) => None,
            },
            debug_overlay: self.debug_overlay,
        }
    }

    pub fn layout_targets(&self) -> Vec<LayoutTarget> {
        layout::resolve(self.state.len(), self.state.current_index, &self.layout)
    }

    pub fn camera_target(&self) -> CameraTarget {
        let mut target = self.rig.target();
        target.position = self.zoom.apply(target.position);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraMode;
    use crate::render::tween::{Ease, TweenConfig};

    fn slides(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("slides/{i:02}.png")).collect()
    }

    fn run(c: &mut Carousel, seconds: f32) -> Frame {
        let mut frame = c.frame();
        let steps = (seconds / 0.05).ceil() as usize;
        for _ in 0..steps {
            frame = c.tick(0.05, None);
        }
        frame
    }

    #[test]
    fn rejects_empty_carousel() {
        let err = Carousel::new(Vec::<String>::new(), &StageConfig::default()).unwrap_err();
        assert_eq!(err, CarouselError::Empty);
    }

    #[test]
    fn rejects_zero_duration() {
        let mut cfg = StageConfig::default();
        cfg.tween.duration = 0.0;
        assert_eq!(
            Carousel::new(slides(3), &cfg).unwrap_err(),
            CarouselError::InvalidDuration(0.0)
        );
    }

    #[test]
    fn queued_commands_apply_in_order_on_tick() {
        let mut c = Carousel::new(slides(5), &StageConfig::default()).unwrap();
        c.push(Command::Next);
        c.push(Command::Next);
        c.push(Command::Prev);
        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.pending(), 3);

        let frame = c.tick(0.016, None);
        assert_eq!(frame.current_index, 1);
        assert_eq!(c.pending(), 0);
        assert_eq!(frame.layout.len(), 5);
        assert_eq!(frame.layout[1].position[0], 0.0);
    }

    #[test]
    fn focus_on_inactive_item_is_ignored() {
        let mut c = Carousel::new(slides(3), &StageConfig::default()).unwrap();
        assert_eq!(
            c.apply(Command::ToggleFocus { item: Some(2) }),
            Outcome::Ignored
        );
        assert!(!c.state().focused);
        assert_eq!(
            c.apply(Command::ToggleFocus { item: Some(0) }),
            Outcome::Applied
        );
        assert!(c.state().focused);
    }

    #[test]
    fn clamp_navigation_locked_while_focused() {
        let cfg = StageConfig {
            navigation: NavigationPolicy::clamp(),
            ..StageConfig::default()
        };
        let mut c = Carousel::new(slides(3), &cfg).unwrap();
        c.apply(Command::toggle_focus());
        assert_eq!(c.apply(Command::Next), Outcome::Ignored);
        c.apply(Command::toggle_focus());
        assert_eq!(c.apply(Command::Next), Outcome::Applied);
    }

    #[test]
    fn waypoint_moves_are_not_reentrant() {
        let mut c = Carousel::new(slides(3), &StageConfig::default()).unwrap();
        assert_eq!(c.apply(Command::SelectWaypoint(1)), Outcome::Applied);
        assert!(c.state().transitioning);
        assert_eq!(c.apply(Command::SelectWaypoint(1)), Outcome::Ignored);

        let frame = run(&mut c, 2.0);
        assert!(!frame.transitioning);
        assert_eq!(frame.waypoint, Some(1));
        assert_eq!(frame.camera.position, [3.0, 3.0, 3.0]);
        assert_eq!(frame.camera.look_at, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn focus_zoom_returns_to_first_recorded_depth() {
        let cfg = StageConfig {
            camera: CameraMode::Tour {
                waypoints: vec![[0.0, 1.0, 5.0]],
                look_at: [0.0, 0.0, 0.0],
                tween: TweenConfig::default(),
            },
            ..StageConfig::default()
        };
        let mut c = Carousel::new(slides(4), &cfg).unwrap();
        c.apply(Command::toggle_focus());
        let zoomed = run(&mut c, 2.0);
        assert_eq!(zoomed.camera.position[2], cfg.zoom.close_depth);

        c.apply(Command::toggle_focus());
        let back = run(&mut c, 2.0);
        assert_eq!(back.camera.position[2], 5.0);
        assert_eq!(c.zoom().initial_depth(), Some(5.0));
    }

    #[test]
    fn zoom_keeps_recorded_depth_after_waypoint_move_while_focused() {
        let mut c = Carousel::new(slides(3), &StageConfig::default()).unwrap();
        c.apply(Command::toggle_focus());
        assert_eq!(c.zoom().initial_depth(), Some(2.0));
        assert_eq!(c.apply(Command::SelectWaypoint(1)), Outcome::Applied);
        let landed = run(&mut c, 2.0);
        assert_eq!(landed.waypoint, Some(1));
        assert_eq!(landed.camera.position[2], 1.0);

        c.apply(Command::toggle_focus());
        let mut last = c.frame().camera.position[2];
        for _ in 0..25 {
            let z = c.tick(0.05, None).camera.position[2];
            assert!(z >= last - 1e-6, "depth went back from {last} to {z}");
            assert!(z <= 2.0);
            last = z;
        }
        assert_eq!(last, 2.0);
        let held = run(&mut c, 1.0);
        assert_eq!(held.camera.position, [3.0, 3.0, 2.0]);

        // next flight hands the camera back to the tour, starting from z = 2
        assert_eq!(c.apply(Command::SelectWaypoint(2)), Outcome::Applied);
        assert_eq!(c.zoom().depth(), None);
        assert_eq!(c.frame().camera.position, [3.0, 3.0, 2.0]);
        let next = run(&mut c, 2.0);
        assert_eq!(next.camera.position, [-3.0, 2.0, 4.0]);
    }

    #[test]
    fn follow_camera_tracks_subject_and_rotates() {
        let cfg = StageConfig {
            camera: CameraMode::follow(),
            ..StageConfig::default()
        };
        let mut c = Carousel::new(slides(3), &cfg).unwrap();
        assert_eq!(c.apply(Command::SelectWaypoint(1)), Outcome::Ignored);
        assert_eq!(c.apply(Command::RotateCamera(0.1)), Outcome::Applied);

        let frame = c.tick(0.016, Some([2.0, 0.0, 0.0]));
        assert_eq!(frame.camera.look_at, [2.0, 0.0, 0.0]);
        assert!((frame.camera.position[0] - (2.0 + 0.1f32.sin() * 5.0)).abs() < 1e-5);
        assert_eq!(frame.waypoint, None);
    }

    #[test]
    fn orbiting_releases_held_zoom() {
        let cfg = StageConfig {
            camera: CameraMode::follow(),
            ..StageConfig::default()
        };
        let mut c = Carousel::new(slides(3), &cfg).unwrap();
        c.apply(Command::toggle_focus());
        run(&mut c, 1.0);
        c.apply(Command::toggle_focus());
        let back = run(&mut c, 1.0);
        assert_eq!(back.camera.position[2], 5.0);
        assert!(c.zoom().depth().is_some());

        c.apply(Command::RotateCamera(0.5));
        assert_eq!(c.zoom().depth(), None);
        let orbit = c.tick(0.016, None);
        assert!((orbit.camera.position[2] - 0.5f32.cos() * 5.0).abs() < 1e-5);
        assert_eq!(c.zoom().initial_depth(), Some(5.0));
    }

    #[test]
    fn rotate_ignored_on_tour() {
        let mut c = Carousel::new(slides(2), &StageConfig::default()).unwrap();
        assert_eq!(c.apply(Command::RotateCamera(0.1)), Outcome::Ignored);
    }

    #[test]
    fn debug_overlay_toggles() {
        let mut c = Carousel::new(slides(2), &StageConfig::default()).unwrap();
        c.push(Command::ToggleDebugOverlay);
        assert!(c.tick(0.0, None).debug_overlay);
        c.apply(Command::ToggleDebugOverlay);
        assert!(!c.frame().debug_overlay);
    }

    #[test]
    fn layout_tween_config_does_not_affect_targets() {
        let mut cfg = StageConfig::default();
        cfg.tween = TweenConfig {
            duration: 2.0,
            ease: Ease::Linear,
        };
        let c = Carousel::new(slides(5), &cfg).unwrap();
        let targets = c.layout_targets();
        assert_eq!(targets[0].scale, 1.05);
        assert_eq!(targets[4].opacity, 0.0);
    }
}
