//! Scene prop animator.
//!
//! Decorative objects around the carousel move on their own, driven by the
//! frame clock rather than by commands:
//! - Spin: constant rotation about Y, `speed` rad/s
//! - Float: gentle sine-wave vertical drift around a base height
//! - Hover: highlight colour + metalness while the pointer is over the prop
//! - Click: toggle a grown scale, or hop to a random height
//! - Drag: draggable props follow the pointer

use rand::Rng;

use crate::render::tween::{Ease, Tween};

/// How a prop moves on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Still,
    Spin { speed: f32 },
    Float { amplitude: f32, frequency: f32 },
    SpinAndFloat { speed: f32, amplitude: f32, frequency: f32 },
}

/// Surface look, swapped while hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Look {
    pub color: [f32; 4],
    pub metalness: f32,
}

/// What a click on the prop does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickAction {
    Nothing,
    /// Toggle between scale 1.0 and `scale`
    Grow { scale: f32 },
    /// Tween the base height to a random value in `[0, max_height)`
    Jump { max_height: f32, duration: f32 },
}

impl ClickAction {
    pub fn grow() -> Self {
        ClickAction::Grow { scale: 1.2 }
    }

    pub fn jump() -> Self {
        ClickAction::Jump {
            max_height: 3.0,
            duration: 0.5,
        }
    }
}

/// Resolved transform for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropTransform {
    pub position: [f32; 3],
    pub rotation_y: f32,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct Prop {
    pub name: String,
    pub base_position: [f32; 3],
    pub motion: Motion,
    pub rest: Look,
    pub hover: Look,
    pub on_click: ClickAction,
    pub draggable: bool,
    hovered: bool,
    grown: bool,
    /// Running click-jump on `base_position[1]`
    lift: Option<Tween>,
    rotation_y: f32,
    t: f32,
}

impl Prop {
    pub fn new(name: impl Into<String>, base_position: [f32; 3], motion: Motion) -> Self {
        Self {
            name: name.into(),
            base_position,
            motion,
            rest: Look {
                color: [1.0, 0.65, 0.0, 1.0], // orange
                metalness: 0.5,
            },
            hover: Look {
                color: [1.0, 0.41, 0.71, 1.0], // hot pink
                metalness: 1.0,
            },
            on_click: ClickAction::grow(),
            draggable: false,
            hovered: false,
            grown: false,
            lift: None,
            rotation_y: 0.0,
            t: 0.0,
        }
    }

    pub fn with_looks(mut self, rest: Look, hover: Look) -> Self {
        self.rest = rest;
        self.hover = hover;
        self
    }

    pub fn with_click(mut self, on_click: ClickAction) -> Self {
        self.on_click = on_click;
        self
    }

    pub fn with_drag(mut self) -> Self {
        self.draggable = true;
        self
    }

    /// Advance the prop clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.t += dt;
        match self.motion {
            Motion::Spin { speed } | Motion::SpinAndFloat { speed, .. } => {
                self.rotation_y += dt * speed;
            }
            Motion::Still | Motion::Float { .. } => {}
        }
        if let Some(lift) = self.lift.as_mut() {
            let done = lift.advance(dt);
            self.base_position[1] = lift.value();
            if done {
                self.lift = None;
            }
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn click(&mut self, rng: &mut impl Rng) {
        match self.on_click {
            ClickAction::Nothing => {}
            ClickAction::Grow { .. } => self.grown = !self.grown,
            ClickAction::Jump {
                max_height,
                duration,
            } => {
                let height = rng.gen::<f32>() * max_height;
                self.jump_to(height, duration);
            }
        }
    }

    /// Tween the base height to `height`, restarting from wherever it is now.
    pub fn jump_to(&mut self, height: f32, duration: f32) {
        let y = self.base_position[1];
        log::trace!("{} jumps {y:.2} -> {height:.2}", self.name);
        self.lift = Some(Tween::new(y, height, duration, Ease::QuadOut));
    }

    pub fn is_jumping(&self) -> bool {
        self.lift.is_some()
    }

    /// Translate a draggable prop by a world-space delta. Grabbing it stops
    /// any running jump where it is.
    pub fn drag_by(&mut self, delta: [f32; 3]) -> bool {
        if !self.draggable {
            return false;
        }
        self.lift = None;
        for (p, d) in self.base_position.iter_mut().zip(delta) {
            *p += d;
        }
        true
    }

    pub fn look(&self) -> Look {
        if self.hovered {
            self.hover
        } else {
            self.rest
        }
    }

    pub fn transform(&self) -> PropTransform {
        let float_y = match self.motion {
            Motion::Float {
                amplitude,
                frequency,
            }
            | Motion::SpinAndFloat {
                amplitude,
                frequency,
                ..
            } => (self.t * frequency).sin() * amplitude,
            Motion::Still | Motion::Spin { .. } => 0.0,
        };
        let [x, y, z] = self.base_position;
        PropTransform {
            position: [x, y + float_y, z],
            rotation_y: self.rotation_y,
            scale: match self.on_click {
                ClickAction::Grow { scale } if self.grown => scale,
                _ => 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spin_accumulates_frame_deltas() {
        let mut p = Prop::new("cube", [0.0; 3], Motion::Spin { speed: 1.0 });
        for _ in 0..10 {
            p.tick(0.1);
        }
        assert!((p.transform().rotation_y - 1.0).abs() < 1e-5);
        assert_eq!(p.transform().position, [0.0; 3]);
    }

    #[test]
    fn float_oscillates_around_base() {
        let mut p = Prop::new(
            "marker",
            [1.0, 2.0, 0.0],
            Motion::Float {
                amplitude: 0.25,
                frequency: std::f32::consts::PI,
            },
        );
        p.tick(0.5);
        assert!((p.transform().position[1] - 2.25).abs() < 1e-5);
        p.tick(1.0);
        assert!((p.transform().position[1] - 1.75).abs() < 1e-5);
        assert_eq!(p.transform().rotation_y, 0.0);
    }

    #[test]
    fn hover_swaps_look() {
        let mut p = Prop::new("box", [0.0; 3], Motion::Still);
        assert_eq!(p.look().metalness, 0.5);
        p.set_hovered(true);
        assert_eq!(p.look().metalness, 1.0);
        assert_eq!(p.look().color, p.hover.color);
        p.set_hovered(false);
        assert_eq!(p.look(), p.rest);
    }

    #[test]
    fn click_toggles_scale() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Prop::new("model", [0.0; 3], Motion::Still);
        assert_eq!(p.transform().scale, 1.0);
        p.click(&mut rng);
        assert_eq!(p.transform().scale, 1.2);
        p.click(&mut rng);
        assert_eq!(p.transform().scale, 1.0);
    }

    #[test]
    fn click_jump_lands_on_random_height_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut p =
            Prop::new("box", [0.0, 1.0, 0.0], Motion::Still).with_click(ClickAction::jump());
        for _ in 0..8 {
            p.click(&mut rng);
            assert!(p.is_jumping());
            p.tick(0.25);
            assert!(p.is_jumping());
            p.tick(0.3);
            assert!(!p.is_jumping());
            let y = p.transform().position[1];
            assert!((0.0..3.0).contains(&y), "landed at {y}");
            assert_eq!(p.base_position[1], y);
            assert_eq!(p.transform().scale, 1.0);
        }
    }

    #[test]
    fn jump_moves_smoothly_from_current_height() {
        let mut p = Prop::new("box", [0.0, 1.0, 0.0], Motion::Still);
        p.jump_to(3.0, 0.5);
        p.tick(0.1);
        let y = p.transform().position[1];
        assert!(y > 1.0 && y < 3.0);
        p.tick(0.4);
        assert_eq!(p.transform().position[1], 3.0);
    }

    #[test]
    fn only_draggable_props_move() {
        let mut fixed = Prop::new("fixed", [0.0, 2.0, 0.0], Motion::Still);
        assert!(!fixed.drag_by([1.0, 0.0, 0.0]));
        assert_eq!(fixed.base_position, [0.0, 2.0, 0.0]);

        let mut dragged = Prop::new("drag", [0.0, 2.0, 0.0], Motion::Still).with_drag();
        assert!(dragged.drag_by([1.0, -0.5, 0.25]));
        assert!(dragged.drag_by([1.0, 0.0, 0.0]));
        assert_eq!(dragged.transform().position, [2.0, 1.5, 0.25]);
    }

    #[test]
    fn drag_stops_running_jump() {
        let mut p = Prop::new("drag", [0.0, 0.0, 0.0], Motion::Still).with_drag();
        p.jump_to(2.0, 0.5);
        p.tick(0.25);
        let y = p.base_position[1];
        p.drag_by([0.5, 0.0, 0.0]);
        assert!(!p.is_jumping());
        p.tick(0.5);
        assert_eq!(p.transform().position, [0.5, y, 0.0]);
    }
}
