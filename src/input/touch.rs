//! Touch / pointer gesture recognition.
//!
//! Recognizes carousel gestures from raw press-move-release events:
//! - Tap: quick press + release in place → focus the item under the finger
//! - Swipe left/right: fast horizontal flick → next/previous item
//! - Drag: slow horizontal drag → orbit the follow camera

use std::time::{Duration, Instant};

use super::Command;

/// Touch point
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub id: u64,
    pub time: Instant,
}

/// Recognized gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Single tap at position
    Tap { x: f32, y: f32 },
    /// Swipe with direction and velocity (px/s)
    Swipe { direction: SwipeDirection, velocity: f32 },
    /// Drag since the previous move event
    Drag { dx: f32, dy: f32 },
    /// No gesture detected yet
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Gesture state machine for a single finger / primary button.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    start_point: Option<TouchPoint>,
    last_point: Option<(f32, f32)>,
    /// Minimum travel for a swipe, pixels
    swipe_threshold: f32,
    /// Swipes must finish within this window; slower motion is a drag
    swipe_window: Duration,
    /// Maximum travel still counted as a tap
    tap_slop: f32,
    /// Radians of camera orbit per dragged pixel
    pub drag_sensitivity: f32,
    drag_distance: f32,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            start_point: None,
            last_point: None,
            swipe_threshold: 50.0,
            swipe_window: Duration::from_millis(350),
            tap_slop: 10.0,
            drag_sensitivity: 0.01,
            drag_distance: 0.0,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.start_point.is_some()
    }

    /// Process touch start event
    pub fn touch_start(&mut self, x: f32, y: f32, id: u64) {
        if self.start_point.is_some() {
            // second finger: ignore, single-touch recognizer
            return;
        }
        self.start_point = Some(TouchPoint {
            x,
            y,
            id,
            time: Instant::now(),
        });
        self.last_point = Some((x, y));
        self.drag_distance = 0.0;
    }

    /// Process touch move event. Returns `Drag` once past the tap slop.
    pub fn touch_move(&mut self, x: f32, y: f32, id: u64) -> Gesture {
        match self.start_point {
            Some(start) if start.id == id => {}
            _ => return Gesture::None,
        }
        let Some((lx, ly)) = self.last_point.replace((x, y)) else {
            return Gesture::None;
        };
        let (dx, dy) = (x - lx, y - ly);
        self.drag_distance += (dx * dx + dy * dy).sqrt();
        if self.drag_distance > self.tap_slop {
            Gesture::Drag { dx, dy }
        } else {
            Gesture::None
        }
    }

    /// Process touch end event. Returns the recognized gesture.
    pub fn touch_end(&mut self, x: f32, y: f32, id: u64) -> Gesture {
        let start = match self.start_point {
            Some(s) if s.id == id => s,
            _ => return Gesture::None,
        };
        self.start_point = None;
        self.last_point = None;

        let duration = start.time.elapsed();
        let dx = x - start.x;
        let dy = y - start.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist >= self.swipe_threshold && duration <= self.swipe_window {
            let velocity = dist / duration.as_secs_f32().max(0.001);
            let direction = if dx.abs() > dy.abs() {
                if dx > 0.0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                }
            } else if dy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            };
            return Gesture::Swipe {
                direction,
                velocity,
            };
        }

        if dist < self.tap_slop && self.drag_distance <= self.tap_slop {
            return Gesture::Tap { x, y };
        }

        Gesture::None
    }

    /// Feed one frame of primary-button state. A press and release reported
    /// in the same frame form a complete press-release pair.
    pub fn pointer_frame(
        &mut self,
        x: f32,
        y: f32,
        id: u64,
        pressed: bool,
        released: bool,
    ) -> Gesture {
        if pressed {
            self.touch_start(x, y, id);
        }
        if released {
            self.touch_end(x, y, id)
        } else if !pressed && self.is_pressed() {
            self.touch_move(x, y, id)
        } else {
            Gesture::None
        }
    }

    /// Map a gesture to a carousel command. `hit` resolves a tap position
    /// to the item under it, if any.
    pub fn command(
        &self,
        gesture: Gesture,
        hit: impl FnOnce(f32, f32) -> Option<usize>,
    ) -> Option<Command> {
        match gesture {
            Gesture::Swipe {
                direction: SwipeDirection::Left,
                ..
            } => Some(Command::Next),
            Gesture::Swipe {
                direction: SwipeDirection::Right,
                ..
            } => Some(Command::Prev),
            Gesture::Tap { x, y } => {
                hit(x, y).map(|item| Command::ToggleFocus { item: Some(item) })
            }
            Gesture::Drag { dx, .. } if dx != 0.0 => {
                Some(Command::RotateCamera(-dx * self.drag_sensitivity))
            }
            _ => None,
        }
    }
}
