//! Fixed-waypoint camera tour.
//!
//! A static list of viewpoints sharing one look-at point. Moving between
//! them is a tweened flight that cannot be interrupted: while a flight is
//! under way every further `move_to` is dropped.

use crate::carousel::CarouselError;
use crate::render::tween::{Tween3, TweenConfig};

use super::CameraTarget;

#[derive(Debug, Clone)]
struct Flight {
    to: usize,
    path: Tween3,
}

#[derive(Debug, Clone)]
pub struct WaypointTour {
    positions: Vec<[f32; 3]>,
    look_at: [f32; 3],
    current_waypoint: usize,
    camera: [f32; 3],
    flight: Option<Flight>,
    tween: TweenConfig,
}

impl WaypointTour {
    /// Camera starts parked on the first waypoint.
    pub fn new(
        positions: Vec<[f32; 3]>,
        look_at: [f32; 3],
        tween: TweenConfig,
    ) -> Result<Self, CarouselError> {
        let first = *positions.first().ok_or(CarouselError::NoWaypoints)?;
        if tween.duration.is_nan() || tween.duration <= 0.0 {
            return Err(CarouselError::InvalidDuration(tween.duration));
        }
        Ok(Self {
            positions,
            look_at,
            current_waypoint: 0,
            camera: first,
            flight: None,
            tween,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn is_transitioning(&self) -> bool {
        self.flight.is_some()
    }

    /// Start a flight to `index`. Returns false (and does nothing) while
    /// another flight is running, when already parked there, or when the
    /// index is out of range.
    pub fn move_to(&mut self, index: usize) -> bool {
        self.move_to_from(index, self.camera)
    }

    /// Like `move_to`, but the flight departs from `from` instead of the
    /// tour's own parked position (e.g. a camera a zoom is still holding).
    pub fn move_to_from(&mut self, index: usize, from: [f32; 3]) -> bool {
        if self.flight.is_some() || index == self.current_waypoint {
            return false;
        }
        let Some(&dest) = self.positions.get(index) else {
            return false;
        };
        self.flight = Some(Flight {
            to: index,
            path: Tween3::new(from, dest, self.tween.duration, self.tween.ease),
        });
        self.camera = from;
        true
    }

    /// Advance the running flight. Returns the waypoint index on the tick
    /// the flight lands.
    pub fn tick(&mut self, dt: f32) -> Option<usize> {
        let flight = self.flight.as_mut()?;
        let done = flight.path.advance(dt);
        self.camera = flight.path.value();
        if !done {
            return None;
        }
        let landed = flight.to;
        self.flight = None;
        self.current_waypoint = landed;
        Some(landed)
    }

    /// Always aimed at the shared look-at point, mid-flight included.
    pub fn target(&self) -> CameraTarget {
        CameraTarget {
            position: self.camera,
            look_at: self.look_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tween::Ease;

    fn tour() -> WaypointTour {
        WaypointTour::new(
            vec![[0.0, 0.0, 2.0], [3.0, 3.0, 3.0], [-3.0, 2.0, 4.0]],
            [0.0, 0.0, 0.0],
            TweenConfig {
                duration: 1.0,
                ease: Ease::Linear,
            },
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_tour() {
        let err = WaypointTour::new(Vec::new(), [0.0; 3], TweenConfig::default()).unwrap_err();
        assert!(matches!(err, CarouselError::NoWaypoints));
    }

    #[test]
    fn second_move_during_flight_is_dropped() {
        let mut t = tour();
        assert!(t.move_to(1));
        assert!(!t.move_to(1));
        assert!(!t.move_to(2));

        let mut landings = Vec::new();
        for _ in 0..20 {
            if let Some(w) = t.tick(0.1) {
                landings.push(w);
            }
        }
        assert_eq!(landings, vec![1]);
        assert_eq!(t.current_waypoint(), 1);
        assert_eq!(t.target().position, [3.0, 3.0, 3.0]);
    }

    #[test]
    fn move_to_current_or_missing_waypoint_is_noop() {
        let mut t = tour();
        assert!(!t.move_to(0));
        assert!(!t.move_to(7));
        assert!(!t.is_transitioning());
    }

    #[test]
    fn flight_departs_from_given_position() {
        let mut t = tour();
        assert!(t.move_to_from(1, [0.0, 0.0, 5.0]));
        assert_eq!(t.target().position, [0.0, 0.0, 5.0]);
        t.tick(0.5);
        assert_eq!(t.target().position, [1.5, 1.5, 4.0]);
        t.tick(0.5);
        assert_eq!(t.target().position, [3.0, 3.0, 3.0]);
        // rejected moves leave the camera alone
        assert!(!t.move_to_from(1, [9.0, 9.0, 9.0]));
        assert_eq!(t.target().position, [3.0, 3.0, 3.0]);
    }

    #[test]
    fn look_at_held_mid_flight() {
        let mut t = tour();
        t.move_to(2);
        t.tick(0.5);
        let target = t.target();
        assert_eq!(target.look_at, [0.0, 0.0, 0.0]);
        assert_eq!(target.position, [-1.5, 1.0, 3.0]);
        assert!(t.is_transitioning());
        // not committed until landing
        assert_eq!(t.current_waypoint(), 0);
    }
}
