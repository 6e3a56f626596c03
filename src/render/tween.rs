//! Fixed-duration tweens.
//!
//! The controller only computes *targets*. Something still has to move the
//! visible state toward them; this module is that something, kept small:
//! - `Ease`           - easing curves (linear, quad-out, cubic-in-out)
//! - `Tween`/`Tween3` - one scalar / one `[f32; 3]` interpolation
//! - `LayoutAnimator` - per-item tweens that retarget when the layout changes
//!
//! Retargeting restarts from the *current* value, so a new command issued
//! mid-flight supersedes the old target without a visible jump.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::render::layout::LayoutTarget;

/// Easing curve applied to normalized progress `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    /// Fast start, soft landing
    #[default]
    QuadOut,
    CubicInOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u * 0.5
                }
            }
        }
    }
}

/// Signed angle in `[-PI, PI)` turning `from` onto `to`.
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Scalar tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    ease: Ease,
}

impl Tween {
    /// A tween of zero or negative duration finishes on the first `advance`.
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
            ease,
        }
    }

    /// A finished tween resting at `value`. `ease` applies to later retargets.
    pub fn settled(value: f32, ease: Ease) -> Self {
        Self::new(value, value, 0.0, ease)
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current value. Exactly `to` once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            self.to
        } else {
            lerp(self.from, self.to, self.ease.apply(self.progress()))
        }
    }

    /// Advance by `dt` seconds. Returns true once the tween has finished.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_finished()
    }

    /// Restart toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: f32, duration: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
    }
}

/// Tween over a 3-component vector, sharing one clock and curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween3 {
    from: [f32; 3],
    to: [f32; 3],
    clock: Tween,
}

impl Tween3 {
    pub fn new(from: [f32; 3], to: [f32; 3], duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            clock: Tween::new(0.0, 1.0, duration, ease),
        }
    }

    pub fn settled(value: [f32; 3], ease: Ease) -> Self {
        Self {
            from: value,
            to: value,
            clock: Tween::settled(1.0, ease),
        }
    }

    pub fn value(&self) -> [f32; 3] {
        if self.clock.is_finished() {
            return self.to;
        }
        let t = self.clock.value();
        [
            lerp(self.from[0], self.to[0], t),
            lerp(self.from[1], self.to[1], t),
            lerp(self.from[2], self.to[2], t),
        ]
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        self.clock.advance(dt)
    }

    pub fn retarget(&mut self, to: [f32; 3], duration: f32) {
        let ease = self.clock.ease;
        self.from = self.value();
        self.to = to;
        self.clock = Tween::new(0.0, 1.0, duration, ease);
    }
}

/// Tween timing shared by every animated property of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Seconds per transition
    pub duration: f32,
    pub ease: Ease,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::QuadOut,
        }
    }
}

/// Interpolated visual state of one carousel item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedItem {
    pub position: [f32; 3],
    pub rotation_y: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone)]
struct ItemTweens {
    position: Tween3,
    rotation_y: Tween,
    opacity: Tween,
    scale: Tween,
    last: LayoutTarget,
}

impl ItemTweens {
    fn settled(t: &LayoutTarget, ease: Ease) -> Self {
        Self {
            position: Tween3::settled(t.position, ease),
            rotation_y: Tween::settled(t.rotation_y, ease),
            opacity: Tween::settled(t.opacity, ease),
            scale: Tween::settled(t.scale, ease),
            last: *t,
        }
    }

    fn current(&self) -> AnimatedItem {
        AnimatedItem {
            position: self.position.value(),
            rotation_y: self.rotation_y.value(),
            opacity: self.opacity.value(),
            scale: self.scale.value(),
        }
    }
}

/// Drives every item toward its latest `LayoutTarget`.
///
/// The first `sync` snaps items into place; later ones retarget only the
/// items whose target actually changed.
#[derive(Debug, Clone)]
pub struct LayoutAnimator {
    cfg: TweenConfig,
    items: Vec<ItemTweens>,
}

impl LayoutAnimator {
    pub fn new(cfg: TweenConfig) -> Self {
        Self {
            cfg,
            items: Vec::new(),
        }
    }

    /// Feed the latest targets. Call once per tick, before `advance`.
    pub fn sync(&mut self, targets: &[LayoutTarget]) {
        if self.items.len() != targets.len() {
            let ease = self.cfg.ease;
            self.items = targets.iter().map(|t| ItemTweens::settled(t, ease)).collect();
            return;
        }
        let d = self.cfg.duration;
        for (item, t) in self.items.iter_mut().zip(targets) {
            if item.last == *t {
                continue;
            }
            item.position.retarget(t.position, d);
            // resolver angles are unwrapped; turn the short way round
            let from = item.rotation_y.value();
            item.rotation_y.retarget(from + shortest_turn(from, t.rotation_y), d);
            item.opacity.retarget(t.opacity, d);
            item.scale.retarget(t.scale, d);
            item.last = *t;
        }
    }

    pub fn advance(&mut self, dt: f32) {
        for item in &mut self.items {
            item.position.advance(dt);
            item.rotation_y.advance(dt);
            item.opacity.advance(dt);
            item.scale.advance(dt);
        }
    }

    /// True while any item is still moving.
    pub fn is_animating(&self) -> bool {
        self.items.iter().any(|i| {
            !(i.position.is_finished()
                && i.rotation_y.is_finished()
                && i.opacity.is_finished()
                && i.scale.is_finished())
        })
    }

    pub fn items(&self) -> impl Iterator<Item = AnimatedItem> + '_ {
        self.items.iter().map(ItemTweens::current)
    }

    pub fn get(&self, index: usize) -> Option<AnimatedItem> {
        self.items.get(index).map(ItemTweens::current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_endpoints() {
        for e in [Ease::Linear, Ease::QuadOut, Ease::CubicInOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let mut t = Tween::new(2.0, 5.0, 0.3, Ease::QuadOut);
        assert!(!t.advance(0.1));
        assert!(t.value() > 2.0 && t.value() < 5.0);
        assert!(t.advance(0.25));
        assert_eq!(t.value(), 5.0);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut t = Tween::new(0.0, 10.0, 1.0, Ease::Linear);
        t.advance(0.5);
        let mid = t.value();
        t.retarget(0.0, 1.0);
        assert!((t.value() - mid).abs() < 1e-6);
        t.advance(1.0);
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t = Tween::new(1.0, 3.0, 0.0, Ease::Linear);
        assert!(t.is_finished());
        assert_eq!(t.value(), 3.0);
    }

    #[test]
    fn tween3_interpolates_all_axes() {
        let mut t = Tween3::new([0.0, 0.0, 0.0], [2.0, 4.0, -2.0], 1.0, Ease::Linear);
        t.advance(0.5);
        assert_eq!(t.value(), [1.0, 2.0, -1.0]);
        t.advance(0.5);
        assert_eq!(t.value(), [2.0, 4.0, -2.0]);
    }

    #[test]
    fn shortest_turn_crosses_half_turn() {
        assert!((shortest_turn(0.0, 1.0) - 1.0).abs() < 1e-6);
        assert!((shortest_turn(3.0, -3.0) - (TAU - 6.0)).abs() < 1e-5);
        assert!((shortest_turn(-3.0, 3.0) + (TAU - 6.0)).abs() < 1e-5);
        assert!(shortest_turn(0.2, 0.2 + 3.0 * TAU).abs() < 1e-4);
    }

    fn target(index: usize, x: f32, opacity: f32) -> LayoutTarget {
        LayoutTarget {
            index,
            position: [x, 0.0, 0.0],
            rotation_y: 0.0,
            opacity,
            scale: 1.0,
        }
    }

    #[test]
    fn animator_snaps_first_then_tweens() {
        let mut anim = LayoutAnimator::new(TweenConfig {
            duration: 1.0,
            ease: Ease::Linear,
        });
        anim.sync(&[target(0, 0.0, 1.0), target(1, 1.5, 0.7)]);
        assert!(!anim.is_animating());
        assert_eq!(anim.get(1).unwrap().position[0], 1.5);

        anim.sync(&[target(0, -1.5, 0.7), target(1, 0.0, 1.0)]);
        assert!(anim.is_animating());
        anim.advance(0.5);
        let a = anim.get(0).unwrap();
        assert!((a.position[0] + 0.75).abs() < 1e-5);
        assert!((a.opacity - 0.85).abs() < 1e-5);

        anim.advance(0.5);
        assert!(!anim.is_animating());
        assert_eq!(anim.get(1).unwrap().position[0], 0.0);
    }

    #[test]
    fn wrapped_rotation_turns_the_short_way() {
        use crate::render::layout::{resolve, CircularLayout, LayoutMode};

        let mode = LayoutMode::Circular(CircularLayout::default());
        let mut anim = LayoutAnimator::new(TweenConfig {
            duration: 1.0,
            ease: Ease::Linear,
        });
        anim.sync(&resolve(5, 4, &mode));
        // 4 -> 0 wraps: item 0's resolved angle jumps from 4/5 turn to 0
        anim.sync(&resolve(5, 0, &mode));
        let start = anim.get(0).unwrap().rotation_y;
        for _ in 0..10 {
            anim.advance(0.1);
            let now = anim.get(0).unwrap().rotation_y;
            assert!((now - start).abs() <= TAU / 5.0 + 1e-4);
        }
        assert!(!anim.is_animating());
        let end = anim.get(0).unwrap().rotation_y;
        assert!(shortest_turn(end, 0.0).abs() < 1e-4);
    }
}
