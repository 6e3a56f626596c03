//! Layout resolver - where every carousel item should be.
//!
//! Two arrangements:
//!   - Linear strip: items side by side along X, fading out past a span
//!   - Circular ring: items on a circle facing its centre, fading by arc distance
//!
//! Output is a pure function of `(N, current, mode)`. Nothing is cached;
//! the whole strip/ring is recomputed whenever the current index changes.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Target transform and look of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTarget {
    pub index: usize,
    /// Offset from the stage origin (y stays 0 for both arrangements)
    pub position: [f32; 3],
    /// Orientation about the vertical axis, radians
    pub rotation_y: f32,
    /// 0.0 = invisible, 1.0 = opaque
    pub opacity: f32,
    pub scale: f32,
}

/// Linear strip parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearLayout {
    /// Distance between neighbouring items along X
    pub stride: f32,
    /// Scale of the current item
    pub focus_scale: f32,
    /// Opacity lost per step away from the current item
    pub opacity_step: f32,
    /// Items further than this many steps away are hidden
    pub visible_span: usize,
}

impl Default for LinearLayout {
    fn default() -> Self {
        Self {
            stride: 1.5,
            focus_scale: 1.05,
            opacity_step: 0.3,
            visible_span: 2,
        }
    }
}

/// Circular ring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularLayout {
    pub min_radius: f32,
    /// Radius grows with item count: `N * radius_factor`
    pub radius_factor: f32,
    /// Opacity lost per item of arc distance
    pub falloff: f32,
    pub focus_scale: f32,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self {
            min_radius: 3.0,
            radius_factor: 0.6,
            falloff: 0.3,
            focus_scale: 1.05,
        }
    }
}

impl CircularLayout {
    pub fn radius(&self, count: usize) -> f32 {
        (count as f32 * self.radius_factor).max(self.min_radius)
    }
}

/// Spatial arrangement strategy, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayoutMode {
    Linear(LinearLayout),
    Circular(CircularLayout),
}

impl Default for LayoutMode {
    fn default() -> Self {
        Self::Linear(LinearLayout::default())
    }
}

impl LayoutMode {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Linear(_) => "linear",
            LayoutMode::Circular(_) => "circular",
        }
    }
}

/// Shortest distance between two slots on a ring of `count` slots.
///
/// Symmetric in `a`/`b` and never larger than `count / 2`.
pub fn circular_distance(a: usize, b: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let d = (a as isize - b as isize).rem_euclid(count as isize) as usize;
    d.min(count - d)
}

/// Resolve targets for all `count` items given the current index.
pub fn resolve(count: usize, current: usize, mode: &LayoutMode) -> Vec<LayoutTarget> {
    (0..count)
        .map(|i| match mode {
            LayoutMode::Linear(l) => linear_target(i, current, l),
            LayoutMode::Circular(c) => circular_target(i, current, count, c),
        })
        .collect()
}

fn linear_target(index: usize, current: usize, l: &LinearLayout) -> LayoutTarget {
    let d = index as isize - current as isize;
    let dist = d.unsigned_abs();
    let opacity = if dist > l.visible_span {
        0.0
    } else {
        (1.0 - dist as f32 * l.opacity_step).max(0.0)
    };
    LayoutTarget {
        index,
        position: [d as f32 * l.stride, 0.0, 0.0],
        rotation_y: 0.0,
        opacity,
        scale: if d == 0 { l.focus_scale } else { 1.0 },
    }
}

fn circular_target(index: usize, current: usize, count: usize, c: &CircularLayout) -> LayoutTarget {
    let theta = (index as f32 - current as f32) * TAU / count as f32;
    let r = c.radius(count);
    let dist = circular_distance(index, current, count);
    LayoutTarget {
        index,
        // current item sits at the origin, the rest curve away behind it
        position: [theta.sin() * r, 0.0, theta.cos() * r - r],
        rotation_y: -theta,
        opacity: (1.0 - dist as f32 * c.falloff).clamp(0.0, 1.0),
        scale: if dist == 0 { c.focus_scale } else { 1.0 },
    }
}
