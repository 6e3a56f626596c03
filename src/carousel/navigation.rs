//! Navigation policy: how Prev/Next and focus toggles move the cursor.

use serde::{Deserialize, Serialize};

use super::CarouselState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What happens at either end of the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeBehavior {
    /// Ring: stepping past the last item lands on the first
    Wrap,
    /// Stepping outward at a boundary does nothing
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationPolicy {
    pub edge: EdgeBehavior,
    /// Ignore Prev/Next while the viewer is focused on an item
    pub lock_while_focused: bool,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self::wrap()
    }
}

impl NavigationPolicy {
    /// Ring navigation, allowed while focused.
    pub const fn wrap() -> Self {
        Self {
            edge: EdgeBehavior::Wrap,
            lock_while_focused: false,
        }
    }

    /// Clamped navigation, locked while focused.
    pub const fn clamp() -> Self {
        Self {
            edge: EdgeBehavior::Clamp,
            lock_while_focused: true,
        }
    }

    /// Step the cursor. Returns true if `current_index` changed.
    pub fn advance(&self, state: &mut CarouselState, dir: Direction) -> bool {
        if self.lock_while_focused && state.focused {
            return false;
        }
        let n = state.items.len();
        let cur = state.current_index;
        let next = match (self.edge, dir) {
            (EdgeBehavior::Wrap, Direction::Next) => (cur + 1) % n,
            (EdgeBehavior::Wrap, Direction::Previous) => (cur + n - 1) % n,
            (EdgeBehavior::Clamp, Direction::Next) if cur + 1 < n => cur + 1,
            (EdgeBehavior::Clamp, Direction::Previous) if cur > 0 => cur - 1,
            (EdgeBehavior::Clamp, _) => return false,
        };
        state.current_index = next;
        next != cur
    }

    /// Flip focus. `target == None` means "whatever is current" (keyboard);
    /// `Some(i)` is a click on item `i` and only counts if `i` is current.
    pub fn toggle_focus(&self, state: &mut CarouselState, target: Option<usize>) -> bool {
        match target {
            Some(i) if i != state.current_index => false,
            _ => {
                state.focused = !state.focused;
                true
            }
        }
    }
}
