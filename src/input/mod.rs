//! Input → command translation.
//!
//! The controller never listens to devices. Hosts translate raw events
//! through these adapters and hand the resulting `Command`s to
//! `Carousel::push` / `Carousel::apply`:
//! - `KeyMap` - named keys to commands, overridable from config
//! - `touch`  - tap/swipe/drag recognition for pointer and touch input

pub mod touch;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    Prev,
    Next,
    /// `item: None` targets whatever is current; `Some(i)` is a click on
    /// item `i` and is ignored unless `i` is current.
    ToggleFocus {
        #[serde(default)]
        item: Option<usize>,
    },
    /// Orbit the follow camera by this many radians.
    RotateCamera(f32),
    SelectWaypoint(usize),
    ToggleDebugOverlay,
}

impl Command {
    pub const fn toggle_focus() -> Self {
        Command::ToggleFocus { item: None }
    }
}

/// Device-independent key names. Serialized by name so they can be used
/// as TOML table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Escape,
    A,
    D,
    E,
    Q,
    F3,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
}

const DIGITS: [Key; 9] = [
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

const ALL_KEYS: [Key; 21] = [
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::ArrowUp,
    Key::ArrowDown,
    Key::Space,
    Key::Enter,
    Key::Escape,
    Key::A,
    Key::D,
    Key::E,
    Key::Q,
    Key::F3,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

impl Key {
    pub fn name(self) -> &'static str {
        match self {
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::Space => "Space",
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::A => "A",
            Key::D => "D",
            Key::E => "E",
            Key::Q => "Q",
            Key::F3 => "F3",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num6 => "6",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Num9 => "9",
        }
    }

    /// `Num1..=Num9` → waypoint slot 0..=8.
    pub fn digit_slot(self) -> Option<usize> {
        DIGITS.iter().position(|k| *k == self)
    }
}

impl From<Key> for &'static str {
    fn from(key: Key) -> Self {
        key.name()
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KEYS
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKey(s.to_owned()))
    }
}

impl TryFrom<String> for Key {
    type Error = UnknownKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Error)]
#[error("unknown key name `{0}`")]
pub struct UnknownKey(pub String);

/// Key bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    bindings: BTreeMap<Key, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::with_rotate_step(0.1)
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Default bindings: arrows/A/D navigate, Space/Enter focus, Q/E orbit,
    /// 1-9 pick a waypoint, F3 toggles the debug overlay.
    pub fn with_rotate_step(step: f32) -> Self {
        let mut map = Self::empty();
        map.bind(Key::ArrowLeft, Command::Prev)
            .bind(Key::ArrowRight, Command::Next)
            .bind(Key::A, Command::Prev)
            .bind(Key::D, Command::Next)
            .bind(Key::Space, Command::toggle_focus())
            .bind(Key::Enter, Command::toggle_focus())
            .bind(Key::Q, Command::RotateCamera(step))
            .bind(Key::E, Command::RotateCamera(-step))
            .bind(Key::F3, Command::ToggleDebugOverlay);
        for (slot, key) in DIGITS.into_iter().enumerate() {
            map.bind(key, Command::SelectWaypoint(slot));
        }
        map
    }

    pub fn bind(&mut self, key: Key, cmd: Command) -> &mut Self {
        self.bindings.insert(key, cmd);
        self
    }

    pub fn unbind(&mut self, key: Key) -> Option<Command> {
        self.bindings.remove(&key)
    }

    /// Overlay `other` on top of these bindings.
    pub fn merge(&mut self, other: &KeyMap) {
        self.bindings
            .extend(other.bindings.iter().map(|(k, c)| (*k, *c)));
    }

    pub fn command(&self, key: Key) -> Option<Command> {
        self.bindings.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, Command)> + '_ {
        self.bindings.iter().map(|(k, c)| (*k, *c))
    }
}
