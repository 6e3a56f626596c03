//! Stage configuration.
//!
//! Every section has defaults, and `#[serde(default)]` lets a TOML file
//! name only what it changes:
//!
//! ```toml
//! [navigation]
//! edge = "clamp"
//! lock_while_focused = true
//!
//! [layout]
//! kind = "circular"
//! min_radius = 4.0
//!
//! [camera]
//! kind = "follow"
//! rotate_step = 0.2
//!
//! [keys]
//! Escape = { toggle-focus = {} }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::zoom::ZoomConfig;
use crate::camera::CameraMode;
use crate::carousel::navigation::NavigationPolicy;
use crate::input::KeyMap;
use crate::render::layout::LayoutMode;
use crate::render::tween::TweenConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid stage config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub navigation: NavigationPolicy,
    pub layout: LayoutMode,
    pub camera: CameraMode,
    pub zoom: ZoomConfig,
    /// Timing of item moves between layout targets
    pub tween: TweenConfig,
    /// Extra bindings laid over the defaults
    pub keys: KeyMap,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationPolicy::default(),
            layout: LayoutMode::default(),
            camera: CameraMode::default(),
            zoom: ZoomConfig::default(),
            tween: TweenConfig::default(),
            keys: KeyMap::empty(),
        }
    }
}

impl StageConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&text)?;
        log::info!("loaded stage config from {}", path.display());
        Ok(cfg)
    }

    /// Default bindings (rotate step taken from the camera section) with
    /// the configured `keys` laid on top.
    pub fn key_map(&self) -> KeyMap {
        let mut map = KeyMap::with_rotate_step(self.camera.rotate_step());
        map.merge(&self.keys);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::navigation::EdgeBehavior;
    use crate::input::{Command, Key};
    use crate::render::layout::CircularLayout;

    #[test]
    fn empty_file_is_default() {
        let cfg = StageConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, StageConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = StageConfig::from_toml_str(
            r#"
            [navigation]
            edge = "clamp"
            lock_while_focused = true

            [layout]
            kind = "circular"
            min_radius = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.navigation, NavigationPolicy::clamp());
        match cfg.layout {
            LayoutMode::Circular(c) => {
                assert_eq!(c.min_radius, 4.0);
                assert_eq!(c.falloff, CircularLayout::default().falloff);
            }
            other => panic!("expected circular layout, got {:?}", other),
        }
        assert_eq!(cfg.camera, CameraMode::default());
    }

    #[test]
    fn follow_camera_and_key_overrides() {
        let cfg = StageConfig::from_toml_str(
            r#"
            [camera]
            kind = "follow"
            rotate_step = 0.25

            [keys]
            Escape = { toggle-focus = {} }
            ArrowUp = "toggle-debug-overlay"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.camera.rotate_step(), 0.25);
        let keys = cfg.key_map();
        assert_eq!(keys.command(Key::Q), Some(Command::RotateCamera(0.25)));
        assert_eq!(keys.command(Key::Escape), Some(Command::toggle_focus()));
        assert_eq!(keys.command(Key::ArrowUp), Some(Command::ToggleDebugOverlay));
        assert_eq!(keys.command(Key::ArrowLeft), Some(Command::Prev));
    }

    #[test]
    fn zoom_and_tween_sections() {
        let cfg = StageConfig::from_toml_str(
            r#"
            [zoom]
            close_depth = 0.5

            [zoom.tween]
            duration = 1.2
            ease = "cubic-in-out"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.zoom.close_depth, 0.5);
        assert!(cfg.zoom.enabled);
        assert_eq!(cfg.zoom.tween.duration, 1.2);
        assert_eq!(cfg.navigation.edge, EdgeBehavior::Wrap);
    }

    #[test]
    fn unknown_layout_kind_is_an_error() {
        let err = StageConfig::from_toml_str("[layout]\nkind = \"spiral\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StageConfig::load("/definitely/not/here.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("here.toml")),
            other => panic!("expected Io error, got {other}"),
        }
    }
}
