use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eframe::egui;

use carousel_stage::camera::CameraMode;
use carousel_stage::carousel::navigation::NavigationPolicy;
use carousel_stage::render::layout::{CircularLayout, LayoutMode, LinearLayout};
use carousel_stage::{Carousel, StageConfig};

mod app;

use app::StageApp;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Linear,
    Circular,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NavigationArg {
    Wrap,
    Clamp,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CameraArg {
    Tour,
    Follow,
}

/// Interactive slideshow carousel with a waypoint or follow camera.
#[derive(Debug, Parser)]
#[command(name = "carousel-stage", version, about)]
struct Cli {
    /// TOML stage config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    #[arg(long, value_enum)]
    navigation: Option<NavigationArg>,

    #[arg(long, value_enum)]
    camera: Option<CameraArg>,

    /// Item identifiers (image paths, model names, ...)
    items: Vec<String>,
}

impl Cli {
    fn stage_config(&self) -> Result<StageConfig, carousel_stage::ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => StageConfig::load(path)?,
            None => StageConfig::default(),
        };
        match self.layout {
            Some(LayoutArg::Linear) if !matches!(cfg.layout, LayoutMode::Linear(_)) => {
                cfg.layout = LayoutMode::Linear(LinearLayout::default());
            }
            Some(LayoutArg::Circular) if !matches!(cfg.layout, LayoutMode::Circular(_)) => {
                cfg.layout = LayoutMode::Circular(CircularLayout::default());
            }
            _ => {}
        }
        match self.navigation {
            Some(NavigationArg::Wrap) => cfg.navigation = NavigationPolicy::wrap(),
            Some(NavigationArg::Clamp) => cfg.navigation = NavigationPolicy::clamp(),
            None => {}
        }
        match self.camera {
            Some(CameraArg::Tour) if !matches!(cfg.camera, CameraMode::Tour { .. }) => {
                cfg.camera = CameraMode::default();
            }
            Some(CameraArg::Follow) if !matches!(cfg.camera, CameraMode::Follow { .. }) => {
                cfg.camera = CameraMode::follow();
            }
            _ => {}
        }
        Ok(cfg)
    }

    fn item_ids(&self) -> Vec<String> {
        if self.items.is_empty() {
            (1..=5).map(|i| format!("slides/{i:02}.jpg")).collect()
        } else {
            self.items.clone()
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = match cli.stage_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let carousel = match Carousel::new(cli.item_ids(), &cfg) {
        Ok(c) => c,
        Err(e) => {
            log::error!("cannot build carousel: {e}");
            std::process::exit(2);
        }
    };
    let keys = cfg.key_map();
    let tween = cfg.tween;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Carousel Stage",
        options,
        Box::new(move |_cc| Ok(Box::new(StageApp::new(carousel, keys, tween)))),
    );
    if let Err(e) = result {
        log::error!("failed to start window: {e}");
        std::process::exit(1);
    }
}
