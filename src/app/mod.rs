//! `StageApp` - the eframe host around the carousel controller.
//!
//! The controller only produces targets; this app plays the external
//! engine's part. Methods are split across sibling modules:
//!
//! - `controls` - keyboard / pointer → `Command`
//! - `stage`    - projection and drawing of cards and props
//! - `overlay`  - controls hint and the debug window

pub mod controls;
pub mod overlay;
pub mod stage;

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use carousel_stage::input::touch::GestureRecognizer;
use carousel_stage::input::KeyMap;
use carousel_stage::render::animator::{ClickAction, Look, Motion, Prop};
use carousel_stage::render::tween::{LayoutAnimator, TweenConfig};
use carousel_stage::{Carousel, Frame};

/// `props[BEACON]` floats above the current card.
pub const BEACON: usize = 0;

// ─── Application state ───────────────────────────────────────────────────────

pub struct StageApp {
    pub carousel: Carousel,
    pub keys: KeyMap,
    pub gestures: GestureRecognizer,
    pub animator: LayoutAnimator,
    /// Scene props, drawn in order over the cards
    pub props: Vec<Prop>,
    pub frame: Frame,
    /// Screen rects of the cards drawn last frame, front-most last
    pub card_rects: Vec<(usize, egui::Rect)>,
    /// Screen rect per prop, `None` when behind the camera
    pub prop_rects: Vec<Option<egui::Rect>>,
    /// Prop held by the pointer
    pub dragging: Option<usize>,
    pub projector: Option<stage::Projector>,
    pub rng: StdRng,
    pub app_start: std::time::Instant,
}

fn scene_props() -> Vec<Prop> {
    let solid = |r: f32, g: f32, b: f32, metalness: f32| Look {
        color: [r, g, b, 1.0],
        metalness,
    };
    vec![
        Prop::new(
            "beacon",
            [0.0, 0.75, 0.0],
            Motion::SpinAndFloat {
                speed: 1.0,
                amplitude: 0.08,
                frequency: 2.0,
            },
        ),
        Prop::new("jumper", [-2.5, 1.0, 1.0], Motion::Still).with_click(ClickAction::jump()),
        Prop::new("dragger", [2.5, 2.0, 1.0], Motion::Still)
            .with_looks(solid(0.2, 0.8, 0.2, 0.3), solid(0.5, 1.0, 0.5, 0.8))
            .with_click(ClickAction::Nothing)
            .with_drag(),
        Prop::new("spinner", [0.0, -1.2, 1.0], Motion::Spin { speed: 1.0 })
            .with_looks(solid(0.0, 1.0, 1.0, 0.5), solid(0.6, 1.0, 1.0, 1.0))
            .with_click(ClickAction::Nothing),
    ]
}

impl StageApp {
    pub fn new(carousel: Carousel, keys: KeyMap, tween: TweenConfig) -> Self {
        let frame = carousel.frame();
        let mut animator = LayoutAnimator::new(tween);
        animator.sync(&frame.layout);
        Self {
            carousel,
            keys,
            gestures: GestureRecognizer::new(),
            animator,
            props: scene_props(),
            frame,
            card_rects: Vec::new(),
            prop_rects: Vec::new(),
            dragging: None,
            projector: None,
            rng: StdRng::from_entropy(),
            app_start: std::time::Instant::now(),
        }
    }

    /// Advance everything by one frame.
    fn step(&mut self, dt: f32) {
        let subject = self
            .animator
            .get(self.frame.current_index)
            .map(|a| a.position);
        self.frame = self.carousel.tick(dt, subject);

        self.animator.sync(&self.frame.layout);
        self.animator.advance(dt);

        if let Some(cur) = self.animator.get(self.frame.current_index) {
            let [x, _, z] = cur.position;
            self.props[BEACON].base_position = [x, 0.75 * cur.scale, z];
        }
        for prop in &mut self.props {
            prop.tick(dt);
        }
    }
}

impl eframe::App for StageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.read_input(ctx);

        // clamp long stalls (window drag, breakpoint) to one sluggish frame
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.step(dt);

        self.draw_controls_hint(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(18, 20, 28)))
            .show(ctx, |ui| self.draw_stage(ui));
        if self.frame.debug_overlay {
            self.draw_debug_overlay(ctx);
        }

        ctx.request_repaint();
    }
}
