//! Input translation for `StageApp`.
//!
//! egui keys are mapped onto the crate's device-independent `Key`s and then
//! through the `KeyMap`; pointer presses feed the gesture recognizer unless
//! they grab a draggable prop. Every resulting command is queued and applied
//! on the next controller tick.

use eframe::egui;

use carousel_stage::input::touch::Gesture;
use carousel_stage::input::Key;

use super::StageApp;

const POINTER_ID: u64 = 0;

const KEYS: [(egui::Key, Key); 21] = [
    (egui::Key::ArrowLeft, Key::ArrowLeft),
    (egui::Key::ArrowRight, Key::ArrowRight),
    (egui::Key::ArrowUp, Key::ArrowUp),
    (egui::Key::ArrowDown, Key::ArrowDown),
    (egui::Key::Space, Key::Space),
    (egui::Key::Enter, Key::Enter),
    (egui::Key::Escape, Key::Escape),
    (egui::Key::A, Key::A),
    (egui::Key::D, Key::D),
    (egui::Key::E, Key::E),
    (egui::Key::Q, Key::Q),
    (egui::Key::F3, Key::F3),
    (egui::Key::Num1, Key::Num1),
    (egui::Key::Num2, Key::Num2),
    (egui::Key::Num3, Key::Num3),
    (egui::Key::Num4, Key::Num4),
    (egui::Key::Num5, Key::Num5),
    (egui::Key::Num6, Key::Num6),
    (egui::Key::Num7, Key::Num7),
    (egui::Key::Num8, Key::Num8),
    (egui::Key::Num9, Key::Num9),
];

impl StageApp {
    /// Collect this frame's key and pointer events into queued commands.
    pub fn read_input(&mut self, ctx: &egui::Context) {
        let pressed: Vec<Key> = ctx.input(|i| {
            KEYS.iter()
                .filter(|(ek, _)| i.key_pressed(*ek))
                .map(|(_, k)| *k)
                .collect()
        });
        for key in pressed {
            if let Some(cmd) = self.keys.command(key) {
                self.carousel.push(cmd);
            }
        }

        let (press, release, pos, hover, delta) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.pointer.hover_pos(),
                i.pointer.delta(),
            )
        });

        self.update_hover(ctx, hover);

        let Some(pos) = pos else {
            return;
        };
        if press && self.dragging.is_none() && !self.gestures.is_pressed() {
            self.dragging = self.prop_at(pos).filter(|&i| self.props[i].draggable);
        }
        if let Some(i) = self.dragging {
            if !press {
                self.drag_prop(i, delta);
            }
            if release {
                self.dragging = None;
            }
            return;
        }

        let gesture = self
            .gestures
            .pointer_frame(pos.x, pos.y, POINTER_ID, press, release);
        self.handle_gesture(gesture);
    }

    fn handle_gesture(&mut self, gesture: Gesture) {
        if let Gesture::Tap { x, y } = gesture {
            if let Some(i) = self.prop_at(egui::pos2(x, y)) {
                self.props[i].click(&mut self.rng);
                return;
            }
        }
        let cards = &self.card_rects;
        let cmd = self.gestures.command(gesture, |x, y| card_at(cards, x, y));
        if let Some(cmd) = cmd {
            self.carousel.push(cmd);
        }
    }

    /// Move a held prop so it stays under the pointer, in the camera plane.
    fn drag_prop(&mut self, index: usize, delta: egui::Vec2) {
        if delta == egui::Vec2::ZERO {
            return;
        }
        let Some(proj) = self.projector.as_ref() else {
            return;
        };
        let prop = &mut self.props[index];
        if let Some(world) = proj.unproject_delta(prop.transform().position, delta) {
            prop.drag_by(world);
        }
    }

    fn update_hover(&mut self, ctx: &egui::Context, hover: Option<egui::Pos2>) {
        let over_prop = hover.and_then(|p| self.prop_at(p));
        for (i, prop) in self.props.iter_mut().enumerate() {
            prop.set_hovered(over_prop == Some(i) || self.dragging == Some(i));
        }

        let over_card = hover.is_some_and(|p| card_at(&self.card_rects, p.x, p.y).is_some());
        if self.dragging.is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if over_prop.is_some() || over_card {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }

    /// Front-most prop under a screen point.
    fn prop_at(&self, p: egui::Pos2) -> Option<usize> {
        self.prop_rects
            .iter()
            .enumerate()
            .rev()
            .find(|(_, r)| r.is_some_and(|r| r.contains(p)))
            .map(|(i, _)| i)
    }
}

/// Front-most card under a screen point.
fn card_at(cards: &[(usize, egui::Rect)], x: f32, y: f32) -> Option<usize> {
    let p = egui::pos2(x, y);
    cards
        .iter()
        .rev()
        .find(|(_, r)| r.contains(p))
        .map(|(i, _)| *i)
}
