//! Stage drawing for `StageApp`.
//!
//! A tiny pinhole projection stands in for the 3D renderer: cards are
//! projected from the animated layout through the controller's camera
//! target and painted back to front, props on top.

use eframe::egui;

use carousel_stage::camera::CameraTarget;
use carousel_stage::render::animator::Prop;

use super::StageApp;

/// Card size in world units at scale 1.0
const CARD_W: f32 = 1.0;
const CARD_H: f32 = 0.66;
const FOV_Y: f32 = 50.0 * std::f32::consts::PI / 180.0;
const NEAR: f32 = 0.05;

const PALETTE: [egui::Color32; 6] = [
    egui::Color32::from_rgb(240, 160, 60),
    egui::Color32::from_rgb(230, 90, 150),
    egui::Color32::from_rgb(80, 200, 210),
    egui::Color32::from_rgb(120, 200, 90),
    egui::Color32::from_rgb(150, 120, 230),
    egui::Color32::from_rgb(235, 215, 90),
];

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len < 1e-6 {
        return [0.0, 0.0, -1.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Look-at pinhole camera over a screen rect.
#[derive(Debug, Clone)]
pub struct Projector {
    eye: [f32; 3],
    right: [f32; 3],
    up: [f32; 3],
    forward: [f32; 3],
    focal: f32,
    center: egui::Pos2,
}

impl Projector {
    fn new(cam: &CameraTarget, viewport: egui::Rect) -> Self {
        let forward = normalize(sub(cam.look_at, cam.position));
        let mut right = cross(forward, [0.0, 1.0, 0.0]);
        if dot(right, right) < 1e-6 {
            // looking straight up/down
            right = [1.0, 0.0, 0.0];
        }
        let right = normalize(right);
        let up = cross(right, forward);
        Self {
            eye: cam.position,
            right,
            up,
            forward,
            focal: viewport.height() * 0.5 / (FOV_Y * 0.5).tan(),
            center: viewport.center(),
        }
    }

    /// Screen position and view depth, or `None` behind the near plane.
    fn project(&self, p: [f32; 3]) -> Option<(egui::Pos2, f32)> {
        let v = sub(p, self.eye);
        let depth = dot(v, self.forward);
        if depth < NEAR {
            return None;
        }
        let k = self.focal / depth;
        Some((
            egui::pos2(
                self.center.x + dot(v, self.right) * k,
                self.center.y - dot(v, self.up) * k,
            ),
            depth,
        ))
    }

    fn pixels_per_unit(&self, depth: f32) -> f32 {
        self.focal / depth
    }

    /// World-space offset, parallel to the screen at the depth of `at`,
    /// that moves `at` by `delta` pixels.
    pub fn unproject_delta(&self, at: [f32; 3], delta: egui::Vec2) -> Option<[f32; 3]> {
        let (_, depth) = self.project(at)?;
        let k = 1.0 / self.pixels_per_unit(depth);
        let (dx, dy) = (delta.x * k, -delta.y * k);
        Some([
            self.right[0] * dx + self.up[0] * dy,
            self.right[1] * dx + self.up[1] * dy,
            self.right[2] * dx + self.up[2] * dy,
        ])
    }
}

impl StageApp {
    pub fn draw_stage(&mut self, ui: &mut egui::Ui) {
        let (viewport, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter_at(viewport);
        let proj = Projector::new(&self.frame.camera, viewport);

        let mut cards: Vec<(usize, egui::Rect, f32, f32)> = Vec::new();
        for (i, item) in self.animator.items().enumerate() {
            if item.opacity <= 0.01 {
                continue;
            }
            let Some((pos, depth)) = proj.project(item.position) else {
                continue;
            };
            let ppu = proj.pixels_per_unit(depth) * item.scale;
            // turned cards get narrower
            let w = CARD_W * ppu * item.rotation_y.cos().abs().max(0.15);
            let h = CARD_H * ppu;
            let rect = egui::Rect::from_center_size(pos, egui::vec2(w, h));
            cards.push((i, rect, depth, item.opacity));
        }
        // far first
        cards.sort_by(|a, b| b.2.total_cmp(&a.2));

        let ids: Vec<&str> = self
            .carousel
            .state()
            .items
            .iter()
            .map(|it| it.id.as_str())
            .collect();
        for (i, rect, _, opacity) in &cards {
            let alpha = (opacity * 255.0) as u8;
            let base = PALETTE[i % PALETTE.len()];
            let fill = egui::Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha);
            painter.rect_filled(*rect, 6.0, fill);
            if *i == self.frame.current_index {
                let stroke_color = if self.frame.focused {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::from_white_alpha(160)
                };
                painter.rect_stroke(*rect, 6.0, egui::Stroke::new(2.0, stroke_color));
            }
            let font = egui::FontId::proportional((rect.height() * 0.12).clamp(9.0, 22.0));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                ids.get(*i).copied().unwrap_or("?"),
                font,
                egui::Color32::from_black_alpha(alpha),
            );
        }
        self.card_rects = cards.iter().map(|(i, r, _, _)| (*i, *r)).collect();

        self.prop_rects = self
            .props
            .iter()
            .map(|prop| draw_prop(&painter, &proj, prop))
            .collect();
        self.projector = Some(proj);
    }
}

/// Paint one prop as a diamond and return its hit rect.
fn draw_prop(painter: &egui::Painter, proj: &Projector, prop: &Prop) -> Option<egui::Rect> {
    let t = prop.transform();
    let (pos, depth) = proj.project(t.position)?;
    let r = 0.12 * proj.pixels_per_unit(depth) * t.scale;
    // spinning diamond: horizontal extent follows the rotation
    let rx = r * t.rotation_y.cos().abs().max(0.2);
    let look = prop.look();
    let [cr, cg, cb, ca] = look.color.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
    let fill = egui::Color32::from_rgba_unmultiplied(cr, cg, cb, ca);
    let shine = egui::Color32::from_white_alpha((look.metalness * 200.0) as u8);
    painter.add(egui::Shape::convex_polygon(
        vec![
            pos + egui::vec2(0.0, -r),
            pos + egui::vec2(rx, 0.0),
            pos + egui::vec2(0.0, r),
            pos + egui::vec2(-rx, 0.0),
        ],
        fill,
        egui::Stroke::new(1.5, shine),
    ));
    Some(egui::Rect::from_center_size(pos, egui::vec2(2.0 * r, 2.0 * r)))
}
