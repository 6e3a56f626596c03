//! On-screen controls hint and the F3 debug window.

use eframe::egui;

use carousel_stage::camera::CameraRig;

use super::StageApp;

impl StageApp {
    /// Bottom strip listing the active key bindings.
    pub fn draw_controls_hint(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.add_space(4.0);
                let state = self.carousel.state();
                ui.label(
                    egui::RichText::new(format!(
                        "{} / {}  {}",
                        state.current_index + 1,
                        state.len(),
                        state.current().id
                    ))
                    .strong(),
                );
                ui.separator();
                for (key, cmd) in self.keys.iter() {
                    if key.digit_slot().is_some_and(|s| s > 0) {
                        continue;
                    }
                    ui.label(
                        egui::RichText::new(format!("{}: {:?}", key.name(), cmd))
                            .small()
                            .weak(),
                    );
                }
            });
        });
    }

    pub fn draw_debug_overlay(&self, ctx: &egui::Context) {
        let f = &self.frame;
        egui::Window::new("Debug")
            .default_pos(egui::pos2(16.0, 16.0))
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("debug_grid").num_columns(2).show(ui, |ui| {
                    ui.label("item");
                    ui.label(format!("{}", f.current_index));
                    ui.end_row();

                    ui.label("focused");
                    ui.label(format!("{}", f.focused));
                    ui.end_row();

                    ui.label("transitioning");
                    ui.label(format!("{}", f.transitioning));
                    ui.end_row();

                    ui.label("camera");
                    let p = f.camera.position;
                    ui.label(format!("({:.2}, {:.2}, {:.2})", p[0], p[1], p[2]));
                    ui.end_row();

                    ui.label("look at");
                    let l = f.camera.look_at;
                    ui.label(format!("({:.2}, {:.2}, {:.2})", l[0], l[1], l[2]));
                    ui.end_row();

                    match self.carousel.rig() {
                        CameraRig::Tour(t) => {
                            ui.label("waypoint");
                            ui.label(format!("{} / {}", t.current_waypoint() + 1, t.len()));
                        }
                        CameraRig::Follow(c) => {
                            ui.label("orbit angle");
                            ui.label(format!("{:.2} rad", c.offset().angle));
                        }
                    }
                    ui.end_row();

                    let zoom = self.carousel.zoom();
                    ui.label("zoom depth");
                    ui.label(match zoom.depth() {
                        Some(d) => format!("{d:.2}"),
                        None => "-".to_owned(),
                    });
                    ui.end_row();

                    ui.label("recorded depth");
                    ui.label(match zoom.initial_depth() {
                        Some(d) => format!("{d:.2}"),
                        None => "-".to_owned(),
                    });
                    ui.end_row();

                    ui.label("animating");
                    ui.label(format!(
                        "{}",
                        self.animator.is_animating() || zoom.is_animating()
                    ));
                    ui.end_row();

                    ui.label("uptime");
                    ui.label(format!("{:.1}s", self.app_start.elapsed().as_secs_f32()));
                    ui.end_row();
                });
            });
    }
}
