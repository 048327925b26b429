use egui::{Color32, Context, RichText, Ui};
use glam::Vec2;

use crate::math::SHAPES;
use crate::renderer::ShapeStats;
use crate::scene::RenderMode;
use crate::ui::state::UiState;
use crate::ui::theme::*;

pub fn draw_hud(ctx: &Context, state: &UiState, mode: RenderMode, stats: &[ShapeStats]) {
    egui::Window::new("hud")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .frame(
            egui::Frame::default()
                .fill(Color32::from_black_alpha(200))
                .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
                .rounding(6.0)
                .inner_margin(12.0),
        )
        .show(ctx, |ui| {
            ui.label(RichText::new("Parametric Shapes").color(TEXT_BRIGHT).strong());
            ui.label(
                RichText::new(format!("{:.0} fps", state.fps))
                    .color(TEXT_MUTED)
                    .size(11.0),
            );
            ui.add_space(8.0);

            section_header(ui, "MODE");
            for candidate in RenderMode::ALL {
                let active = candidate == mode;
                let text = format!("[{}] {}", candidate.key_label(), candidate.name());
                let color = if active { ACCENT_GREEN } else { TEXT_PRIMARY };
                ui.label(RichText::new(text).color(color).monospace());
            }
            ui.add_space(8.0);

            section_header(ui, "MESHES");
            egui::Grid::new("mesh_stats")
                .num_columns(3)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    for entry in stats {
                        let hint = SHAPES
                            .iter()
                            .find(|def| def.name == entry.name)
                            .map_or("", |def| def.description);
                        ui.label(RichText::new(entry.name).color(TEXT_BRIGHT))
                            .on_hover_text(hint);
                        ui.label(RichText::new(fmt_num(entry.vertices)).monospace());
                        ui.label(
                            RichText::new(format!("{} tris", fmt_num(entry.triangles)))
                                .monospace()
                                .color(TEXT_MUTED),
                        );
                        ui.end_row();
                    }
                });
        });
}

pub fn draw_help_overlay(ctx: &Context, mouse: Vec2) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(
                        RichText::new("Q W E R T Y - Mode | H - HUD | Esc - Quit")
                            .color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!("Mouse: ({:+.2}, {:+.2})", mouse.x, mouse.y))
                            .color(TEXT_MUTED),
                    );
                });
        });
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn fmt_num(n: u32) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}
