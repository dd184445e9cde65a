// src/visualizer.rs
use crate::types::{Channel, Lamp};
use eframe::egui;
use egui::{Color32, Rounding, Stroke, Vec2};

pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);
pub const PANEL: Color32 = Color32::from_rgb(46, 46, 46);
pub const ACCENT: Color32 = Color32::from_rgb(0, 128, 0);
pub const TRACE: Color32 = Color32::from_rgb(0, 255, 255);

pub fn lamp_color(lamp: Lamp) -> Color32 {
    match lamp {
        Lamp::Idle => Color32::GRAY,
        Lamp::Normal => Color32::from_rgb(0, 255, 0),
        Lamp::Alarm => Color32::RED,
    }
}

/// Readout tile: status lamp, channel name, latest value, unit.
pub fn draw_gauge(ui: &mut egui::Ui, channel: Channel, value: Option<f64>, lamp: Lamp) {
    let size = Vec2::new(150.0, 112.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    let text_color = Color32::WHITE;

    painter.rect_filled(rect, Rounding::same(4.0), PANEL);
    painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.0, Color32::from_rgb(70, 70, 70)));

    let top = rect.center_top();
    painter.circle_filled(top + Vec2::new(0.0, 18.0), 9.0, lamp_color(lamp));
    painter.text(
        top + Vec2::new(0.0, 34.0),
        egui::Align2::CENTER_TOP,
        channel.label(),
        egui::FontId::proportional(13.0),
        text_color,
    );
    // 未有数据时显示 "--"
    let reading = value.map_or_else(|| "--".to_owned(), |v| format!("{v:.1}"));
    painter.text(
        top + Vec2::new(0.0, 54.0),
        egui::Align2::CENTER_TOP,
        reading,
        egui::FontId::monospace(20.0),
        Color32::from_rgb(0, 255, 0),
    );
    painter.text(
        top + Vec2::new(0.0, 82.0),
        egui::Align2::CENTER_TOP,
        channel.unit(),
        egui::FontId::proportional(11.0),
        Color32::GRAY,
    );
}
