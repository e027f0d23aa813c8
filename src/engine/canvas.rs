use eframe::egui::{Color32, Pos2, Stroke, vec2};

use crate::util::format_percent_change;

use super::BubbleEngine;

const GLOW_EXTENT: f32 = 1.5;

/// Minimal 2D drawing surface the engine renders onto, in viewport-local coordinates.
pub trait BubbleCanvas {
    fn clear(&mut self);

    /// Fills a disc of `radius` whose color fades from `inner` at the center to `outer` at the rim.
    fn radial_gradient(&mut self, center: Pos2, radius: f32, inner: Color32, outer: Color32);

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: Stroke);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Draws `text` centered on `position`.
    fn text(&mut self, position: Pos2, text: &str, size: f32, color: Color32);
}

pub(super) fn symbol_font_size(radius: f32) -> f32 {
    (radius * 0.42).clamp(8.0, 30.0)
}

pub(super) fn change_font_size(radius: f32) -> f32 {
    (radius * 0.3).clamp(7.0, 22.0)
}

impl BubbleEngine {
    /// Clears the canvas and draws every bubble in insertion order.
    pub fn render(&self, canvas: &mut impl BubbleCanvas) {
        canvas.clear();

        let style = &self.style;
        for bubble in &self.bubbles {
            let positive = bubble.is_positive();
            let center = bubble.position;
            let radius = bubble.radius;
            let glow = style.glow_color(positive);
            let accent = style.stroke_color(positive);

            canvas.radial_gradient(center, radius * GLOW_EXTENT, glow, Color32::TRANSPARENT);
            canvas.stroke_circle(center, radius, Stroke::new(style.stroke_width, accent));
            canvas.fill_circle(
                center,
                (radius - style.stroke_width).max(0.0),
                style.fill,
            );
            canvas.text(
                center - vec2(0.0, radius * 0.15),
                &bubble.symbol,
                symbol_font_size(radius),
                style.text,
            );
            canvas.text(
                center + vec2(0.0, radius * 0.32),
                &format_percent_change(bubble.percent_change),
                change_font_size(radius),
                accent,
            );
        }
    }
}
