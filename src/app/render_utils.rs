use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

use crate::engine::BubbleCanvas;

/// Draws engine output onto an egui painter; engine coordinates are offset by `rect.min`.
pub(super) struct PainterCanvas<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> PainterCanvas<'a> {
    pub(super) fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }

    fn to_screen(&self, position: Pos2) -> Pos2 {
        self.rect.min + position.to_vec2()
    }
}

impl BubbleCanvas for PainterCanvas<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn radial_gradient(&mut self, center: Pos2, radius: f32, inner: Color32, outer: Color32) {
        let center = self.to_screen(center);
        if radius <= 0.0 || !circle_visible(self.rect, center, radius) {
            return;
        }

        self.painter
            .add(Shape::mesh(radial_gradient_mesh(center, radius, inner, outer)));
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: Stroke) {
        let center = self.to_screen(center);
        if circle_visible(self.rect, center, radius) {
            self.painter.circle_stroke(center, radius, stroke);
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        let center = self.to_screen(center);
        if circle_visible(self.rect, center, radius) {
            self.painter.circle_filled(center, radius, color);
        }
    }

    fn text(&mut self, position: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.to_screen(position),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Triangle fan whose vertex colors interpolate from `inner` at the center to `outer` at the rim.
pub(super) fn radial_gradient_mesh(
    center: Pos2,
    radius: f32,
    inner: Color32,
    outer: Color32,
) -> Mesh {
    let segments = ((radius * 0.5) as u32).clamp(24, 96);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, inner);

    for segment in 0..segments {
        let angle = TAU * segment as f32 / segments as f32;
        mesh.colored_vertex(center + Vec2::angled(angle) * radius, outer);
    }

    for segment in 0..segments {
        let current = 1 + segment;
        let next = 1 + (segment + 1) % segments;
        mesh.add_triangle(0, current, next);
    }

    mesh
}

pub(super) fn local_position(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

pub(super) fn overlay_anchor(rect: Rect) -> Pos2 {
    rect.left_top() + vec2(10.0, 10.0)
}
