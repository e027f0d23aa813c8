use eframe::egui::{self, Align2, FontId, Sense, Ui};

use crate::engine::DragState;
use crate::util::{format_percent_change, format_price};

use super::super::ViewModel;
use super::super::render_utils::{PainterCanvas, overlay_anchor};

impl ViewModel {
    pub(in crate::app) fn draw_bubbles(&mut self, ui: &mut Ui) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.engine.update_viewport_bounds(rect.width(), rect.height());
        self.handle_bubble_pointer(ui, rect);

        self.engine.update();
        let mut canvas = PainterCanvas::new(&painter, rect, self.theme.background());
        self.engine.render(&mut canvas);

        let dragging = matches!(self.engine.drag_state(), DragState::Dragging { .. });
        if dragging {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if self.hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grab);
        }

        if self.engine.is_empty() {
            painter.text(
                overlay_anchor(rect),
                Align2::LEFT_TOP,
                "The latest snapshot had no valid instruments.",
                FontId::proportional(13.0),
                self.theme.overlay_text(),
            );
        } else if let Some(bubble) = self
            .hovered
            .as_deref()
            .and_then(|symbol| self.engine.bubble(symbol))
        {
            let panel_text = format!(
                "{}  |  {}  |  {}  |  {}",
                bubble.symbol,
                bubble.display_name,
                format_price(bubble.price),
                format_percent_change(bubble.percent_change)
            );
            painter.text(
                overlay_anchor(rect),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                self.theme.overlay_text(),
            );
        }

        ui.ctx().request_repaint();
    }
}
