use eframe::egui::{Pos2, Vec2};

use super::BubbleEngine;

/// Pointer or single-touch input, already translated into viewport-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Pos2),
    Move(Pos2),
    Release,
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        index: usize,
    },
}

impl BubbleEngine {
    /// Topmost bubble under `point`. Later bubbles are drawn on top, so they win.
    pub fn hit_test(&self, point: Pos2) -> Option<usize> {
        self.bubbles.iter().rposition(|bubble| bubble.contains(point))
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match (self.drag, event) {
            (DragState::Idle, PointerEvent::Press(point)) => self.begin_drag(point),
            (DragState::Dragging { index }, PointerEvent::Move(point)) => {
                if let Some(bubble) = self.bubbles.get_mut(index) {
                    bubble.position = point - bubble.grab_offset;
                }
            }
            (DragState::Dragging { index }, PointerEvent::Release | PointerEvent::Leave) => {
                self.end_drag(index);
            }
            _ => {}
        }
    }

    fn begin_drag(&mut self, point: Pos2) {
        let Some(index) = self.hit_test(point) else {
            return;
        };

        let bubble = &mut self.bubbles[index];
        bubble.is_dragging = true;
        bubble.grab_offset = point - bubble.position;
        self.drag = DragState::Dragging { index };
        log::trace!("drag started on {}", bubble.symbol);
    }

    fn end_drag(&mut self, index: usize) {
        if let Some(bubble) = self.bubbles.get_mut(index) {
            bubble.is_dragging = false;
            bubble.grab_offset = Vec2::ZERO;
        }
        self.drag = DragState::Idle;
    }
}
