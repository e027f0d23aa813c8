use eframe::egui::{Pos2, Rect, Ui};

use crate::engine::{DragState, PointerEvent};

use super::super::ViewModel;
use super::super::render_utils::local_position;

/// Raw pointer state sampled once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct PointerSample {
    pub(super) pressed: bool,
    pub(super) released: bool,
    pub(super) position: Option<Pos2>,
    pub(super) hovering: bool,
}

impl PointerSample {
    pub(super) fn read(ui: &Ui) -> Self {
        ui.input(|input| Self {
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            position: input.pointer.latest_pos(),
            hovering: input.pointer.has_pointer(),
        })
    }
}

/// Translates one frame of pointer state into engine events, press before move before release.
pub(super) fn pointer_events(
    sample: PointerSample,
    rect: Rect,
    drag: DragState,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let inside = sample
        .position
        .filter(|&position| sample.hovering && rect.contains(position));
    let mut dragging = matches!(drag, DragState::Dragging { .. });

    if sample.pressed
        && let Some(position) = inside
    {
        events.push(PointerEvent::Press(local_position(rect, position)));
        dragging = true;
    }

    if !dragging {
        return events;
    }

    match inside {
        Some(position) => events.push(PointerEvent::Move(local_position(rect, position))),
        None => {
            events.push(PointerEvent::Leave);
            return events;
        }
    }

    if sample.released {
        events.push(PointerEvent::Release);
    }

    events
}

impl ViewModel {
    pub(in crate::app) fn handle_bubble_pointer(&mut self, ui: &Ui, rect: Rect) {
        let sample = PointerSample::read(ui);
        for event in pointer_events(sample, rect, self.engine.drag_state()) {
            self.engine.handle_pointer(event);
        }

        self.hovered = sample
            .position
            .filter(|&position| sample.hovering && rect.contains(position))
            .and_then(|position| self.engine.hit_test(local_position(rect, position)))
            .map(|index| self.engine.bubbles()[index].symbol.clone());
    }
}
