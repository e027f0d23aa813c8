//! Bubble layout engine.
//!
//! The engine owns every bubble and advances them one frame per [`BubbleEngine::update`].
//! It never schedules frames on its own: the host calls `update()` then `render()` from
//! its redraw loop and forwards resize, refresh and pointer events between frames.

use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, vec2};
use rand::Rng;
use rand::rngs::StdRng;

use crate::market::Instrument;

mod bubble;
mod canvas;
mod drag;
mod physics;
mod radius;
mod style;

pub use bubble::Bubble;
pub use canvas::BubbleCanvas;
pub use drag::{DragState, PointerEvent};
pub use radius::bubble_radius;
pub use style::BubbleStyle;

const SPAWN_DISTANCE_MIN: f32 = 250.0;
const SPAWN_DISTANCE_MAX: f32 = 700.0;
const SPAWN_SPEED_MIN: f32 = 0.5;
const SPAWN_SPEED_MAX: f32 = 2.0;

/// Drawable area in pixels. Bubble positions live in `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Pos2 {
        Pos2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_dim(self) -> f32 {
        self.width.min(self.height)
    }

    pub fn area(self) -> f32 {
        self.width * self.height
    }

    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Phones and narrow windows get heavier damping and softer flicks.
    pub fn is_compact(self) -> bool {
        self.min_dim() < 600.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub updated: usize,
    pub added: usize,
    pub rejected: usize,
}

pub struct BubbleEngine {
    bubbles: Vec<Bubble>,
    index_by_symbol: HashMap<String, usize>,
    viewport: Viewport,
    style: BubbleStyle,
    drag: DragState,
    rng: StdRng,
}

impl BubbleEngine {
    /// Builds one bubble per valid instrument, spread on a ring around the viewport center.
    pub fn new(
        viewport: Viewport,
        instruments: &[Instrument],
        style: BubbleStyle,
        rng: StdRng,
    ) -> Self {
        let mut engine = Self {
            bubbles: Vec::with_capacity(instruments.len()),
            index_by_symbol: HashMap::with_capacity(instruments.len()),
            viewport,
            style,
            drag: DragState::Idle,
            rng,
        };

        let accepted = instruments
            .iter()
            .filter(|instrument| engine.accept(instrument))
            .collect::<Vec<_>>();
        let count = accepted.len();

        for (index, instrument) in accepted.into_iter().enumerate() {
            if let Some(&existing) = engine.index_by_symbol.get(&instrument.symbol) {
                let target_radius = engine.target_radius_for(instrument.percent_change);
                engine.bubbles[existing].apply_quote(instrument, target_radius);
                continue;
            }

            let angle = TAU * index as f32 / count as f32;
            engine.push_bubble(instrument, angle);
        }

        log::info!(
            "bubble engine created with {} bubbles on {}x{}",
            engine.bubbles.len(),
            viewport.width,
            viewport.height
        );

        engine
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn bubble(&self, symbol: &str) -> Option<&Bubble> {
        self.index_by_symbol
            .get(symbol)
            .and_then(|&index| self.bubbles.get(index))
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn update_style(&mut self, style: BubbleStyle) {
        self.style = style;
    }

    /// Applies a quote snapshot. Known symbols are updated in place and ease toward their
    /// new radius; unseen symbols are appended. Symbols missing from the snapshot stay.
    pub fn update_data(&mut self, instruments: &[Instrument]) -> RefreshSummary {
        let mut summary = RefreshSummary::default();

        for instrument in instruments {
            if !self.accept(instrument) {
                summary.rejected += 1;
                continue;
            }

            let target_radius = self.target_radius_for(instrument.percent_change);
            if let Some(&index) = self.index_by_symbol.get(&instrument.symbol) {
                self.bubbles[index].apply_quote(instrument, target_radius);
                summary.updated += 1;
            } else {
                let angle = self.rng.gen_range(0.0..TAU);
                self.push_bubble(instrument, angle);
                log::debug!("added bubble for new symbol {}", instrument.symbol);
                summary.added += 1;
            }
        }

        summary
    }

    /// Keeps every bubble at the same offset from the center and rescales target radii.
    pub fn update_viewport_bounds(&mut self, width: f32, height: f32) {
        let next = Viewport::new(width, height);
        if next == self.viewport {
            return;
        }

        let shift = next.center() - self.viewport.center();
        self.viewport = next;

        for bubble in &mut self.bubbles {
            bubble.position += shift;
            bubble.target_radius = bubble_radius(bubble.percent_change, width, height);
        }

        log::debug!("viewport resized to {width}x{height}");
    }

    /// Advances the simulation by one frame.
    pub fn update(&mut self) {
        if self.viewport.is_degenerate() {
            return;
        }

        physics::step(&mut self.bubbles, self.viewport, &mut self.rng);
    }

    fn accept(&self, instrument: &Instrument) -> bool {
        match instrument.validate() {
            Ok(()) => true,
            Err(error) => {
                log::warn!("skipping instrument record: {error}");
                false
            }
        }
    }

    fn target_radius_for(&self, percent_change: f64) -> f32 {
        bubble_radius(percent_change, self.viewport.width, self.viewport.height)
    }

    fn push_bubble(&mut self, instrument: &Instrument, angle: f32) {
        let radius = self.target_radius_for(instrument.percent_change);
        let distance = self.rng.gen_range(SPAWN_DISTANCE_MIN..=SPAWN_DISTANCE_MAX);
        let position = self.viewport.center() + vec2(angle.cos(), angle.sin()) * distance;

        let velocity_scale = 1.5 / (1.0 + radius / 30.0);
        let heading = self.rng.gen_range(0.0..TAU);
        let speed = self.rng.gen_range(SPAWN_SPEED_MIN..=SPAWN_SPEED_MAX) * velocity_scale;
        let velocity = Vec2::angled(heading) * speed;
        let countdown = physics::next_direction_countdown(&mut self.rng);

        let index = self.bubbles.len();
        self.bubbles
            .push(Bubble::new(instrument, position, velocity, radius, countdown));
        self.index_by_symbol.insert(instrument.symbol.clone(), index);
    }
}
