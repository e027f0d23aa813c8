use eframe::egui::{Pos2, Vec2};

use crate::market::Instrument;

/// One simulated circle, keyed by instrument symbol.
#[derive(Clone, Debug)]
pub struct Bubble {
    pub symbol: String,
    pub display_name: String,
    pub price: f64,
    pub percent_change: f64,
    pub position: Pos2,
    pub velocity: Vec2,
    pub target_velocity: Vec2,
    pub radius: f32,
    pub target_radius: f32,
    pub direction_change_countdown: i32,
    pub is_dragging: bool,
    pub grab_offset: Vec2,
}

impl Bubble {
    pub(super) fn new(
        instrument: &Instrument,
        position: Pos2,
        velocity: Vec2,
        radius: f32,
        direction_change_countdown: i32,
    ) -> Self {
        Self {
            symbol: instrument.symbol.clone(),
            display_name: instrument.display_name.clone(),
            price: instrument.price,
            percent_change: instrument.percent_change,
            position,
            velocity,
            target_velocity: velocity,
            radius,
            target_radius: radius,
            direction_change_countdown,
            is_dragging: false,
            grab_offset: Vec2::ZERO,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.percent_change >= 0.0
    }

    pub fn contains(&self, point: Pos2) -> bool {
        (point - self.position).length_sq() <= self.radius * self.radius
    }

    pub(super) fn apply_quote(&mut self, instrument: &Instrument, target_radius: f32) {
        if !instrument.display_name.is_empty() {
            self.display_name.clone_from(&instrument.display_name);
        }
        self.price = instrument.price;
        self.percent_change = instrument.percent_change;
        self.target_radius = target_radius;
    }
}
