use eframe::egui::{Color32, Visuals};

use crate::engine::BubbleStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    pub fn style(self) -> BubbleStyle {
        match self {
            Self::Dark => BubbleStyle::dark(),
            Self::Light => BubbleStyle::light(),
        }
    }

    pub fn visuals(self) -> Visuals {
        match self {
            Self::Dark => Visuals::dark(),
            Self::Light => Visuals::light(),
        }
    }

    pub fn background(self) -> Color32 {
        match self {
            Self::Dark => Color32::from_rgb(5, 9, 15),
            Self::Light => Color32::from_rgb(248, 251, 255),
        }
    }

    pub fn overlay_text(self) -> Color32 {
        match self {
            Self::Dark => Color32::from_gray(238),
            Self::Light => Color32::from_gray(28),
        }
    }
}
