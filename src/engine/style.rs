use eframe::egui::Color32;

/// Colors and stroke width used by [`super::BubbleEngine::render`].
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleStyle {
    pub positive_stroke: Color32,
    pub negative_stroke: Color32,
    pub positive_glow: Color32,
    pub negative_glow: Color32,
    pub fill: Color32,
    pub text: Color32,
    pub stroke_width: f32,
}

impl BubbleStyle {
    pub fn dark() -> Self {
        Self {
            positive_stroke: Color32::from_rgb(63, 182, 139),
            negative_stroke: Color32::from_rgb(240, 99, 92),
            positive_glow: Color32::from_rgba_unmultiplied(63, 182, 139, 90),
            negative_glow: Color32::from_rgba_unmultiplied(240, 99, 92, 90),
            fill: Color32::from_rgb(13, 21, 32),
            text: Color32::from_rgb(230, 237, 247),
            stroke_width: 2.0,
        }
    }

    pub fn light() -> Self {
        Self {
            positive_stroke: Color32::from_rgb(14, 166, 108),
            negative_stroke: Color32::from_rgb(225, 29, 72),
            positive_glow: Color32::from_rgba_unmultiplied(14, 166, 108, 60),
            negative_glow: Color32::from_rgba_unmultiplied(225, 29, 72, 60),
            fill: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(12, 22, 37),
            stroke_width: 2.0,
        }
    }

    pub fn stroke_color(&self, positive: bool) -> Color32 {
        if positive {
            self.positive_stroke
        } else {
            self.negative_stroke
        }
    }

    pub fn glow_color(&self, positive: bool) -> Color32 {
        if positive {
            self.positive_glow
        } else {
            self.negative_glow
        }
    }
}
