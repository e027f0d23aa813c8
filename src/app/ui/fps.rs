use std::collections::VecDeque;

use eframe::egui::Context;

use super::super::ViewModel;

const FPS_SAMPLE_WINDOW: usize = 180;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        record_frame(&mut self.fps_current, &mut self.fps_samples, dt);
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        fps_text(self.fps_current, &self.fps_samples)
    }
}

fn record_frame(current: &mut f32, samples: &mut VecDeque<f32>, dt: f32) {
    if dt <= f32::EPSILON {
        return;
    }

    *current = (1.0 / dt).clamp(0.0, 1000.0);
    samples.push_back(*current);
    while samples.len() > FPS_SAMPLE_WINDOW {
        samples.pop_front();
    }
}

fn fps_text(current: f32, samples: &VecDeque<f32>) -> Option<String> {
    if samples.is_empty() || current <= f32::EPSILON {
        return None;
    }

    let average = samples.iter().sum::<f32>() / samples.len() as f32;
    Some(format!(
        "FPS {current:.0} | avg {average:.1} | {:.1} ms",
        1000.0 / current
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_most_recent_samples() {
        let mut current = 0.0;
        let mut samples = VecDeque::new();

        for _ in 0..(FPS_SAMPLE_WINDOW + 20) {
            record_frame(&mut current, &mut samples, 1.0 / 60.0);
        }
        record_frame(&mut current, &mut samples, 0.0);

        assert_eq!(samples.len(), FPS_SAMPLE_WINDOW);
        assert!((current - 60.0).abs() < 0.01);
    }

    #[test]
    fn text_reports_average_and_frame_time() {
        let mut current = 0.0;
        let mut samples = VecDeque::new();
        assert_eq!(fps_text(current, &samples), None);

        record_frame(&mut current, &mut samples, 1.0 / 50.0);
        record_frame(&mut current, &mut samples, 1.0 / 100.0);

        assert_eq!(
            fps_text(current, &samples).as_deref(),
            Some("FPS 100 | avg 75.0 | 10.0 ms")
        );
    }
}
