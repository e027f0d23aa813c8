use std::collections::VecDeque;
use std::time::Instant;

use eframe::egui::{self, Align, Context, Layout, RichText};

use crate::engine::{BubbleEngine, RefreshSummary};
use crate::market::Instrument;

use super::super::theme::Theme;
use super::super::{RefreshStatus, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(engine: BubbleEngine, theme: Theme, source_label: String) -> Self {
        let summary = RefreshSummary {
            added: engine.len(),
            ..RefreshSummary::default()
        };

        Self {
            engine,
            theme,
            source_label,
            last_refresh: RefreshStatus {
                received_at: Instant::now(),
                summary,
                error: None,
            },
            hovered: None,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn apply_snapshot(&mut self, snapshot: &[Instrument]) {
        let summary = self.engine.update_data(snapshot);
        log::info!(
            "quote refresh: {} updated, {} added, {} rejected",
            summary.updated,
            summary.added,
            summary.rejected
        );

        self.last_refresh = RefreshStatus {
            received_at: Instant::now(),
            summary,
            error: None,
        };
    }

    pub(in crate::app) fn record_error(&mut self, error: String) {
        self.last_refresh.error = Some(error);
    }

    pub(in crate::app) fn set_theme(&mut self, ctx: &Context, theme: Theme) {
        if self.theme == theme {
            return;
        }

        self.theme = theme;
        ctx.set_visuals(theme.visuals());
        self.engine.update_style(theme.style());
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("market-bubbles");
                    ui.separator();
                    ui.label(format!("source: {}", self.source_label));
                    ui.label(format!("bubbles: {}", self.engine.len()));
                    let viewport = self.engine.viewport();
                    ui.label(format!("{:.0}x{:.0}", viewport.width, viewport.height));
                    ui.label(self.refresh_text());

                    let next_theme = self.theme.toggled();
                    if ui
                        .button(format!("{} theme", next_theme.label()))
                        .on_hover_text("Switch bubble colors and window visuals.")
                        .clicked()
                    {
                        self.set_theme(ctx, next_theme);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_bubbles(ui));
    }

    fn refresh_text(&self) -> RichText {
        let status = &self.last_refresh;
        if let Some(error) = &status.error {
            return RichText::new(format!("refresh failed: {error}"))
                .color(egui::Color32::from_rgb(240, 99, 92));
        }

        let age = status.received_at.elapsed().as_secs();
        let summary = status.summary;
        let mut text = format!(
            "refreshed {age}s ago: {} updated, {} new",
            summary.updated, summary.added
        );
        if summary.rejected > 0 {
            text.push_str(&format!(", {} skipped", summary.rejected));
        }
        RichText::new(text)
    }
}
