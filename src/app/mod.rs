use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use eframe::egui::{self, Context};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::{BubbleEngine, RefreshSummary, Viewport};
use crate::market::{Instrument, QuoteSource, spawn_feed};

mod bubbles;
mod render_utils;
mod theme;
mod ui;

pub use theme::Theme;

type FeedReceiver = Receiver<Result<Vec<Instrument>, String>>;

pub struct MarketBubblesApp {
    source: QuoteSource,
    refresh_interval: Duration,
    seed: Option<u64>,
    theme: Theme,
    feed_rx: Option<FeedReceiver>,
    state: AppState,
}

enum AppState {
    Loading,
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    engine: BubbleEngine,
    theme: Theme,
    source_label: String,
    last_refresh: RefreshStatus,
    hovered: Option<String>,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

struct RefreshStatus {
    received_at: Instant,
    summary: RefreshSummary,
    error: Option<String>,
}

impl MarketBubblesApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        source: QuoteSource,
        refresh_interval: Duration,
        seed: Option<u64>,
        theme: Theme,
    ) -> Self {
        cc.egui_ctx.set_visuals(theme.visuals());

        let mut app = Self {
            source,
            refresh_interval,
            seed,
            theme,
            feed_rx: None,
            state: AppState::Loading,
        };
        app.start_feed();
        app
    }

    fn start_feed(&mut self) {
        log::info!(
            "starting quote feed from {} every {:?}",
            self.source.describe(),
            self.refresh_interval
        );

        match spawn_feed(self.source.clone(), self.refresh_interval) {
            Ok(rx) => {
                self.feed_rx = Some(rx);
                self.state = AppState::Loading;
            }
            Err(error) => {
                self.feed_rx = None;
                self.state = AppState::Error(format!("{error:#}"));
            }
        }
    }

    fn engine_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Drains the feed channel; only the newest snapshot matters.
    fn poll_feed(&mut self, ctx: &Context) {
        let Some(rx) = self.feed_rx.as_ref() else {
            return;
        };

        let mut latest = None;
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(message) => latest = Some(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected {
            self.feed_rx = None;
            let message = "Quote feed worker disconnected".to_owned();
            if let AppState::Ready(model) = &mut self.state {
                model.record_error(message);
            } else {
                self.state = AppState::Error(message);
            }
        }

        let Some(message) = latest else {
            return;
        };

        if let AppState::Ready(model) = &mut self.state {
            match message {
                Ok(snapshot) => model.apply_snapshot(&snapshot),
                Err(error) => model.record_error(error),
            }
            return;
        }

        match message {
            Ok(snapshot) => {
                let area = ctx.available_rect();
                let viewport = Viewport::new(area.width(), area.height());
                let engine =
                    BubbleEngine::new(viewport, &snapshot, self.theme.style(), self.engine_rng());
                self.state = AppState::Ready(Box::new(ViewModel::new(
                    engine,
                    self.theme,
                    self.source.describe(),
                )));
            }
            Err(error) => {
                self.feed_rx = None;
                self.state = AppState::Error(error);
            }
        }
    }
}

impl eframe::App for MarketBubblesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_feed(ctx);

        let mut retry = false;
        match &mut self.state {
            AppState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading market quotes...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load market quotes");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx);
                self.theme = model.theme;
            }
        }

        if retry {
            self.start_feed();
        }
    }
}
