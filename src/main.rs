mod app;
mod engine;
mod market;
mod util;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::{MarketBubblesApp, Theme};
use crate::market::QuoteSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON array of {symbol, displayName, price, percentChange} records, re-read on every refresh.
    #[arg(long)]
    quotes: Option<PathBuf>,

    #[arg(long, default_value_t = 60)]
    refresh_secs: u64,

    /// Fixes the layout and demo market randomness.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,

    #[arg(long, default_value_t = 1440.0)]
    width: f32,

    #[arg(long, default_value_t = 920.0)]
    height: f32,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let source = match args.quotes {
        Some(path) => QuoteSource::File(path),
        None => QuoteSource::Demo { seed: args.seed },
    };
    let refresh_interval = Duration::from_secs(args.refresh_secs.max(1));

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "market-bubbles",
        options,
        Box::new(move |cc| {
            Ok(Box::new(MarketBubblesApp::new(
                cc,
                source.clone(),
                refresh_interval,
                args.seed,
                args.theme,
            )))
        }),
    )
}
