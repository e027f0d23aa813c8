use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use super::{DemoMarket, Instrument};

#[derive(Clone, Debug)]
pub enum QuoteSource {
    File(PathBuf),
    Demo { seed: Option<u64> },
}

impl QuoteSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Demo { .. } => "demo market".to_owned(),
        }
    }
}

pub fn load_snapshot(path: &Path) -> Result<Vec<Instrument>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read quote snapshot {}", path.display()))?;

    let snapshot: Vec<Instrument> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse quote snapshot {}", path.display()))?;

    if snapshot.is_empty() {
        log::warn!("quote snapshot {} is empty", path.display());
    }

    Ok(snapshot)
}

/// Loads one snapshot right away, then one per `interval`, until the receiver is dropped.
pub fn spawn_feed(
    source: QuoteSource,
    interval: Duration,
) -> Result<Receiver<Result<Vec<Instrument>, String>>> {
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("quote-feed".to_owned())
        .spawn(move || {
            let label = source.describe();
            let mut next_snapshot: Box<dyn FnMut() -> Result<Vec<Instrument>>> = match source {
                QuoteSource::File(path) => Box::new(move || load_snapshot(&path)),
                QuoteSource::Demo { seed } => {
                    let mut market = DemoMarket::new(seed);
                    let mut first = true;
                    Box::new(move || {
                        if std::mem::take(&mut first) {
                            Ok(market.snapshot())
                        } else {
                            Ok(market.tick())
                        }
                    })
                }
            };

            loop {
                let message = next_snapshot().map_err(|error| format!("{error:#}"));
                if let Err(error) = &message {
                    log::error!("quote refresh from {label} failed: {error}");
                }

                if tx.send(message).is_err() {
                    log::debug!("quote feed receiver dropped, stopping");
                    break;
                }

                thread::sleep(interval);
            }
        })
        .context("failed to spawn quote feed thread")?;

    Ok(rx)
}
