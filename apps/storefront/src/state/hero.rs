//! # Hero Ticker
//!
//! A background task that advances the hero carousel on a fixed interval
//! and publishes the current image through a `watch` channel.
//!
//! ```text
//!   tokio::time::interval ──tick──► HeroCarousel::advance ──► watch::Sender
//!                                                                  │
//!                                         hero command ◄── watch::Receiver
//! ```
//!
//! The task owns its carousel; nothing else writes to it.

use std::time::Duration;

use firewood_core::chrome::HeroCarousel;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug)]
pub struct HeroTicker {
    current: watch::Receiver<&'static str>,
    handle: JoinHandle<()>,
}

impl HeroTicker {
    /// Spawns the ticker on the current runtime.
    pub fn spawn(period: Duration) -> Self {
        let mut carousel = HeroCarousel::new();
        let (tx, rx) = watch::channel(carousel.current());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                let image = carousel.advance();
                debug!(image, "Hero image advanced");
                if tx.send(image).is_err() {
                    break;
                }
            }
        });

        info!(period_ms = period.as_millis() as u64, "Hero ticker started");
        HeroTicker {
            current: rx,
            handle,
        }
    }

    /// The image on screen right now.
    pub fn current(&self) -> &'static str {
        *self.current.borrow()
    }

    /// A receiver for callers that want to await changes.
    pub fn subscribe(&self) -> watch::Receiver<&'static str> {
        self.current.clone()
    }

    pub fn shutdown(self) {
        self.handle.abort();
        debug!("Hero ticker stopped");
    }
}
