//! Boundary between the market-data transport and the core.
//!
//! Events are handled strictly one at a time: series update, optional
//! evaluation, optional log append, all under one write lock. Notification
//! dispatch happens after the lock is released and never blocks the next
//! event.

pub mod history;
pub mod stream;

pub use history::{HistorySource, RestHistoryClient};
pub use stream::{run_stream, StreamConfig};

use crate::data::MAX_CAPACITY;
use crate::error::EngineError;
use crate::models::CandleEvent;
use crate::notify::NotificationSink;
use crate::signals::CrossoverDetector;
use crate::state::SharedState;
use chrono::Utc;
use shared::models::{Signal, TimeFrame};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub struct IngestionAdapter {
    state: SharedState,
    detector: CrossoverDetector,
    sink: Arc<dyn NotificationSink>,
}

impl IngestionAdapter {
    pub fn new(
        state: SharedState,
        detector: CrossoverDetector,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        IngestionAdapter {
            state,
            detector,
            sink,
        }
    }

    /// Loads each timeframe once. A failed fetch leaves that series empty;
    /// the engine then warms up from live updates instead.
    pub async fn bootstrap(&self, source: &dyn HistorySource) {
        for timeframe in TimeFrame::ALL {
            match source.fetch(timeframe, MAX_CAPACITY).await {
                Ok(candles) => {
                    let count = candles.len();
                    self.state.write().await.market_data.load_bulk(timeframe, candles);
                    info!(%timeframe, count, "Loaded historical candles");
                }
                Err(e) => {
                    warn!(
                        %timeframe,
                        error = %e,
                        "Historical load failed, continuing without history"
                    );
                }
            }
        }
    }

    /// Applies one event to the series and, for 15m updates, runs detection.
    /// A returned signal has already been appended to the log.
    pub async fn process_event(&self, event: &CandleEvent) -> Result<Option<Signal>, EngineError> {
        let (timeframe, candle) = event.to_candle()?;
        let mut state = self.state.write().await;
        state.market_data.upsert(timeframe, candle);

        if timeframe != TimeFrame::Minute15 {
            return Ok(None);
        }
        let signal = self.detector.evaluate(&state.market_data, Utc::now());
        if let Some(signal) = &signal {
            info!(kind = %signal.kind, price = signal.price, "Trading signal emitted");
            state.signals.append(signal.clone());
        }
        Ok(signal)
    }

    /// Fire-and-forget delivery; failures are logged and dropped.
    pub fn dispatch(&self, signal: Signal) -> JoinHandle<()> {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.send(&signal).await {
                error!(kind = %signal.kind, error = %e, "Failed to deliver signal notification");
            }
        })
    }

    /// Drains `events` until every sender is gone.
    pub async fn run(&self, mut events: mpsc::Receiver<CandleEvent>) {
        while let Some(event) = events.recv().await {
            match self.process_event(&event).await {
                Ok(Some(signal)) => {
                    self.dispatch(signal);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Discarded inbound event"),
            }
        }
        info!("Event channel closed, ingestion stopped");
    }
}
