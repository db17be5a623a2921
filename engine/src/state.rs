// The single owned core: candle series plus signal log, shared by handle
use crate::data::{MarketDataStore, SignalLog};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mutated only by the ingestion task; the status surface takes read locks,
/// so readers see whole candles and signals, at most one event stale.
#[derive(Default)]
pub struct EngineState {
    pub market_data: MarketDataStore,
    pub signals: SignalLog,
}

impl EngineState {
    pub fn new(signal_log_limit: Option<usize>) -> Self {
        EngineState {
            market_data: MarketDataStore::new(),
            signals: SignalLog::with_limit(signal_log_limit),
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

pub type SharedState = Arc<RwLock<EngineState>>;
