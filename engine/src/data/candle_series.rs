// Bounded, timestamp-deduplicated candle storage for a single timeframe.
use crate::error::EngineError;
use shared::models::Candle;
use std::collections::VecDeque;

/// Enough history for a 200-period average with headroom.
pub const MAX_CAPACITY: usize = 300;

/// Candles in delivery order: the front is the oldest entry, the back the
/// most recently delivered one. Timestamps are unique.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: VecDeque<Candle>,
    capacity: usize,
}

impl CandleSeries {
    pub fn new() -> Self {
        Self::with_capacity(MAX_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CandleSeries {
            candles: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Replaces the candle with the same timestamp in place, or appends a new
    /// one and evicts the single oldest entry once over capacity.
    pub fn upsert(&mut self, candle: Candle) {
        // Live updates almost always hit the newest entry, so search from the back.
        let existing = self
            .candles
            .iter_mut()
            .rev()
            .find(|c| c.timestamp == candle.timestamp);
        if let Some(existing) = existing {
            *existing = candle;
            return;
        }
        self.candles.push_back(candle);
        if self.candles.len() > self.capacity {
            self.candles.pop_front();
        }
    }

    /// Replaces the whole series. Input is trusted to be oldest-first and free
    /// of duplicate timestamps; only the newest `capacity` entries are kept.
    pub fn load_bulk(&mut self, candles: Vec<Candle>) {
        let skip = candles.len().saturating_sub(self.capacity);
        self.candles.clear();
        self.candles.extend(candles.into_iter().skip(skip));
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }

    /// The most recent `n` candles, oldest first.
    pub fn window(&self, n: usize) -> Result<Vec<Candle>, EngineError> {
        if self.candles.len() < n {
            return Err(EngineError::InsufficientData {
                required: n,
                available: self.candles.len(),
            });
        }
        Ok(self.candles.iter().skip(self.candles.len() - n).cloned().collect())
    }

    /// Every stored candle, oldest first.
    pub fn chronological(&self) -> Vec<Candle> {
        self.candles.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CandleSeries {
    fn default() -> Self {
        Self::new()
    }
}
