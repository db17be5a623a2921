// Most-recent-first record of emitted signals
use shared::models::Signal;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct SignalLog {
    entries: VecDeque<Signal>,
    limit: Option<usize>,
}

impl SignalLog {
    /// An unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that drops its oldest entries beyond `limit`; `None` never drops.
    pub fn with_limit(limit: Option<usize>) -> Self {
        SignalLog {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn append(&mut self, signal: Signal) {
        self.entries.push_front(signal);
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
    }

    pub fn recent(&self, n: usize) -> Vec<Signal> {
        self.entries.iter().take(n).cloned().collect()
    }

    /// The full log, newest first, together with its length.
    pub fn all(&self) -> (Vec<Signal>, usize) {
        (self.entries.iter().cloned().collect(), self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::SignalKind;

    fn signal(price: f64) -> Signal {
        Signal {
            kind: SignalKind::Buy,
            price,
            timestamp: Utc::now(),
            rationale: "test".to_string(),
        }
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let mut log = SignalLog::new();
        for i in 0..8 {
            log.append(signal(i as f64));
        }
        let recent = log.recent(5);
        let prices: Vec<f64> = recent.iter().map(|s| s.price).collect();
        assert_eq!(prices, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_recent_on_short_log() {
        let mut log = SignalLog::new();
        assert!(log.recent(5).is_empty());
        log.append(signal(1.0));
        log.append(signal(2.0));
        assert_eq!(log.recent(5).len(), 2);
    }

    #[test]
    fn test_all_returns_everything_with_count() {
        let mut log = SignalLog::new();
        for i in 0..12 {
            log.append(signal(i as f64));
        }
        let (signals, count) = log.all();
        assert_eq!(count, 12);
        assert_eq!(signals.len(), 12);
        assert_eq!(signals[0].price, 11.0);
        assert_eq!(signals[11].price, 0.0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut log = SignalLog::with_limit(Some(2));
        log.append(signal(1.0));
        log.append(signal(2.0));
        log.append(signal(3.0));
        let (signals, count) = log.all();
        assert_eq!(count, 2);
        assert_eq!(signals[0].price, 3.0);
        assert_eq!(signals[1].price, 2.0);
    }
}
