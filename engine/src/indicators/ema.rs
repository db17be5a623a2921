// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use shared::models::Candle;

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.period
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if self.period == 0 || data.len() < self.period {
            return vec![None; data.len()];
        }

        let mut results = vec![None; self.period - 1];
        let k = 2.0 / (self.period as f64 + 1.0);

        // Seeded with the simple average of the first `period` closes, not the first close.
        let initial_sum: f64 = data.iter().take(self.period).map(|c| c.close).sum();
        let mut previous_ema = initial_sum / self.period as f64;
        results.push(Some(previous_ema));

        for candle in data.iter().skip(self.period) {
            let ema = candle.close * k + previous_ema * (1.0 - k);
            results.push(Some(ema));
            previous_ema = ema;
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_candle(close: f64) -> Candle {
        Candle {
            timestamp: Utc::now(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_ema_calculation() {
        let candles = vec![
            create_candle(10.0), create_candle(11.0), create_candle(12.0),
            create_candle(13.0), create_candle(14.0),
        ];
        let ema = Ema::new(3);
        let results = ema.calculate(&candles);
        // SMA seed of the first 3 closes: 11.0, then k = 0.5
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], None);
        assert_eq!(results[1], None);
        assert_close(results[2].unwrap(), 11.0);
        assert_close(results[3].unwrap(), 12.0);
        assert_close(results[4].unwrap(), 13.0);
        assert_close(ema.latest(&candles).unwrap(), 13.0);
    }

    #[test]
    fn test_ema_seed_is_simple_average() {
        // A first-value seed would give 1.0 here; the average seed gives 2.0.
        let candles = vec![create_candle(1.0), create_candle(2.0), create_candle(3.0)];
        assert_close(Ema::new(3).latest(&candles).unwrap(), 2.0);
    }

    #[test]
    fn test_ema_single_step_after_seed() {
        let mut candles: Vec<Candle> = (0..20).map(|_| create_candle(100.0)).collect();
        candles.push(create_candle(121.0));
        // k = 2/21, seed 100 → 100 + 21 * 2/21 = 102
        assert_close(Ema::new(20).latest(&candles).unwrap(), 102.0);
    }

    #[test]
    fn test_ema_insufficient_data() {
        let candles = vec![create_candle(1.0), create_candle(2.0)];
        let ema = Ema::new(3);
        assert_eq!(ema.calculate(&candles), vec![None, None]);
        assert!(ema.latest(&candles).is_err());
        assert_eq!(ema.name(), "EMA(3)");
    }
}
