// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use shared::models::Candle;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
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

        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        let mut results = vec![None; self.period - 1];
        // Each window is summed afresh so long series accumulate no drift.
        results.extend(
            closes
                .windows(self.period)
                .map(|window| Some(window.iter().sum::<f64>() / self.period as f64)),
        );
        results
    }
}
