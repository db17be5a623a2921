// Inbound candle update as delivered by the market-data stream and history API
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use shared::models::{Candle, TimeFrame};
use shared::utils::{parse_decimal, parse_epoch_secs};

/// Exchanges send numeric fields either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Number(f64),
    Text(String),
}

impl WireNumber {
    fn as_f64(&self, field: &str) -> Result<f64, EngineError> {
        match self {
            WireNumber::Number(n) if n.is_finite() => Ok(*n),
            WireNumber::Number(n) => Err(EngineError::MalformedMessage(format!(
                "{} is not finite: {}",
                field, n
            ))),
            WireNumber::Text(s) => parse_decimal(s)
                .map_err(|e| EngineError::MalformedMessage(format!("{}: {}", field, e))),
        }
    }

    fn as_epoch_secs(&self, field: &str) -> Result<i64, EngineError> {
        match self {
            WireNumber::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(*n as i64),
            WireNumber::Number(n) => Err(EngineError::MalformedMessage(format!(
                "{} is not whole seconds: {}",
                field, n
            ))),
            WireNumber::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| EngineError::MalformedMessage(format!("{} '{}': {}", field, s, e))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleEvent {
    /// Absent in history responses, where the timeframe is implied by the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    pub open: WireNumber,
    pub high: WireNumber,
    pub low: WireNumber,
    pub close: WireNumber,
    pub volume: WireNumber,
    /// Bucket start, epoch seconds.
    pub open_time: WireNumber,
}

impl CandleEvent {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text)
            .map_err(|e| EngineError::MalformedMessage(format!("not a candle event: {}", e)))
    }

    pub fn timeframe(&self) -> Result<TimeFrame, EngineError> {
        let label = self
            .timeframe
            .as_deref()
            .ok_or_else(|| EngineError::MalformedMessage("missing timeframe".to_string()))?;
        label
            .parse()
            .map_err(|e: anyhow::Error| EngineError::MalformedMessage(e.to_string()))
    }

    pub fn candle(&self) -> Result<Candle, EngineError> {
        let secs = self.open_time.as_epoch_secs("openTime")?;
        let timestamp =
            parse_epoch_secs(secs).map_err(|e| EngineError::MalformedMessage(e.to_string()))?;
        Ok(Candle {
            timestamp,
            open: self.open.as_f64("open")?,
            high: self.high.as_f64("high")?,
            low: self.low.as_f64("low")?,
            close: self.close.as_f64("close")?,
            volume: self.volume.as_f64("volume")?,
        })
    }

    pub fn to_candle(&self) -> Result<(TimeFrame, Candle), EngineError> {
        Ok((self.timeframe()?, self.candle()?))
    }
}
