// One-shot historical candle fetch used to warm the series at startup
use crate::config::settings::ExchangeSettings;
use crate::error::EngineError;
use crate::models::CandleEvent;
use async_trait::async_trait;
use shared::models::{Candle, TimeFrame};
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Up to `limit` candles for `timeframe`, oldest first.
    async fn fetch(&self, timeframe: TimeFrame, limit: usize) -> Result<Vec<Candle>, EngineError>;
}

pub struct RestHistoryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    pair: String,
}

impl RestHistoryClient {
    pub fn new(
        settings: &ExchangeSettings,
        pair: &str,
        timeout: Duration,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RestHistoryClient {
            client,
            base_url: settings.rest_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            pair: pair.to_string(),
        })
    }
}

#[async_trait]
impl HistorySource for RestHistoryClient {
    async fn fetch(&self, timeframe: TimeFrame, limit: usize) -> Result<Vec<Candle>, EngineError> {
        let url = format!("{}/candles", self.base_url);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .query(&[
                ("pair", self.pair.as_str()),
                ("timeframe", timeframe.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error(e, timeframe))?
            .error_for_status()?;

        // The client timeout also covers a body that stalls after the headers.
        let body = response.text().await.map_err(|e| transport_error(e, timeframe))?;
        let events: Vec<CandleEvent> = serde_json::from_str(&body)?;
        debug!(%timeframe, received = events.len(), "History response parsed");
        Ok(normalize_history(timeframe, events))
    }
}

fn transport_error(e: reqwest::Error, timeframe: TimeFrame) -> EngineError {
    if e.is_timeout() {
        EngineError::Timeout(format!("history fetch for {}", timeframe))
    } else {
        EngineError::HttpError { source: e }
    }
}

/// Converts a history payload into oldest-first candles. Entries that fail to
/// parse, or that name a different timeframe, are dropped with a warning.
pub fn normalize_history(timeframe: TimeFrame, events: Vec<CandleEvent>) -> Vec<Candle> {
    let mut candles: Vec<Candle> = events
        .iter()
        .filter_map(|event| {
            if let Some(label) = event.timeframe.as_deref() {
                if label != timeframe.as_str() {
                    warn!(%timeframe, got = label, "Dropping history entry for another timeframe");
                    return None;
                }
            }
            match event.candle() {
                Ok(candle) => Some(candle),
                Err(e) => {
                    warn!(%timeframe, error = %e, "Dropping malformed history entry");
                    None
                }
            }
        })
        .collect();

    // Some sources answer newest-first.
    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        if first.timestamp > last.timestamp {
            candles.reverse();
        }
    }
    candles
}
