// Outbound signal notifications
pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::error::EngineError;
use async_trait::async_trait;
use shared::models::{Signal, SignalKind};
use shared::utils::{format_price, format_timestamp};

pub const STRATEGY_LABEL: &str = "EMA 20/50 Crossover + 4H EMA 200 Trend Filter";

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, signal: &Signal) -> Result<(), EngineError>;
}

/// HTML message body for a signal.
pub fn format_signal_message(signal: &Signal, pair: &str) -> String {
    let marker = match signal.kind {
        SignalKind::Buy => "🟢",
        SignalKind::Sell => "🔴",
    };
    format!(
        "{marker} <b>{kind} SIGNAL</b>\n\n\
         <b>Pair:</b> {pair}\n\
         <b>Price:</b> ${price}\n\
         <b>Time:</b> {time}\n\
         <b>Strategy:</b> {strategy}\n\n\
         <i>{rationale}</i>",
        marker = marker,
        kind = signal.kind,
        pair = pair,
        price = format_price(signal.price),
        time = format_timestamp(&signal.timestamp),
        strategy = STRATEGY_LABEL,
        rationale = signal.rationale,
    )
}
