// Live candle stream over WebSocket with fixed-delay reconnects
use crate::error::EngineError;
use crate::models::CandleEvent;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use shared::models::TimeFrame;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub url: String,
    pub pair: String,
    pub reconnect_delay: Duration,
    /// Upper bound on the TCP connect plus WebSocket handshake.
    pub connect_timeout: Duration,
    /// A connection that delivers no frame at all for this long is treated as dead.
    pub idle_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SubscribeRequest<'a> {
    method: &'static str,
    pair: &'a str,
    timeframes: Vec<&'static str>,
}

fn subscribe_message(pair: &str) -> Result<String, EngineError> {
    let request = SubscribeRequest {
        method: "subscribe",
        pair,
        timeframes: TimeFrame::ALL.iter().map(TimeFrame::as_str).collect(),
    };
    Ok(serde_json::to_string(&request)?)
}

/// What to do with one inbound frame.
#[derive(Debug)]
enum Inbound {
    Event(CandleEvent),
    Skip,
    Reply(Message),
    Closed,
}

fn classify(message: Message) -> Inbound {
    match message {
        Message::Text(text) => match CandleEvent::from_json(&text) {
            Ok(event) => Inbound::Event(event),
            Err(e) => {
                warn!(error = %e, "Discarding malformed stream message");
                Inbound::Skip
            }
        },
        Message::Ping(payload) => Inbound::Reply(Message::Pong(payload)),
        Message::Close(frame) => {
            info!(?frame, "Stream closed by server");
            Inbound::Closed
        }
        _ => Inbound::Skip,
    }
}

/// Streams candle events into `events` forever. Every disconnect, including a
/// failed or stalled connect and a connection gone quiet, is followed by the
/// same fixed delay and a fresh connection with a fresh subscription.
/// Returns once `events` is closed.
pub async fn run_stream(config: StreamConfig, events: mpsc::Sender<CandleEvent>) {
    loop {
        if events.is_closed() {
            info!("Event receiver dropped, stopping stream");
            return;
        }
        match stream_once(&config, &events).await {
            Ok(()) => warn!("Stream disconnected"),
            Err(e) => warn!(error = %e, "Stream connection failed"),
        }
        info!(delay_secs = config.reconnect_delay.as_secs(), "Reconnecting to market data stream");
        tokio::time::sleep(config.reconnect_delay).await;
    }
}

async fn stream_once(
    config: &StreamConfig,
    events: &mpsc::Sender<CandleEvent>,
) -> Result<(), EngineError> {
    info!(url = %config.url, pair = %config.pair, "Connecting to market data stream");
    let (ws_stream, _) = timeout(config.connect_timeout, connect_async(config.url.as_str()))
        .await
        .map_err(|_| EngineError::Timeout(format!("connect to {}", config.url)))??;
    let (mut write, mut read) = ws_stream.split();

    write.send(Message::Text(subscribe_message(&config.pair)?)).await?;
    info!("Subscribed to candle updates");

    loop {
        let message = match timeout(config.idle_timeout, read.next()).await {
            Ok(Some(message)) => message?,
            Ok(None) => return Ok(()),
            Err(_) => {
                return Err(EngineError::Timeout(format!(
                    "no stream frames for {}s",
                    config.idle_timeout.as_secs()
                )))
            }
        };
        match classify(message) {
            Inbound::Event(event) => {
                if events.send(event).await.is_err() {
                    return Ok(());
                }
            }
            Inbound::Reply(reply) => write.send(reply).await?,
            Inbound::Closed => return Ok(()),
            Inbound::Skip => debug!("Ignored stream frame"),
        }
    }
}
