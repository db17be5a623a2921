// Telegram bot notifier: posts each signal to a single chat
use super::{format_signal_message, NotificationSink};
use crate::config::settings::TelegramSettings;
use crate::error::EngineError;
use async_trait::async_trait;
use serde::Serialize;
use shared::models::Signal;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
    pair: String,
}

impl TelegramNotifier {
    pub fn new(
        settings: &TelegramSettings,
        pair: &str,
        timeout: Duration,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(TelegramNotifier {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                settings.api_url.trim_end_matches('/'),
                settings.bot_token
            ),
            chat_id: settings.chat_id.clone(),
            pair: pair.to_string(),
        })
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn send(&self, signal: &Signal) -> Result<(), EngineError> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: format_signal_message(signal, &self.pair),
            parse_mode: "HTML",
        };
        debug!(kind = %signal.kind, "Posting signal notification");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout("telegram sendMessage".to_string())
                } else {
                    // The endpoint URL embeds the bot token.
                    EngineError::HttpError {
                        source: e.without_url(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EngineError::NotificationError(format!(
                "telegram returned {}: {}",
                status, detail
            )));
        }
        info!(kind = %signal.kind, price = signal.price, "Signal notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_built_from_settings() {
        let settings = TelegramSettings {
            api_url: "https://api.telegram.org/".to_string(),
            bot_token: "123:abc".to_string(),
            chat_id: "-100".to_string(),
        };
        let notifier =
            TelegramNotifier::new(&settings, "ETH/USDT", Duration::from_secs(1)).unwrap();
        assert_eq!(notifier.endpoint, "https://api.telegram.org/bot123:abc/sendMessage");
        assert_eq!(notifier.chat_id, "-100");
    }

    #[test]
    fn test_request_body_shape() {
        let body = SendMessageRequest {
            chat_id: "-100",
            text: "hi".to_string(),
            parse_mode: "HTML",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chat_id"], "-100");
        assert_eq!(json["parse_mode"], "HTML");
        assert_eq!(json["text"], "hi");
    }
}
