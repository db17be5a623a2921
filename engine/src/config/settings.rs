// Engine settings, loaded from environment variables at startup
use crate::error::EngineError;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

const REDACTED: &str = "<redacted>";

const REQUIRED_KEYS: [&str; 4] = [
    "EXCHANGE_API_KEY",
    "EXCHANGE_API_SECRET",
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
];

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    pub pair: String,
    pub exchange: ExchangeSettings,
    pub telegram: TelegramSettings,
    pub reconnect_delay_secs: u64,
    pub http_timeout_secs: u64,
    pub stream_idle_timeout_secs: u64,
    /// `None` keeps every signal for the life of the process.
    pub signal_log_limit: Option<usize>,
}

#[derive(Deserialize, Clone)]
pub struct ExchangeSettings {
    pub name: String,
    pub api_key: String,
    pub api_secret: String,
    pub ws_url: String,
    pub rest_url: String,
}

#[derive(Deserialize, Clone)]
pub struct TelegramSettings {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
}

// Credentials never reach logs, even through `?settings`.
impl fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("name", &self.name)
            .field("api_key", &REDACTED)
            .field("api_secret", &REDACTED)
            .field("ws_url", &self.ws_url)
            .field("rest_url", &self.rest_url)
            .finish()
    }
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("api_url", &self.api_url)
            .field("bot_token", &REDACTED)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|k| get(*k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::ConfigError(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }
        let required = |key: &str| get(key).unwrap_or_default();

        let port = parse_or(get("PORT"), "PORT", 3000u16)?;
        let reconnect_delay_secs =
            parse_or(get("RECONNECT_DELAY_SECS"), "RECONNECT_DELAY_SECS", 5u64)?;
        let http_timeout_secs = parse_or(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 10u64)?;
        let stream_idle_timeout_secs =
            parse_or(get("STREAM_IDLE_TIMEOUT_SECS"), "STREAM_IDLE_TIMEOUT_SECS", 90u64)?;
        let signal_log_limit = match get("SIGNAL_LOG_LIMIT") {
            Some(raw) => Some(parse_value::<usize>(&raw, "SIGNAL_LOG_LIMIT")?),
            None => None,
        };

        Ok(EngineSettings {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            pair: get("TRADING_PAIR").unwrap_or_else(|| "ETH/USDT".to_string()),
            exchange: ExchangeSettings {
                name: get("EXCHANGE_NAME").unwrap_or_else(|| "binance".to_string()),
                api_key: required("EXCHANGE_API_KEY"),
                api_secret: required("EXCHANGE_API_SECRET"),
                ws_url: get("EXCHANGE_WS_URL")
                    .unwrap_or_else(|| "ws://127.0.0.1:8765/candles".to_string()),
                rest_url: get("EXCHANGE_REST_URL")
                    .unwrap_or_else(|| "http://127.0.0.1:8765".to_string()),
            },
            telegram: TelegramSettings {
                api_url: get("TELEGRAM_API_URL")
                    .unwrap_or_else(|| "https://api.telegram.org".to_string()),
                bot_token: required("TELEGRAM_BOT_TOKEN"),
                chat_id: required("TELEGRAM_CHAT_ID"),
            },
            reconnect_delay_secs,
            http_timeout_secs,
            stream_idle_timeout_secs,
            signal_log_limit,
        })
    }

    pub fn listen_addr(&self) -> Result<std::net::SocketAddr, EngineError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| EngineError::ConfigError(format!("Invalid listen address: {}", e)))
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn stream_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_idle_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &str,
    default: T,
) -> Result<T, EngineError> {
    match raw {
        Some(raw) => parse_value(&raw, key),
        None => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, EngineError> {
    raw.parse()
        .map_err(|_| EngineError::ConfigError(format!("{} has invalid value '{}'", key, raw)))
}
