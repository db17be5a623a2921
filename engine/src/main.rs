// Engine main entry point
use engine::config::settings::EngineSettings;
use engine::ingestion::{run_stream, IngestionAdapter, RestHistoryClient, StreamConfig};
use engine::notify::telegram::TelegramNotifier;
use engine::services::{routes, StatusContext};
use engine::signals::CrossoverDetector;
use engine::state::EngineState;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Inbound events buffered between the stream reader and the ingestion task.
const EVENT_BUFFER: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting signal engine...");

    let settings = match EngineSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Refusing to start");
            std::process::exit(1);
        }
    };
    let addr = settings.listen_addr()?;
    info!(
        exchange = %settings.exchange.name,
        pair = %settings.pair,
        %addr,
        "Configuration loaded"
    );

    let state = EngineState::new(settings.signal_log_limit).into_shared();
    let timeout = settings.http_timeout();
    let notifier = Arc::new(TelegramNotifier::new(&settings.telegram, &settings.pair, timeout)?);
    let history = RestHistoryClient::new(&settings.exchange, &settings.pair, timeout)?;

    let detector = CrossoverDetector::default();
    let params = detector.params();
    info!(
        fast = params.fast_period,
        slow = params.slow_period,
        trend = params.trend_period,
        "Crossover detector ready"
    );
    let adapter = IngestionAdapter::new(state.clone(), detector, notifier);
    adapter.bootstrap(&history).await;

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let stream_config = StreamConfig {
        url: settings.exchange.ws_url.clone(),
        pair: settings.pair.clone(),
        reconnect_delay: settings.reconnect_delay(),
        connect_timeout: timeout,
        idle_timeout: settings.stream_idle_timeout(),
    };
    tokio::spawn(run_stream(stream_config, tx));
    tokio::spawn(async move { adapter.run(rx).await });

    let ctx = StatusContext::new(state, &settings.exchange.name, &settings.pair);
    info!(%addr, "Status surface listening");
    warp::serve(routes(ctx)).run(addr).await;

    Ok(())
}
