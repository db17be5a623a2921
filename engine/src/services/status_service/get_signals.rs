// Handler for GET /signals
use super::StatusContext;
use serde::{Deserialize, Serialize};
use shared::models::Signal;
use std::convert::Infallible;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub signals: Vec<Signal>,
    pub count: usize,
}

pub async fn handle_get_signals(ctx: StatusContext) -> Result<impl warp::Reply, Infallible> {
    let (signals, count) = ctx.state.read().await.signals.all();
    tracing::debug!(count, "Served signal log");
    Ok(warp::reply::json(&SignalsResponse { signals, count }))
}
