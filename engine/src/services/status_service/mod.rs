// engine/src/services/status_service/mod.rs
// Route table for the status surface. Each endpoint lives in its own
// handler module; every handler takes the state read lock only.

use crate::state::SharedState;
use std::convert::Infallible;
use warp::Filter;

pub mod get_signals;
pub mod get_status;
pub mod health;

/// Everything a handler needs: the shared state plus the static labels
/// reported back to callers.
#[derive(Clone)]
pub struct StatusContext {
    pub state: SharedState,
    pub exchange: String,
    pub pair: String,
}

impl StatusContext {
    pub fn new(state: SharedState, exchange: &str, pair: &str) -> Self {
        StatusContext {
            state,
            exchange: exchange.to_string(),
            pair: pair.to_string(),
        }
    }
}

fn with_context(
    ctx: StatusContext,
) -> impl Filter<Extract = (StatusContext,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

/// `GET /`, `GET /status`, `GET /signals` and `GET /health`.
pub fn routes(
    ctx: StatusContext,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let root = warp::path::end()
        .and(with_context(ctx.clone()))
        .and_then(get_status::handle_get_status);
    let status = warp::path!("status")
        .and(with_context(ctx.clone()))
        .and_then(get_status::handle_get_status);
    let signals = warp::path!("signals")
        .and(with_context(ctx))
        .and_then(get_signals::handle_get_signals);
    let health = warp::path!("health").and_then(health::handle_health);

    warp::get().and(root.or(status).or(signals).or(health))
}
