// Handler for GET /health
use chrono::Utc;
use std::convert::Infallible;

pub async fn handle_health() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::services::{routes, StatusContext};
    use crate::state::EngineState;

    #[tokio::test]
    async fn test_health_reports_ok_with_timestamp() {
        let ctx = StatusContext::new(EngineState::default().into_shared(), "binance", "ETH/USDT");
        let res = warp::test::request().method("GET").path("/health").reply(&routes(ctx)).await;
        assert_eq!(res.status(), 200);
        let json: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(json["status"], "ok");
        let stamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}
