//! Readiness endpoint

use axum::{http::StatusCode, routing::get, Json, Router};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};
use serde_json::Value;

use crate::state::AppState;

type ReadyResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

async fn ready(state: AppState) -> ReadyResult {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async {
            if database::mongodb::check_health(&state.mongo_client).await {
                Ok(())
            } else {
                Err("MongoDB ping failed".to_string())
            }
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(move || ready(state)))
}
