// SPDX-License-Identifier: MIT

//! HTTP service exposing condition resolution
//!
//! Keepers that are not written in Rust can POST a condition and its
//! variables and get the off-chain verdict back.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::sdk::error::ResolveError;
use crate::warp::condition::Condition;
use crate::warp::resolver::Resolver;
use crate::warp::variable::Variable;

#[derive(Debug, Deserialize)]
pub struct ResolveConditionRequest {
    pub condition: Condition,
    #[serde(default)]
    pub vars: Vec<Variable>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalInputsRequest {
    pub vars: Vec<Variable>,
}

pub fn router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/conditions/resolve", post(resolve_condition))
        .route("/api/external-inputs", post(external_inputs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(resolver)
}

pub async fn serve(
    resolver: Resolver,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(Arc::new(resolver));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn resolve_condition(
    State(resolver): State<Arc<Resolver>>,
    Json(req): Json<ResolveConditionRequest>,
) -> (StatusCode, Json<Value>) {
    match resolver.resolve_condition(&req.condition, &req.vars).await {
        Ok(active) => (StatusCode::OK, Json(json!({ "active": active }))),
        Err(e) => {
            log::warn!("Condition resolution failed: {}", e);
            (error_status(&e), Json(json!({ "error": e.to_string() })))
        }
    }
}

async fn external_inputs(
    State(resolver): State<Arc<Resolver>>,
    Json(req): Json<ExternalInputsRequest>,
) -> Json<Value> {
    let inputs = resolver.resolve_external_inputs(&req.vars).await;
    Json(json!({ "inputs": inputs }))
}

/// Malformed jobs are the caller's fault; chain outages are ours
fn error_status(err: &ResolveError) -> StatusCode {
    match err {
        ResolveError::Chain(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}
