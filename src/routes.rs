use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{any, get};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::functions::{FunctionApp, FunctionRegistration, TODO_ITEMS};
use crate::handlers::{self, OutgoingResponse};
use crate::request::IncomingRequest;
use crate::state::AppState;

/// Mounts every registered function under the configured route prefix.
pub fn router(app: &FunctionApp, config: &AppConfig, state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new().route("/health", get(health));

    for function in app.functions() {
        let path = config.route_path(&function.route);
        debug!("mapping {} -> {}", function.name, path);

        let function = Arc::new(function.clone());
        router = router.route(
            &path,
            any(
                move |State(state): State<AppState>,
                      Query(params): Query<HashMap<String, String>>,
                      body: Bytes| {
                    let function = function.clone();
                    async move { invoke(state, &function, params, body).await }
                },
            ),
        );
    }

    router.with_state(state)
}

async fn invoke(
    state: AppState,
    function: &FunctionRegistration,
    params: HashMap<String, String>,
    body: Bytes,
) -> Result<OutgoingResponse, AppError> {
    info!(function = %function.name, "HTTP trigger function processed a request.");

    let request = IncomingRequest::new(params, body);
    let outcome = handlers::handle(function.variant, &request);

    if let Some(record) = outcome.record {
        let sink = state.sink(TODO_ITEMS).ok_or_else(|| {
            AppError::Configuration(format!("output binding {} is not bound", TODO_ITEMS))
        })?;
        sink.set(&record).await?;
    }

    Ok(outcome.response)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    for sink in state.sinks.values() {
        sink.ping().await?;
    }
    Ok(StatusCode::OK)
}
