use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::ToDoRecord;
use crate::request::IncomingRequest;

const NAME: &str = "name";

/// Which of the two `HttpExample` definitions is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingVariant {
    /// Greets and saves the name to the `toDoItems` SQL binding.
    Persisted,
    /// Greets only.
    Plain,
}

impl FromStr for GreetingVariant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "persisted" | "sql" => Ok(Self::Persisted),
            "plain" => Ok(Self::Plain),
            other => Err(AppError::Configuration(format!(
                "unknown greeting variant: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingResponse {
    pub status: StatusCode,
    pub body: String,
}

impl OutgoingResponse {
    fn ok(body: String) -> Self {
        Self { status: StatusCode::OK, body }
    }
}

impl IntoResponse for OutgoingResponse {
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub response: OutgoingResponse,
    /// Present only when the persisted variant resolved a name.
    pub record: Option<ToDoRecord>,
}

pub fn handle(variant: GreetingVariant, req: &IncomingRequest) -> HandlerOutcome {
    match variant {
        GreetingVariant::Persisted => handle_persisted(req),
        GreetingVariant::Plain => handle_plain(req),
    }
}

fn handle_persisted(req: &IncomingRequest) -> HandlerOutcome {
    let mut name = req.param(NAME).map(str::to_owned);
    if is_blank(&name) {
        let body = req
            .json_body()
            .unwrap_or_else(|_| Value::Object(Map::new()));
        name = name_field(&body, NAME);
    }

    match name.filter(|n| !n.is_empty()) {
        Some(name) => HandlerOutcome {
            response: OutgoingResponse::ok(format!(
                "Hello, {name}. This HTTP triggered function executed successfully and was saved to SQL."
            )),
            record: Some(ToDoRecord::new(name)),
        },
        None => HandlerOutcome {
            response: OutgoingResponse {
                status: StatusCode::BAD_REQUEST,
                body: "Please pass a name in the query string or in the request body.".to_string(),
            },
            record: None,
        },
    }
}

fn handle_plain(req: &IncomingRequest) -> HandlerOutcome {
    let mut name = req.param(NAME).map(str::to_owned);
    if is_blank(&name) {
        // a body that fails to parse leaves `name` as the query gave it
        if let Ok(body) = req.json_body() {
            name = name_field(&body, NAME);
        }
    }

    let body = match name.filter(|n| !n.is_empty()) {
        Some(name) => format!("Hello, {name}. This HTTP triggered function executed successfully."),
        None => "This HTTP triggered function executed successfully. Pass a name in the query string or in the request body for a personalized response.".to_string(),
    };

    HandlerOutcome {
        response: OutgoingResponse::ok(body),
        record: None,
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Reads `key` as a greeting name. Truthy scalars count: non-empty strings,
/// non-zero numbers (as their JSON text) and `true` (as `True`). Arrays,
/// objects and non-object bodies resolve to nothing.
fn name_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        _ => None,
    }
}
