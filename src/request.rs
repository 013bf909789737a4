use std::collections::HashMap;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::MalformedBody;

/// Read-only view of an inbound HTTP trigger invocation.
#[derive(Debug, Clone, Default)]
pub struct IncomingRequest {
    params: HashMap<String, String>,
    body: Bytes,
}

impl IncomingRequest {
    pub fn new(params: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            params,
            body: body.into(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses the body as JSON. An empty body is malformed.
    pub fn json_body(&self) -> Result<Value, MalformedBody> {
        serde_json::from_slice(&self.body).map_err(MalformedBody)
    }
}
