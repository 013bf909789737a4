use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::handlers::GreetingVariant;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7071";
const DEFAULT_ROUTE_PREFIX: &str = "api";

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub route_prefix: String,
    pub variant: GreetingVariant,
    lookup: fn(&str) -> Option<String>,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| AppError::Configuration(format!("BIND_ADDR is invalid: {}", e)))?;
        let route_prefix = lookup("ROUTE_PREFIX")
            .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string())
            .trim_matches('/')
            .to_string();
        let variant = match lookup("GREETING_VARIANT") {
            Some(v) => v.parse()?,
            None => GreetingVariant::Persisted,
        };

        Ok(Self {
            bind_addr,
            route_prefix,
            variant,
            lookup,
        })
    }

    /// Looks up an app setting by name, e.g. a binding's connection string.
    pub fn setting(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }

    /// Full path a function route is served at.
    pub fn route_path(&self, route: &str) -> String {
        let route = route.trim_matches('/');
        if self.route_prefix.is_empty() {
            format!("/{}", route)
        } else {
            format!("/{}/{}", self.route_prefix, route)
        }
    }
}
