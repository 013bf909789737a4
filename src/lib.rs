pub mod bindings;
pub mod config;
pub mod db;
pub mod error;
pub mod functions;
pub mod handlers;
pub mod models;
pub mod request;
pub mod routes;
pub mod state;
