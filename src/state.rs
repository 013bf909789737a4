use std::sync::Arc;

use crate::bindings::{OutputSink, Sinks};

#[derive(Clone)]
pub struct AppState {
    pub sinks: Arc<Sinks>,
}

impl AppState {
    pub fn new(sinks: Sinks) -> Self {
        Self {
            sinks: Arc::new(sinks),
        }
    }

    pub fn sink(&self, arg_name: &str) -> Option<Arc<dyn OutputSink>> {
        self.sinks.get(arg_name).cloned()
    }
}
