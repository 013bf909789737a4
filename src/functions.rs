//! Function registration table.
//!
//! Built once at startup and handed to the router, which mounts one route per
//! registration.

use std::collections::HashSet;

use crate::bindings::OutputBinding;
use crate::error::AppError;
use crate::handlers::GreetingVariant;

pub const TODO_ITEMS: &str = "toDoItems";

/// Caller authorization required by a route. Recorded, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthLevel {
    #[default]
    Anonymous,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRegistration {
    pub name: String,
    pub route: String,
    pub auth_level: AuthLevel,
    pub output_bindings: Vec<OutputBinding>,
    pub variant: GreetingVariant,
}

impl FunctionRegistration {
    pub fn new(
        name: impl Into<String>,
        route: impl Into<String>,
        variant: GreetingVariant,
    ) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            auth_level: AuthLevel::default(),
            output_bindings: Vec::new(),
            variant,
        }
    }

    pub fn with_output_binding(mut self, binding: OutputBinding) -> Self {
        self.output_bindings.push(binding);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunctionApp {
    auth_level: AuthLevel,
    functions: Vec<FunctionRegistration>,
}

impl FunctionApp {
    pub fn new(auth_level: AuthLevel) -> Self {
        Self {
            auth_level,
            functions: Vec::new(),
        }
    }

    /// Registers a function under the app's auth level. Routes are
    /// case-sensitive, matching how the router serves them.
    pub fn route(&mut self, mut function: FunctionRegistration) -> Result<&mut Self, AppError> {
        if self.functions.iter().any(|f| f.name == function.name) {
            return Err(AppError::Configuration(format!(
                "function {} is already registered",
                function.name
            )));
        }
        if self
            .functions
            .iter()
            .any(|f| f.route.trim_matches('/') == function.route.trim_matches('/'))
        {
            return Err(AppError::Configuration(format!(
                "route {} is already registered",
                function.route
            )));
        }

        function.auth_level = self.auth_level;
        self.functions.push(function);
        Ok(self)
    }

    /// `HttpExample`, saving each greeted name to `dbo.ToDo`.
    pub fn persisted() -> Result<Self, AppError> {
        let mut app = Self::new(AuthLevel::Anonymous);
        app.route(
            FunctionRegistration::new("HttpExample", "HttpExample", GreetingVariant::Persisted)
                .with_output_binding(OutputBinding::sql(
                    TODO_ITEMS,
                    "dbo.ToDo",
                    "SqlConnectionString",
                )),
        )?;
        Ok(app)
    }

    /// `HttpExample` without persistence.
    pub fn plain() -> Result<Self, AppError> {
        let mut app = Self::new(AuthLevel::Anonymous);
        app.route(FunctionRegistration::new(
            "HttpExample",
            "HttpExample",
            GreetingVariant::Plain,
        ))?;
        Ok(app)
    }

    pub fn for_variant(variant: GreetingVariant) -> Result<Self, AppError> {
        match variant {
            GreetingVariant::Persisted => Self::persisted(),
            GreetingVariant::Plain => Self::plain(),
        }
    }

    pub fn functions(&self) -> &[FunctionRegistration] {
        &self.functions
    }

    /// Every output binding declared by any function, deduplicated by `arg_name`.
    pub fn output_bindings(&self) -> Vec<OutputBinding> {
        let mut seen = HashSet::new();
        self.functions
            .iter()
            .flat_map(|f| f.output_bindings.iter())
            .filter(|b| seen.insert(b.arg_name.clone()))
            .cloned()
            .collect()
    }
}
