use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::db::{self, repository};
use crate::error::AppError;
use crate::models::ToDoRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Sql,
}

/// Shape of the payload a binding receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    String,
}

/// A declared output of a function: where the value it produces is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBinding {
    pub arg_name: String,
    pub kind: BindingKind,
    /// Target table for SQL bindings.
    pub command_text: String,
    /// Name of the setting holding the connection string, not the value.
    pub connection_string_setting: String,
    pub data_type: DataType,
}

impl OutputBinding {
    pub fn sql(
        arg_name: impl Into<String>,
        command_text: impl Into<String>,
        connection_string_setting: impl Into<String>,
    ) -> Self {
        Self {
            arg_name: arg_name.into(),
            kind: BindingKind::Sql,
            command_text: command_text.into(),
            connection_string_setting: connection_string_setting.into(),
            data_type: DataType::String,
        }
    }
}

#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn set(&self, record: &ToDoRecord) -> Result<(), AppError>;
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct SqlOutputSink {
    db: SqlitePool,
    table: String,
}

impl SqlOutputSink {
    pub fn new(db: SqlitePool, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }
}

#[async_trait]
impl OutputSink for SqlOutputSink {
    async fn set(&self, record: &ToDoRecord) -> Result<(), AppError> {
        repository::upsert_todo(&self.db, &self.table, record).await?;
        debug!(id = %record.id, table = %self.table, "record written");
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

/// Sinks keyed by the binding's `arg_name`.
pub type Sinks = HashMap<String, Arc<dyn OutputSink>>;

/// Connects every declared binding using the connection string its setting names.
pub async fn resolve(bindings: &[OutputBinding], config: &AppConfig) -> Result<Sinks, AppError> {
    let mut sinks: Sinks = HashMap::new();
    let mut pools: HashMap<String, SqlitePool> = HashMap::new();

    for binding in bindings {
        match binding.kind {
            BindingKind::Sql => {
                let setting = &binding.connection_string_setting;
                let pool = match pools.get(setting) {
                    Some(pool) => pool.clone(),
                    None => {
                        let url = config.setting(setting).ok_or_else(|| {
                            AppError::Configuration(format!("{} is not set", setting))
                        })?;
                        let pool = db::connect(&url).await?;
                        pools.insert(setting.clone(), pool.clone());
                        pool
                    }
                };
                info!(
                    "bound {} to sql table {} via {}",
                    binding.arg_name, binding.command_text, setting
                );
                sinks.insert(
                    binding.arg_name.clone(),
                    Arc::new(SqlOutputSink::new(pool, binding.command_text.clone())),
                );
            }
        }
    }

    Ok(sinks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_binding_defaults_to_string_payload() {
        let binding = OutputBinding::sql("toDoItems", "dbo.ToDo", "SqlConnectionString");
        assert_eq!(binding.kind, BindingKind::Sql);
        assert_eq!(binding.data_type, DataType::String);
        assert_eq!(binding.connection_string_setting, "SqlConnectionString");
    }

    #[tokio::test]
    async fn resolve_requires_connection_setting() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let bindings = [OutputBinding::sql("toDoItems", "dbo.ToDo", "SqlConnectionString")];
        let err = resolve(&bindings, &config).await.err().expect("missing setting");
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn resolve_connects_sql_sink() {
        let config = AppConfig::from_lookup(|key| {
            (key == "SqlConnectionString").then(|| "sqlite::memory:".to_string())
        })
        .unwrap();
        let bindings = [OutputBinding::sql("toDoItems", "dbo.ToDo", "SqlConnectionString")];
        let sinks = resolve(&bindings, &config).await.unwrap();

        let sink = sinks.get("toDoItems").expect("sink");
        sink.ping().await.unwrap();
        sink.set(&ToDoRecord::new("Ada")).await.unwrap();
    }
}
