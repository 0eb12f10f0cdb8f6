//! The query runner capability.
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::errors::Result;

/// Configuration schema for a runner, rendered by the host's setup UI.
/// Properties keep declaration order when serialized.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSchema {
    #[serde(rename = "type")]
    pub datatype: &'static str,
    pub properties: IndexMap<&'static str, ConfigProperty>,
    pub required: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigProperty {
    #[serde(rename = "type")]
    pub datatype: &'static str,
    pub title: &'static str,
}

impl ConfigSchema {
    pub fn object(
        properties: IndexMap<&'static str, ConfigProperty>,
        required: Vec<&'static str>,
    ) -> ConfigSchema {
        ConfigSchema {
            datatype: "object",
            properties,
            required,
        }
    }
}

/// Executes queries against a single configured external system.
///
/// An instance is tied to one stored configuration; each `run_query` call is
/// independent and shares no mutable state, so a runner may serve concurrent
/// queries.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    /// Name the runner registers under.
    fn name(&self) -> &'static str;

    /// Execute a single query, returning the serialized result table.
    ///
    /// `cancel` is triggered by the host when the user aborts the query.
    async fn run_query(&self, query: &str, cancel: CancellationToken) -> Result<String>;
}

/// Host-facing execution boundary.
///
/// Converts the runner result into the host's `(data, error)` pair; exactly
/// one side is `Some`. All runner errors surface here as plain strings,
/// nothing is retried.
pub async fn execute(
    runner: &dyn QueryRunner,
    query: &str,
    cancel: CancellationToken,
) -> (Option<String>, Option<String>) {
    match runner.run_query(query, cancel).await {
        Ok(data) => (Some(data), None),
        Err(e) => (None, Some(e.to_string())),
    }
}
