//! Registry the host resolves runners from.
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, RunnerCommonError};
use crate::runner::{ConfigSchema, QueryRunner};

/// Builds a runner instance from host-stored configuration.
pub type RunnerFactory = Box<dyn Fn(Value) -> Result<Arc<dyn QueryRunner>> + Send + Sync>;

struct RegisteredRunner {
    schema: ConfigSchema,
    factory: RunnerFactory,
}

/// Maps runner names to factories.
#[derive(Default)]
pub struct RunnerRegistry {
    runners: DashMap<String, Arc<RegisteredRunner>>,
}

impl RunnerRegistry {
    pub fn new() -> RunnerRegistry {
        RunnerRegistry {
            runners: DashMap::new(),
        }
    }

    /// Register a runner type, replacing any previous registration under the
    /// same name.
    pub fn register(&self, name: &str, schema: ConfigSchema, factory: RunnerFactory) {
        debug!(%name, "registering query runner");
        self.runners
            .insert(name.to_string(), Arc::new(RegisteredRunner { schema, factory }));
    }

    /// Instantiate a registered runner from stored configuration.
    ///
    /// Configuration errors from the factory propagate to the caller; they
    /// belong to setup/validation, not query execution.
    pub fn instantiate(&self, name: &str, config: Value) -> Result<Arc<dyn QueryRunner>> {
        // The map guard must not be held across the factory call; a factory
        // is allowed to touch the registry itself.
        let entry = self
            .runners
            .get(name)
            .ok_or_else(|| RunnerCommonError::UnknownRunner(name.to_string()))?
            .value()
            .clone();
        (entry.factory)(config)
    }

    /// Configuration schema for the host's setup UI.
    pub fn config_schema(&self, name: &str) -> Result<ConfigSchema> {
        let entry = self
            .runners
            .get(name)
            .ok_or_else(|| RunnerCommonError::UnknownRunner(name.to_string()))?;
        Ok(entry.schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::runner::{execute, ConfigProperty};

    struct EchoRunner {
        prefix: String,
    }

    #[async_trait]
    impl QueryRunner for EchoRunner {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn run_query(&self, query: &str, _cancel: CancellationToken) -> Result<String> {
            Ok(format!("{}{}", self.prefix, query))
        }
    }

    fn echo_schema() -> ConfigSchema {
        let mut properties = IndexMap::new();
        properties.insert(
            "prefix",
            ConfigProperty {
                datatype: "string",
                title: "Prefix",
            },
        );
        ConfigSchema::object(properties, vec!["prefix"])
    }

    fn register_echo(registry: &RunnerRegistry) {
        registry.register(
            "echo",
            echo_schema(),
            Box::new(|config| {
                let prefix = config
                    .get("prefix")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                Ok(Arc::new(EchoRunner { prefix }))
            }),
        );
    }

    #[tokio::test]
    async fn register_and_instantiate() {
        logutil::init_test();

        let registry = RunnerRegistry::new();
        register_echo(&registry);

        let runner = registry
            .instantiate("echo", json!({"prefix": "> "}))
            .unwrap();
        let (data, error) = execute(runner.as_ref(), "hello", CancellationToken::new()).await;
        assert_eq!(Some("> hello".to_string()), data);
        assert_eq!(None, error);
    }

    #[test]
    fn factory_may_reenter_the_registry() {
        let registry = Arc::new(RunnerRegistry::new());
        let reentrant = Arc::clone(&registry);
        registry.register(
            "echo",
            echo_schema(),
            Box::new(move |_config| {
                // Replacing our own registration while instantiating must not
                // deadlock on the map.
                register_echo(&reentrant);
                Ok(Arc::new(EchoRunner {
                    prefix: String::new(),
                }))
            }),
        );

        registry.instantiate("echo", json!({})).unwrap();
    }

    #[test]
    fn unknown_runner() {
        let registry = RunnerRegistry::new();
        let err = registry.instantiate("nope", json!({})).err().unwrap();
        assert!(matches!(err, RunnerCommonError::UnknownRunner(_)));
    }

    #[test]
    fn schema_shape() {
        let registry = RunnerRegistry::new();
        register_echo(&registry);

        let schema = registry.config_schema("echo").unwrap();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "prefix": {"type": "string", "title": "Prefix"},
                },
                "required": ["prefix"],
            })
        );
    }
}
