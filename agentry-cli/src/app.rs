//! Wiring of configuration, registry, dispatch and tools.

use agentry::core::RuntimeConfig;
use agentry::runtime::{AgentRegistry, DispatchService, SimpleAiAgent};
use agentry::tools::ToolCatalog;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::CliError;

pub struct App {
    pub config: RuntimeConfig,
    pub registry: Arc<AgentRegistry>,
    pub dispatch: DispatchService,
    pub tools: ToolCatalog,
}

/// Config file when given, otherwise environment over defaults.
pub fn load_config(path: Option<&Path>) -> Result<RuntimeConfig, CliError> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
                path: path.display().to_string(),
                source,
            })?;
            Ok(RuntimeConfig::from_toml_str(&source)?)
        }
        None => Ok(RuntimeConfig::from_env()?),
    }
}

impl App {
    /// Build the runtime and register the built-in agents.
    pub async fn bootstrap(config: RuntimeConfig) -> Result<Self, CliError> {
        let registry = Arc::new(AgentRegistry::from_config(&config));
        registry.start();

        if config.enabled {
            registry.register(Arc::new(SimpleAiAgent::new())).await?;
        } else {
            warn!("Agent runtime disabled by configuration; no agents registered");
        }

        let app = Self {
            dispatch: DispatchService::new(registry.clone()),
            tools: ToolCatalog::from_config(&config.tools),
            registry,
            config,
        };

        if app.config.monitoring {
            let stats = app.dispatch.statistics();
            info!(
                total = stats.total,
                available = stats.available,
                availability = stats.availability_percentage(),
                tools = app.tools.len(),
                "Runtime ready"
            );
        }
        Ok(app)
    }

    pub async fn shutdown(&self) {
        self.registry.stop().await;
    }
}
