//! # Tool Catalog
//!
//! Name-indexed collection of constructed tools. The catalog is built once
//! by the composition root and is read-only afterwards, so lookups need no
//! locking. [`ToolCatalog::invoke`] enforces the lookup, availability and
//! validation preconditions before running a tool.

use agentry_core::{
    ExecutionContext, Tool, ToolError, ToolExt, ToolInput, ToolResult, ToolsConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Descriptive view of a catalogued tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub available: bool,
}

impl ToolInfo {
    pub fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            version: tool.version().to_string(),
            available: tool.is_available(),
        }
    }
}

#[derive(Clone, Default)]
pub struct ToolCatalog {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCatalog")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in tool enabled at compile time.
    pub fn standard() -> Self {
        #[allow(unused_mut)]
        let mut catalog = Self::new();
        #[cfg(feature = "io")]
        catalog.register(Arc::new(crate::standard::FileProcessorTool::new()));
        #[cfg(feature = "network")]
        catalog.register(Arc::new(crate::standard::HttpRequestTool::new()));
        catalog
    }

    /// Built-ins when tools are enabled, otherwise an empty catalog.
    pub fn from_config(config: &ToolsConfig) -> Self {
        if !config.enabled {
            info!("Tools disabled by configuration");
            return Self::new();
        }
        let catalog = Self::standard();
        info!(
            namespace = %config.scan_namespace,
            count = catalog.len(),
            "Tool catalog ready"
        );
        catalog
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Add a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "Replacing tool with the same name");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Every tool, sorted by name.
    pub fn list(&self) -> Vec<ToolInfo> {
        let mut infos: Vec<ToolInfo> = self
            .tools
            .values()
            .map(|tool| ToolInfo::of(tool.as_ref()))
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    pub fn info(&self, name: &str) -> Result<ToolInfo, ToolError> {
        self.tools
            .get(name)
            .map(|tool| ToolInfo::of(tool.as_ref()))
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up, check and run a tool.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown names, `Unavailable` when the tool reports
    /// itself unavailable and `InvalidInput` when validation fails. Once
    /// the tool runs, its own failures are carried in the `ToolResult`.
    pub async fn invoke(
        &self,
        name: &str,
        parameters: HashMap<String, serde_json::Value>,
        context: &ExecutionContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        if !tool.is_available() {
            warn!(tool = %name, "Tool is not available");
            return Err(ToolError::Unavailable(name.to_string()));
        }

        let input = ToolInput::with_parameters(name, parameters);
        if let Err(reason) = tool.check_input(&input) {
            warn!(tool = %name, reason = %reason, "Tool input rejected");
            return Err(ToolError::InvalidInput {
                tool: name.to_string(),
                reason: reason.message(),
            });
        }

        Ok(tool.execute(&input, context).await)
    }
}
