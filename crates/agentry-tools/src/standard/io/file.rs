//! # File Processor Tool
//!
//! One tool covering the common single-file operations. Parameters:
//!
//! - `operation` - one of `read`, `write`, `exists`, `delete`, `create`, `size`
//! - `filePath` - target path
//! - `content` - text to write (`write` only, defaults to empty when absent;
//!   any non-string value is rejected)

use agentry_core::{ExecutionContext, FailureReason, Tool, ToolInput};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub const FILE_PROCESSOR: &str = "file_processor";
const FAILURE_CODE: &str = "FILE_OPERATION_FAILED";

/// Operations understood by [`FileProcessorTool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOperation {
    Read,
    Write,
    Exists,
    Delete,
    Create,
    Size,
}

impl FileOperation {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "read" => Some(FileOperation::Read),
            "write" => Some(FileOperation::Write),
            "exists" => Some(FileOperation::Exists),
            "delete" => Some(FileOperation::Delete),
            "create" => Some(FileOperation::Create),
            "size" => Some(FileOperation::Size),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileOperation::Read => "read",
            FileOperation::Write => "write",
            FileOperation::Exists => "exists",
            FileOperation::Delete => "delete",
            FileOperation::Create => "create",
            FileOperation::Size => "size",
        }
    }
}

/// Reads and writes files on the local filesystem.
#[derive(Debug, Default)]
pub struct FileProcessorTool;

impl FileProcessorTool {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, operation: FileOperation, path: &Path, input: &ToolInput) -> Result<Value, String> {
        match operation {
            FileOperation::Read => {
                let content = fs::read_to_string(path).await.map_err(|e| describe(path, e))?;
                Ok(Value::String(content))
            }
            FileOperation::Write => {
                let content = write_content(input).map_err(|reason| reason.message())?;
                fs::write(path, content).await.map_err(|e| describe(path, e))?;
                Ok(Value::Bool(true))
            }
            FileOperation::Exists => {
                let exists = fs::try_exists(path).await.map_err(|e| describe(path, e))?;
                Ok(Value::Bool(exists))
            }
            FileOperation::Delete => {
                let removed = match fs::metadata(path).await {
                    Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
                    Ok(_) => fs::remove_file(path).await,
                    // Deleting something already absent counts as done.
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(e),
                };
                removed.map_err(|e| describe(path, e))?;
                Ok(Value::Bool(true))
            }
            FileOperation::Create => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await.map_err(|e| describe(parent, e))?;
                }
                fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await
                    .map_err(|e| describe(path, e))?;
                Ok(Value::Bool(true))
            }
            FileOperation::Size => {
                let meta = fs::metadata(path).await.map_err(|e| describe(path, e))?;
                Ok(json!(meta.len()))
            }
        }
    }
}

/// The `content` parameter of a write. Only an absent or null value means empty.
fn write_content(input: &ToolInput) -> Result<&str, FailureReason> {
    match input.get("content") {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(content)) => Ok(content),
        Some(_) => Err(FailureReason::invalid_input("content must be a string")),
    }
}

fn describe(path: &Path, err: std::io::Error) -> String {
    if err.kind() == ErrorKind::NotFound {
        format!("File not found: {}", path.display())
    } else {
        format!("{}: {}", path.display(), err)
    }
}

fn failure(message: impl std::fmt::Display) -> FailureReason {
    FailureReason::Custom {
        category: FAILURE_CODE.to_string(),
        message: format!("File operation failed: {message}"),
    }
}

#[async_trait]
impl Tool for FileProcessorTool {
    fn name(&self) -> &str {
        FILE_PROCESSOR
    }

    fn description(&self) -> &str {
        "Read and write files from the local filesystem"
    }

    fn check_input(&self, input: &ToolInput) -> Result<(), FailureReason> {
        let operation = input.require_str("operation")?;
        input.require_str("filePath")?;
        if FileOperation::parse(operation).is_none() {
            return Err(FailureReason::invalid_input(format!(
                "unsupported operation: {operation}"
            )));
        }
        write_content(input)?;
        Ok(())
    }

    async fn call(
        &self,
        input: &ToolInput,
        _context: &ExecutionContext,
    ) -> Result<Value, FailureReason> {
        let operation = input.require_str("operation").map_err(|_| failure("operation is required"))?;
        let path = input.require_str("filePath").map_err(|_| failure("filePath is required"))?;
        let operation = FileOperation::parse(operation)
            .ok_or_else(|| failure(format!("Unsupported operation: {operation}")))?;

        debug!(tool = FILE_PROCESSOR, operation = operation.as_str(), path = %path, "Executing file operation");
        self.run(operation, Path::new(path), input).await.map_err(failure)
    }
}
