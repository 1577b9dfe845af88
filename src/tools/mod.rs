//! Tool operations exposed to the model.
//!
//! The four operations form a closed set: dispatch is an exhaustive `match`
//! on [`ToolKind`], so an operation without a handler fails to compile.
//! Every outcome, success or failure, is rendered to plain text at the
//! dispatch boundary because the consumer is an LLM that only understands
//! text.

mod fs;
mod script;

use std::path::Path;

use serde_json::{json, Value};
use thiserror::Error;

use crate::llm::ToolDefinition;

/// Failure modes of the tool operations.
///
/// Variants carry the path exactly as the model supplied it, so rendered
/// messages refer to what was asked for rather than the resolved absolute
/// path. Operating-system error detail is deliberately dropped to keep the
/// interface uniform.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Cannot {action} \"{path}\" as it is outside the permitted working directory")]
    Escape { action: &'static str, path: String },

    #[error("\"{0}\" is not a directory")]
    NotADirectory(String),

    #[error("Could not access contents of directory \"{0}\"")]
    ListFailed(String),

    #[error("File not found or is not a regular file: \"{0}\"")]
    NotARegularFile(String),

    #[error("Could not read file contents from \"{0}\"")]
    ReadFailed(String),

    #[error("Cannot write to \"{0}\" as it is a directory")]
    TargetIsDirectory(String),

    #[error("Could not write to \"{0}\"")]
    WriteFailed(String),

    #[error("\"{0}\" does not exist or is not a regular file")]
    ScriptNotFound(String),

    #[error("\"{0}\" does not have a recognized script extension")]
    UnrecognizedScript(String),

    #[error("Could not execute \"{0}\"")]
    ExecFailed(String),

    #[error("Execution of \"{path}\" timed out after {secs} seconds")]
    ExecTimeout { path: String, secs: u64 },

    #[error("Missing or invalid \"{0}\" argument")]
    BadArgument(&'static str),
}

/// The closed set of operations the model may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ListDirectory,
    ReadFile,
    WriteFile,
    RunScript,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::ListDirectory,
        ToolKind::ReadFile,
        ToolKind::WriteFile,
        ToolKind::RunScript,
    ];

    /// Wire name used in function calling.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::ListDirectory => "list_directory",
            ToolKind::ReadFile => "read_file",
            ToolKind::WriteFile => "write_file",
            ToolKind::RunScript => "run_script",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "list_directory" => Some(ToolKind::ListDirectory),
            "read_file" => Some(ToolKind::ReadFile),
            "write_file" => Some(ToolKind::WriteFile),
            "run_script" => Some(ToolKind::RunScript),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::ListDirectory => {
                "List the files in a directory relative to the working directory, with size and kind for each entry."
            }
            ToolKind::ReadFile => {
                "Read the contents of a file relative to the working directory. Long files are truncated at 10000 characters."
            }
            ToolKind::WriteFile => {
                "Write content to a file relative to the working directory, creating parent directories as needed and overwriting any existing file."
            }
            ToolKind::RunScript => {
                "Run a script file relative to the working directory with optional positional arguments. Captures and returns stdout, stderr, and the exit code."
            }
        }
    }

    pub fn parameters_schema(self) -> Value {
        match self {
            ToolKind::ListDirectory => json!({
                "type": "object",
                "properties": {
                    "directory": {
                        "type": "string",
                        "description": "Directory to list, relative to the working directory. Defaults to the working directory itself."
                    }
                }
            }),
            ToolKind::ReadFile => json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "File to read, relative to the working directory"
                    }
                },
                "required": ["file_path"]
            }),
            ToolKind::WriteFile => json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "File to write, relative to the working directory"
                    },
                    "content": {
                        "type": "string",
                        "description": "Content to write to the file"
                    }
                },
                "required": ["file_path", "content"]
            }),
            ToolKind::RunScript => json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Script to execute, relative to the working directory"
                    },
                    "args": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Optional positional arguments to pass to the script"
                    }
                },
                "required": ["file_path"]
            }),
        }
    }

    async fn execute(self, args: &Value, workspace: &Path) -> Result<String, ToolError> {
        match self {
            ToolKind::ListDirectory => {
                let directory = args
                    .get("directory")
                    .and_then(Value::as_str)
                    .unwrap_or(".");
                fs::list_directory(workspace, directory)
            }
            ToolKind::ReadFile => {
                let file_path = require_str(args, "file_path")?;
                fs::read_file(workspace, file_path)
            }
            ToolKind::WriteFile => {
                let file_path = require_str(args, "file_path")?;
                let content = require_str(args, "content")?;
                fs::write_file(workspace, file_path, content)
            }
            ToolKind::RunScript => {
                let file_path = require_str(args, "file_path")?;
                let script_args = optional_string_array(args, "args")?;
                script::run_script(workspace, file_path, &script_args).await
            }
        }
    }
}

fn require_str<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or(ToolError::BadArgument(key))
}

fn optional_string_array(args: &Value, key: &'static str) -> Result<Vec<String>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(ToolError::BadArgument(key))
            })
            .collect(),
        Some(_) => Err(ToolError::BadArgument(key)),
    }
}

/// Dispatch table over the closed tool set.
pub struct ToolRegistry;

impl ToolRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Function-calling schemas for every tool, in declaration order.
    pub fn schemas(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL
            .iter()
            .map(|kind| {
                ToolDefinition::function(kind.name(), kind.description(), kind.parameters_schema())
            })
            .collect()
    }

    /// The tools in declaration order, for the system prompt.
    pub fn kinds(&self) -> &'static [ToolKind] {
        &ToolKind::ALL
    }

    /// Execute a named tool, rendering every outcome to model-consumable
    /// text. An unknown name is reported, not raised.
    pub async fn dispatch(&self, name: &str, args: &Value, workspace: &Path) -> String {
        let Some(kind) = ToolKind::from_name(name) else {
            return format!("Error: Unknown tool: {name}");
        };

        match kind.execute(args, workspace).await {
            Ok(output) => output,
            Err(err) => format!("Error: {err}"),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
