//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenRouterClient, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;
use super::transcript::Transcript;

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct TaskReport {
    /// The final model answer.
    pub answer: String,
    /// Model calls made before the final answer.
    pub iterations: usize,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// The autonomous agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create a new agent with the given configuration.
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(OpenRouterClient::new(config.api_key.clone()));
        Self::with_client(config, llm)
    }

    /// Create an agent with a caller-supplied LLM client.
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            config,
            llm,
            tools: ToolRegistry::new(),
        }
    }

    /// Run a task to completion and return the final answer with token
    /// accounting.
    pub async fn run_task(&self, task: &str) -> anyhow::Result<TaskReport> {
        let workspace_str = self.config.workspace_path.to_string_lossy().to_string();

        let system_prompt = build_system_prompt(&workspace_str, &self.tools);
        let mut transcript = Transcript::new()
            .append(ChatMessage::system(system_prompt))
            .append(ChatMessage::user(task.to_string()));

        let tool_schemas = self.tools.schemas();
        let mut prompt_tokens = 0u64;
        let mut completion_tokens = 0u64;

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(
                    &self.config.default_model,
                    transcript.messages(),
                    Some(&tool_schemas),
                )
                .await?;

            if let Some(usage) = response.usage {
                prompt_tokens += usage.prompt_tokens;
                completion_tokens += usage.completion_tokens;
            }

            match response.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    transcript = transcript.append(ChatMessage::assistant(
                        response.content.clone(),
                        Some(tool_calls.clone()),
                    ));

                    // One call at a time: each result is buffered into the
                    // transcript before the next call runs.
                    for tool_call in &tool_calls {
                        let result = self.execute_tool_call(tool_call).await;
                        transcript =
                            transcript.append(ChatMessage::tool(tool_call.id.clone(), result));
                    }
                }
                _ => {
                    if let Some(content) = response.content {
                        return Ok(TaskReport {
                            answer: content,
                            iterations: iteration + 1,
                            prompt_tokens,
                            completion_tokens,
                        });
                    }
                    anyhow::bail!("LLM returned neither text nor tool calls");
                }
            }
        }

        anyhow::bail!(
            "reached maximum number of iterations ({}) with no final response",
            self.config.max_iterations
        )
    }

    /// Execute a single tool call, always producing model-consumable text.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> String {
        tracing::info!("calling tool: {}", tool_call.function.name);

        let args: serde_json::Value =
            serde_json::from_str(&tool_call.function.arguments).unwrap_or(serde_json::Value::Null);

        let result = self
            .tools
            .dispatch(&tool_call.function.name, &args, &self.config.workspace_path)
            .await;

        tracing::debug!("tool result: {}", truncate_for_log(&result, 1000));

        result
    }
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}... [truncated]", &s[..cut]),
    }
}
