//! OpenRouter chat-completions client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ChatMessage, LlmClient, LlmResponse, ToolCall, ToolDefinition, Usage};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Client for the OpenRouter chat-completions endpoint.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<LlmResponse> {
        let mut body = json!({
            "model": model,
            "messages": messages,
        });
        if let Some(tools) = tools {
            body["tools"] = serde_json::to_value(tools)?;
        }

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("LLM request failed with status {}: {}", status, detail);
        }

        let completion: CompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("LLM response contained no choices"))?;

        Ok(LlmResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            usage: completion.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_response_parses_tool_calls_and_usage() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "list_directory", "arguments": "{}"}
                    }]
                }
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 8, "total_tokens": 128}
        }"#;

        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        let choice = &parsed.choices[0];
        assert!(choice.message.content.is_none());
        assert_eq!(
            choice.message.tool_calls.as_ref().unwrap()[0].function.name,
            "list_directory"
        );
        assert_eq!(parsed.usage.unwrap().prompt_tokens, 120);
    }

    #[test]
    fn completion_response_parses_plain_text_turn() {
        let raw = r#"{
            "choices": [{"message": {"content": "All done."}}]
        }"#;

        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("All done.")
        );
        assert!(parsed.choices[0].message.tool_calls.is_none());
        assert!(parsed.usage.is_none());
    }
}
