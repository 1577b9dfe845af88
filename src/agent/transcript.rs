//! Append-only conversation transcript.

use crate::llm::ChatMessage;

/// The conversation so far.
///
/// The transcript is a value: appending consumes it and returns the grown
/// transcript, so every point where history changes is visible in the
/// loop's dataflow. Nothing is ever removed or rewritten.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn append(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn append_grows_by_one_and_preserves_order() {
        let transcript = Transcript::new()
            .append(ChatMessage::system("sys".to_string()))
            .append(ChatMessage::user("task".to_string()))
            .append(ChatMessage::tool("call_1".to_string(), "result".to_string()));

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.messages()[1].role, Role::User);
        assert_eq!(transcript.messages()[2].role, Role::Tool);
    }

    #[test]
    fn cloned_transcript_is_independent() {
        let base = Transcript::new().append(ChatMessage::user("task".to_string()));
        let grown = base.clone().append(ChatMessage::user("more".to_string()));

        assert_eq!(base.len(), 1);
        assert_eq!(grown.len(), 2);
    }
}
