//! Agent module - the core autonomous agent logic.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build a transcript with system prompt and user task
//! 2. Call the LLM with the available tools
//! 3. If the LLM requests tool calls, execute them one at a time and feed
//!    each result back into the transcript
//! 4. Repeat until the LLM produces a final text response or the iteration
//!    budget is exhausted

mod agent_loop;
mod prompt;
mod transcript;

pub use agent_loop::{Agent, TaskReport};
pub use prompt::build_system_prompt;
pub use transcript::Transcript;
