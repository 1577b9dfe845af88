//! # Workbox Agent
//!
//! A minimal CLI coding agent confined to a single workspace directory.
//!
//! This library provides:
//! - A sandboxed toolkit of four file/process operations
//! - A tool-based agent loop for autonomous task execution
//! - Integration with OpenRouter for LLM access
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Build a transcript with system prompt and the user task
//! 2. Call the LLM, parse the response, execute any tool calls
//! 3. Feed results back to the LLM, repeat until the task completes
//!
//! Every tool operation resolves its path through [`sandbox::resolve`],
//! which rejects anything that escapes the workspace root.
//!
//! ## Example
//!
//! ```rust,ignore
//! use workbox_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config);
//! let report = agent.run_task("Fix the bug in calculator.py").await?;
//! println!("{}", report.answer);
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod sandbox;
pub mod tools;

pub use config::Config;
