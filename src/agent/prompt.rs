//! System prompt templates for the agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(workspace_path: &str, tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .kinds()
        .iter()
        .map(|kind| format!("- **{}**: {}", kind.name(), kind.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a coding assistant confined to the working directory: {workspace_path}

## Your Capabilities

You have access to the following tools:
{tool_descriptions}

All paths you pass to tools must be relative to the working directory. Paths that point outside it are rejected; do not attempt to access anything beyond the working directory.

## Rules and Guidelines

1. **Always use tools** - Don't guess file contents or directory layouts. List and read before you answer questions about the workspace.

2. **Read before edit** - Read a file's contents before modifying it, unless you're creating a new file.

3. **Verify by running** - After changing a script, run it to confirm the change behaves as intended.

4. **Iterate on errors** - If a script fails or produces errors, analyze the output and try to fix the issue.

5. **Stay focused** - Only make changes directly related to the task.

## Response Format

When you've completed the task, reply with a plain text summary of what you did and what you found. If you need to use a tool, respond with a tool call; the system will execute it and return the result."#,
        workspace_path = workspace_path,
        tool_descriptions = tool_descriptions
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_every_tool_and_the_workspace() {
        let prompt = build_system_prompt("/srv/workspace", &ToolRegistry::new());

        assert!(prompt.contains("/srv/workspace"));
        for name in ["list_directory", "read_file", "write_file", "run_script"] {
            assert!(prompt.contains(name), "missing tool {name}");
        }
    }
}
