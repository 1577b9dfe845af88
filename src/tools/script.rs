//! Confined script execution.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::sandbox;

use super::ToolError;

/// Wall-clock budget for a script run.
pub(crate) const SCRIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Interpreter for a recognized script extension.
fn interpreter_for(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("py") => Some("python3"),
        Some("sh") => Some("sh"),
        _ => None,
    }
}

/// Run a script inside the workspace with positional arguments, capturing
/// stdout, stderr, and the exit code.
pub(crate) async fn run_script(
    workspace: &Path,
    file_path: &str,
    args: &[String],
) -> Result<String, ToolError> {
    run_script_with_timeout(workspace, file_path, args, SCRIPT_TIMEOUT).await
}

pub(crate) async fn run_script_with_timeout(
    workspace: &Path,
    file_path: &str,
    args: &[String],
    timeout: Duration,
) -> Result<String, ToolError> {
    let target = sandbox::resolve(workspace, file_path).map_err(|_| ToolError::Escape {
        action: "execute",
        path: file_path.to_string(),
    })?;

    if !target.is_file() {
        return Err(ToolError::ScriptNotFound(file_path.to_string()));
    }

    let interpreter =
        interpreter_for(&target).ok_or_else(|| ToolError::UnrecognizedScript(file_path.to_string()))?;

    let mut child = Command::new(interpreter)
        .arg(&target)
        .args(args)
        .current_dir(workspace)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|_| ToolError::ExecFailed(file_path.to_string()))?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();
    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();

    // Drain both pipes concurrently so neither side can fill its buffer and
    // stall the child, then collect the exit status.
    let waited = tokio::time::timeout(timeout, async {
        let (stdout_read, stderr_read) = tokio::join!(
            read_stream(&mut stdout_pipe, &mut stdout_buf),
            read_stream(&mut stderr_pipe, &mut stderr_buf),
        );
        stdout_read?;
        stderr_read?;
        child.wait().await
    })
    .await;

    let status = match waited {
        Ok(Ok(status)) => status,
        Ok(Err(_)) => {
            reap(&mut child).await;
            return Err(ToolError::ExecFailed(file_path.to_string()));
        }
        Err(_) => {
            reap(&mut child).await;
            return Err(ToolError::ExecTimeout {
                path: file_path.to_string(),
                secs: timeout.as_secs(),
            });
        }
    };

    let stdout = String::from_utf8_lossy(&stdout_buf);
    let stderr = String::from_utf8_lossy(&stderr_buf);

    let mut report = String::new();
    match status.code() {
        Some(0) => {}
        Some(code) => report.push_str(&format!("Process exited with code {code}\n")),
        None => report.push_str("Process terminated by signal\n"),
    }
    report.push_str(&format!("STDOUT: {}\n", placeholder_if_empty(&stdout)));
    report.push_str(&format!("STDERR: {}", placeholder_if_empty(&stderr)));

    Ok(report)
}

async fn read_stream<R>(pipe: &mut Option<R>, buf: &mut Vec<u8>) -> std::io::Result<()>
where
    R: tokio::io::AsyncRead + Unpin,
{
    if let Some(pipe) = pipe.as_mut() {
        pipe.read_to_end(buf).await?;
    }
    Ok(())
}

/// Kill the child and wait on it, so it is reaped before the operation
/// returns. A child that already exited makes both calls no-ops.
async fn reap(child: &mut tokio::process::Child) {
    let _ = child.start_kill();
    let _ = child.wait().await;
}

/// The model consumer should never have to reason about empty-vs-missing
/// output, so blank streams get an explicit marker.
fn placeholder_if_empty(stream: &str) -> &str {
    if stream.is_empty() {
        "No output produced"
    } else {
        stream
    }
}
