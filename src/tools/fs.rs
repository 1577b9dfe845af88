//! Confined filesystem tools: directory listing, file read, file write.

use std::fs;
use std::path::Path;

use crate::sandbox;

use super::ToolError;

/// Character cap applied to file reads before truncation.
pub(crate) const MAX_READ_CHARS: usize = 10_000;

/// List the immediate children of a directory inside the workspace.
///
/// One line per entry, in enumeration order. Not recursive.
pub(crate) fn list_directory(workspace: &Path, directory: &str) -> Result<String, ToolError> {
    let target = sandbox::resolve(workspace, directory).map_err(|_| ToolError::Escape {
        action: "list",
        path: directory.to_string(),
    })?;

    if !target.is_dir() {
        return Err(ToolError::NotADirectory(directory.to_string()));
    }

    let entries = fs::read_dir(&target).map_err(|_| ToolError::ListFailed(directory.to_string()))?;

    let mut lines = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|_| ToolError::ListFailed(directory.to_string()))?;
        let metadata = entry
            .metadata()
            .map_err(|_| ToolError::ListFailed(directory.to_string()))?;
        lines.push(format!(
            "- {}: file_size={} bytes, is_dir={}",
            entry.file_name().to_string_lossy(),
            metadata.len(),
            if metadata.is_dir() { "True" } else { "False" },
        ));
    }

    Ok(lines.join("\n"))
}

/// Read a file inside the workspace, truncated at [`MAX_READ_CHARS`].
pub(crate) fn read_file(workspace: &Path, file_path: &str) -> Result<String, ToolError> {
    let target = sandbox::resolve(workspace, file_path).map_err(|_| ToolError::Escape {
        action: "read",
        path: file_path.to_string(),
    })?;

    if !target.is_file() {
        return Err(ToolError::NotARegularFile(file_path.to_string()));
    }

    let content =
        fs::read_to_string(&target).map_err(|_| ToolError::ReadFailed(file_path.to_string()))?;

    Ok(truncate_content(content, file_path))
}

/// Cut content at the character cap, appending the truncation marker.
fn truncate_content(content: String, file_path: &str) -> String {
    match content.char_indices().nth(MAX_READ_CHARS) {
        None => content,
        Some((cut, _)) => {
            let mut truncated = content[..cut].to_string();
            truncated.push_str(&format!(
                "[...File \"{file_path}\" truncated at {MAX_READ_CHARS} characters]"
            ));
            truncated
        }
    }
}

/// Write a file inside the workspace, creating missing parent directories
/// and overwriting any existing content.
pub(crate) fn write_file(
    workspace: &Path,
    file_path: &str,
    content: &str,
) -> Result<String, ToolError> {
    let target = sandbox::resolve(workspace, file_path).map_err(|_| ToolError::Escape {
        action: "write to",
        path: file_path.to_string(),
    })?;

    if target.is_dir() {
        return Err(ToolError::TargetIsDirectory(file_path.to_string()));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|_| ToolError::WriteFailed(file_path.to_string()))?;
    }

    fs::write(&target, content).map_err(|_| ToolError::WriteFailed(file_path.to_string()))?;

    Ok(format!(
        "Successfully wrote to \"{}\" ({} characters written)",
        file_path,
        content.chars().count()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn list_reports_size_and_kind() {
        let ws = workspace();
        fs::write(ws.path().join("data.txt"), "hello").unwrap();
        fs::create_dir(ws.path().join("sub")).unwrap();

        let listing = list_directory(ws.path(), ".").unwrap();
        let mut lines: Vec<&str> = listing.lines().collect();
        lines.sort();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "- data.txt: file_size=5 bytes, is_dir=False");
        assert!(lines[1].starts_with("- sub: "));
        assert!(lines[1].ends_with("is_dir=True"));
    }

    #[test]
    fn list_of_subdirectory() {
        let ws = workspace();
        fs::create_dir(ws.path().join("sub")).unwrap();
        fs::write(ws.path().join("sub/inner.txt"), "x").unwrap();

        let listing = list_directory(ws.path(), "sub").unwrap();
        assert_eq!(listing, "- inner.txt: file_size=1 bytes, is_dir=False");
    }

    #[test]
    fn list_rejects_escape_without_touching_fs() {
        let ws = workspace();
        let err = list_directory(ws.path(), "../").unwrap_err();
        assert!(matches!(err, ToolError::Escape { action: "list", .. }));
    }

    #[test]
    fn list_rejects_non_directory() {
        let ws = workspace();
        fs::write(ws.path().join("file"), "x").unwrap();
        let err = list_directory(ws.path(), "file").unwrap_err();
        assert!(matches!(err, ToolError::NotADirectory(_)));

        let err = list_directory(ws.path(), "missing").unwrap_err();
        assert!(matches!(err, ToolError::NotADirectory(_)));
    }

    #[test]
    fn read_returns_full_content_below_cap() {
        let ws = workspace();
        let content = "x".repeat(MAX_READ_CHARS - 1);
        fs::write(ws.path().join("just_under.txt"), &content).unwrap();

        assert_eq!(read_file(ws.path(), "just_under.txt").unwrap(), content);
    }

    #[test]
    fn read_truncates_above_cap_with_marker() {
        let ws = workspace();
        fs::write(ws.path().join("big.txt"), "y".repeat(MAX_READ_CHARS + 1)).unwrap();

        let result = read_file(ws.path(), "big.txt").unwrap();
        let marker = format!("[...File \"big.txt\" truncated at {MAX_READ_CHARS} characters]");
        assert!(result.ends_with(&marker));
        assert_eq!(result.len() - marker.len(), MAX_READ_CHARS);
    }

    #[test]
    fn read_exactly_at_cap_is_untruncated() {
        let ws = workspace();
        let content = "z".repeat(MAX_READ_CHARS);
        fs::write(ws.path().join("exact.txt"), &content).unwrap();

        assert_eq!(read_file(ws.path(), "exact.txt").unwrap(), content);
    }

    #[test]
    fn read_is_idempotent() {
        let ws = workspace();
        fs::write(ws.path().join("big.txt"), "w".repeat(MAX_READ_CHARS * 2)).unwrap();

        let first = read_file(ws.path(), "big.txt").unwrap();
        let second = read_file(ws.path(), "big.txt").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn read_counts_characters_not_bytes() {
        let ws = workspace();
        // Multi-byte characters: the cap is in characters, and truncation
        // must not split a code point.
        fs::write(ws.path().join("wide.txt"), "é".repeat(MAX_READ_CHARS + 5)).unwrap();

        let result = read_file(ws.path(), "wide.txt").unwrap();
        assert!(result.contains("truncated at"));
        assert_eq!(
            result.chars().take_while(|c| *c == 'é').count(),
            MAX_READ_CHARS
        );
    }

    #[test]
    fn read_rejects_directory_and_missing_targets() {
        let ws = workspace();
        fs::create_dir(ws.path().join("sub")).unwrap();

        assert!(matches!(
            read_file(ws.path(), "sub").unwrap_err(),
            ToolError::NotARegularFile(_)
        ));
        assert!(matches!(
            read_file(ws.path(), "absent.txt").unwrap_err(),
            ToolError::NotARegularFile(_)
        ));
    }

    #[test]
    fn read_rejects_escape() {
        let ws = workspace();
        let err = read_file(ws.path(), "../outside.txt").unwrap_err();
        assert!(matches!(err, ToolError::Escape { action: "read", .. }));
    }

    #[test]
    fn write_creates_intermediate_directories() {
        let ws = workspace();
        let confirmation = write_file(ws.path(), "a/b/c.txt", "hello").unwrap();

        assert_eq!(
            confirmation,
            "Successfully wrote to \"a/b/c.txt\" (5 characters written)"
        );
        assert_eq!(
            fs::read_to_string(ws.path().join("a/b/c.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn write_overwrites_instead_of_appending() {
        let ws = workspace();
        write_file(ws.path(), "note.txt", "first contents").unwrap();
        write_file(ws.path(), "note.txt", "second").unwrap();

        assert_eq!(
            fs::read_to_string(ws.path().join("note.txt")).unwrap(),
            "second"
        );
    }

    #[test]
    fn write_rejects_directory_target() {
        let ws = workspace();
        fs::create_dir(ws.path().join("sub")).unwrap();

        let err = write_file(ws.path(), "sub", "content").unwrap_err();
        assert!(matches!(err, ToolError::TargetIsDirectory(_)));
    }

    #[test]
    fn write_rejects_escape_and_mutates_nothing() {
        let ws = workspace();
        let err = write_file(ws.path(), "../escaped.txt", "content").unwrap_err();

        assert!(matches!(err, ToolError::Escape { action: "write to", .. }));
        assert!(!ws.path().parent().unwrap().join("escaped.txt").exists());
    }
}
