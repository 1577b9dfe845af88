//! Workspace path containment.
//!
//! Every tool operation resolves model-supplied paths through this module
//! before touching the filesystem. Resolution is purely lexical so that
//! write targets which do not exist yet can still be validated.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// A path that resolved outside the workspace root.
///
/// This is a classification, not a fault: callers turn it into a tool result
/// and perform no filesystem access for the rejected path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path \"{path}\" resolves outside the workspace root")]
pub struct Escape {
    /// The offending path as supplied by the caller.
    pub path: String,
}

/// Resolve `relative` against `root` and enforce containment.
///
/// The input is joined onto the root and lexically normalized, then accepted
/// only if `root` is a component-wise prefix of the result, so `/srv/ws2` is
/// never treated as inside `/srv/ws`. Absolute inputs replace the root on
/// join and are therefore subject to the same check. The root itself is
/// always contained.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf, Escape> {
    let root = normalize(root);
    let resolved = normalize(&root.join(relative));

    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(Escape {
            path: relative.to_string(),
        })
    }
}

/// Lexically normalize a path: drop `.` components, let `..` pop the
/// previous component. `PathBuf::pop` refuses to remove a root component,
/// so `..` clamps at the filesystem root the way `normpath` does.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
