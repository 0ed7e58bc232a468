//! Build tools of the Usable landing page.
//!
//! The `pageshell-build` binary wraps these modules.

use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod css;
pub mod fs_fetch;
pub mod prerender;

/// An error in the tools.
#[derive(Debug)]
pub enum ToolError {
    /// A file cannot be read or written.
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        err: std::io::Error,
    },
    /// A file has invalid content.
    Parse {
        /// The file path.
        path: PathBuf,
        /// The message.
        msg: String,
    },
}

impl ToolError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |err| ToolError::Io { path, err }
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Io { path, err } => {
                write!(f, "{}: {}", path.display(), err)?;
            }
            ToolError::Parse { path, msg } => {
                write!(f, "{}: {}", path.display(), msg)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io { err, .. } => Some(err),
            ToolError::Parse { .. } => None,
        }
    }
}
