//! Error kinds for depview operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Grouped by the pipeline stage that raises them, so a caller can tell a
/// broken solution file apart from a failed export or a missing renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid configuration file or values
    ConfigInvalid,

    /// Invalid argument passed by the caller
    InvalidArgument,

    // =========================================================================
    // Load errors
    // =========================================================================
    /// The document is not recognizable as a solution file
    InvalidFormat,

    /// The document is not valid UTF-8
    EncodingError,

    /// A project named by the caller is not part of the solution
    ProjectNotFound,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Export errors
    // =========================================================================
    /// Writing a report or graph description failed
    ExportFailed,

    // =========================================================================
    // Render errors
    // =========================================================================
    /// The external layout tool could not be located
    ToolNotFound,

    /// The external layout tool failed to produce an image
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::InvalidFormat.to_string(), "InvalidFormat");
        assert_eq!(ErrorKind::ToolNotFound.as_str(), "ToolNotFound");
    }
}
