//! The main Error type for depview.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all depview operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The operation (pipeline stage) that raised this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up the first context value stored under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.operation)?;

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => ErrorKind::EncodingError,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file '{}' not found", path))
            .with_context("path", path)
    }

    /// Create a ProjectNotFound error
    pub fn project_not_found(project: impl Into<String>) -> Self {
        let project = project.into();
        Self::new(
            ErrorKind::ProjectNotFound,
            format!("project '{}' is not part of the solution", project),
        )
        .with_context("project", project)
    }

    /// Create an ExportFailed error for the given target path
    pub fn export_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExportFailed, message).with_context("path", path)
    }

    /// Create a ToolNotFound error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        Self::new(
            ErrorKind::ToolNotFound,
            format!("layout tool '{}' could not be located", tool),
        )
        .with_context("tool", tool)
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::InvalidFormat, "missing header");
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.message(), "missing header");
        assert_eq!(err.operation(), "");
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::IoFailed, "disk full")
            .with_operation("export::write_atomic")
            .with_operation("export::write_report");

        assert_eq!(err.operation(), "export::write_report");
        assert_eq!(
            err.context()[0],
            ("called", "export::write_atomic".to_string())
        );
    }

    #[test]
    fn test_display_names_stage() {
        let err = Error::invalid_format("not a solution file")
            .with_operation("loader::load")
            .with_context("path", "App.sln");

        let display = format!("{}", err);
        assert!(display.contains("InvalidFormat"));
        assert!(display.contains("loader::load"));
        assert!(display.contains("path: App.sln"));
        assert!(display.contains("not a solution file"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "io");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_convenience_constructors() {
        let err = Error::project_not_found("Core");
        assert_eq!(err.kind(), ErrorKind::ProjectNotFound);
        assert_eq!(err.context_value("project"), Some("Core"));

        let err = Error::tool_not_found("dot");
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);

        let err = Error::export_failed("out.txt", "disk full");
        assert_eq!(err.kind(), ErrorKind::ExportFailed);
        assert_eq!(err.context_value("path"), Some("out.txt"));
    }

    #[test]
    fn test_display_format() {
        let err = Error::export_failed("out.txt", "disk full").with_operation("export::write_report");
        assert_eq!(
            err.to_string(),
            "ExportFailed at export::write_report, context { path: out.txt } => disk full"
        );
    }
}
