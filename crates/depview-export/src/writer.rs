//! All-or-nothing file output.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use depview_error::{Error, Result};

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The target only appears once everything was written and synced; on any
/// failure the temporary file is removed and the previous target, if any, is
/// left untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = path.display().to_string();
    let fail = |stage: &str, e: std::io::Error| {
        Error::export_failed(target.clone(), format!("{stage}: {e}"))
            .with_operation("export::write_atomic")
            .set_source(e)
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fail("create temporary file", e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| fail("write", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| fail("sync", e))?;
    tmp.persist(path).map_err(|e| fail("rename", e.error))?;

    debug!(path = %target, bytes = contents.len(), "file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depview_error::ErrorKind;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("report.txt");
        std::fs::write(&target, "old").unwrap();
        write_atomic(&target, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn missing_directory_fails_without_creating_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("report.txt");
        let err = write_atomic(&target, "data").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExportFailed);
        assert_eq!(err.operation(), "export::write_atomic");
        assert!(!target.exists());
        assert_eq!(
            err.context_value("path"),
            Some(target.display().to_string().as_str())
        );
    }

    #[test]
    fn creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("graph.dot");
        write_atomic(&target, "digraph solution {}\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "digraph solution {}\n"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
