//! Invoking the external Graphviz layout tool.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info};

use depview_error::{Error, Result};

/// Environment variable naming the layout tool when no explicit path is given.
pub const TOOL_ENV: &str = "DEPVIEW_DOT";

/// Turns a graph description file into an image.
pub trait Renderer {
    fn render(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Settings for [`GraphvizRenderer`], passed in by the caller on every run.
#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    /// Path to the `dot` executable. Looked up when not set.
    pub tool: Option<PathBuf>,
    /// Output format (`png`, `svg`, ...). Defaults to the output extension.
    pub format: Option<String>,
    /// Layout engine passed as `-K` (`dot`, `neato`, ...).
    pub layout: Option<String>,
}

pub struct GraphvizRenderer {
    tool: PathBuf,
    format: Option<String>,
    layout: Option<String>,
}

impl GraphvizRenderer {
    /// Locate the tool and build a renderer. Fails with `ToolNotFound` when no
    /// usable executable exists.
    pub fn new(config: RendererConfig) -> Result<Self> {
        let tool = locate_tool(config.tool.as_deref())?;
        debug!(tool = %tool.display(), "using layout tool");
        Ok(Self {
            tool,
            format: config.format,
            layout: config.layout,
        })
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }

    fn format_for(&self, output: &Path) -> String {
        self.format
            .clone()
            .or_else(|| {
                output
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase)
            })
            .unwrap_or_else(|| "png".to_string())
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, input: &Path, output: &Path) -> Result<()> {
        let start = Instant::now();
        let format = self.format_for(output);

        let mut command = Command::new(&self.tool);
        command.arg(format!("-T{format}"));
        if let Some(layout) = &self.layout {
            command.arg(format!("-K{layout}"));
        }
        command.arg(input).arg("-o").arg(output);

        let result = command.output().map_err(|e| {
            Error::render_failed(format!("failed to start layout tool: {e}"))
                .with_operation("render::graphviz")
                .with_context("tool", self.tool.display().to_string())
                .set_source(e)
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(Error::render_failed(format!(
                "layout tool exited with {}",
                result.status
            ))
            .with_operation("render::graphviz")
            .with_context("tool", self.tool.display().to_string())
            .with_context("input", input.display().to_string())
            .with_context("stderr", stderr));
        }

        info!(
            output = %output.display(),
            "Graph rendering: {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

/// Find the layout tool: explicit path, then `$DEPVIEW_DOT`, then `PATH`,
/// then the usual Graphviz install folders on Windows.
pub fn locate_tool(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::tool_not_found(path.display().to_string())
                .with_operation("render::locate_tool"))
        };
    }

    if let Some(path) = env::var_os(TOOL_ENV).map(PathBuf::from) {
        if path.is_file() {
            return Ok(path);
        }
        debug!(path = %path.display(), "{TOOL_ENV} does not point to a file");
    }

    let exe = if cfg!(windows) { "dot.exe" } else { "dot" };
    let from_path = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|dir| dir.join(exe))
        .find(|candidate| candidate.is_file());
    if let Some(found) = from_path {
        return Ok(found);
    }

    windows_install_dirs()
        .into_iter()
        .map(|dir| dir.join(exe))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| Error::tool_not_found(exe).with_operation("render::locate_tool"))
}

/// `Program Files*/Graphviz*/bin`, newest version first.
fn windows_install_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = ["ProgramFiles", "ProgramFiles(x86)"]
        .iter()
        .filter_map(|key| env::var_os(key))
        .flat_map(|root| std::fs::read_dir(root).into_iter().flatten().flatten())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_ascii_lowercase()
                .starts_with("graphviz")
        })
        .map(|entry| entry.path().join("bin"))
        .collect();
    dirs.sort();
    dirs.reverse();
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use depview_error::ErrorKind;

    #[test]
    fn explicit_missing_tool_is_reported() {
        let err = locate_tool(Some(Path::new("/definitely/not/here/dot"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
        assert_eq!(err.operation(), "render::locate_tool");
    }

    #[test]
    fn format_follows_output_extension() {
        let renderer = GraphvizRenderer {
            tool: PathBuf::from("dot"),
            format: None,
            layout: None,
        };
        assert_eq!(renderer.format_for(Path::new("out.SVG")), "svg");
        assert_eq!(renderer.format_for(Path::new("out")), "png");

        let renderer = GraphvizRenderer {
            format: Some("pdf".to_string()),
            ..renderer
        };
        assert_eq!(renderer.format_for(Path::new("out.svg")), "pdf");
    }
}
