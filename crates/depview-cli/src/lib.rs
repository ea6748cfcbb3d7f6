//! depview command-line interface.
//!
pub mod config;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use depview_error::Result;
use depview_export::{ReportOptions, RendererConfig};

pub use config::DepviewConfig;
pub use options::{GraphScope, RunArgs};
pub use pipeline::process_solution;

/// Options for running depview.
#[derive(Debug, Clone)]
pub struct DepviewOptions {
    pub solution: PathBuf,
    pub select: Vec<String>,
    pub select_all: bool,
    pub list: bool,
    pub read_project_files: bool,
    pub report_all: Option<PathBuf>,
    pub report_selected: Option<PathBuf>,
    pub report: ReportOptions,
    pub graph: Option<PathBuf>,
    pub graph_scope: GraphScope,
    pub show_external: bool,
    pub highlight_max: bool,
    pub rankdir: String,
    pub render: Option<PathBuf>,
    pub renderer: RendererConfig,
}

impl DepviewOptions {
    /// Whether any file output was requested.
    pub fn has_exports(&self) -> bool {
        self.report_all.is_some()
            || self.report_selected.is_some()
            || self.graph.is_some()
            || self.render.is_some()
    }
}

/// Main entry point. Returns text meant for stdout, if any.
pub fn run_main(opts: &DepviewOptions) -> Result<Option<String>> {
    process_solution(opts)
}
