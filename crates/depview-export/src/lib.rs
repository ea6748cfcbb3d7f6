//! Exporting solution views: the text dependency report, the DOT graph
//! description, and handing that description to an external renderer.
//!
//! # Module Structure
//!
//! - [`report`]: numbered text report with the max fan-out summary
//! - [`graph`]: DOT graph description
//! - [`dot`]: DOT builder and escaping helpers
//! - [`extension`]: graph extensions and their registry
//! - [`writer`]: atomic file output
//! - [`render`]: Graphviz invocation

pub mod dot;
pub mod extension;
pub mod graph;
pub mod render;
pub mod report;
pub mod writer;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use depview_core::Solution;
use depview_error::Result;

pub use dot::DotBuilder;
pub use extension::{ExtensionRegistry, GraphExtension, MaxFanOutHighlight};
pub use graph::{GraphOptions, node_id};
pub use render::{GraphvizRenderer, Renderer, RendererConfig, locate_tool};
pub use report::{ReportOptions, render_report};
pub use writer::write_atomic;

/// Produces reports and graph descriptions for any solution view.
#[derive(Default, Clone)]
pub struct GraphExporter {
    report_options: ReportOptions,
    graph_options: GraphOptions,
    extensions: Vec<Arc<dyn GraphExtension>>,
}

impl GraphExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report_options(mut self, options: ReportOptions) -> Self {
        self.report_options = options;
        self
    }

    pub fn with_graph_options(mut self, options: GraphOptions) -> Self {
        self.graph_options = options;
        self
    }

    /// Composition point for [`ExtensionRegistry::attach_extensions`].
    pub fn add_extension(&mut self, extension: Arc<dyn GraphExtension>) {
        self.extensions.push(extension);
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn export_report(&self, solution: &Solution) -> String {
        render_report(solution, &self.report_options)
    }

    /// DOT description of `solution`. `context` is the solution the view was
    /// selected from; it is only consulted to draw external nodes.
    pub fn export_graph(&self, solution: &Solution, context: Option<&Solution>) -> String {
        graph::render_graph(solution, context, &self.graph_options, &self.extensions)
    }

    pub fn write_report(&self, solution: &Solution, path: &Path) -> Result<()> {
        let start = Instant::now();
        write_atomic(path, &self.export_report(solution))
            .map_err(|e| e.with_operation("export::write_report"))?;
        info!(
            path = %path.display(),
            projects = solution.len(),
            "Report export: {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    pub fn write_graph(
        &self,
        solution: &Solution,
        context: Option<&Solution>,
        path: &Path,
    ) -> Result<()> {
        let start = Instant::now();
        write_atomic(path, &self.export_graph(solution, context))
            .map_err(|e| e.with_operation("export::write_graph"))?;
        info!(
            path = %path.display(),
            projects = solution.len(),
            "Graph export: {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
