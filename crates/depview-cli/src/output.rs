//! Output generation (listing, reports, graph, image).

use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use depview_core::{Session, Solution};
use depview_error::Result;
use depview_export::{
    ExtensionRegistry, GraphExporter, GraphOptions, GraphvizRenderer, MaxFanOutHighlight, Renderer,
};

use crate::{DepviewOptions, GraphScope};

/// Build the exporter with the configured options and extensions attached.
pub fn build_exporter(opts: &DepviewOptions) -> GraphExporter {
    let mut registry = ExtensionRegistry::new();
    if opts.highlight_max {
        registry.register_extension(Arc::new(MaxFanOutHighlight::default()));
    }

    let mut exporter = GraphExporter::new()
        .with_report_options(opts.report.clone())
        .with_graph_options(GraphOptions {
            rankdir: opts.rankdir.clone(),
            show_external: opts.show_external,
            ..GraphOptions::default()
        });
    registry.attach_extensions(&mut exporter);
    exporter
}

/// One line per project: position, name, GUID and fan-out.
pub fn render_listing(solution: &Solution) -> String {
    let mut out = String::new();
    for (index, project) in solution.projects().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {}  {}  refs={}",
            index + 1,
            project.name(),
            project.id(),
            solution.fan_out(project)
        );
    }
    out
}

/// Write the requested reports, graph and image.
pub fn write_outputs(opts: &DepviewOptions, session: &Session) -> Result<()> {
    let exporter = build_exporter(opts);

    if let Some(path) = &opts.report_all {
        exporter.write_report(session.full(), path)?;
        info!(path = %path.display(), "all dependencies written");
    }
    if let Some(path) = &opts.report_selected {
        if session.working().is_empty() {
            warn!("no projects selected; selected report is empty");
        }
        exporter.write_report(session.working(), path)?;
        info!(path = %path.display(), "selected dependencies written");
    }

    let Some(graph_path) = &opts.graph else {
        return Ok(());
    };
    let (view, context) = match opts.graph_scope {
        GraphScope::Selected => (session.working(), Some(session.full())),
        GraphScope::All => (session.full(), None),
    };
    if view.is_empty() {
        warn!("graph view has no projects; use --select or --graph-scope all");
    }
    exporter.write_graph(view, context, graph_path)?;

    if let Some(image) = &opts.render {
        render_image(opts, graph_path, image)?;
    }
    Ok(())
}

fn render_image(opts: &DepviewOptions, graph: &Path, image: &Path) -> Result<()> {
    let renderer = GraphvizRenderer::new(opts.renderer.clone())?;
    renderer.render(graph, image)?;
    info!(image = %image.display(), "image rendered");
    Ok(())
}
