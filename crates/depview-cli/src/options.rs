//! Command-line options and their merge with the config file.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use depview_error::{Error, Result};
use depview_export::{ReportOptions, RendererConfig};

use crate::DepviewOptions;
use crate::config::DepviewConfig;

const RANKDIRS: [&str; 4] = ["TB", "LR", "BT", "RL"];

/// Which view the graph description covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphScope {
    /// Only the selected projects
    #[default]
    Selected,
    /// Every project in the solution
    All,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Solution file to load
    #[arg(short = 's', long = "solution", value_name = "SLN")]
    pub solution: PathBuf,

    /// Select a project by name or GUID (repeatable)
    #[arg(long = "select", value_name = "NAME|GUID", action = clap::ArgAction::Append)]
    pub select: Vec<String>,

    /// Select every project in the solution
    #[arg(long = "select-all")]
    pub select_all: bool,

    /// Print the projects of the solution with their fan-out
    #[arg(long)]
    pub list: bool,

    /// Only use dependencies written in the solution file
    #[arg(long = "no-project-files")]
    pub no_project_files: bool,

    /// Write the report for the whole solution
    #[arg(long = "report-all", value_name = "PATH", num_args = 0..=1)]
    pub report_all: Option<Option<PathBuf>>,

    /// Write the report for the selected projects
    #[arg(long = "report-selected", value_name = "PATH", num_args = 0..=1)]
    pub report_selected: Option<Option<PathBuf>>,

    /// Write "of <name>" instead of "of<name>" in the report summary
    #[arg(long = "spaced-summary")]
    pub spaced_summary: bool,

    /// Write a DOT graph description to this path
    #[arg(short = 'g', long = "graph", value_name = "DOT")]
    pub graph: Option<PathBuf>,

    /// Projects covered by the graph
    #[arg(long = "graph-scope", value_enum, default_value_t = GraphScope::Selected)]
    pub graph_scope: GraphScope,

    /// Draw references leaving the selection as dashed nodes
    #[arg(long = "show-external")]
    pub show_external: bool,

    /// Highlight the project with the most references
    #[arg(long = "highlight-max")]
    pub highlight_max: bool,

    /// Layout direction (TB, LR, BT, RL)
    #[arg(long = "rankdir", value_name = "DIR")]
    pub rankdir: Option<String>,

    /// Render the graph to an image with Graphviz
    #[arg(short = 'r', long = "render", value_name = "IMAGE")]
    pub render: Option<PathBuf>,

    /// Path to the Graphviz `dot` executable
    #[arg(long = "dot-tool", value_name = "PATH")]
    pub dot_tool: Option<PathBuf>,

    /// Image format passed to Graphviz (defaults to the image extension)
    #[arg(long = "format", value_name = "FMT")]
    pub format: Option<String>,
}

impl RunArgs {
    /// Fill in everything the command line left open from `config`.
    pub fn into_options(self, config: DepviewConfig) -> Result<DepviewOptions> {
        let rankdir = self
            .rankdir
            .unwrap_or(config.graph.rankdir)
            .to_ascii_uppercase();
        if !RANKDIRS.contains(&rankdir.as_str()) {
            return Err(Error::invalid_argument(format!(
                "rankdir must be one of {}, got '{rankdir}'",
                RANKDIRS.join(", ")
            ))
            .with_operation("options::into_options"));
        }

        let graph = self
            .graph
            .or_else(|| self.render.as_ref().map(|image| image.with_extension("dot")));

        Ok(DepviewOptions {
            solution: self.solution,
            select: self.select,
            select_all: self.select_all,
            list: self.list,
            read_project_files: !self.no_project_files,
            report_all: self.report_all.map(|p| p.unwrap_or(config.report.all)),
            report_selected: self
                .report_selected
                .map(|p| p.unwrap_or(config.report.selected)),
            report: ReportOptions {
                spaced_summary: self.spaced_summary || config.report.spaced_summary,
            },
            graph,
            graph_scope: self.graph_scope,
            show_external: self.show_external || config.graph.show_external,
            highlight_max: self.highlight_max,
            rankdir,
            render: self.render,
            renderer: RendererConfig {
                tool: self.dot_tool.or(config.renderer.tool),
                format: self.format.or(config.renderer.format),
                layout: config.renderer.layout,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depview_error::ErrorKind;

    fn args() -> RunArgs {
        RunArgs {
            solution: PathBuf::from("All.sln"),
            ..RunArgs::default()
        }
    }

    #[test]
    fn bare_report_flags_use_configured_names() {
        let opts = RunArgs {
            report_all: Some(None),
            report_selected: Some(Some(PathBuf::from("mine.txt"))),
            ..args()
        }
        .into_options(DepviewConfig::default())
        .unwrap();
        assert_eq!(opts.report_all, Some(PathBuf::from("all_dependencies.txt")));
        assert_eq!(opts.report_selected, Some(PathBuf::from("mine.txt")));
    }

    #[test]
    fn render_implies_graph_next_to_image() {
        let opts = RunArgs {
            render: Some(PathBuf::from("out/deps.png")),
            ..args()
        }
        .into_options(DepviewConfig::default())
        .unwrap();
        assert_eq!(opts.graph, Some(PathBuf::from("out/deps.dot")));
    }

    #[test]
    fn command_line_overrides_config() {
        let mut config = DepviewConfig::default();
        config.renderer.format = Some("svg".to_string());
        config.graph.rankdir = "LR".to_string();
        let opts = RunArgs {
            format: Some("pdf".to_string()),
            ..args()
        }
        .into_options(config)
        .unwrap();
        assert_eq!(opts.renderer.format.as_deref(), Some("pdf"));
        assert_eq!(opts.rankdir, "LR");
    }

    #[test]
    fn invalid_rankdir_is_rejected() {
        let err = RunArgs {
            rankdir: Some("diagonal".to_string()),
            ..args()
        }
        .into_options(DepviewConfig::default())
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
