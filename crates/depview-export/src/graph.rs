//! DOT graph description of a solution view.

use std::collections::HashSet;
use std::sync::Arc;

use depview_core::{Project, ProjectId, Solution};

use crate::dot::DotBuilder;
use crate::extension::GraphExtension;

/// Options for graph description output.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Graph name written after `digraph`.
    pub name: String,
    /// Layout direction: TB, LR, BT or RL.
    pub rankdir: String,
    /// Draw references into projects that exist only in the context solution
    /// as dashed external nodes.
    pub show_external: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            name: "solution".to_string(),
            rankdir: "TB".to_string(),
            show_external: false,
        }
    }
}

/// Stable DOT identifier of a project.
pub fn node_id(id: ProjectId) -> String {
    format!("p_{}", id.simple())
}

pub(crate) fn render_graph(
    solution: &Solution,
    context: Option<&Solution>,
    options: &GraphOptions,
    extensions: &[Arc<dyn GraphExtension>],
) -> String {
    let mut edges: Vec<(ProjectId, ProjectId, bool)> = Vec::new();
    let mut seen_edges: HashSet<(ProjectId, ProjectId)> = HashSet::new();
    let mut external: Vec<&Arc<Project>> = Vec::new();

    for project in solution.projects() {
        for target in project.references() {
            let is_external = if solution.contains(*target) {
                false
            } else if let Some(ctx_target) = context
                .filter(|_| options.show_external)
                .and_then(|ctx| ctx.get_project(*target))
            {
                if !external.iter().any(|p| p.id() == ctx_target.id()) {
                    external.push(ctx_target);
                }
                true
            } else {
                continue;
            };
            if seen_edges.insert((project.id(), *target)) {
                edges.push((project.id(), *target, is_external));
            }
        }
    }

    let mut dot = DotBuilder::new(&options.name);
    dot.attr("rankdir", &options.rankdir);
    for extension in extensions {
        for (key, value) in extension.graph_attrs(solution) {
            dot.attr(&key, &value);
        }
    }
    dot.node_style(
        r##"shape=box, style="rounded,filled", fillcolor="#f0f0f0", fontname="Helvetica""##,
    )
    .edge_style(r##"color="#888888", arrowsize=0.7"##)
    .blank();

    for project in solution.projects() {
        let mut attrs = vec![("label".to_string(), project.name().to_string())];
        for extension in extensions {
            for (key, value) in extension.node_attrs(solution, project) {
                upsert(&mut attrs, key, value);
            }
        }
        dot.node_full(&node_id(project.id()), &attrs);
    }
    for project in &external {
        dot.node_full(
            &node_id(project.id()),
            &[("label", project.name()), ("style", "rounded,dashed")],
        );
    }

    if !edges.is_empty() {
        dot.blank();
    }
    for (from, to, is_external) in edges {
        if is_external {
            dot.edge_with_attrs(&node_id(from), &node_id(to), &[("style", "dashed")]);
        } else {
            dot.edge(&node_id(from), &node_id(to));
        }
    }

    dot.build()
}

fn upsert(attrs: &mut Vec<(String, String)>, key: String, value: String) {
    match attrs.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => attrs.push((key, value)),
    }
}
