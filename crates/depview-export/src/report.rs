//! Plain-text dependency report.
//!
//! ```text
//! project :1  App
//! --dependencies :
//! 1--1--Data
//! 1--2--Core
//!
//! project :2  Core
//! --dependencies :
//!
//! Max project refs is 2 ofApp
//! ```
//!
//! Only references resolvable in the reported solution are listed, so a report
//! over a selection shows the edges internal to that selection.

use std::fmt::Write;

use depview_core::Solution;

/// Options for the text report.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Put a space between "of" and the project name in the summary line.
    /// Off by default: existing consumers parse `of<name>`.
    pub spaced_summary: bool,
}

pub fn render_report(solution: &Solution, options: &ReportOptions) -> String {
    let mut out = String::new();

    for (index, project) in solution.projects().enumerate() {
        let index = index + 1;
        let _ = writeln!(out, "project :{index}  {}", project.name());
        out.push_str("--dependencies :\n");
        for (ref_index, target) in solution.references_of(project).enumerate() {
            let _ = writeln!(out, "{index}--{}--{}", ref_index + 1, target.name());
        }
        out.push('\n');
    }

    if let Some(max) = solution.max_fan_out() {
        let sep = if options.spaced_summary { " " } else { "" };
        let _ = writeln!(
            out,
            "Max project refs is {} of{sep}{}",
            max.count,
            max.project.name()
        );
    }

    out
}
