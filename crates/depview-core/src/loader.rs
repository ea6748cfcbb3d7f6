//! Solution file (`.sln`) parsing.
//!
//! The loader only discovers projects: identifier, name, path, project type
//! and any dependencies written inline in a `ProjectDependencies` section.
//! Reading the per-project files and resolving references is the resolver's
//! job.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::path;
use crate::project::ProjectId;
use crate::{Error, Result};

const SOLUTION_HEADER: &str = "Microsoft Visual Studio Solution File";

/// Project type GUID of solution folders, which group projects but are not
/// buildable themselves.
pub const SOLUTION_FOLDER_KIND: Uuid = Uuid::from_u128(0x2150E333_8FDC_42A3_9474_1A3956D46DE8);

static PROJECT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^Project\("\{?(?P<kind>[0-9A-Fa-f-]+)\}?"\)\s*=\s*"(?P<name>[^"]*)"\s*,\s*"(?P<path>[^"]*)"\s*,\s*"(?P<id>[^"]*)""#,
    )
    .expect("project line pattern is valid")
});

static DEPENDENCY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<id>\{?[0-9A-Fa-f-]+\}?)\s*=\s*\{?[0-9A-Fa-f-]+\}?$")
        .expect("dependency line pattern is valid")
});

/// A project as declared in the solution file, before reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub id: ProjectId,
    pub name: String,
    /// Project file path, resolved against the solution's directory.
    pub path: PathBuf,
    /// Project type GUID (C#, VB, C++, ...).
    pub kind: Option<Uuid>,
    /// Dependencies listed in the solution's `ProjectDependencies` section.
    pub inline_references: Vec<ProjectId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Project,
    Dependencies,
    Skipped,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SolutionLoader;

impl SolutionLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a solution file from disk.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<ProjectDescriptor>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            let display = path.display().to_string();
            let err = match e.kind() {
                std::io::ErrorKind::NotFound => Error::file_not_found(display),
                _ => Error::from(e).with_context("path", display),
            };
            err.with_operation("loader::load_file")
        })?;
        self.load(&text, path)
    }

    /// Parse the verbatim text of a solution file. `source_path` is the file
    /// the text came from; project paths are resolved against its directory.
    pub fn load(&self, raw_text: &str, source_path: &Path) -> Result<Vec<ProjectDescriptor>> {
        let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);
        let mut lines = text.lines().map(str::trim);

        let header = lines.by_ref().find(|line| !line.is_empty());
        if !header.is_some_and(|line| line.starts_with(SOLUTION_HEADER)) {
            return Err(Error::invalid_format(
                "document does not start with a Visual Studio solution header",
            )
            .with_operation("loader::load")
            .with_context("path", source_path.display().to_string()));
        }

        let base_dir = source_path.parent().unwrap_or_else(|| Path::new(""));
        let mut descriptors: Vec<ProjectDescriptor> = Vec::new();
        let mut section = Section::Outside;

        for line in lines {
            if line.starts_with("Project(") {
                section = match parse_project_line(line, base_dir) {
                    Some(descriptor) if descriptor.kind == Some(SOLUTION_FOLDER_KIND) => {
                        debug!(name = %descriptor.name, "skipping solution folder");
                        Section::Skipped
                    }
                    Some(descriptor) if descriptors.iter().any(|d| d.id == descriptor.id) => {
                        warn!(id = %descriptor.id, name = %descriptor.name, "duplicate project identifier, keeping first declaration");
                        Section::Skipped
                    }
                    Some(descriptor) => {
                        descriptors.push(descriptor);
                        Section::Project
                    }
                    None => {
                        warn!(line, "skipping malformed project declaration");
                        Section::Skipped
                    }
                };
                continue;
            }

            match (section, line) {
                (_, "EndProject") => section = Section::Outside,
                (Section::Project, l) if l.starts_with("ProjectSection(ProjectDependencies)") => {
                    section = Section::Dependencies;
                }
                (Section::Dependencies, "EndProjectSection") => section = Section::Project,
                (Section::Dependencies, l) => {
                    let Some(current) = descriptors.last_mut() else {
                        continue;
                    };
                    match parse_dependency_line(l) {
                        Some(id) => current.inline_references.push(id),
                        None => warn!(line = l, project = %current.name, "skipping malformed dependency entry"),
                    }
                }
                _ => {}
            }
        }

        info!(
            path = %source_path.display(),
            projects = descriptors.len(),
            "solution loaded"
        );
        Ok(descriptors)
    }
}

fn parse_project_line(line: &str, base_dir: &Path) -> Option<ProjectDescriptor> {
    let caps = PROJECT_LINE.captures(line)?;
    let id = ProjectId::parse(&caps["id"])?;
    let kind = Uuid::parse_str(&caps["kind"]).ok();
    let raw_path = &caps["path"];
    Some(ProjectDescriptor {
        id,
        name: caps["name"].to_string(),
        path: path::resolve(base_dir, &path::from_manifest(raw_path)),
        kind,
        inline_references: Vec::new(),
    })
}

fn parse_dependency_line(line: &str) -> Option<ProjectId> {
    let caps = DEPENDENCY_LINE.captures(line)?;
    ProjectId::parse(&caps["id"])
}
