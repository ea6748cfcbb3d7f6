//! Turning loaded project descriptors into a [`Solution`].
//!
//! References come from two places: the solution's own `ProjectDependencies`
//! sections and the `<ProjectReference>` items of each project file. Both are
//! merged (solution entries first) before the project is frozen. Nothing here
//! fails: problems are reported as [`ResolutionWarning`]s and unresolved
//! identifiers stay on the project as dangling references.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::loader::ProjectDescriptor;
use crate::path;
use crate::project::{Project, ProjectId};
use crate::project_file::read_project_references;
use crate::solution::Solution;
use crate::ErrorKind;

/// Extensions of project files the resolver knows how to read.
const PROJECT_FILE_EXTENSIONS: [&str; 6] = ["csproj", "vbproj", "fsproj", "vcxproj", "sqlproj", "proj"];

/// A non-fatal problem found while resolving references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// A reference names an identifier that is not in the solution.
    DanglingReference { project: String, target: ProjectId },
    /// A path-only reference does not match any project in the solution.
    UnresolvedInclude { project: String, include: PathBuf },
    /// The project file could not be read.
    ProjectFileUnreadable { project: String, path: PathBuf, reason: String },
    /// The project file is not well-formed XML.
    ProjectFileMalformed { project: String, path: PathBuf, reason: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference { project, target } => {
                write!(f, "{project}: reference {target} is not part of the solution")
            }
            Self::UnresolvedInclude { project, include } => {
                write!(f, "{project}: no project in the solution at {}", include.display())
            }
            Self::ProjectFileUnreadable { project, path, reason } => {
                write!(f, "{project}: cannot read {}: {reason}", path.display())
            }
            Self::ProjectFileMalformed { project, path, reason } => {
                write!(f, "{project}: malformed project file {}: {reason}", path.display())
            }
        }
    }
}

/// Output of [`DependencyResolver::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub solution: Solution,
    pub warnings: Vec<ResolutionWarning>,
}

impl Resolution {
    pub fn into_solution(self) -> Solution {
        self.solution
    }
}

#[derive(Debug, Clone)]
pub struct DependencyResolver {
    read_project_files: bool,
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self {
            read_project_files: true,
        }
    }
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to open each project file and merge its `<ProjectReference>`s.
    /// When disabled only the solution's inline dependencies are used.
    pub fn with_project_files(mut self, enabled: bool) -> Self {
        self.read_project_files = enabled;
        self
    }

    pub fn resolve(&self, descriptors: Vec<ProjectDescriptor>) -> Resolution {
        let start = Instant::now();
        let known: HashSet<ProjectId> = descriptors.iter().map(|d| d.id).collect();
        // First declaration wins, as with duplicate ids in the loader.
        let mut by_path: HashMap<String, ProjectId> = HashMap::with_capacity(descriptors.len());
        for d in &descriptors {
            by_path.entry(path::match_key(&d.path)).or_insert(d.id);
        }

        let mut solution = Solution::new();
        let mut warnings = Vec::new();

        for descriptor in descriptors {
            let mut references: IndexSet<ProjectId> =
                descriptor.inline_references.iter().copied().collect();
            if self.read_project_files && is_project_file(&descriptor.path) {
                references.extend(self.file_references(&descriptor, &by_path, &mut warnings));
            }

            for target in references.iter().filter(|id| !known.contains(*id)) {
                debug!(project = %descriptor.name, %target, "dangling reference");
                warnings.push(ResolutionWarning::DanglingReference {
                    project: descriptor.name.clone(),
                    target: *target,
                });
            }

            let project = Project::new(descriptor.id, descriptor.name)
                .with_path(descriptor.path)
                .with_kind(descriptor.kind)
                .with_references(references);
            solution.add(Arc::new(project));
        }

        info!(
            projects = solution.len(),
            warnings = warnings.len(),
            "Reference resolution: {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Resolution { solution, warnings }
    }

    fn file_references(
        &self,
        descriptor: &ProjectDescriptor,
        by_path: &HashMap<String, ProjectId>,
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Vec<ProjectId> {
        let decls = match read_project_references(&descriptor.path) {
            Ok(decls) => decls,
            Err(e) => {
                warn!(project = %descriptor.name, error = %e, "project file skipped");
                let (project, path, reason) = (
                    descriptor.name.clone(),
                    descriptor.path.clone(),
                    e.message().to_string(),
                );
                warnings.push(if e.kind() == ErrorKind::InvalidFormat {
                    ResolutionWarning::ProjectFileMalformed { project, path, reason }
                } else {
                    ResolutionWarning::ProjectFileUnreadable { project, path, reason }
                });
                return Vec::new();
            }
        };

        let mut ids = Vec::with_capacity(decls.len());
        for decl in decls {
            if let Some(id) = decl.id {
                ids.push(id);
                continue;
            }
            let Some(include) = decl.include else {
                continue;
            };
            match by_path.get(&path::match_key(&include)) {
                Some(id) => ids.push(*id),
                None => warnings.push(ResolutionWarning::UnresolvedInclude {
                    project: descriptor.name.clone(),
                    include,
                }),
            }
        }
        ids
    }
}

fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PROJECT_FILE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
