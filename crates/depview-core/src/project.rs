use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexSet;
use uuid::Uuid;

use crate::{Error, Result};

/// Identifier of a project inside a solution.
///
/// Solution files write these as braced upper-case GUIDs; parsing accepts any
/// case with or without braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Fresh random identifier, used when synthesising projects in tests.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text
            .trim()
            .trim_start_matches('{')
            .trim_end_matches('}');
        Uuid::parse_str(trimmed).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// 32 lower-case hex digits, suitable as a graph node id.
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::invalid_argument(format!("'{s}' is not a project identifier"))
                .with_operation("project::parse_id")
        })
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated().to_string().to_uppercase())
    }
}

/// A single buildable unit of a solution.
///
/// `references` keeps declaration order and may contain identifiers that are
/// not part of any loaded solution; whether a reference is an edge is decided
/// by the solution that is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
    path: PathBuf,
    kind: Option<Uuid>,
    references: IndexSet<ProjectId>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: PathBuf::new(),
            kind: None,
            references: IndexSet::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_kind(mut self, kind: Option<Uuid>) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_references<I>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = ProjectId>,
    {
        self.references.extend(references);
        self
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project type GUID from the solution file (C#, VB, C++, ...).
    pub fn kind(&self) -> Option<&Uuid> {
        self.kind.as_ref()
    }

    /// Declared references, in declaration order, unresolved.
    pub fn references(&self) -> &IndexSet<ProjectId> {
        &self.references
    }

    pub fn references_project(&self, id: ProjectId) -> bool {
        self.references.contains(&id)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_braced_and_bare_guids() {
        let braced = ProjectId::parse("{6ec3ee1d-3c4e-46dd-8f32-0cc8e7565705}").unwrap();
        let bare = ProjectId::parse("6EC3EE1D-3C4E-46DD-8F32-0CC8E7565705").unwrap();
        assert_eq!(braced, bare);
        assert_eq!(
            braced.to_string(),
            "{6EC3EE1D-3C4E-46DD-8F32-0CC8E7565705}"
        );
        assert_eq!(braced.simple(), "6ec3ee1d3c4e46dd8f320cc8e7565705");
    }

    #[test]
    fn rejects_garbage_ids() {
        assert!(ProjectId::parse("not-a-guid").is_none());
        assert!("{1234}".parse::<ProjectId>().is_err());
    }

    #[test]
    fn references_keep_order_and_drop_duplicates() {
        let (a, b) = (ProjectId::random(), ProjectId::random());
        let project = Project::new(ProjectId::random(), "App").with_references([b, a, b]);
        let refs: Vec<_> = project.references().iter().copied().collect();
        assert_eq!(refs, vec![b, a]);
    }
}
