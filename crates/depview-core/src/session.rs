//! The two views produced by one load: the full solution and the user's
//! working selection.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::loader::SolutionLoader;
use crate::project::ProjectId;
use crate::resolver::{DependencyResolver, ResolutionWarning};
use crate::solution::Solution;
use crate::{Error, Result};

/// Full and working solutions over the same load pass.
///
/// The working solution starts empty and grows through [`Session::select`].
/// Loading again replaces both views; nothing carries over between loads.
#[derive(Debug, Clone, Default)]
pub struct Session {
    full: Solution,
    working: Solution,
    warnings: Vec<ResolutionWarning>,
}

impl Session {
    pub fn new(full: Solution) -> Self {
        Self {
            full,
            working: Solution::new(),
            warnings: Vec::new(),
        }
    }

    /// Load a solution file and resolve its references.
    pub fn load(path: &Path, resolver: &DependencyResolver) -> Result<Self> {
        let descriptors = SolutionLoader::new().load_file(path)?;
        let resolution = resolver.resolve(descriptors);
        info!(
            path = %path.display(),
            projects = resolution.solution.len(),
            "session loaded"
        );
        Ok(Self {
            full: resolution.solution,
            working: Solution::new(),
            warnings: resolution.warnings,
        })
    }

    pub fn full(&self) -> &Solution {
        &self.full
    }

    pub fn working(&self) -> &Solution {
        &self.working
    }

    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.warnings
    }

    /// Add a project of the full solution to the working selection.
    /// Returns `false` if it was already selected.
    pub fn select(&mut self, id: ProjectId) -> Result<bool> {
        let project = self.full.get_project(id).ok_or_else(|| {
            Error::project_not_found(id.to_string()).with_operation("session::select")
        })?;
        Ok(self.working.add(Arc::clone(project)))
    }

    /// Select by identifier or, failing that, by project name.
    pub fn select_by_key(&mut self, key: &str) -> Result<bool> {
        let id = ProjectId::parse(key)
            .filter(|id| self.full.contains(*id))
            .or_else(|| self.full.find_by_name(key).map(|p| p.id()))
            .ok_or_else(|| {
                Error::project_not_found(key).with_operation("session::select_by_key")
            })?;
        self.select(id)
    }

    pub fn deselect(&mut self, id: ProjectId) -> bool {
        self.working.remove(id).is_some()
    }

    /// Select every project, keeping already-selected ones in place.
    pub fn select_all(&mut self) {
        for project in self.full.projects() {
            self.working.add(Arc::clone(project));
        }
    }

    pub fn clear_selection(&mut self) {
        self.working.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;
    use crate::ErrorKind;

    fn session() -> (Session, Vec<ProjectId>) {
        let c = Project::new(ProjectId::random(), "C");
        let b = Project::new(ProjectId::random(), "B").with_references([c.id()]);
        let a = Project::new(ProjectId::random(), "A").with_references([b.id(), c.id()]);
        let ids = vec![a.id(), b.id(), c.id()];
        let full = Solution::from_projects([a, b, c].map(Arc::new));
        (Session::new(full), ids)
    }

    #[test]
    fn working_view_starts_empty() {
        let (session, _) = session();
        assert_eq!(session.full().len(), 3);
        assert!(session.working().is_empty());
    }

    #[test]
    fn selection_shares_projects_with_full_view() {
        let (mut session, ids) = session();
        assert!(session.select(ids[0]).unwrap());
        assert!(!session.select(ids[0]).unwrap());
        let in_full = session.full().get_project(ids[0]).unwrap();
        let in_working = session.working().get_project(ids[0]).unwrap();
        assert!(Arc::ptr_eq(in_full, in_working));
    }

    #[test]
    fn selecting_unknown_project_fails() {
        let (mut session, _) = session();
        let err = session.select_by_key("Nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProjectNotFound);
        assert!(session.working().is_empty());
    }

    #[test]
    fn select_by_name_and_deselect() {
        let (mut session, ids) = session();
        session.select_by_key("b").unwrap();
        session.select_by_key(&ids[2].to_string()).unwrap();
        assert_eq!(session.working().len(), 2);
        assert!(session.deselect(ids[1]));
        assert!(!session.deselect(ids[1]));
        assert_eq!(session.working().len(), 1);
    }

    #[test]
    fn select_all_then_clear() {
        let (mut session, _) = session();
        session.select_all();
        assert_eq!(session.working().len(), 3);
        session.clear_selection();
        assert!(session.working().is_empty());
        assert_eq!(session.full().len(), 3);
    }
}
