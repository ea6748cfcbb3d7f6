use std::sync::Arc;

use indexmap::IndexMap;

use crate::project::{Project, ProjectId};

/// The project with the greatest number of resolvable references.
#[derive(Debug, Clone)]
pub struct FanOut {
    pub project: Arc<Project>,
    pub count: usize,
}

/// An ordered view over projects, indexed by identifier.
///
/// Several solutions may wrap the same `Arc<Project>`s (the full solution and
/// the user's working selection). Every query here consults only this view's
/// own index, so an edge visible in one view may be absent in another.
#[derive(Debug, Clone, Default)]
pub struct Solution {
    projects: IndexMap<ProjectId, Arc<Project>>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_projects<I>(projects: I) -> Self
    where
        I: IntoIterator<Item = Arc<Project>>,
    {
        let mut solution = Self::new();
        for project in projects {
            solution.add(project);
        }
        solution
    }

    /// Append a project. Returns `false` if its identifier is already present.
    pub fn add(&mut self, project: Arc<Project>) -> bool {
        let id = project.id();
        if self.projects.contains_key(&id) {
            return false;
        }
        self.projects.insert(id, project);
        true
    }

    /// Remove a project, keeping the order of the rest.
    pub fn remove(&mut self, id: ProjectId) -> Option<Arc<Project>> {
        self.projects.shift_remove(&id)
    }

    /// Drop every project from this view. Projects shared with other
    /// solutions stay alive through their other owners.
    pub fn clear(&mut self) {
        self.projects.clear();
    }

    pub fn get_project(&self, id: ProjectId) -> Option<&Arc<Project>> {
        self.projects.get(&id)
    }

    pub fn contains(&self, id: ProjectId) -> bool {
        self.projects.contains_key(&id)
    }

    /// First project whose name matches, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<Project>> {
        self.projects
            .values()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn projects(&self) -> impl Iterator<Item = &Arc<Project>> {
        self.projects.values()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Targets of `project`'s references that exist in this solution, in
    /// declaration order.
    pub fn references_of<'a>(
        &'a self,
        project: &'a Project,
    ) -> impl Iterator<Item = &'a Arc<Project>> + 'a {
        project
            .references()
            .iter()
            .filter_map(move |id| self.get_project(*id))
    }

    /// References of `project` that this solution cannot resolve.
    pub fn dangling_references(&self, project: &Project) -> Vec<ProjectId> {
        project
            .references()
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect()
    }

    pub fn fan_out(&self, project: &Project) -> usize {
        self.references_of(project).count()
    }

    /// Project with the strictly greatest fan-out; the first one wins ties.
    /// `None` when no project has a resolvable reference.
    pub fn max_fan_out(&self) -> Option<FanOut> {
        let mut best: Option<FanOut> = None;
        for project in self.projects() {
            let count = self.fan_out(project);
            let current = best.as_ref().map_or(0, |b| b.count);
            if count > current {
                best = Some(FanOut {
                    project: Arc::clone(project),
                    count,
                });
            }
        }
        best
    }

    /// Resolvable (source, target) pairs in solution order.
    pub fn edges(&self) -> impl Iterator<Item = (&Arc<Project>, &Arc<Project>)> {
        self.projects()
            .flat_map(move |from| self.references_of(from).map(move |to| (from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, refs: &[ProjectId]) -> Arc<Project> {
        Arc::new(Project::new(ProjectId::random(), name).with_references(refs.iter().copied()))
    }

    #[test]
    fn add_is_noop_for_known_identifier() {
        let a = project("A", &[]);
        let mut solution = Solution::new();
        assert!(solution.add(Arc::clone(&a)));
        assert!(!solution.add(Arc::clone(&a)));
        assert_eq!(solution.len(), 1);
    }

    #[test]
    fn lookup_only_consults_own_index() {
        let a = project("A", &[]);
        let full = Solution::from_projects([Arc::clone(&a)]);
        let working = Solution::new();
        assert!(full.get_project(a.id()).is_some());
        assert!(working.get_project(a.id()).is_none());
    }

    #[test]
    fn clear_keeps_shared_projects_alive() {
        let a = project("A", &[]);
        let full = Solution::from_projects([Arc::clone(&a)]);
        let mut working = full.clone();
        working.clear();
        assert!(working.is_empty());
        assert_eq!(full.get_project(a.id()).map(|p| p.name()), Some("A"));
    }

    #[test]
    fn remove_preserves_order() {
        let (a, b, c) = (project("A", &[]), project("B", &[]), project("C", &[]));
        let mut solution = Solution::from_projects([a, Arc::clone(&b), c]);
        assert!(solution.remove(b.id()).is_some());
        let names: Vec<_> = solution.projects().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn max_fan_out_prefers_first_on_tie() {
        let c = project("C", &[]);
        let a = project("A", &[c.id()]);
        let b = project("B", &[c.id()]);
        let solution = Solution::from_projects([a, b, c]);
        let max = solution.max_fan_out().unwrap();
        assert_eq!(max.project.name(), "A");
        assert_eq!(max.count, 1);
    }

    #[test]
    fn dangling_references_are_not_edges() {
        let ghost = ProjectId::random();
        let a = project("A", &[ghost]);
        let solution = Solution::from_projects([Arc::clone(&a)]);
        assert_eq!(solution.fan_out(&a), 0);
        assert_eq!(solution.dangling_references(&a), vec![ghost]);
        assert!(solution.max_fan_out().is_none());
        assert_eq!(solution.edges().count(), 0);
    }

    #[test]
    fn find_by_name_ignores_case() {
        let solution = Solution::from_projects([project("Core.Data", &[])]);
        assert!(solution.find_by_name("core.data").is_some());
        assert!(solution.find_by_name("Core").is_none());
    }
}
