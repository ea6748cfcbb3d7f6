//! Graph extensions and the registry used to attach them to an exporter.
//!
//! Extensions decorate the DOT output (graph attributes, per-node
//! attributes). How they are discovered is up to the caller; the registry is
//! only the composition point.

use std::sync::Arc;

use depview_core::{Project, Solution};

use crate::GraphExporter;

/// Object-safe hook into DOT generation.
pub trait GraphExtension: Send + Sync {
    /// Unique name, used to avoid registering the same extension twice.
    fn name(&self) -> &'static str;

    /// Extra graph-level attributes.
    fn graph_attrs(&self, _solution: &Solution) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Extra attributes for one node. Later extensions win on duplicate keys.
    fn node_attrs(&self, _solution: &Solution, _project: &Project) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Ordered set of extensions, keyed by name.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn GraphExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension. Returns `false` if one with the same name is
    /// already registered.
    pub fn register_extension(&mut self, extension: Arc<dyn GraphExtension>) -> bool {
        if self.get(extension.name()).is_some() {
            return false;
        }
        self.extensions.push(extension);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn GraphExtension>> {
        self.extensions.iter().find(|e| e.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Hand every registered extension to `target`.
    pub fn attach_extensions(&self, target: &mut GraphExporter) {
        for extension in &self.extensions {
            target.add_extension(Arc::clone(extension));
        }
    }
}

/// Fills the node with the greatest fan-out in the exported view.
pub struct MaxFanOutHighlight {
    color: String,
}

impl MaxFanOutHighlight {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }
}

impl Default for MaxFanOutHighlight {
    fn default() -> Self {
        Self::new("#f4b183")
    }
}

impl GraphExtension for MaxFanOutHighlight {
    fn name(&self) -> &'static str {
        "max-fan-out"
    }

    fn node_attrs(&self, solution: &Solution, project: &Project) -> Vec<(String, String)> {
        match solution.max_fan_out() {
            Some(max) if max.project.id() == project.id() => vec![
                ("fillcolor".to_string(), self.color.clone()),
                ("penwidth".to_string(), "2".to_string()),
            ],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_rejects_duplicate_names() {
        let mut registry = ExtensionRegistry::new();
        assert!(registry.register_extension(Arc::new(MaxFanOutHighlight::default())));
        assert!(!registry.register_extension(Arc::new(MaxFanOutHighlight::new("red"))));
        assert_eq!(registry.names(), vec!["max-fan-out"]);
    }

    #[test]
    fn attach_hands_extensions_to_exporter() {
        let mut registry = ExtensionRegistry::new();
        registry.register_extension(Arc::new(MaxFanOutHighlight::default()));
        let mut exporter = GraphExporter::new();
        registry.attach_extensions(&mut exporter);
        assert_eq!(exporter.extension_count(), 1);
    }
}
