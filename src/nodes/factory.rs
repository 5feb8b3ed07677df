//! Node factory system with self-registration and metadata

use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::node::FunctionNode;

/// Hierarchical category system for organizing node kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the full path as a slice
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get display string for UI
    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }

    /// Get standard function category
    pub fn function() -> Self {
        Self::new(&["Function"])
    }
}

/// Identity and cataloging data for a node kind
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
}

impl NodeMetadata {
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            category,
        }
    }
}

/// Factory trait implemented by every registrable node kind
pub trait NodeFactory {
    /// Get the node kind's metadata
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Create a fresh node instance
    fn create() -> Box<dyn FunctionNode>
    where
        Self: Sized;
}

type NodeCreator = fn() -> Box<dyn FunctionNode>;
type MetadataProvider = fn() -> NodeMetadata;

/// Registry mapping node type names to their factories
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
    categories: HashMap<NodeCategory, Vec<String>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            creators: BTreeMap::new(),
            metadata_providers: BTreeMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Register a node factory
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();
        debug!("registering node type {}", node_type);

        self.creators.insert(node_type.clone(), T::create);
        self.metadata_providers.insert(node_type.clone(), T::metadata);
        self.categories
            .entry(metadata.category.clone())
            .or_default()
            .push(node_type);
    }

    /// Create a node by type name
    pub fn create_node(&self, node_type: &str) -> Option<Box<dyn FunctionNode>> {
        self.creators.get(node_type).map(|creator| creator())
    }

    /// Get metadata for a node type without creating the node
    pub fn get_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }

    /// Get all available node types
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(|s| s.as_str()).collect()
    }

    /// Get nodes in a specific category
    pub fn nodes_in_category(&self, category: &NodeCategory) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|nodes| nodes.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register::<crate::nodes::function::switch::SwitchNodeFactory>();
        registry.register::<crate::nodes::function::select::SelectNodeFactory>();
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_knows_the_function_nodes() {
        let registry = NodeRegistry::default();
        assert_eq!(registry.node_types(), vec!["Select", "Switch"]);
        assert_eq!(
            registry.nodes_in_category(&NodeCategory::function()).len(),
            2
        );
    }

    #[test]
    fn test_created_nodes_report_their_type_name() {
        let registry = NodeRegistry::default();
        let node = registry.create_node("Switch").unwrap();
        assert_eq!(node.type_name(), "Switch");
        assert!(registry.create_node("Blur").is_none());
    }

    #[test]
    fn test_metadata_lookup() {
        let registry = NodeRegistry::default();
        let metadata = registry.get_metadata("Select").unwrap();
        assert_eq!(metadata.display_name, "Select");
        assert_eq!(metadata.category, NodeCategory::function());
        assert_eq!(metadata.category.display_string(), "Function");
    }
}
