//! Explicit node-type registration
//!
//! Host integrations register node types at startup and instantiate them
//! by name when building a graph. Registration is an explicit call; the
//! crate keeps no global registrar state.

use crate::error::{Result, VdbError};
use crate::node::{GraphNode, ReadNode};
use parking_lot::RwLock;
use std::collections::HashMap;

type NodeFactory = Box<dyn Fn() -> Box<dyn GraphNode> + Send + Sync>;

/// Registry of node types, keyed by type name
#[derive(Default)]
pub struct NodeRegistry {
    factories: RwLock<HashMap<String, NodeFactory>>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type. Registering a name twice is an error.
    pub fn register(
        &self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn GraphNode> + Send + Sync + 'static,
    ) -> Result<()> {
        let name = name.into();
        let mut factories = self.factories.write();
        if factories.contains_key(&name) {
            return Err(VdbError::AlreadyExists(name));
        }
        factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Instantiate a registered node type
    pub fn create(&self, name: &str) -> Result<Box<dyn GraphNode>> {
        let factories = self.factories.read();
        let factory = factories
            .get(name)
            .ok_or_else(|| VdbError::NotFound(name.to_string()))?;
        Ok(factory())
    }

    /// Whether a type name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Register the node types this crate ships. Called once by the host
/// integration layer at startup.
pub fn register_builtin(registry: &NodeRegistry) -> Result<()> {
    registry.register("VdbRead", || Box::new(ReadNode::default()))
}
