//! Pull-based node evaluation
//!
//! The [`Evaluator`] stands in for the host's dependency-graph engine:
//! it owns one node and its data block, tracks which output plugs are
//! clean, and recomputes a plug only when it is pulled while dirty.
//! Dirty propagation follows the node's declarative dependency table.
//! Evaluation is demand-driven and strictly sequential.

use crate::data::{AttrValue, DataBlock};
use crate::error::Result;
use crate::node::{Computation, GraphNode};
use std::collections::HashSet;

/// Result of pulling one output plug
#[derive(Debug, Clone)]
pub enum Evaluated {
    /// The plug holds a value
    Value(AttrValue),
    /// The node handled the request but published no value for the plug
    Unset,
    /// The node does not compute this plug
    Unhandled,
}

impl Evaluated {
    /// The contained value, if any
    pub fn value(&self) -> Option<&AttrValue> {
        match self {
            Evaluated::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Demand-driven evaluator for a single graph node
pub struct Evaluator {
    node: Box<dyn GraphNode>,
    data: DataBlock,
    clean: HashSet<String>,
}

impl Evaluator {
    /// Create an evaluator, seeding the node's default input values.
    /// Every output starts dirty.
    pub fn new(node: Box<dyn GraphNode>) -> Self {
        let mut data = DataBlock::new();
        for (name, value) in node.defaults() {
            data.set_input(name, value);
        }
        Self {
            node,
            data,
            clean: HashSet::new(),
        }
    }

    /// The node under evaluation
    pub fn node(&self) -> &dyn GraphNode {
        self.node.as_ref()
    }

    /// Set an upstream input value and dirty every output the dependency
    /// table ties to it. Stale output values are dropped immediately.
    pub fn set_input(&mut self, name: &str, value: AttrValue) {
        self.data.set_input(name, value);
        for (input, output) in self.node.dependencies() {
            if *input == name {
                self.clean.remove(*output);
                self.data.clear_output(output);
            }
        }
    }

    /// Whether `plug` is currently clean
    pub fn is_clean(&self, plug: &str) -> bool {
        self.clean.contains(plug)
    }

    /// Read a published output without evaluating. Side-effect outputs
    /// (written while computing a sibling plug) are visible here.
    pub fn output(&self, plug: &str) -> Option<&AttrValue> {
        self.data.output(plug)
    }

    /// Pull `plug`: return the cached value when clean, otherwise ask the
    /// node to recompute it once. A compute error leaves the plug dirty.
    pub async fn evaluate(&mut self, plug: &str) -> Result<Evaluated> {
        if self.clean.contains(plug) {
            return Ok(self.current(plug));
        }

        match self.node.compute(plug, &mut self.data).await? {
            Computation::Handled => {
                self.clean.insert(plug.to_string());
                Ok(self.current(plug))
            }
            Computation::Unhandled => Ok(Evaluated::Unhandled),
        }
    }

    fn current(&self, plug: &str) -> Evaluated {
        match self.data.output(plug) {
            Some(value) => Evaluated::Value(value.clone()),
            None => Evaluated::Unset,
        }
    }
}
