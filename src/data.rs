//! Host data-block abstraction
//!
//! A [`DataBlock`] holds the attribute values a node sees during one
//! evaluation: upstream input values, read through typed accessors, and
//! the output values the node publishes. Nodes never touch storage other
//! than through these accessors.

use crate::error::{Result, VdbError};
use crate::grid::GridCollection;
use std::collections::HashMap;

/// A single attribute value
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// String attribute (file paths, name lists)
    String(String),
    /// Boolean attribute
    Boolean(bool),
    /// Numeric frame value from the host timeline
    Frame(f64),
    /// Byte-sized unsigned integer (padding widths)
    Byte(u8),
    /// Opaque typed container of loaded grids
    Grids(GridCollection),
}

impl AttrValue {
    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "string",
            AttrValue::Boolean(_) => "boolean",
            AttrValue::Frame(_) => "frame",
            AttrValue::Byte(_) => "byte",
            AttrValue::Grids(_) => "grids",
        }
    }
}

/// Attribute values for one node evaluation
#[derive(Debug, Clone, Default)]
pub struct DataBlock {
    inputs: HashMap<String, AttrValue>,
    outputs: HashMap<String, AttrValue>,
}

impl DataBlock {
    /// Create an empty data block
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an upstream input value
    pub fn set_input(&mut self, name: impl Into<String>, value: AttrValue) {
        self.inputs.insert(name.into(), value);
    }

    /// Read an input value; a missing attribute is a read failure.
    pub fn input(&self, name: &str) -> Result<&AttrValue> {
        self.inputs
            .get(name)
            .ok_or_else(|| VdbError::AttributeRead(format!("no input '{}'", name)))
    }

    /// Read a string input
    pub fn string_input(&self, name: &str) -> Result<&str> {
        match self.input(name)? {
            AttrValue::String(s) => Ok(s),
            other => Err(type_mismatch(name, "string", other)),
        }
    }

    /// Read a boolean input
    pub fn boolean_input(&self, name: &str) -> Result<bool> {
        match self.input(name)? {
            AttrValue::Boolean(b) => Ok(*b),
            other => Err(type_mismatch(name, "boolean", other)),
        }
    }

    /// Read a frame input
    pub fn frame_input(&self, name: &str) -> Result<f64> {
        match self.input(name)? {
            AttrValue::Frame(f) => Ok(*f),
            other => Err(type_mismatch(name, "frame", other)),
        }
    }

    /// Read a byte input
    pub fn byte_input(&self, name: &str) -> Result<u8> {
        match self.input(name)? {
            AttrValue::Byte(b) => Ok(*b),
            other => Err(type_mismatch(name, "byte", other)),
        }
    }

    /// Publish an output value
    pub fn set_output(&mut self, name: impl Into<String>, value: AttrValue) {
        self.outputs.insert(name.into(), value);
    }

    /// Read back a published output, if the node produced one
    pub fn output(&self, name: &str) -> Option<&AttrValue> {
        self.outputs.get(name)
    }

    /// Drop a published output (used when an upstream change dirties it)
    pub fn clear_output(&mut self, name: &str) {
        self.outputs.remove(name);
    }
}

fn type_mismatch(name: &str, wanted: &str, got: &AttrValue) -> VdbError {
    VdbError::AttributeRead(format!(
        "input '{}' is {}, expected {}",
        name,
        got.type_name(),
        wanted
    ))
}
