//! The grid-sequence read node
//!
//! A [`ReadNode`] resolves its file-path template for the current frame
//! and loads the grid collection behind it. It speaks to the host only
//! through a [`DataBlock`] and a declarative dependency table; the
//! evaluation engine in [`crate::graph`] drives it on demand.

use crate::data::{AttrValue, DataBlock};
use crate::error::{Result, VdbError};
use crate::io::{FileGridLoader, GridLoader};
use crate::resolve::resolve_frame_path;
use async_trait::async_trait;
use std::sync::Arc;

/// Input attribute: file path template
pub const FILE_PATH: &str = "filePath";
/// Input attribute: whether the template names a frame sequence
pub const SEQUENCE: &str = "sequence";
/// Input attribute: frame value from the host timeline
pub const TIME: &str = "time";
/// Input attribute: zero-padding width of the frame number
pub const PADDING: &str = "padding";
/// Output attribute: path resolved for the current frame
pub const RESOLVED_PATH: &str = "resolvedPath";
/// Output attribute: loaded grid collection
pub const OUT_GRIDS: &str = "outGrids";
/// Output attribute: space-joined names of all loaded grids
pub const GRID_NAMES: &str = "gridNames";

/// Outcome of a compute request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Computation {
    /// The node recomputed the requested plug
    Handled,
    /// The plug is not one of this node's outputs; the host may route the
    /// request elsewhere
    Unhandled,
}

/// A node in a pull-based dependency graph
#[async_trait]
pub trait GraphNode: Send + Sync {
    /// Registered type name of this node
    fn type_name(&self) -> &'static str;

    /// Initial input values, applied before the first evaluation
    fn defaults(&self) -> Vec<(&'static str, AttrValue)>;

    /// Declarative dependency table: output O is recomputed when any
    /// paired input I changes.
    fn dependencies(&self) -> &'static [(&'static str, &'static str)];

    /// Recompute `plug` from the current input values in `data`.
    async fn compute(&self, plug: &str, data: &mut DataBlock) -> Result<Computation>;
}

const READ_NODE_DEPENDENCIES: &[(&str, &str)] = &[
    (FILE_PATH, RESOLVED_PATH),
    (SEQUENCE, RESOLVED_PATH),
    (TIME, RESOLVED_PATH),
    (PADDING, RESOLVED_PATH),
    (FILE_PATH, OUT_GRIDS),
    (SEQUENCE, OUT_GRIDS),
    (TIME, OUT_GRIDS),
    (PADDING, OUT_GRIDS),
    (FILE_PATH, GRID_NAMES),
];

/// Node that reads a grid stream sequence from disk
pub struct ReadNode {
    loader: Arc<dyn GridLoader>,
}

impl ReadNode {
    /// Create a read node with a custom loader
    pub fn new(loader: Arc<dyn GridLoader>) -> Self {
        Self { loader }
    }

    /// Read the four upstream values and resolve the template for the
    /// current frame. Any failed attribute read propagates before any
    /// output is written.
    fn resolve_from_inputs(&self, data: &DataBlock) -> Result<String> {
        let path = data.string_input(FILE_PATH)?.to_string();
        let sequence = data.boolean_input(SEQUENCE)?;
        let time = data.frame_input(TIME)?;
        let padding = data.byte_input(PADDING)?;

        // The host hands time as a fractional frame value; the sequence
        // index truncates toward zero.
        Ok(resolve_frame_path(&path, sequence, time as i32, padding))
    }
}

impl Default for ReadNode {
    fn default() -> Self {
        Self::new(Arc::new(FileGridLoader::new()))
    }
}

#[async_trait]
impl GraphNode for ReadNode {
    fn type_name(&self) -> &'static str {
        "VdbRead"
    }

    fn defaults(&self) -> Vec<(&'static str, AttrValue)> {
        vec![
            (FILE_PATH, AttrValue::String(String::new())),
            (SEQUENCE, AttrValue::Boolean(false)),
            (TIME, AttrValue::Frame(0.0)),
            (PADDING, AttrValue::Byte(4)),
        ]
    }

    fn dependencies(&self) -> &'static [(&'static str, &'static str)] {
        READ_NODE_DEPENDENCIES
    }

    async fn compute(&self, plug: &str, data: &mut DataBlock) -> Result<Computation> {
        match plug {
            RESOLVED_PATH => {
                let resolved = self.resolve_from_inputs(data)?;
                data.set_output(RESOLVED_PATH, AttrValue::String(resolved));
                Ok(Computation::Handled)
            }
            OUT_GRIDS => {
                if data.string_input(FILE_PATH)?.is_empty() {
                    return Err(VdbError::MissingInput(FILE_PATH.to_string()));
                }

                let resolved = self.resolve_from_inputs(data)?;
                let grids = self.loader.load(&resolved).await?;

                // A stream with zero grids publishes nothing: neither a
                // value nor a failure. Downstream sees the plug clean but
                // unset.
                if !grids.is_empty() {
                    let names = grids.joined_names();
                    data.set_output(OUT_GRIDS, AttrValue::Grids(grids));
                    data.set_output(GRID_NAMES, AttrValue::String(names));
                }
                Ok(Computation::Handled)
            }
            _ => Ok(Computation::Unhandled),
        }
    }
}
