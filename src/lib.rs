//! vdbread - volumetric grid sequence reading for node-graph hosts
//!
//! A pure Rust implementation of a grid-sequence read node: resolve a
//! templated file path to the concrete filename for a frame, load the
//! named grids behind it, and expose both through a pull-based
//! dependency-graph node.
//!
//! # Features
//!
//! - Frame-sequence path resolution with zero-padded frame numbers
//! - Binary grid stream container with Deflate/Zstd payload compression
//! - Pull-based, memoized node evaluation with declarative dependencies
//! - Explicit node-type registry for host integration layers
//!
//! # Example
//!
//! ```rust,ignore
//! use vdbread::{node, AttrValue, Evaluator, ReadNode};
//!
//! # async fn example() -> vdbread::Result<()> {
//! let mut eval = Evaluator::new(Box::new(ReadNode::default()));
//! eval.set_input(node::FILE_PATH, AttrValue::String("smoke.0001.vdb".into()));
//! eval.set_input(node::SEQUENCE, AttrValue::Boolean(true));
//! eval.set_input(node::TIME, AttrValue::Frame(42.0));
//!
//! let resolved = eval.evaluate(node::RESOLVED_PATH).await?;
//! let grids = eval.evaluate(node::OUT_GRIDS).await?;
//! # Ok(())
//! # }
//! ```

pub mod compression;
pub mod data;
pub mod error;
pub mod graph;
pub mod grid;
pub mod io;
pub mod metadata;
pub mod node;
pub mod registry;
pub mod resolve;
pub mod stream;

// Re-exports
pub use compression::{CompressionMethod, Compressor};
pub use data::{AttrValue, DataBlock};
pub use error::{Result, VdbError};
pub use graph::{Evaluated, Evaluator};
pub use grid::{Grid, GridClass, GridCollection, GridValueType};
pub use io::{FileGridLoader, GridLoader};
pub use metadata::{StreamMetadata, StreamVersion};
pub use node::{Computation, GraphNode, ReadNode};
pub use registry::{register_builtin, NodeRegistry};
pub use resolve::resolve_frame_path;
pub use stream::{read_grids, read_metadata, write_grids};

/// Version of the vdbread implementation
pub const VDBREAD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Magic number for the grid stream format
pub const VDB_MAGIC: &[u8; 4] = b"VDB\0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VDBREAD_VERSION.is_empty());
    }
}
