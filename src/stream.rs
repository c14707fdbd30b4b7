//! Grid stream codec
//!
//! On-disk container for an ordered set of named grids:
//!
//! ```text
//! magic (4 bytes, "VDB\0")
//! header length (u32 LE)
//! header (JSON-encoded StreamMetadata)
//! zero or more records, each:
//!     record length (u32 LE)
//!     record (bincode GridRecord, payload compressed per header)
//! ```
//!
//! A stream with a valid header and no records decodes to an empty
//! collection; it is not a format error.

use crate::compression::{get_compressor, CompressionLevel};
use crate::error::{Result, VdbError};
use crate::grid::{Grid, GridClass, GridCollection, GridValueType};
use crate::metadata::{StreamMetadata, StreamVersion};
use crate::VDB_MAGIC;
use serde::{Deserialize, Serialize};

/// One serialized grid entry
#[derive(Debug, Serialize, Deserialize)]
struct GridRecord {
    name: String,
    class: GridClass,
    value_type: GridValueType,
    voxel_size: f64,
    uncompressed_size: usize,
    payload: Vec<u8>,
}

/// Decode a full grid stream into an ordered collection.
///
/// Grids are returned in stream order. Malformed input (bad magic,
/// truncation, undecodable records, payload size or alignment mismatch)
/// is an error; an empty record section is not.
pub fn read_grids(data: &[u8]) -> Result<GridCollection> {
    let mut cursor = 0usize;

    let magic = take(data, &mut cursor, VDB_MAGIC.len())?;
    if magic != VDB_MAGIC {
        return Err(VdbError::InvalidFormat("bad magic".to_string()));
    }

    let header_len = take_u32(data, &mut cursor)? as usize;
    let header = take(data, &mut cursor, header_len)?;
    let metadata: StreamMetadata = serde_json::from_slice(header)?;

    if !metadata.version.is_compatible(&StreamVersion::CURRENT) {
        return Err(VdbError::UnsupportedVersion(
            metadata.version.major,
            metadata.version.minor,
        ));
    }

    let compressor = get_compressor(metadata.compression);

    let mut grids = GridCollection::new();
    while cursor < data.len() {
        let record_len = take_u32(data, &mut cursor)? as usize;
        let record_bytes = take(data, &mut cursor, record_len)?;
        let record: GridRecord = bincode::deserialize(record_bytes)?;

        let payload = compressor.decompress(&record.payload, Some(record.uncompressed_size))?;
        if payload.len() != record.uncompressed_size {
            return Err(VdbError::InvalidFormat(format!(
                "grid '{}': payload is {} bytes, header declares {}",
                record.name,
                payload.len(),
                record.uncompressed_size
            )));
        }

        let grid = Grid::new(
            record.name,
            record.class,
            record.value_type,
            record.voxel_size,
            payload,
        );
        if !grid.is_aligned() {
            return Err(VdbError::InvalidFormat(format!(
                "grid '{}': payload not aligned to {:?} values",
                grid.name, grid.value_type
            )));
        }
        grids.push(grid);
    }

    Ok(grids)
}

/// Read the stream header without touching any grid records.
pub fn read_metadata(data: &[u8]) -> Result<StreamMetadata> {
    let mut cursor = 0usize;

    let magic = take(data, &mut cursor, VDB_MAGIC.len())?;
    if magic != VDB_MAGIC {
        return Err(VdbError::InvalidFormat("bad magic".to_string()));
    }

    let header_len = take_u32(data, &mut cursor)? as usize;
    let header = take(data, &mut cursor, header_len)?;
    Ok(serde_json::from_slice(header)?)
}

/// Encode a collection into a grid stream, compressing payloads with the
/// method the metadata names.
pub fn write_grids(grids: &GridCollection, metadata: &StreamMetadata) -> Result<Vec<u8>> {
    let compressor = get_compressor(metadata.compression);

    let header = serde_json::to_vec(metadata)?;
    let mut out = Vec::with_capacity(header.len() + 64);
    out.extend_from_slice(VDB_MAGIC);
    out.extend_from_slice(&(header.len() as u32).to_le_bytes());
    out.extend_from_slice(&header);

    for grid in grids.iter() {
        let record = GridRecord {
            name: grid.name.clone(),
            class: grid.class,
            value_type: grid.value_type,
            voxel_size: grid.voxel_size,
            uncompressed_size: grid.payload.len(),
            payload: compressor.compress(&grid.payload, CompressionLevel::default())?,
        };
        let record_bytes = bincode::serialize(&record)?;
        out.extend_from_slice(&(record_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&record_bytes);
    }

    Ok(out)
}

fn take<'a>(data: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = cursor
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| VdbError::InvalidFormat("truncated stream".to_string()))?;
    let slice = &data[*cursor..end];
    *cursor = end;
    Ok(slice)
}

fn take_u32(data: &[u8], cursor: &mut usize) -> Result<u32> {
    let bytes = take(data, cursor, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
