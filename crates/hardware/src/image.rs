//! SPC SD-card image packing.
//!
//! The player core boots from an SD card holding a 512-byte header (`"SPC "` magic followed by
//! the file count as a little-endian `u16`) and then one fixed-size slot per SPC snapshot.
//! Snapshots longer than a slot are truncated; shorter ones are zero-padded.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::common::constants::{SPC_IMAGE_HEADER_SIZE, SPC_IMAGE_MAGIC, SPC_SLOT_SIZE};
use crate::common::{OutputKind, SimError};

/// Snapshot that did not fill its slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortFile {
    /// Snapshot path.
    pub path: PathBuf,
    /// Actual length in bytes.
    pub len: usize,
}

/// Builds the image header for `count` snapshots.
pub fn header(count: u16) -> [u8; SPC_IMAGE_HEADER_SIZE] {
    let mut hdr = [0u8; SPC_IMAGE_HEADER_SIZE];
    hdr[..SPC_IMAGE_MAGIC.len()].copy_from_slice(SPC_IMAGE_MAGIC);
    hdr[4..6].copy_from_slice(&count.to_le_bytes());
    hdr
}

/// Fits a snapshot into exactly one slot.
pub fn slot(data: &[u8]) -> Vec<u8> {
    let mut out = data[..data.len().min(SPC_SLOT_SIZE)].to_vec();
    out.resize(SPC_SLOT_SIZE, 0);
    out
}

/// Writes the header and every snapshot slot to `out`.
///
/// Every snapshot is read before the first byte is written, so a missing input leaves `out`
/// untouched. Returns the snapshots that had to be padded.
pub fn pack<W: Write>(out: &mut W, files: &[PathBuf]) -> Result<Vec<ShortFile>, SimError> {
    let count = file_count(files)?;
    let snapshots = load(files)?;
    write_image(out, count, files, &snapshots)
}

/// Packs `files` into a new image at `output`.
///
/// The output is only created once every input has been read.
pub fn pack_to_file(output: &Path, files: &[PathBuf]) -> Result<Vec<ShortFile>, SimError> {
    let count = file_count(files)?;
    let snapshots = load(files)?;

    let file = File::create(output).map_err(|e| SimError::open(OutputKind::Image, output, e))?;
    let mut out = BufWriter::new(file);
    let short = write_image(&mut out, count, files, &snapshots)?;
    out.flush()
        .map_err(|e| SimError::write(OutputKind::Image, e))?;
    Ok(short)
}

fn file_count(files: &[PathBuf]) -> Result<u16, SimError> {
    u16::try_from(files.len())
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| SimError::ImageCount(files.len()))
}

fn load(files: &[PathBuf]) -> Result<Vec<Vec<u8>>, SimError> {
    files
        .iter()
        .map(|path| {
            fs::read(path).map_err(|source| SimError::ImageInput {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

fn write_image<W: Write>(
    out: &mut W,
    count: u16,
    files: &[PathBuf],
    snapshots: &[Vec<u8>],
) -> Result<Vec<ShortFile>, SimError> {
    out.write_all(&header(count))
        .map_err(|e| SimError::write(OutputKind::Image, e))?;

    let mut short = Vec::new();
    for (path, data) in files.iter().zip(snapshots) {
        if data.len() < SPC_SLOT_SIZE {
            warn!(path = %path.display(), len = data.len(), "SPC file shorter than a slot");
            short.push(ShortFile {
                path: path.clone(),
                len: data.len(),
            });
        }
        out.write_all(&slot(data))
            .map_err(|e| SimError::write(OutputKind::Image, e))?;
        debug!(path = %path.display(), "SPC file packed");
    }
    Ok(short)
}
