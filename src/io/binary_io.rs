//! Reading and writing the flat little-endian `i32` files the CLI works with.
//!
//! Links, weights and positions all share one format: a headerless sequence
//! of 32-bit little-endian signed integers. Positions are stored as `x, y, z`
//! triplets, one per body, in body order.
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::models::Body;
use crate::utils::LayoutError;

/// Reads a whole file as little-endian `i32` values.
///
/// # Errors
///
/// `Io` if the file cannot be read, `TruncatedFile` if its length is not a
/// multiple of four bytes.
pub fn read_i32_file<P: AsRef<Path>>(path: P) -> Result<Vec<i32>, LayoutError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LayoutError::Io { path: path.to_path_buf(), source })?;

    if bytes.len() % 4 != 0 {
        return Err(LayoutError::TruncatedFile { path: path.to_path_buf(), len: bytes.len() });
    }

    let values: Vec<i32> = bytes
        .chunks_exact(4)
        .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    info!("Read {} values from {}", values.len(), path.display());
    Ok(values)
}

/// Writes every body position, rounded half up to the nearest integer.
pub fn write_positions<P: AsRef<Path>>(path: P, bodies: &[Body]) -> Result<(), LayoutError> {
    let path = path.as_ref();
    let mut bytes = Vec::with_capacity(bodies.len() * 12);
    for body in bodies {
        let p = body.position;
        for value in [p.x, p.y, p.z] {
            bytes.extend_from_slice(&round_coordinate(value).to_le_bytes());
        }
    }

    fs::write(path, bytes).map_err(|source| LayoutError::Io { path: path.to_path_buf(), source })
}

/// `floor(x + 0.5)`, saturating at the `i32` range.
fn round_coordinate(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Path of the snapshot written at `iteration`: `dir/stem_<iteration>.ext`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rs_layout::io::snapshot_path;
///
/// let path = snapshot_path(Path::new("out/positions.bin"), 30);
/// assert_eq!(path, Path::new("out/positions_30.bin"));
/// ```
pub fn snapshot_path(path: &Path, iteration: u64) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, iteration, ext.to_string_lossy()),
        None => format!("{}_{}", stem, iteration),
    };
    path.with_file_name(name)
}

/// Iteration to resume from when starting off a saved snapshot.
///
/// A file named like `positions_<N>.bin` was written after iteration `N`, so
/// the layout continues at `N + 1`. Any other name starts at 0.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rs_layout::io::start_iteration_from_name;
///
/// assert_eq!(start_iteration_from_name(Path::new("run/positions_120.bin")), 121);
/// assert_eq!(start_iteration_from_name(Path::new("run/positions.bin")), 0);
/// ```
pub fn start_iteration_from_name(path: &Path) -> u64 {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return 0;
    };
    let Some(stem) = name.strip_suffix(".bin") else {
        return 0;
    };
    let Some(start) = stem.rfind("positions_") else {
        return 0;
    };

    let digits = &stem[start + "positions_".len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    digits.parse::<u64>().map(|n| n.saturating_add(1)).unwrap_or(0)
}
