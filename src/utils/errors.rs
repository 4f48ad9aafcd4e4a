use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur while loading a graph or configuring a layout.
///
/// Every variant is a precondition violation: it is reported before any layout
/// state is built, so a `Layout` is never left half constructed.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The edge list contained no entries.
    #[error("Graph has no links")]
    EmptyEdgeList,
    /// The edge list contained a `0`, which names no vertex.
    #[error("Invalid edge list entry 0 at index {0}")]
    InvalidEdgeValue(usize),
    /// An edge points at a body index outside the body store.
    #[error("Edge {from} -> {target} is out of range for {count} bodies")]
    EdgeOutOfRange {
        from: usize,
        target: usize,
        count: usize,
    },
    /// The positions array does not hold exactly three values per body.
    #[error("Expected {expected} position values (3 per body), found {found}")]
    PositionCountMismatch { expected: usize, found: usize },
    /// The weights array does not hold exactly one value per body.
    #[error("Wrong weights for current graph: expected {expected}, found {found}")]
    WeightCountMismatch { expected: usize, found: usize },
    /// A body was given a non-positive (or non-finite) mass.
    #[error("Invalid mass {mass} for body {body}")]
    InvalidMass { body: usize, mass: f64 },
    /// A layout constant is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A binary input file does not contain a whole number of 32-bit integers.
    #[error("File {path} has {len} bytes, which is not a multiple of 4")]
    TruncatedFile { path: PathBuf, len: usize },
    /// The underlying file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
