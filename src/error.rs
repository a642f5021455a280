//! Error type shared by every fallible region operation.

use thiserror::Error;

/// Failures reported by region operations.
///
/// Degenerate geometry (zero-area rects, polygons with fewer than two
/// effective vertices, zero-height edges) is never an error; it simply
/// contributes nothing to the result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    /// Growing a rectangle buffer failed. The operation's partial result
    /// is discarded; the destination is left untouched.
    #[error("region allocation failed")]
    Alloc,

    /// The scan converter's running vertical-span total overflowed before
    /// the output buffer could be sized.
    #[error("polygon vertical span total overflowed")]
    Overflow,

    /// Malformed region data: truncated header, rect count inconsistent
    /// with the payload, or polygon counts inconsistent with the point
    /// slice.
    #[error("invalid region data")]
    InvalidData,

    /// The export buffer cannot hold the header plus rect list.
    #[error("buffer too small: {required} bytes required")]
    BufferTooSmall { required: usize },
}

impl From<smallvec::CollectionAllocErr> for RegionError {
    fn from(_: smallvec::CollectionAllocErr) -> Self {
        RegionError::Alloc
    }
}
