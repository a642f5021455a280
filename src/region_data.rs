//! Flat in-memory interchange format for regions.
//!
//! A region serializes to a fixed header followed by its rectangles in
//! canonical banded order, all plain little-or-native-endian `i32`/`u32`
//! fields viewed as bytes. The layout is an in-memory handoff format for
//! the surrounding window system, not a versioned persistence format.

use core::mem::size_of;

use bytemuck::{Pod, Zeroable};
use log::{trace, warn};

use crate::error::RegionError;
use crate::rect::{Point, Rect};
use crate::region::Region;
use crate::scan_convert::{polygon_region, FillRule};
use crate::transform::Transform;

/// The only payload layout: an array of `Rect`.
pub const REGION_DATA_RECTANGLES: u32 = 1;

/// Header preceding the rectangle array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RegionDataHeader {
    /// Byte size of this header.
    pub size: u32,
    /// Payload layout tag; always [`REGION_DATA_RECTANGLES`].
    pub kind: u32,
    /// Number of rectangles following the header.
    pub count: u32,
    /// Byte size of the rectangle array.
    pub data_size: u32,
    /// Bounding box of the stored region.
    pub bounds: Rect,
}

/// Bytes needed to export `region`: header plus rect array.
pub fn region_data_size(region: &Region) -> usize {
    size_of::<RegionDataHeader>() + region.rect_count() * size_of::<Rect>()
}

/// Serialize `region` into `buf`, returning the number of bytes written.
/// When `buf` is too small nothing is written and the error carries the
/// required size.
pub fn export_region_data(region: &Region, buf: &mut [u8]) -> Result<usize, RegionError> {
    let header_len = size_of::<RegionDataHeader>();
    let rect_bytes = region.rect_count() * size_of::<Rect>();
    let required = header_len + rect_bytes;
    if buf.len() < required {
        return Err(RegionError::BufferTooSmall { required });
    }

    let header = RegionDataHeader {
        size: header_len as u32,
        kind: REGION_DATA_RECTANGLES,
        count: region.rect_count() as u32,
        data_size: rect_bytes as u32,
        bounds: region.extents(),
    };
    buf[..header_len].copy_from_slice(bytemuck::bytes_of(&header));
    buf[header_len..required].copy_from_slice(bytemuck::cast_slice(region.rects()));

    trace!("export_region_data: {} rects, {} bytes", region.rect_count(), required);
    Ok(required)
}

/// Rebuild a region from exported data.
///
/// Without a transform (or with an identity transform) every stored
/// non-empty rectangle is unioned in directly. With a non-identity
/// transform each rectangle is decomposed into its four corner points,
/// transformed, scan-converted under the WINDING rule, and unioned in
/// individually, since an axis-aligned box stops being one under
/// rotation or shear.
pub fn import_region_data(
    transform: Option<&Transform>,
    data: &[u8],
) -> Result<Region, RegionError> {
    let header_len = size_of::<RegionDataHeader>();
    if data.len() < header_len {
        return Err(RegionError::InvalidData);
    }
    let header: RegionDataHeader = bytemuck::pod_read_unaligned(&data[..header_len]);
    if (header.size as usize) < header_len {
        return Err(RegionError::InvalidData);
    }
    if header.kind != REGION_DATA_RECTANGLES {
        warn!("unsupported region data kind {}", header.kind);
    }

    let count = header.count as usize;
    let rect_bytes = count
        .checked_mul(size_of::<Rect>())
        .ok_or(RegionError::InvalidData)?;
    let payload = data
        .get(header_len..)
        .filter(|p| p.len() >= rect_bytes)
        .map(|p| &p[..rect_bytes])
        .ok_or(RegionError::InvalidData)?;

    trace!("import_region_data: {} rects, transform: {}", count, transform.is_some());

    let mut region = Region::new();
    match transform {
        Some(xform) if !xform.is_identity() => {
            for chunk in payload.chunks_exact(size_of::<Rect>()) {
                let rect: Rect = bytemuck::pod_read_unaligned(chunk);
                let (x0, y0) = xform.apply(rect.left, rect.top);
                let (x1, y1) = xform.apply(rect.right, rect.top);
                let (x2, y2) = xform.apply(rect.right, rect.bottom);
                let (x3, y3) = xform.apply(rect.left, rect.bottom);
                let quad = [
                    Point::new(x0, y0),
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    Point::new(x3, y3),
                ];
                let poly = polygon_region(&quad, &[4], FillRule::Winding, None)?;
                region = region.union(&poly)?;
            }
        }
        _ => {
            for chunk in payload.chunks_exact(size_of::<Rect>()) {
                let rect: Rect = bytemuck::pod_read_unaligned(chunk);
                if !rect.is_empty() {
                    region.union_with_rect(rect)?;
                }
            }
        }
    }
    Ok(region)
}

// ============================================================================
// Tests
// ============================================================================
