//! # banded-region
//!
//! A 2D region engine: arbitrary planar areas represented as minimal
//! sets of non-overlapping, axis-aligned rectangles, with boolean set
//! algebra and polygon scan conversion. Regions are the workhorse of
//! clipping, hit testing and damage tracking in window systems; this
//! crate provides the data structure and algorithms as a self-contained
//! value type.
//!
//! ## Representation
//!
//! A region is a "y-x banded" array of rectangles: sorted by top
//! coordinate first, then by left. Every rectangle with a given top has
//! the same bottom, so the rects form horizontal *bands*, and rects
//! within a band never touch or overlap. Vertically adjacent bands with
//! identical horizontal layout are merged into taller rectangles, which
//! keeps the representation proportional to the region's shape rather
//! than to its scanline count.
//!
//! ## Operations
//!
//! - [`combine`] / [`Region::union`], [`Region::intersect`],
//!   [`Region::subtract`], [`Region::xor`]: boolean set algebra, all
//!   sharing one band-merge driver.
//! - [`polygon_region`]: polygon scan conversion under the
//!   [`FillRule::EvenOdd`] or [`FillRule::Winding`] fill rule.
//! - [`round_rect_region`] / [`elliptic_region`]: rasterized rounded
//!   rectangles and ellipses.
//! - Point/rect hit tests, offset, mirror, bounds and structural
//!   equality on [`Region`].
//! - [`export_region_data`] / [`import_region_data`]: a flat header plus
//!   rect-array interchange layout, with an optional affine
//!   [`Transform`] on import.

pub mod boolean_ops;
pub mod error;
pub mod rect;
pub mod region;
pub mod region_data;
pub mod rounded;
pub mod scan_convert;
pub mod transform;

pub use boolean_ops::{combine, CombineOp};
pub use error::RegionError;
pub use rect::{Point, Rect};
pub use region::{Complexity, Region};
pub use region_data::{
    export_region_data, import_region_data, region_data_size, RegionDataHeader,
    REGION_DATA_RECTANGLES,
};
pub use rounded::{elliptic_region, round_rect_region};
pub use scan_convert::{polygon_region, FillRule};
pub use transform::Transform;
