//! The region value type: banded rectangle storage and query operations.
//!
//! A region is an area represented as a y-x banded array of rectangles:
//! rects are sorted by top coordinate first, then by left within a band.
//! Every rectangle with a given top has the same bottom (and vice versa),
//! so each band spans the full vertical distance of its rectangles, and
//! no two rectangles in a band touch or overlap horizontally. Whenever
//! two vertically adjacent bands have rectangles in the same horizontal
//! places they are merged into one taller band, keeping the rect count
//! proportional to the region's shape rather than its scanline count.
//!
//! Regions are plain owned values: `Clone` deep-copies, `&mut` is the
//! only mutation path, and dropping the value frees it.

use smallvec::SmallVec;

use crate::error::RegionError;
use crate::rect::Rect;

/// Rectangles kept inline before spilling to the heap.
pub(crate) const INLINE_RECTS: usize = 2;

pub(crate) type RectStore = SmallVec<[Rect; INLINE_RECTS]>;

// ============================================================================
// Complexity
// ============================================================================

/// How many rectangles a region needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// The region is empty.
    Null,
    /// The region is a single rectangle.
    Simple,
    /// The region needs more than one rectangle.
    Complex,
}

// ============================================================================
// Region
// ============================================================================

/// An area represented as a minimal set of non-overlapping rectangles.
#[derive(Debug, Clone)]
pub struct Region {
    pub(crate) rects: RectStore,
    pub(crate) extents: Rect,
}

impl Region {
    /// Create an empty region.
    pub fn new() -> Self {
        Self {
            rects: RectStore::new(),
            extents: Rect::ZERO,
        }
    }

    /// Create a region covering a single rectangle. Reversed coordinates
    /// are swapped; a zero-area rectangle yields an empty region.
    pub fn from_rect(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let mut region = Self::new();
        region.set_rect(left, top, right, bottom);
        region
    }

    /// Create an empty region with room for `n` rectangles.
    pub(crate) fn with_capacity(n: usize) -> Result<Self, RegionError> {
        let mut rects = RectStore::new();
        rects.try_reserve(n)?;
        Ok(Self {
            rects,
            extents: Rect::ZERO,
        })
    }

    /// Reinitialize in place to a single rectangle, reusing the buffer.
    /// Reversed coordinates are swapped; a zero-area rectangle empties
    /// the region.
    pub fn set_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        let mut rect = Rect::new(left, top, right, bottom);
        rect.order();
        if rect.is_empty() {
            self.clear();
        } else {
            self.rects.clear();
            self.rects.push(rect); // inline capacity always holds one
            self.extents = rect;
        }
    }

    /// Empty the region.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.extents = Rect::ZERO;
    }

    /// The rectangles, in banded order.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[inline]
    pub fn rect_count(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The bounding box of the region (the zero rect when empty).
    #[inline]
    pub fn extents(&self) -> Rect {
        self.extents
    }

    #[inline]
    pub fn complexity(&self) -> Complexity {
        match self.rects.len() {
            0 => Complexity::Null,
            1 => Complexity::Simple,
            _ => Complexity::Complex,
        }
    }

    /// The bounding box together with the region's complexity.
    pub fn bounds(&self) -> (Rect, Complexity) {
        (self.extents, self.complexity())
    }

    // ========================================================================
    // Storage management
    // ========================================================================

    /// Append one rectangle, growing the buffer by doubling as needed.
    pub(crate) fn add_rect(
        &mut self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) -> Result<(), RegionError> {
        if self.rects.len() == self.rects.capacity() {
            self.rects.try_reserve(self.rects.capacity().max(1))?;
        }
        self.rects.push(Rect::new(left, top, right, bottom));
        Ok(())
    }

    /// Shrink the backing allocation to the rect count once utilization
    /// drops below half, so long-lived regions don't pin their peak size.
    pub(crate) fn compact(&mut self) {
        if self.rects.len() < self.rects.capacity() / 2 && self.rects.len() > INLINE_RECTS {
            self.rects.shrink_to_fit();
        }
    }

    /// Recompute `extents` from the rect list. The first rect has the
    /// smallest top and the last the largest bottom because of banding;
    /// left and right are folded over all rects.
    pub(crate) fn set_extents(&mut self) {
        let (first, last) = match (self.rects.first(), self.rects.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                self.extents = Rect::ZERO;
                return;
            }
        };
        let mut extents = Rect::new(first.left, first.top, last.right, last.bottom);
        for r in &self.rects {
            if r.left < extents.left {
                extents.left = r.left;
            }
            if r.right > extents.right {
                extents.right = r.right;
            }
        }
        self.extents = extents;
    }

    /// Replace the contents of `self` with a copy of `src`, reusing the
    /// buffer when it is large enough. On allocation failure `self` is
    /// left unchanged.
    pub(crate) fn copy_from(&mut self, src: &Region) -> Result<(), RegionError> {
        if self.rects.capacity() < src.rects.len() {
            let additional = src.rects.len() - self.rects.len();
            self.rects.try_reserve(additional)?;
        }
        self.rects.clear();
        self.rects.extend_from_slice(&src.rects);
        self.extents = src.extents;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lower bound of `(x, y)` in the banded rect order. Returns the index
    /// of the first rect that is not wholly before the point, and whether
    /// that rect contains it.
    pub(crate) fn locate_point(&self, x: i32, y: i32) -> (usize, bool) {
        let idx = self
            .rects
            .partition_point(|r| r.bottom <= y || (r.top <= y && r.right <= x));
        let hit = idx < self.rects.len() && self.rects[idx].contains_point(x, y);
        (idx, hit)
    }

    /// Returns `true` if the point is inside the region.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        if self.rects.is_empty() || !self.extents.contains_point(x, y) {
            return false;
        }
        self.locate_point(x, y).1
    }

    /// Returns `true` if any part of `rect` overlaps the region. Reversed
    /// coordinates are swapped before testing.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let rc = rect.ordered();
        if self.rects.is_empty() || !self.extents.overlaps(&rc) {
            return false;
        }
        let (start, hit) = self.locate_point(rc.left, rc.top);
        if hit {
            return true;
        }
        for r in &self.rects[start..] {
            if r.bottom <= rc.top {
                continue; // not far enough down yet
            }
            if r.top >= rc.bottom {
                break; // past the query rect
            }
            if r.right <= rc.left || r.left >= rc.right {
                continue;
            }
            return true;
        }
        false
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Translate the region in place. Banding order is preserved.
    pub fn offset(&mut self, dx: i32, dy: i32) -> Complexity {
        if (dx != 0 || dy != 0) && !self.rects.is_empty() {
            for r in self.rects.iter_mut() {
                r.offset(dx, dy);
            }
            self.extents.offset(dx, dy);
        }
        self.complexity()
    }

    /// Mirror the region about the vertical axis `x = width`. Within each
    /// band the rect order is reversed so that lefts stay ascending.
    pub fn mirror(&mut self, width: i32) -> Result<Complexity, RegionError> {
        let n = self.rects.len();
        if n == 0 {
            return Ok(Complexity::Null);
        }
        let mut mirrored = RectStore::new();
        mirrored.try_reserve(n)?;

        let mut start = 0;
        while start < n {
            let mut end = start + 1;
            while end < n && self.rects[end].top == self.rects[start].top {
                end += 1;
            }
            for r in self.rects[start..end].iter().rev() {
                mirrored.push(Rect::new(width - r.right, r.top, width - r.left, r.bottom));
            }
            start = end;
        }

        self.extents = Rect::new(
            width - self.extents.right,
            self.extents.top,
            width - self.extents.left,
            self.extents.bottom,
        );
        self.rects = mirrored;
        Ok(self.complexity())
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality: same rect count, same extents, identical rect
/// lists. This is meaningful for regions produced through this engine's
/// canonicalizing operations, which reduce equal point sets to the same
/// banded rect list; it is not a general semantic set equality.
impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        if self.rects.len() != other.rects.len() {
            return false;
        }
        if self.rects.is_empty() {
            return true;
        }
        self.extents == other.extents && self.rects == other.rects
    }
}

impl Eq for Region {}

// ============================================================================
// Tests
// ============================================================================
