//! Boolean set algebra over banded regions.
//!
//! All four set operations run through one generic driver,
//! [`region_op`], which walks the two inputs' bands in lock-step over y
//! and dispatches each vertical interval to per-operation callbacks: one
//! for intervals covered by both regions and one per region for
//! intervals covered by that region alone. The callbacks only differ in
//! their x-sweep rule, so AND/OR/DIFF (and XOR, built from two DIFFs)
//! share the same band-alignment and coalescing machinery.

use log::trace;

use crate::error::RegionError;
use crate::rect::Rect;
use crate::region::{Complexity, RectStore, Region};

/// How two source regions are combined into a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// Destination becomes a copy of the first source.
    Copy,
    /// Intersection.
    And,
    /// Union.
    Or,
    /// Union minus intersection.
    Xor,
    /// First source minus second.
    Diff,
}

// ============================================================================
// Band coalescing
// ============================================================================

/// Try to merge the band starting at `cur_start` with the previous band
/// `[prev_start, cur_start)`. The bands merge when they have the same
/// number of rects, every pair lines up horizontally, and the previous
/// band's bottom touches the current band's top; merging extends the
/// previous rects downward and removes the current band.
///
/// More than one band may have been appended since `cur_start` (a drained
/// source region is fed through in one go); only the first appended band
/// is a merge candidate. The returned index is the band the *next* call
/// should treat as "previous": the start of the last appended band.
pub(crate) fn coalesce(rects: &mut RectStore, prev_start: usize, cur_start: usize) -> usize {
    let total = rects.len();
    if cur_start == total {
        // Nothing was appended; the scan converter calls this once per
        // scanline whether or not the scanline emitted spans.
        return cur_start;
    }
    let prev_count = cur_start - prev_start;

    let band_top = rects[cur_start].top;
    let mut cur_count = 0;
    while cur_start + cur_count < total && rects[cur_start + cur_count].top == band_top {
        cur_count += 1;
    }
    let first_band_end = cur_start + cur_count;

    let mut next_start = cur_start;
    if first_band_end < total {
        // Several bands were appended; the next coalesce starts at the
        // last of them.
        let mut last = total - 1;
        while rects[last - 1].top == rects[last].top {
            last -= 1;
        }
        next_start = last;
    }

    if cur_count == prev_count && cur_count != 0 && rects[prev_start].bottom == band_top {
        for i in 0..cur_count {
            if rects[prev_start + i].left != rects[cur_start + i].left
                || rects[prev_start + i].right != rects[cur_start + i].right
            {
                return next_start;
            }
        }

        let new_bottom = rects[cur_start].bottom;
        for i in 0..cur_count {
            rects[prev_start + i].bottom = new_bottom;
        }

        if first_band_end == total {
            rects.truncate(cur_start);
            return prev_start;
        }
        rects.drain(cur_start..first_band_end);
        return next_start - cur_count;
    }
    next_start
}

// ============================================================================
// Generic two-region band driver
// ============================================================================

type OverlapFn = fn(&mut Region, &[Rect], &[Rect], i32, i32) -> Result<(), RegionError>;
type BandFn = fn(&mut Region, &[Rect], i32, i32) -> Result<(), RegionError>;

/// Index one past the last rect of the band starting at `start`.
#[inline]
fn band_end(rects: &[Rect], start: usize) -> usize {
    let top = rects[start].top;
    let mut end = start + 1;
    while end < rects.len() && rects[end].top == top {
        end += 1;
    }
    end
}

/// Apply a banded set operation to two non-empty regions and return the
/// result. The result's extents are not yet recomputed: callers either
/// derive them or fold them from scratch, since the sources' extents
/// must stay intact while the walk runs.
///
/// The y walk uses each input's existing band boundaries. For every
/// vertical interval it dispatches to `non_overlap1`/`non_overlap2` when
/// only one region has rects there (an absent callback drops that
/// contribution) or to `overlap` when both do, coalescing after every
/// appended band. When one input runs out, the other's remaining bands
/// are fed through its exclusive callback, clipped to start below the
/// last processed interval.
fn region_op(
    reg1: &Region,
    reg2: &Region,
    overlap: OverlapFn,
    non_overlap1: Option<BandFn>,
    non_overlap2: Option<BandFn>,
) -> Result<Region, RegionError> {
    let r1 = reg1.rects();
    let r2 = reg2.rects();
    debug_assert!(!r1.is_empty() && !r2.is_empty());

    let mut out = Region::with_capacity(r1.len().max(r2.len()) * 2)?;

    let mut i1 = 0;
    let mut i2 = 0;
    // Bottom of the last interval handled. Seeded so the first band's top
    // is never clipped.
    let mut ybot = reg1.extents.top.min(reg2.extents.top);
    let mut prev_band = 0;

    loop {
        let cur_band = out.rects.len();
        let band1_end = band_end(r1, i1);
        let band2_end = band_end(r2, i2);

        // Leading non-overlapping part of whichever band starts first,
        // one source band at a time.
        let ytop;
        if r1[i1].top < r2[i2].top {
            let top = r1[i1].top.max(ybot);
            let bot = r1[i1].bottom.min(r2[i2].top);
            if top != bot {
                if let Some(f) = non_overlap1 {
                    f(&mut out, &r1[i1..band1_end], top, bot)?;
                }
            }
            ytop = r2[i2].top;
        } else if r2[i2].top < r1[i1].top {
            let top = r2[i2].top.max(ybot);
            let bot = r2[i2].bottom.min(r1[i1].top);
            if top != bot {
                if let Some(f) = non_overlap2 {
                    f(&mut out, &r2[i2..band2_end], top, bot)?;
                }
            }
            ytop = r1[i1].top;
        } else {
            ytop = r1[i1].top;
        }

        if out.rects.len() != cur_band {
            prev_band = coalesce(&mut out.rects, prev_band, cur_band);
        }

        // The bands overlap vertically on [ytop, ybot).
        ybot = r1[i1].bottom.min(r2[i2].bottom);
        let cur_band = out.rects.len();
        if ybot > ytop {
            overlap(&mut out, &r1[i1..band1_end], &r2[i2..band2_end], ytop, ybot)?;
        }
        if out.rects.len() != cur_band {
            prev_band = coalesce(&mut out.rects, prev_band, cur_band);
        }

        if r1[i1].bottom == ybot {
            i1 = band1_end;
        }
        if r2[i2].bottom == ybot {
            i2 = band2_end;
        }
        if i1 == r1.len() || i2 == r2.len() {
            break;
        }
    }

    // Whichever region still has bands left.
    let cur_band = out.rects.len();
    if i1 < r1.len() {
        if let Some(f) = non_overlap1 {
            while i1 < r1.len() {
                let e = band_end(r1, i1);
                f(&mut out, &r1[i1..e], r1[i1].top.max(ybot), r1[i1].bottom)?;
                i1 = e;
            }
        }
    } else if i2 < r2.len() {
        if let Some(f) = non_overlap2 {
            while i2 < r2.len() {
                let e = band_end(r2, i2);
                f(&mut out, &r2[i2..e], r2[i2].top.max(ybot), r2[i2].bottom)?;
                i2 = e;
            }
        }
    }
    if out.rects.len() != cur_band {
        coalesce(&mut out.rects, prev_band, cur_band);
    }

    out.compact();
    Ok(out)
}

// ============================================================================
// Per-operation band callbacks
// ============================================================================

/// Exclusive-band callback shared by OR and DIFF: copy the band's rects
/// into the result clipped to `[top, bottom)`.
fn copy_band(out: &mut Region, band: &[Rect], top: i32, bottom: i32) -> Result<(), RegionError> {
    for r in band {
        out.add_rect(r.left, top, r.right, bottom)?;
    }
    Ok(())
}

/// AND overlap rule: two-pointer merge emitting each positive-width
/// intersection, advancing whichever rect ends first.
fn intersect_overlap(
    out: &mut Region,
    band1: &[Rect],
    band2: &[Rect],
    top: i32,
    bottom: i32,
) -> Result<(), RegionError> {
    let mut i1 = 0;
    let mut i2 = 0;
    while i1 < band1.len() && i2 < band2.len() {
        let r1 = &band1[i1];
        let r2 = &band2[i2];
        let left = r1.left.max(r2.left);
        let right = r1.right.min(r2.right);
        if left < right {
            out.add_rect(left, top, right, bottom)?;
        }
        if r1.right < r2.right {
            i1 += 1;
        } else if r2.right < r1.right {
            i2 += 1;
        } else {
            i1 += 1;
            i2 += 1;
        }
    }
    Ok(())
}

/// OR overlap rule: emit the leftmost head each step, merging into the
/// previously emitted rect when it touches or overlaps in the same band.
fn union_overlap(
    out: &mut Region,
    band1: &[Rect],
    band2: &[Rect],
    top: i32,
    bottom: i32,
) -> Result<(), RegionError> {
    fn merge_rect(out: &mut Region, r: &Rect, top: i32, bottom: i32) -> Result<(), RegionError> {
        match out.rects.last_mut() {
            Some(last) if last.top == top && last.bottom == bottom && last.right >= r.left => {
                if last.right < r.right {
                    last.right = r.right;
                }
                Ok(())
            }
            _ => out.add_rect(r.left, top, r.right, bottom),
        }
    }

    let mut i1 = 0;
    let mut i2 = 0;
    while i1 < band1.len() && i2 < band2.len() {
        if band1[i1].left < band2[i2].left {
            merge_rect(out, &band1[i1], top, bottom)?;
            i1 += 1;
        } else {
            merge_rect(out, &band2[i2], top, bottom)?;
            i2 += 1;
        }
    }
    while i1 < band1.len() {
        merge_rect(out, &band1[i1], top, bottom)?;
        i1 += 1;
    }
    while i2 < band2.len() {
        merge_rect(out, &band2[i2], top, bottom)?;
        i2 += 1;
    }
    Ok(())
}

/// DIFF overlap rule: walk the minuend keeping a left fence, clip away
/// the parts covered by subtrahend rects and emit the remaining
/// positive-width slivers.
fn subtract_overlap(
    out: &mut Region,
    band1: &[Rect],
    band2: &[Rect],
    top: i32,
    bottom: i32,
) -> Result<(), RegionError> {
    let mut i1 = 0;
    let mut i2 = 0;
    let mut left = band1[0].left;

    while i1 < band1.len() && i2 < band2.len() {
        let r1 = &band1[i1];
        let r2 = &band2[i2];
        if r2.right <= left {
            // Subtrahend entirely behind the fence.
            i2 += 1;
        } else if r2.left <= left {
            // Subtrahend covers the fence: push it right.
            left = r2.right;
            if left >= r1.right {
                i1 += 1;
                if i1 < band1.len() {
                    left = band1[i1].left;
                }
            } else {
                i2 += 1;
            }
        } else if r2.left < r1.right {
            // Uncovered sliver before the subtrahend.
            out.add_rect(left, top, r2.left, bottom)?;
            left = r2.right;
            if left >= r1.right {
                i1 += 1;
                if i1 < band1.len() {
                    left = band1[i1].left;
                }
            } else {
                i2 += 1;
            }
        } else {
            // Minuend ends before the subtrahend starts.
            if r1.right > left {
                out.add_rect(left, top, r1.right, bottom)?;
            }
            i1 += 1;
            if i1 < band1.len() {
                left = band1[i1].left;
            }
        }
    }

    while i1 < band1.len() {
        out.add_rect(left, top, band1[i1].right, bottom)?;
        i1 += 1;
        if i1 < band1.len() {
            left = band1[i1].left;
        }
    }
    Ok(())
}

// ============================================================================
// Set operations
// ============================================================================

impl Region {
    /// Fallible deep copy (the only clone path that reports allocation
    /// failure instead of aborting).
    pub(crate) fn try_clone(&self) -> Result<Region, RegionError> {
        let mut out = Region::with_capacity(self.rects.len())?;
        out.rects.extend_from_slice(&self.rects);
        out.extents = self.extents;
        Ok(out)
    }

    /// Intersection of `self` and `other`.
    pub fn intersect(&self, other: &Region) -> Result<Region, RegionError> {
        // Trivial reject: either empty, or the extents don't even touch.
        if self.rects.is_empty()
            || other.rects.is_empty()
            || !self.extents.overlaps(&other.extents)
        {
            return Ok(Region::new());
        }
        let mut out = region_op(self, other, intersect_overlap, None, None)?;
        out.set_extents();
        Ok(out)
    }

    /// Union of `self` and `other`.
    pub fn union(&self, other: &Region) -> Result<Region, RegionError> {
        if core::ptr::eq(self, other) || self.rects.is_empty() {
            return other.try_clone();
        }
        if other.rects.is_empty() {
            return self.try_clone();
        }
        // One operand is a single rect covering the other entirely.
        if self.rects.len() == 1 && self.extents.contains_rect(&other.extents) {
            return self.try_clone();
        }
        if other.rects.len() == 1 && other.extents.contains_rect(&self.extents) {
            return other.try_clone();
        }

        let mut out = region_op(self, other, union_overlap, Some(copy_band), Some(copy_band))?;
        out.extents = self.extents;
        out.extents.unite(&other.extents);
        Ok(out)
    }

    /// `self` minus `other`.
    pub fn subtract(&self, other: &Region) -> Result<Region, RegionError> {
        // Nothing to subtract, or nothing to subtract from.
        if self.rects.is_empty()
            || other.rects.is_empty()
            || !self.extents.overlaps(&other.extents)
        {
            return self.try_clone();
        }
        let mut out = region_op(self, other, subtract_overlap, Some(copy_band), None)?;
        out.set_extents();
        Ok(out)
    }

    /// Symmetric difference, composed from two subtractions; the
    /// temporaries are scoped to this call on every exit path.
    pub fn xor(&self, other: &Region) -> Result<Region, RegionError> {
        let a = self.subtract(other)?;
        let b = other.subtract(self)?;
        a.union(&b)
    }

    /// Union a single rectangle into the region in place.
    pub fn union_with_rect(&mut self, rect: Rect) -> Result<Complexity, RegionError> {
        let rc = rect.ordered();
        if !rc.is_empty() {
            let addend = Region::from_rect(rc.left, rc.top, rc.right, rc.bottom);
            *self = self.union(&addend)?;
        }
        Ok(self.complexity())
    }

    /// A frame of thickness `(x, y)` around the region: the region minus
    /// the intersection of itself moved in all four directions.
    pub fn frame(&self, x: i32, y: i32) -> Result<Region, RegionError> {
        if self.rects.is_empty() {
            return Ok(Region::new());
        }
        let mut inner = self.try_clone()?;
        inner.offset(-x, 0);
        let mut shifted = self.try_clone()?;
        shifted.offset(x, 0);
        inner = inner.intersect(&shifted)?;

        let mut shifted = self.try_clone()?;
        shifted.offset(0, -y);
        inner = inner.intersect(&shifted)?;

        let mut shifted = self.try_clone()?;
        shifted.offset(0, y);
        inner = inner.intersect(&shifted)?;

        self.subtract(&inner)
    }
}

/// Combine `src1` and `src2` into `dest` with the given operation,
/// returning the destination's complexity. `dest`'s previous contents are
/// replaced; on error it is left untouched.
pub fn combine(
    dest: &mut Region,
    src1: &Region,
    src2: &Region,
    op: CombineOp,
) -> Result<Complexity, RegionError> {
    trace!(
        "combine {:?}: {} rects x {} rects",
        op,
        src1.rect_count(),
        src2.rect_count()
    );
    match op {
        CombineOp::Copy => dest.copy_from(src1)?,
        CombineOp::And => *dest = src1.intersect(src2)?,
        CombineOp::Or => *dest = src1.union(src2)?,
        CombineOp::Xor => *dest = src1.xor(src2)?,
        CombineOp::Diff => *dest = src1.subtract(src2)?,
    }
    Ok(dest.complexity())
}

// ============================================================================
// Tests
// ============================================================================
