//! Rounded-rectangle and elliptic regions.
//!
//! Corners are rasterized with an integer midpoint-ellipse walk (after
//! Alois Zingl's algorithm): one one-pixel band per row, the lower half
//! of the arc mirrored into the upper rows, and the middle band extended
//! through the rectangle's straight vertical section. Adjacent rows that
//! came out identical are merged afterwards so the result is properly
//! banded.

use crate::error::RegionError;
use crate::rect::Rect;
use crate::region::{RectStore, Region};

/// Create a rectangular region with elliptical corners of size
/// `ellipse_width` x `ellipse_height`.
///
/// Reversed coordinates are swapped. When the effective corner size is
/// smaller than 2 in either direction the corners vanish and the result
/// is the plain rectangle over `(left, top, right, bottom)`. The rounded
/// path covers the rectangle's interior: its right and bottom edges stop
/// one unit short.
pub fn round_rect_region(
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    ellipse_width: i32,
    ellipse_height: i32,
) -> Result<Region, RegionError> {
    let rect = Rect::new(left, top, right, bottom).ordered();
    let (left, top) = (rect.left, rect.top);
    let int_right = rect.right - 1;
    let int_bottom = rect.bottom - 1;

    let ew = ((ellipse_width as i64).abs().min((int_right - left) as i64)) as i32;
    let eh = ((ellipse_height as i64).abs().min((int_bottom - top) as i64)) as i32;

    if ew < 2 || eh < 2 {
        return Ok(Region::from_rect(rect.left, rect.top, rect.right, rect.bottom));
    }

    let rows = eh as usize;
    let mut region = Region::with_capacity(rows)?;
    region.rects.resize(rows, Rect::ZERO);

    let a = ew - 1;
    let b = eh - 1;
    let asq = 8 * (a as i64) * (a as i64);
    let bsq = 8 * (b as i64) * (b as i64);
    let mut dx = 4 * (b as i64) * (b as i64) * (1 - a as i64);
    let mut dy = 4 * (a as i64) * (a as i64) * (1 + (b % 2) as i64);
    let mut err = dx + dy + (a as i64) * (a as i64) * (b % 2) as i64;

    let mut x = 0i32;
    let mut y = eh / 2;

    region.rects[y as usize].left = left;
    region.rects[y as usize].right = int_right;

    // Walk the lower-left quarter arc; every y step records the row's
    // horizontal inset.
    while x <= ew / 2 {
        let e2 = 2 * err;
        if e2 >= dx {
            x += 1;
            dx += bsq;
            err += dx;
        }
        if e2 <= dy {
            y += 1;
            dy += asq;
            err += dy;
            if (y as usize) < rows {
                region.rects[y as usize].left = left + x;
                region.rects[y as usize].right = int_right - x;
            }
        }
    }

    // Mirror the computed lower rows into the upper half and lay out the
    // row positions: top rows hug `top`, bottom rows hug the interior
    // bottom.
    let half = (eh / 2) as usize;
    for i in 0..half {
        let src = b as usize - i;
        region.rects[i].left = region.rects[src].left;
        region.rects[i].right = region.rects[src].right;
        region.rects[i].top = top + i as i32;
        region.rects[i].bottom = region.rects[i].top + 1;
    }
    for i in half..rows {
        region.rects[i].top = int_bottom - eh + i as i32;
        region.rects[i].bottom = region.rects[i].top + 1;
    }
    // The middle band also covers the straight section between the
    // corner arcs.
    region.rects[half].top = top + eh / 2;

    normalize_rows(&mut region)?;
    region.set_extents();
    Ok(region)
}

/// Create an elliptical region inscribed in the given rectangle.
pub fn elliptic_region(left: i32, top: i32, right: i32, bottom: i32) -> Result<Region, RegionError> {
    round_rect_region(left, top, right, bottom, right - left, bottom - top)
}

/// Merge vertically adjacent one-rect rows with identical horizontal
/// extent into taller bands, dropping any degenerate rows, so the
/// rasterized result satisfies the same banding invariants the set
/// operations maintain.
fn normalize_rows(region: &mut Region) -> Result<(), RegionError> {
    let mut merged = RectStore::new();
    merged.try_reserve(region.rects.len())?;
    for &r in region.rects.iter() {
        if r.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last)
                if last.left == r.left && last.right == r.right && last.bottom == r.top =>
            {
                last.bottom = r.bottom;
            }
            _ => merged.push(r),
        }
    }
    region.rects = merged;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Complexity;

    fn area(region: &Region) -> i64 {
        region
            .rects()
            .iter()
            .map(|r| (r.right - r.left) as i64 * (r.bottom - r.top) as i64)
            .sum()
    }

    #[test]
    fn test_degenerate_corners_give_plain_rect() {
        let r = round_rect_region(0, 0, 100, 100, 1, 1).unwrap();
        assert_eq!(r, Region::from_rect(0, 0, 100, 100));
        let r = round_rect_region(0, 0, 100, 100, 0, 50).unwrap();
        assert_eq!(r, Region::from_rect(0, 0, 100, 100));
    }

    #[test]
    fn test_zero_area_rect_is_empty() {
        assert!(round_rect_region(5, 5, 5, 50, 10, 10).unwrap().is_empty());
    }

    #[test]
    fn test_round_rect_shape() {
        let r = round_rect_region(0, 0, 10, 10, 4, 4).unwrap();
        assert_eq!(
            r.rects(),
            &[
                Rect::new(1, 0, 8, 1),
                Rect::new(0, 1, 9, 8),
                Rect::new(1, 8, 8, 9),
            ]
        );
        assert_eq!(r.extents(), Rect::new(0, 0, 9, 9));
        // corners are cut, the interior is solid
        assert!(!r.contains_point(0, 0));
        assert!(r.contains_point(5, 5));
        assert_eq!(area(&r), 77);
    }

    #[test]
    fn test_elliptic_region_shape() {
        let r = elliptic_region(0, 0, 8, 8).unwrap();
        assert_eq!(
            r.rects(),
            &[
                Rect::new(2, 0, 5, 1),
                Rect::new(1, 1, 6, 2),
                Rect::new(0, 2, 7, 5),
                Rect::new(1, 5, 6, 6),
                Rect::new(2, 6, 5, 7),
            ]
        );
        assert_eq!(r.extents(), Rect::new(0, 0, 7, 7));
        assert_eq!(r.complexity(), Complexity::Complex);
        assert_eq!(area(&r), 37);
    }

    #[test]
    fn test_elliptic_region_is_mirror_symmetric() {
        let r = elliptic_region(0, 0, 21, 13).unwrap();
        let mut mirrored = r.clone();
        mirrored.mirror(20).unwrap();
        assert_eq!(mirrored, r);
    }

    #[test]
    fn test_rows_are_banded() {
        // No two adjacent bands may share an identical horizontal layout.
        let r = elliptic_region(0, 0, 40, 60).unwrap();
        let rects = r.rects();
        for w in rects.windows(2) {
            if w[0].bottom == w[1].top {
                assert!(
                    w[0].left != w[1].left || w[0].right != w[1].right,
                    "uncoalesced bands: {:?} / {:?}",
                    w[0],
                    w[1]
                );
            }
        }
    }
}
