// Shared helpers for the integration suites. Not every suite uses every
// helper.
#![allow(dead_code)]

use banded_region::{Rect, Region};

/// Total covered area of a region, from its rect list.
pub fn area(region: &Region) -> i64 {
    region
        .rects()
        .iter()
        .map(|r| (r.right - r.left) as i64 * (r.bottom - r.top) as i64)
        .sum()
}

/// Assert every banding invariant:
/// - rects are normalized and non-empty,
/// - rects in a band share top/bottom and never touch horizontally,
/// - band tops strictly ascend and bands don't overlap vertically,
/// - no two adjacent bands with identical layout remain uncoalesced,
/// - the extents are the exact bounding box (zero when empty).
pub fn assert_banded(region: &Region) {
    let rects = region.rects();
    if rects.is_empty() {
        assert_eq!(region.extents(), Rect::ZERO, "empty region must have zero extents");
        return;
    }

    for r in rects {
        assert!(
            r.left < r.right && r.top < r.bottom,
            "degenerate rect in region: {:?}",
            r
        );
    }

    let mut prev_band: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < rects.len() {
        let top = rects[i].top;
        let bottom = rects[i].bottom;
        let mut j = i;
        while j < rects.len() && rects[j].top == top {
            assert_eq!(rects[j].bottom, bottom, "rect does not span its band: {:?}", rects[j]);
            if j > i {
                assert!(
                    rects[j].left > rects[j - 1].right,
                    "rects in a band touch or overlap: {:?} / {:?}",
                    rects[j - 1],
                    rects[j]
                );
            }
            j += 1;
        }

        if let Some((pstart, pend)) = prev_band {
            assert!(top > rects[pstart].top, "band tops must ascend");
            assert!(top >= rects[pstart].bottom, "bands overlap vertically");
            if rects[pstart].bottom == top && pend - pstart == j - i {
                let identical = (0..j - i).all(|k| {
                    rects[pstart + k].left == rects[i + k].left
                        && rects[pstart + k].right == rects[i + k].right
                });
                assert!(
                    !identical,
                    "adjacent identical bands not coalesced at y={}",
                    top
                );
            }
        }
        prev_band = Some((i, j));
        i = j;
    }

    let mut extents = rects[0];
    for r in rects {
        extents.unite(r);
    }
    assert_eq!(region.extents(), extents, "extents are not the exact bounding box");
}

/// Assert two regions cover exactly the same points, by sampling every
/// integer point of the union of their extents (plus a one-pixel apron).
pub fn assert_same_coverage(a: &Region, b: &Region) {
    let mut bounds = a.extents();
    bounds.unite(&b.extents());
    for y in bounds.top - 1..=bounds.bottom {
        for x in bounds.left - 1..=bounds.right {
            assert_eq!(
                a.contains_point(x, y),
                b.contains_point(x, y),
                "coverage differs at ({}, {})",
                x,
                y
            );
        }
    }
}
