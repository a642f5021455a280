// Set-algebra identities over a zoo of region shapes.

mod helpers;

use banded_region::{
    combine, elliptic_region, CombineOp, Complexity, FillRule, Point, Rect, Region,
};
use helpers::{area, assert_banded, assert_same_coverage};

/// A varied collection of regions: empty, simple, multi-band, rasterized.
fn zoo() -> Vec<(&'static str, Region)> {
    let rect = Region::from_rect(0, 0, 10, 10);

    let mut l_shape = Region::from_rect(0, 0, 4, 12);
    l_shape.union_with_rect(Rect::new(0, 8, 12, 12)).unwrap();

    let mut checker = Region::new();
    for row in 0..4 {
        for col in 0..4 {
            if (row + col) % 2 == 0 {
                checker
                    .union_with_rect(Rect::new(col * 6, row * 6, col * 6 + 6, row * 6 + 6))
                    .unwrap();
            }
        }
    }

    let triangle = Region::from_polygon(
        &[Point::new(0, 0), Point::new(16, 0), Point::new(0, 16)],
        FillRule::EvenOdd,
    )
    .unwrap();

    let ellipse = elliptic_region(2, 2, 18, 14).unwrap();

    vec![
        ("empty", Region::new()),
        ("rect", rect),
        ("l_shape", l_shape),
        ("checker", checker),
        ("triangle", triangle),
        ("ellipse", ellipse),
    ]
}

#[test]
fn combine_copy_is_noop() {
    for (name, r) in zoo() {
        let mut dest = r.clone();
        combine(&mut dest, &r, &r, CombineOp::Copy).unwrap();
        assert_eq!(dest, r, "copy changed {}", name);
    }
}

#[test]
fn or_and_of_self_equal_copy() {
    for (name, r) in zoo() {
        assert_eq!(r.union(&r).unwrap(), r, "or(A,A) != A for {}", name);
        assert_eq!(r.intersect(&r).unwrap(), r, "and(A,A) != A for {}", name);
    }
}

#[test]
fn or_and_xor_are_commutative_rect_for_rect() {
    let zoo = zoo();
    for (an, a) in &zoo {
        for (bn, b) in &zoo {
            assert_eq!(
                a.union(b).unwrap(),
                b.union(a).unwrap(),
                "or not commutative: {} / {}",
                an,
                bn
            );
            assert_eq!(
                a.intersect(b).unwrap(),
                b.intersect(a).unwrap(),
                "and not commutative: {} / {}",
                an,
                bn
            );
            assert_eq!(
                a.xor(b).unwrap(),
                b.xor(a).unwrap(),
                "xor not commutative: {} / {}",
                an,
                bn
            );
        }
    }
}

#[test]
fn diff_union_intersection_reassembles_minuend() {
    let zoo = zoo();
    for (an, a) in &zoo {
        for (bn, b) in &zoo {
            let diff = a.subtract(b).unwrap();
            let inter = a.intersect(b).unwrap();
            let rebuilt = diff.union(&inter).unwrap();
            assert_eq!(&rebuilt, a, "diff ∪ and != A for {} / {}", an, bn);
        }
    }
}

#[test]
fn xor_equals_union_of_both_differences() {
    let zoo = zoo();
    for (an, a) in &zoo {
        for (bn, b) in &zoo {
            let composed = a
                .subtract(b)
                .unwrap()
                .union(&b.subtract(a).unwrap())
                .unwrap();
            assert_eq!(
                a.xor(b).unwrap(),
                composed,
                "xor decomposition failed: {} / {}",
                an,
                bn
            );
        }
    }
}

#[test]
fn xor_and_intersection_are_disjoint() {
    let zoo = zoo();
    for (an, a) in &zoo {
        for (bn, b) in &zoo {
            let xor = a.xor(b).unwrap();
            let inter = a.intersect(b).unwrap();
            assert!(
                xor.intersect(&inter).unwrap().is_empty(),
                "xor and intersection overlap: {} / {}",
                an,
                bn
            );
        }
    }
}

#[test]
fn all_ops_preserve_banding_invariants() {
    let zoo = zoo();
    for (_, a) in &zoo {
        assert_banded(a);
        for (_, b) in &zoo {
            assert_banded(&a.union(b).unwrap());
            assert_banded(&a.intersect(b).unwrap());
            assert_banded(&a.subtract(b).unwrap());
            assert_banded(&a.xor(b).unwrap());
        }
    }
}

#[test]
fn overlapping_squares_areas() {
    let a = Region::from_rect(0, 0, 10, 10);
    let b = Region::from_rect(5, 5, 15, 15);

    let and = a.intersect(&b).unwrap();
    assert_eq!(and.rects(), &[Rect::new(5, 5, 10, 10)]);
    assert_eq!(and.complexity(), Complexity::Simple);

    let or = a.union(&b).unwrap();
    assert_eq!(or.extents(), Rect::new(0, 0, 15, 15));
    assert_eq!(area(&or), 175);

    let xor = a.xor(&b).unwrap();
    assert_eq!(area(&xor), 150);
}

#[test]
fn empty_operand_short_circuits() {
    let a = Region::from_rect(0, 0, 10, 10);
    let empty = Region::new();

    assert!(a.intersect(&empty).unwrap().is_empty());
    assert!(empty.intersect(&a).unwrap().is_empty());
    assert_eq!(a.union(&empty).unwrap(), a);
    assert_eq!(empty.union(&a).unwrap(), a);
    assert_eq!(a.subtract(&empty).unwrap(), a);
    assert!(empty.subtract(&a).unwrap().is_empty());
    assert_eq!(a.xor(&empty).unwrap(), a);
}

#[test]
fn combine_reports_complexity() {
    let a = Region::from_rect(0, 0, 10, 10);
    let b = Region::from_rect(20, 0, 30, 10);
    let mut dest = Region::new();

    assert_eq!(
        combine(&mut dest, &a, &b, CombineOp::And).unwrap(),
        Complexity::Null
    );
    assert_eq!(
        combine(&mut dest, &a, &b, CombineOp::Or).unwrap(),
        Complexity::Complex
    );
    assert_eq!(
        combine(&mut dest, &a, &a, CombineOp::And).unwrap(),
        Complexity::Simple
    );
}

#[test]
fn offset_commutes_with_union() {
    // Translating the operands then uniting equals uniting then
    // translating.
    let zoo = zoo();
    for (_, a) in &zoo {
        for (_, b) in &zoo {
            let mut ax = a.clone();
            let mut bx = b.clone();
            ax.offset(7, -3);
            bx.offset(7, -3);
            let mut expect = a.union(b).unwrap();
            expect.offset(7, -3);
            assert_eq!(ax.union(&bx).unwrap(), expect);
        }
    }
}

#[test]
fn mirror_distributes_over_intersection() {
    let zoo = zoo();
    for (_, a) in &zoo {
        for (_, b) in &zoo {
            let mut am = a.clone();
            let mut bm = b.clone();
            am.mirror(40).unwrap();
            bm.mirror(40).unwrap();
            let mut expect = a.intersect(b).unwrap();
            expect.mirror(40).unwrap();
            let got = am.intersect(&bm).unwrap();
            assert_banded(&got);
            assert_same_coverage(&got, &expect);
        }
    }
}

#[test]
fn frame_plus_interior_reassembles_region() {
    let region = elliptic_region(0, 0, 31, 27).unwrap();
    let frame = region.frame(2, 2).unwrap();
    assert_banded(&frame);
    // The frame is contained in the region and leaves no pixel of the
    // boundary ring uncovered.
    assert_eq!(frame.intersect(&region).unwrap(), frame);
    let interior = region.subtract(&frame).unwrap();
    assert_eq!(interior.union(&frame).unwrap(), region);
}
