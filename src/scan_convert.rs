//! Polygon scan conversion.
//!
//! Turns one or more closed polygons into a banded region by sweeping a
//! scanline from the topmost vertex to the bottommost. Edges waiting for
//! the sweep live in an edge table bucketed by starting scanline; edges
//! crossing the current scanline live in the active edge table (AET),
//! kept sorted by their current x. Each edge carries a Bresenham stepper
//! so advancing to the next scanline is O(1) per edge.
//!
//! Two fill rules are supported. EVEN_ODD toggles an inside flag at every
//! AET crossing. WINDING keeps a signed crossing counter and derives a
//! sublist of the AET (the edges where the counter enters or leaves
//! zero); the sublist is recomputed on every AET membership change and
//! is the only set of edges that open or close spans.

use log::trace;

use crate::boolean_ops::coalesce;
use crate::error::RegionError;
use crate::rect::{Point, Rect};
use crate::region::Region;

/// Polygon fill rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    /// A point is inside if a ray from it crosses an odd number of edges.
    EvenOdd,
    /// A point is inside if clockwise and counter-clockwise crossings of
    /// a ray from it differ in number.
    Winding,
}

// ============================================================================
// Bresenham edge stepper
// ============================================================================

/// Per-edge Bresenham state, advanced once per scanline with y as the
/// major axis.
///
/// The increments differ for negative and non-negative dx: both cases add
/// half a pixel to the starting x so that span boundaries fall on the
/// first pixel inside the polygon on the left and the first pixel outside
/// on the right. Two polygons sharing an edge then tile without gap or
/// overlap. A rightward edge must flip to the next column immediately; a
/// leftward edge must not flip until a whole column has been traversed.
#[derive(Debug, Clone)]
struct Bres {
    minor_axis: i32,
    d: i32,
    m: i32,
    m1: i32,
    incr1: i32,
    incr2: i32,
}

impl Bres {
    /// `dy` must be positive; `x1` is the top endpoint's x, `x2` the
    /// bottom's.
    fn new(dy: i32, x1: i32, x2: i32) -> Self {
        let dx = x2 - x1;
        if dx < 0 {
            let m = dx / dy;
            let m1 = m - 1;
            Self {
                minor_axis: x1,
                m,
                m1,
                incr1: -2 * dx + 2 * dy * m1,
                incr2: -2 * dx + 2 * dy * m,
                d: 2 * m * dy - 2 * dx - 2 * dy,
            }
        } else {
            let m = dx / dy;
            let m1 = m + 1;
            Self {
                minor_axis: x1,
                m,
                m1,
                incr1: 2 * dx - 2 * dy * m1,
                incr2: 2 * dx - 2 * dy * m,
                d: -2 * m * dy + 2 * dx,
            }
        }
    }

    /// Advance one scanline.
    #[inline]
    fn step(&mut self) {
        if self.m1 > 0 {
            if self.d > 0 {
                self.minor_axis += self.m1;
                self.d += self.incr1;
            } else {
                self.minor_axis += self.m;
                self.d += self.incr2;
            }
        } else if self.d >= 0 {
            self.minor_axis += self.m1;
            self.d += self.incr1;
        } else {
            self.minor_axis += self.m;
            self.d += self.incr2;
        }
    }
}

// ============================================================================
// Edge table
// ============================================================================

#[derive(Debug)]
struct Edge {
    /// Last scanline this edge crosses; the bottom vertex's own scanline
    /// is excluded so shared vertices aren't counted twice.
    ymax: i32,
    bres: Bres,
    /// Edge direction is downward in point order; used by the winding rule.
    clockwise: bool,
}

struct EdgeTable {
    edges: Vec<Edge>,
    /// `(starting scanline, initial x, edge index)`, sorted so that the
    /// sweep consumes each scanline's new edges in x order.
    starts: Vec<(i32, i32, usize)>,
    ymin: i32,
    ymax: i32,
    /// Sum of every edge's clip-limited vertical span: each scanline
    /// crossing pair produces at most one span, so `total_span / 2`
    /// bounds the output rect count.
    total_span: u32,
}

/// Build the edge table for a set of closed polygons over a shared point
/// slice. Horizontal edges, edges entirely outside the clip's y range,
/// and polygons with fewer than two vertices contribute nothing.
fn build_edge_table(
    points: &[Point],
    counts: &[usize],
    clip: Option<&Rect>,
) -> Result<EdgeTable, RegionError> {
    let mut edges = Vec::new();
    edges
        .try_reserve(points.len())
        .map_err(|_| RegionError::Alloc)?;
    let mut starts = Vec::new();
    starts
        .try_reserve(points.len())
        .map_err(|_| RegionError::Alloc)?;

    let mut ymin = i32::MAX;
    let mut ymax = i32::MIN;
    let mut total_span: u32 = 0;

    let mut base = 0usize;
    for &count in counts {
        let poly = &points[base..base + count];
        base += count;
        if count < 2 {
            continue;
        }

        // Each vertex closes the edge from its predecessor; the first
        // vertex pairs with the last, closing the polygon.
        let mut prev = poly[count - 1];
        for &cur in poly {
            let (top, bottom, clockwise) = if prev.y > cur.y {
                (cur, prev, false)
            } else {
                (prev, cur, true)
            };
            prev = cur;

            if bottom.y == top.y {
                continue;
            }
            if let Some(c) = clip {
                if top.y >= c.bottom || bottom.y <= c.top {
                    continue;
                }
            }

            let dy = bottom.y - top.y;
            let span = match clip {
                Some(c) => (bottom.y.min(c.bottom) - top.y.max(c.top)) as u32,
                None => dy as u32,
            };
            total_span = total_span
                .checked_add(span)
                .ok_or(RegionError::Overflow)?;

            edges.push(Edge {
                ymax: bottom.y - 1,
                bres: Bres::new(dy, top.x, bottom.x),
                clockwise,
            });
            starts.push((top.y, top.x, edges.len() - 1));

            if top.y < ymin {
                ymin = top.y;
            }
            if bottom.y > ymax {
                ymax = bottom.y;
            }
        }
    }

    starts.sort_by_key(|&(y, x, _)| (y, x));
    Ok(EdgeTable {
        edges,
        starts,
        ymin,
        ymax,
        total_span,
    })
}

// ============================================================================
// Active edge table
// ============================================================================

/// Insert an edge into the AET keeping it sorted by current x.
fn insert_active(aet: &mut Vec<usize>, edges: &[Edge], idx: usize) {
    let x = edges[idx].bres.minor_axis;
    let pos = aet.partition_point(|&e| edges[e].bres.minor_axis < x);
    aet.insert(pos, idx);
}

/// Drop edges ending at scanline `y`, step the survivors' x, and restore
/// x order. Returns `true` if the AET's membership or order changed.
fn advance_scanline(aet: &mut Vec<usize>, edges: &mut [Edge], y: i32) -> bool {
    let before = aet.len();
    aet.retain(|&e| edges[e].ymax != y);
    let mut changed = aet.len() != before;

    for &e in aet.iter() {
        edges[e].bres.step();
    }

    let sorted = aet
        .windows(2)
        .all(|w| edges[w[0]].bres.minor_axis <= edges[w[1]].bres.minor_axis);
    if !sorted {
        aet.sort_by_key(|&e| edges[e].bres.minor_axis);
        changed = true;
    }
    changed
}

/// Derive the winding-active sublist of the AET: walking left to right
/// with a signed crossing counter (+1 clockwise, -1 counter-clockwise),
/// keep exactly the edges where the counter enters or leaves zero. Spans
/// of nonzero winding lie between consecutive kept edges.
fn compute_winding_active(aet: &[usize], edges: &[Edge]) -> Vec<usize> {
    let mut winding_active = Vec::with_capacity(aet.len());
    let mut inside = true;
    let mut winding = 0i32;
    for &e in aet {
        if edges[e].clockwise {
            winding += 1;
        } else {
            winding -= 1;
        }
        if (!inside && winding == 0) || (inside && winding != 0) {
            winding_active.push(e);
            inside = !inside;
        }
    }
    winding_active
}

// ============================================================================
// Sweep
// ============================================================================

/// Emit the span `[left, right)` on scanline `y`, merging into the
/// previous rect when it is on the same scanline and touches or overlaps.
fn emit_span(region: &mut Region, left: i32, right: i32, y: i32) -> Result<(), RegionError> {
    if let Some(last) = region.rects.last_mut() {
        if last.top == y && last.right >= left {
            if last.right < right {
                last.right = right;
            }
            return Ok(());
        }
    }
    region.add_rect(left, y, right, y + 1)
}

fn sweep(mut et: EdgeTable, fill_rule: FillRule, clip: Option<&Rect>) -> Result<Region, RegionError> {
    let mut region = Region::with_capacity((et.total_span / 2) as usize)?;

    let mut ymax = et.ymax;
    if let Some(c) = clip {
        ymax = ymax.min(c.bottom);
    }

    let mut aet: Vec<usize> = Vec::new();
    let mut next_start = 0usize;
    let mut prev_band = 0usize;
    let mut cur_band = 0usize;

    match fill_rule {
        FillRule::EvenOdd => {
            for y in et.ymin..ymax {
                while next_start < et.starts.len() && et.starts[next_start].0 == y {
                    insert_active(&mut aet, &et.edges, et.starts[next_start].2);
                    next_start += 1;
                }

                if clip.map_or(true, |c| y >= c.top) {
                    let mut first = true;
                    let mut span_left = 0;
                    for &e in &aet {
                        let x = et.edges[e].bres.minor_axis;
                        if first {
                            span_left = x;
                        } else if x != span_left {
                            emit_span(&mut region, span_left, x, y)?;
                        }
                        first = !first;
                    }
                }

                advance_scanline(&mut aet, &mut et.edges, y);

                if !region.rects.is_empty() {
                    prev_band = coalesce(&mut region.rects, prev_band, cur_band);
                    cur_band = region.rects.len();
                }
            }
        }
        FillRule::Winding => {
            let mut winding_active: Vec<usize> = Vec::new();
            for y in et.ymin..ymax {
                let mut loaded = false;
                while next_start < et.starts.len() && et.starts[next_start].0 == y {
                    insert_active(&mut aet, &et.edges, et.starts[next_start].2);
                    next_start += 1;
                    loaded = true;
                }
                if loaded {
                    winding_active = compute_winding_active(&aet, &et.edges);
                }

                if clip.map_or(true, |c| y >= c.top) {
                    let mut first = true;
                    let mut span_left = 0;
                    let mut w = 0usize;
                    for &e in &aet {
                        // Only edges in the winding-active sublist open or
                        // close spans.
                        if w < winding_active.len() && winding_active[w] == e {
                            let x = et.edges[e].bres.minor_axis;
                            if first {
                                span_left = x;
                            } else if x != span_left {
                                region.add_rect(span_left, y, x, y + 1)?;
                            }
                            first = !first;
                            w += 1;
                        }
                    }
                }

                if advance_scanline(&mut aet, &mut et.edges, y) {
                    winding_active = compute_winding_active(&aet, &et.edges);
                }

                if !region.rects.is_empty() {
                    prev_band = coalesce(&mut region.rects, prev_band, cur_band);
                    cur_band = region.rects.len();
                }
            }
        }
    }

    debug_assert!(region.rects.len() <= (et.total_span / 2).max(2) as usize);

    region.set_extents();
    region.compact();
    Ok(region)
}

// ============================================================================
// Entry points
// ============================================================================

/// Scan-convert a set of closed polygons into a region.
///
/// `points` holds every polygon's vertices back to back; `counts` gives
/// each polygon's vertex count. The final vertex of each polygon connects
/// back to its first. An optional `clip` limits the vertical range that
/// is rasterized (the clip's left/right are ignored).
pub fn polygon_region(
    points: &[Point],
    counts: &[usize],
    fill_rule: FillRule,
    clip: Option<&Rect>,
) -> Result<Region, RegionError> {
    trace!(
        "polygon_region: {} polygons, {} points, {:?}",
        counts.len(),
        points.len(),
        fill_rule
    );

    let total: usize = counts.iter().sum();
    if total != points.len() {
        return Err(RegionError::InvalidData);
    }

    // A single axis-aligned quad needs no scan conversion.
    if counts.len() == 1 {
        if let Some(region) = rect_fast_path(points) {
            return Ok(region);
        }
    }

    let clip = clip.map(|c| c.ordered());
    let et = build_edge_table(points, counts, clip.as_ref())?;
    if et.edges.is_empty() {
        return Ok(Region::new());
    }
    sweep(et, fill_rule, clip.as_ref())
}

/// Recognize a single polygon of 4 vertices (or 5 with the first point
/// repeated) forming an axis-aligned rectangle, in any winding order and
/// from any starting vertex.
fn rect_fast_path(points: &[Point]) -> Option<Region> {
    let p = points;
    let quad = p.len() == 4 || (p.len() == 5 && p[4] == p[0]);
    if !quad {
        return None;
    }
    let horizontal_first =
        p[0].y == p[1].y && p[1].x == p[2].x && p[2].y == p[3].y && p[3].x == p[0].x;
    let vertical_first =
        p[0].x == p[1].x && p[1].y == p[2].y && p[2].x == p[3].x && p[3].y == p[0].y;
    if horizontal_first || vertical_first {
        Some(Region::from_rect(
            p[0].x.min(p[2].x),
            p[0].y.min(p[2].y),
            p[0].x.max(p[2].x),
            p[0].y.max(p[2].y),
        ))
    } else {
        None
    }
}

impl Region {
    /// Scan-convert a single closed polygon.
    pub fn from_polygon(points: &[Point], fill_rule: FillRule) -> Result<Region, RegionError> {
        polygon_region(points, &[points.len()], fill_rule, None)
    }
}

// ============================================================================
// Tests
// ============================================================================
