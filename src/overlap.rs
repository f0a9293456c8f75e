//! Plane-sweep classifier for how two polygons' interiors relate.

use crate::debug::geodebug;
use crate::polygon::Polygon;

/// Result of comparing two polygons' interiors. The raw discriminant
/// values match the SQL-facing `geopoly_overlap` return codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    Disjoint = 0,
    Overlapping = 1,
    P1WithinP2 = 2,
    P2WithinP1 = 3,
    Equal = 4,
}

impl Overlap {
    pub fn as_code(self) -> i64 {
        self as i64
    }
}

/// A polygon edge, left endpoint first, as the line `y = c*x + b`.
struct Segment {
    c: f64,
    b: f64,
    y: f64,
    y0: f64,
    side: u8,
    #[allow(dead_code)]
    idx: u32,
}

enum EventKind {
    Add,
    Remove,
}

struct Event {
    x: f64,
    kind: EventKind,
    seg: usize,
}

fn add_one_segment(
    segments: &mut Vec<Segment>,
    events: &mut Vec<Event>,
    mut x0: f64,
    mut y0: f64,
    mut x1: f64,
    mut y1: f64,
    side: u8,
    idx: u32,
) {
    if x0 == x1 {
        return; // vertical segments never change the sweep's active set
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }
    let c = (y1 - y0) / (x1 - x0);
    let b = y1 - x1 * c;
    let seg_idx = segments.len();
    segments.push(Segment {
        c,
        b,
        y: 0.0,
        y0,
        side,
        idx,
    });
    events.push(Event {
        x: x0,
        kind: EventKind::Add,
        seg: seg_idx,
    });
    events.push(Event {
        x: x1,
        kind: EventKind::Remove,
        seg: seg_idx,
    });
}

fn add_segments(segments: &mut Vec<Segment>, events: &mut Vec<Event>, p: &Polygon, side: u8) {
    let n = p.n_vertex();
    for i in 0..n - 1 {
        let (x0, y0) = p.vertex(i);
        let (x1, y1) = p.vertex(i + 1);
        add_one_segment(
            segments, events, x0 as f64, y0 as f64, x1 as f64, y1 as f64, side, i as u32,
        );
    }
    let (x0, y0) = p.vertex(n - 1);
    let (x1, y1) = p.vertex(0);
    add_one_segment(
        segments,
        events,
        x0 as f64,
        y0 as f64,
        x1 as f64,
        y1 as f64,
        side,
        (n - 1) as u32,
    );
}

fn segment_cmp(a: &Segment, b: &Segment) -> std::cmp::Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.c.partial_cmp(&b.c).unwrap_or(std::cmp::Ordering::Equal))
}

/// Determine how `p1` and `p2`'s interiors relate.
///
/// Builds every non-vertical edge of both polygons as a segment, sweeps a
/// vertical line left to right stopping at each distinct x where a segment
/// starts or ends, and tracks a 2-bit mask (bit 0 = inside `p1`, bit 1 =
/// inside `p2`) of which interiors are active between consecutive active
/// segments at that x. If the sweep ever detects two active segments from
/// different polygons swap vertical order (a genuine edge crossing), the
/// two polygons overlap without needing to finish the sweep.
pub fn overlap(p1: &Polygon, p2: &Polygon) -> Overlap {
    let mut segments = Vec::with_capacity(p1.n_vertex() + p2.n_vertex());
    let mut events = Vec::with_capacity((p1.n_vertex() + p2.n_vertex()) * 2);
    add_segments(&mut segments, &mut events, p1, 1);
    add_segments(&mut segments, &mut events, p2, 2);

    events.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    if events.is_empty() {
        return Overlap::Disjoint;
    }

    let mut active: Vec<usize> = Vec::new();
    let mut needs_sort = false;
    let mut seen_mask = [false; 4];
    let mut rx = if events[0].x == 0.0 { -1.0 } else { 0.0 };

    for event in &events {
        if event.x != rx {
            rx = event.x;
            geodebug!("Distinct X: {}", rx);
            if needs_sort {
                geodebug!("SORT");
                active.sort_by(|&a, &b| segment_cmp(&segments[a], &segments[b]));
                needs_sort = false;
            }

            let mut mask = 0u8;
            let mut prev: Option<usize> = None;
            for &s in &active {
                if let Some(p) = prev {
                    if segments[p].y != segments[s].y {
                        geodebug!("MASK: {}", mask);
                        seen_mask[mask as usize] = true;
                    }
                }
                mask ^= segments[s].side;
                prev = Some(s);
            }

            let mut mask = 0u8;
            let mut prev: Option<usize> = None;
            for &s in &active {
                let y = segments[s].c * rx + segments[s].b;
                geodebug!(
                    "Segment {}.{} {}->{}",
                    segments[s].side,
                    segments[s].idx,
                    segments[s].y,
                    y
                );
                segments[s].y = y;
                if let Some(p) = prev {
                    if segments[p].y > segments[s].y && segments[p].side != segments[s].side {
                        geodebug!("Crossing: {}.{} and {}.{}", segments[p].side, segments[p].idx, segments[s].side, segments[s].idx);
                        return Overlap::Overlapping;
                    } else if segments[p].y != segments[s].y {
                        geodebug!("MASK: {}", mask);
                        seen_mask[mask as usize] = true;
                    }
                }
                mask ^= segments[s].side;
                prev = Some(s);
            }
        }

        match event.kind {
            EventKind::Add => {
                geodebug!("ADD {}.{}", segments[event.seg].side, segments[event.seg].idx);
                segments[event.seg].y = segments[event.seg].y0;
                active.push(event.seg);
                needs_sort = true;
            }
            EventKind::Remove => {
                geodebug!("RM  {}.{}", segments[event.seg].side, segments[event.seg].idx);
                if let Some(pos) = active.iter().position(|&s| s == event.seg) {
                    active.remove(pos);
                }
            }
        }
    }

    classify(seen_mask)
}

fn classify(m: [bool; 4]) -> Overlap {
    if !m[3] {
        Overlap::Disjoint
    } else if m[1] && !m[2] {
        Overlap::P2WithinP1
    } else if !m[1] && m[2] {
        Overlap::P1WithinP2
    } else if !m[1] && !m[2] {
        Overlap::Equal
    } else {
        Overlap::Overlapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f32, y0: f32, side: f32) -> Polygon {
        Polygon::new(vec![
            x0,
            y0,
            x0 + side,
            y0,
            x0 + side,
            y0 + side,
            x0,
            y0 + side,
        ])
        .unwrap()
    }

    #[test]
    fn s5_disjoint_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 10.0, 1.0);
        assert_eq!(overlap(&a, &b), Overlap::Disjoint);
    }

    #[test]
    fn s6_overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert_eq!(overlap(&a, &b), Overlap::Overlapping);
    }

    #[test]
    fn s8_reflexive_equal() {
        let a = square(0.0, 0.0, 1.0);
        assert_eq!(overlap(&a, &a), Overlap::Equal);
    }

    #[test]
    fn s7_containment_both_directions() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 1.0);
        assert_eq!(overlap(&inner, &outer), Overlap::P1WithinP2);
        assert_eq!(overlap(&outer, &inner), Overlap::P2WithinP1);
    }

    #[test]
    fn s9_symmetry_for_plain_overlap() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert_eq!(overlap(&a, &b), overlap(&b, &a));
    }
}
