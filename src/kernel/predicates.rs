// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Orientation and in-circle predicates with exact signs.
//!
//! Both predicates first evaluate the determinant in plain `f64` and accept
//! the result when it clears a forward error bound. Otherwise the
//! determinant is recomputed exactly with expansion arithmetic. Only the
//! sign of the returned value is meaningful.

use crate::geometry::Point2;
use crate::kernel::expansion::{
    EPSILON, diff, expansion_diff, expansion_product, expansion_sum, most_significant,
};

pub const CCW_ERRBOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
pub const ICC_ERRBOUND_A: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;

/// Returns:
/// - >0 if `a`, `b`, `c` are counter-clockwise (`c` left of `a->b`)
/// - <0 if clockwise
/// - =0 if collinear
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return det;
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return det;
        }
        -detleft - detright
    } else {
        return det;
    };

    let errbound = CCW_ERRBOUND_A * detsum;
    if det >= errbound || -det >= errbound {
        return det;
    }

    orient2d_exact(a, b, c)
}

fn orient2d_exact(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let acx = diff(a.x, c.x);
    let acy = diff(a.y, c.y);
    let bcx = diff(b.x, c.x);
    let bcy = diff(b.y, c.y);

    let left = expansion_product(&acx, &bcy);
    let right = expansion_product(&acy, &bcx);
    most_significant(&expansion_diff(&left, &right))
}

/// Returns:
/// - >0 if `d` lies strictly inside the circle through counter-clockwise `a`, `b`, `c`
/// - <0 if outside
/// - =0 if the four points are cocircular
///
/// For a clockwise `a`, `b`, `c` the sign is reversed.
pub fn incircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> f64 {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    let errbound = ICC_ERRBOUND_A * permanent;
    if det > errbound || -det > errbound {
        return det;
    }

    incircle_exact(a, b, c, d)
}

fn incircle_exact(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> f64 {
    let adx = diff(a.x, d.x);
    let ady = diff(a.y, d.y);
    let bdx = diff(b.x, d.x);
    let bdy = diff(b.y, d.y);
    let cdx = diff(c.x, d.x);
    let cdy = diff(c.y, d.y);

    let lift = |x: &[f64], y: &[f64]| {
        expansion_sum(&expansion_product(x, x), &expansion_product(y, y))
    };
    let cross = |x1: &[f64], y1: &[f64], x2: &[f64], y2: &[f64]| {
        expansion_diff(&expansion_product(x1, y2), &expansion_product(y1, x2))
    };

    let alift = lift(&adx, &ady);
    let blift = lift(&bdx, &bdy);
    let clift = lift(&cdx, &cdy);

    let bcdet = cross(&bdx, &bdy, &cdx, &cdy);
    let cadet = cross(&cdx, &cdy, &adx, &ady);
    let abdet = cross(&adx, &ady, &bdx, &bdy);

    let det = expansion_sum(
        &expansion_sum(
            &expansion_product(&alift, &bcdet),
            &expansion_product(&blift, &cadet),
        ),
        &expansion_product(&clift, &abdet),
    );
    most_significant(&det)
}

#[inline]
pub fn is_ccw(a: &Point2, b: &Point2, c: &Point2) -> bool {
    orient2d(a, b, c) > 0.0
}

#[inline]
pub fn are_collinear(a: &Point2, b: &Point2, c: &Point2) -> bool {
    orient2d(a, b, c) == 0.0
}

/// `p` lies on the segment `a`-`b`, strictly between its endpoints.
pub fn on_open_segment(p: &Point2, a: &Point2, b: &Point2) -> bool {
    if a == b || !are_collinear(a, b, p) {
        return false;
    }
    // collinear: one non-degenerate axis decides betweenness exactly
    let (pa, pp, pb) = if a.x != b.x {
        (a.x, p.x, b.x)
    } else {
        (a.y, p.y, b.y)
    };
    (pa < pp && pp < pb) || (pb < pp && pp < pa)
}

/// `p` lies on the segment `a`-`b`, endpoints included.
pub fn on_closed_segment(p: &Point2, a: &Point2, b: &Point2) -> bool {
    p == a || p == b || on_open_segment(p, a, b)
}

/// `p` lies strictly inside the counter-clockwise triangle `a`, `b`, `c`.
pub fn strictly_inside_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    orient2d(a, b, p) > 0.0 && orient2d(b, c, p) > 0.0 && orient2d(c, a, p) > 0.0
}

/// `p` lies inside or on the border of the counter-clockwise triangle `a`, `b`, `c`.
pub fn inside_or_on_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    orient2d(a, b, p) >= 0.0 && orient2d(b, c, p) >= 0.0 && orient2d(c, a, p) >= 0.0
}

/// Closed segments `p1`-`p2` and `q1`-`q2` share at least one point.
pub fn segments_intersect(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    let d1 = orient2d(q1, q2, p1);
    let d2 = orient2d(q1, q2, p2);
    let d3 = orient2d(p1, p2, q1);
    let d4 = orient2d(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_closed_segment(p1, q1, q2))
        || (d2 == 0.0 && on_closed_segment(p2, q1, q2))
        || (d3 == 0.0 && on_closed_segment(q1, p1, p2))
        || (d4 == 0.0 && on_closed_segment(q2, p1, p2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn ccw_test() {
        assert!(orient2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)) > 0.0);
        assert!(orient2d(&p(0.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)) < 0.0);
        assert_eq!(orient2d(&p(0.0, 0.0), &p(1.0, 1.0), &p(3.0, 3.0)), 0.0);
    }

    #[test]
    fn orientation_survives_cancellation() {
        // c sits one ulp above the line through a and b
        let a = p(0.1, 0.1);
        let b = p(0.3, 0.3);
        let above = p(0.2, f64::from_bits(0.2f64.to_bits() + 1));
        let below = p(0.2, f64::from_bits(0.2f64.to_bits() - 1));
        assert!(orient2d(&a, &b, &above) > 0.0);
        assert!(orient2d(&a, &b, &below) < 0.0);
    }

    #[test]
    fn incircle_unit_square() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 0.0);
        let c = p(1.0, 1.0);
        assert!(incircle(&a, &b, &c, &p(0.5, 0.5)) > 0.0);
        assert!(incircle(&a, &b, &c, &p(2.0, 2.0)) < 0.0);
        assert_eq!(incircle(&a, &b, &c, &p(0.0, 1.0)), 0.0);
        // clockwise input flips the sign
        assert!(incircle(&a, &c, &b, &p(0.5, 0.5)) < 0.0);
    }

    #[test]
    fn segment_helpers() {
        let a = p(0.0, 0.0);
        let b = p(2.0, 0.0);
        assert!(on_open_segment(&p(1.0, 0.0), &a, &b));
        assert!(!on_open_segment(&a, &a, &b));
        assert!(on_closed_segment(&a, &a, &b));
        assert!(!on_open_segment(&p(3.0, 0.0), &a, &b));

        let vertical = [p(0.0, 0.0), p(0.0, 2.0)];
        assert!(on_open_segment(&p(0.0, 1.0), &vertical[0], &vertical[1]));

        assert!(segments_intersect(&a, &b, &p(1.0, -1.0), &p(1.0, 1.0)));
        assert!(segments_intersect(&a, &b, &p(2.0, 0.0), &p(3.0, 1.0)));
        assert!(!segments_intersect(&a, &b, &p(3.0, 0.0), &p(4.0, 0.0)));
        assert!(segments_intersect(&a, &b, &p(1.0, 0.0), &p(4.0, 0.0)));
        assert!(!segments_intersect(&a, &b, &p(0.0, 1.0), &p(2.0, 1.0)));
    }

    #[test]
    fn triangle_containment() {
        let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0));
        assert!(strictly_inside_triangle(&p(1.0, 1.0), &a, &b, &c));
        assert!(!strictly_inside_triangle(&p(2.0, 0.0), &a, &b, &c));
        assert!(inside_or_on_triangle(&p(2.0, 0.0), &a, &b, &c));
        assert!(inside_or_on_triangle(&c, &a, &b, &c));
        assert!(!inside_or_on_triangle(&p(3.0, 3.0), &a, &b, &c));
    }
}
