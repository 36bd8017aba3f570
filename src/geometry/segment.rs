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

use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub a: Point2,
    pub b: Point2,
}

impl Segment2 {
    pub fn new(a: &Point2, b: &Point2) -> Self {
        Self { a: *a, b: *b }
    }

    pub fn midpoint(&self) -> Point2 {
        self.a.lerp(&self.b, 0.5)
    }

    /// Parameter of the point of the segment closest to `p`, clamped to [0, 1].
    pub fn closest_parameter(&self, p: &Point2) -> f64 {
        let ab = self.b - self.a;
        let len2 = ab.dot(&ab);
        if len2 == 0.0 {
            return 0.0;
        }
        ((*p - self.a).dot(&ab) / len2).clamp(0.0, 1.0)
    }

    pub fn closest_point(&self, p: &Point2) -> Point2 {
        self.a.lerp(&self.b, self.closest_parameter(p))
    }

    pub fn distance_squared(&self, p: &Point2) -> f64 {
        self.closest_point(p).distance_squared(p)
    }
}

/// Squared Euclidean distance from `p` to the closed segment `a`-`b`.
///
/// Metric only; never used to decide topology.
pub fn point_segment_distance_squared(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    Segment2::new(a, b).distance_squared(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_clamps_to_endpoints() {
        let s = Segment2::new(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0));
        assert_eq!(s.distance_squared(&Point2::new(1.0, 1.0)), 1.0);
        assert_eq!(s.distance_squared(&Point2::new(3.0, 0.0)), 1.0);
        assert_eq!(s.distance_squared(&Point2::new(-1.0, 1.0)), 2.0);
        assert_eq!(s.midpoint(), Point2::new(1.0, 0.0));
    }

    #[test]
    fn degenerate_segment() {
        let p = Point2::new(1.0, 1.0);
        assert_eq!(point_segment_distance_squared(&Point2::new(0.0, 0.0), &p, &p), 2.0);
    }
}
