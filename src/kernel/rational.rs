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

//! Exact rational evaluation of the predicates, backed by GMP.
//!
//! Slow, but free of any rounding; every finite `f64` converts to a
//! `Rational` exactly.

use std::cmp::Ordering;

use rug::Rational;

use crate::geometry::Point2;
use crate::kernel::Kernel;

/// Kernel using `rug::Rational` (arbitrary-precision rationals backed by GMP).
pub struct RationalKernel;

fn coords(p: &Point2) -> (Rational, Rational) {
    let exact = |v: f64| Rational::from_f64(v).unwrap_or_else(|| panic!("non-finite coordinate {v}"));
    (exact(p.x), exact(p.y))
}

impl RationalKernel {
    pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> Rational {
        let (ax, ay) = coords(a);
        let (bx, by) = coords(b);
        let (cx, cy) = coords(c);
        let left = (ax - cx.clone()) * (by - cy.clone());
        let right = (ay - cy) * (bx - cx);
        left - right
    }

    pub fn incircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Rational {
        let (dx, dy) = coords(d);
        let rel = |p: &Point2| {
            let (x, y) = coords(p);
            (x - dx.clone(), y - dy.clone())
        };
        let (adx, ady) = rel(a);
        let (bdx, bdy) = rel(b);
        let (cdx, cdy) = rel(c);

        let lift = |x: &Rational, y: &Rational| Rational::from(x * x) + Rational::from(y * y);
        let cross = |x1: &Rational, y1: &Rational, x2: &Rational, y2: &Rational| {
            Rational::from(x1 * y2) - Rational::from(y1 * x2)
        };

        lift(&adx, &ady) * cross(&bdx, &bdy, &cdx, &cdy)
            + lift(&bdx, &bdy) * cross(&cdx, &cdy, &adx, &ady)
            + lift(&cdx, &cdy) * cross(&adx, &ady, &bdx, &bdy)
    }
}

impl Kernel for RationalKernel {
    fn orient2d_sign(a: &Point2, b: &Point2, c: &Point2) -> Ordering {
        Self::orient2d(a, b, c).cmp0()
    }

    fn incircle_sign(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Ordering {
        Self::incircle(a, b, c, d).cmp0()
    }
}
