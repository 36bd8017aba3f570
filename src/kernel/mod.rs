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

//! Exact-sign geometric predicates.
//!
//! The triangulator only ever looks at the sign of a predicate. [`Kernel`]
//! captures that contract so the floating-point kernel can be checked
//! against an exact rational one.

use std::cmp::Ordering;

use crate::geometry::Point2;

pub mod expansion;
pub mod predicates;
#[cfg(feature = "rational")]
pub mod rational;

pub use predicates::{
    are_collinear, incircle, inside_or_on_triangle, is_ccw, on_closed_segment, on_open_segment,
    orient2d, segments_intersect, strictly_inside_triangle,
};
#[cfg(feature = "rational")]
pub use rational::RationalKernel;

pub trait Kernel {
    /// Sign of the orientation of `a`, `b`, `c` (`Greater` for counter-clockwise).
    fn orient2d_sign(a: &Point2, b: &Point2, c: &Point2) -> Ordering;

    /// `Greater` when `d` is inside the circle through counter-clockwise `a`, `b`, `c`.
    fn incircle_sign(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Ordering;
}

/// Filtered floating-point kernel backed by expansion arithmetic.
pub struct ExpansionKernel;

impl Kernel for ExpansionKernel {
    fn orient2d_sign(a: &Point2, b: &Point2, c: &Point2) -> Ordering {
        sign_of(orient2d(a, b, c))
    }

    fn incircle_sign(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Ordering {
        sign_of(incircle(a, b, c, d))
    }
}

#[inline]
pub fn sign_of(value: f64) -> Ordering {
    if value > 0.0 {
        Ordering::Greater
    } else if value < 0.0 {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
