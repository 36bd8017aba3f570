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

//! Floating-point expansion arithmetic.
//!
//! An expansion is a sum of `f64` components, stored in increasing order of
//! magnitude, whose components do not overlap bitwise. Every operation here
//! is exact: the sum of the output components equals the exact mathematical
//! result. Zero components are eliminated; the zero expansion is `[0.0]`.
//! The sign of an expansion is the sign of its last (largest) component.

/// Half the machine epsilon: the relative rounding error of one operation.
pub const EPSILON: f64 = f64::EPSILON * 0.5;

/// 2^27 + 1, splits a 53-bit mantissa into two 26-bit halves.
pub const SPLITTER: f64 = 134_217_729.0;

/// Sum `a + b` where `|a| >= |b|`, as `(approximation, roundoff)`.
#[inline]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bvirt = x - a;
    let y = b - bvirt;
    (x, y)
}

/// Exact `a + b` as `(approximation, roundoff)`.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bvirt = x - a;
    let avirt = x - bvirt;
    let bround = b - bvirt;
    let around = a - avirt;
    (x, around + bround)
}

/// Exact `a - b` as `(approximation, roundoff)`.
#[inline]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    let bvirt = a - x;
    let avirt = x + bvirt;
    let bround = bvirt - b;
    let around = a - avirt;
    (x, around + bround)
}

/// Split `a` into a high and a low half with at most 26 significant bits each.
#[inline]
pub fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let abig = c - a;
    let ahi = c - abig;
    let alo = a - ahi;
    (ahi, alo)
}

/// Exact `a * b` as `(approximation, roundoff)`.
#[inline]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(a);
    let (bhi, blo) = split(b);
    let err1 = x - ahi * bhi;
    let err2 = err1 - alo * bhi;
    let err3 = err2 - ahi * blo;
    let y = alo * blo - err3;
    (x, y)
}

/// Two-component expansion from an `(approximation, roundoff)` pair.
#[inline]
pub fn from_pair((x, y): (f64, f64)) -> Vec<f64> {
    match (y != 0.0, x != 0.0) {
        (true, true) => vec![y, x],
        (true, false) => vec![y],
        _ => vec![x],
    }
}

/// Exact difference of two doubles as an expansion.
#[inline]
pub fn diff(a: f64, b: f64) -> Vec<f64> {
    from_pair(two_diff(a, b))
}

/// Add a single double to an expansion.
pub fn grow_expansion(e: &[f64], b: f64) -> Vec<f64> {
    let mut h = Vec::with_capacity(e.len() + 1);
    let mut q = b;
    for &enow in e {
        let (qnew, hh) = two_sum(q, enow);
        q = qnew;
        if hh != 0.0 {
            h.push(hh);
        }
    }
    if q != 0.0 || h.is_empty() {
        h.push(q);
    }
    h
}

/// Sum of two expansions.
pub fn expansion_sum(e: &[f64], f: &[f64]) -> Vec<f64> {
    let mut h = e.to_vec();
    for &fnow in f {
        h = grow_expansion(&h, fnow);
    }
    if h.is_empty() {
        h.push(0.0);
    }
    h
}

pub fn negate(e: &[f64]) -> Vec<f64> {
    e.iter().map(|c| -c).collect()
}

/// Difference of two expansions.
pub fn expansion_diff(e: &[f64], f: &[f64]) -> Vec<f64> {
    expansion_sum(e, &negate(f))
}

/// Multiply an expansion by a double.
pub fn scale_expansion(e: &[f64], b: f64) -> Vec<f64> {
    let Some((&first, rest)) = e.split_first() else {
        return vec![0.0];
    };
    let mut h = Vec::with_capacity(2 * e.len());
    let (mut q, hh) = two_product(first, b);
    if hh != 0.0 {
        h.push(hh);
    }
    for &enow in rest {
        let (product1, product0) = two_product(enow, b);
        let (sum, hh) = two_sum(q, product0);
        if hh != 0.0 {
            h.push(hh);
        }
        let (qnew, hh) = fast_two_sum(product1, sum);
        q = qnew;
        if hh != 0.0 {
            h.push(hh);
        }
    }
    if q != 0.0 || h.is_empty() {
        h.push(q);
    }
    h
}

/// Product of two expansions.
pub fn expansion_product(e: &[f64], f: &[f64]) -> Vec<f64> {
    let mut acc = vec![0.0];
    for &fnow in f {
        acc = expansion_sum(&acc, &scale_expansion(e, fnow));
    }
    acc
}

/// Floating-point approximation of the expansion's value.
pub fn estimate(e: &[f64]) -> f64 {
    e.iter().sum()
}

/// The largest component; it carries the exact sign of the expansion.
pub fn most_significant(e: &[f64]) -> f64 {
    e.last().copied().unwrap_or(0.0)
}

/// Exact sign of the expansion: -1, 0 or +1.
pub fn sign(e: &[f64]) -> i8 {
    let top = most_significant(e);
    if top > 0.0 {
        1
    } else if top < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sum_recovers_roundoff() {
        let (x, y) = two_sum(1e16, 1.0);
        assert_eq!(x, 1e16);
        assert_eq!(y, 1.0);

        let (x, y) = two_diff(1.0, 1e-20);
        assert_eq!(x, 1.0);
        assert_eq!(y, -1e-20);
    }

    #[test]
    fn two_product_matches_fused_multiply_add() {
        let pairs = [
            (0.1, 0.3),
            (1.0 / 3.0, 3.0),
            (123456789.123, 987654321.987),
            (-7.25e-12, 3.5e40),
        ];
        for (a, b) in pairs {
            let (x, y) = two_product(a, b);
            assert_eq!(x, a * b);
            assert_eq!(y, a.mul_add(b, -x));
        }
    }

    #[test]
    fn cancellation_is_exact() {
        // (1 + 2^-60) - 1 cannot be represented by a single double sum.
        let e = expansion_sum(&[1.0], &[2f64.powi(-60)]);
        let d = expansion_diff(&e, &[1.0]);
        assert_eq!(sign(&d), 1);
        assert_eq!(estimate(&d), 2f64.powi(-60));

        let zero = expansion_diff(&e, &e);
        assert_eq!(sign(&zero), 0);
    }

    #[test]
    fn product_of_differences() {
        // (a - b) * (a + b) == a^2 - b^2 exactly
        let a = 1.0 + f64::EPSILON;
        let b = 1.0;
        let lhs = expansion_product(&diff(a, b), &from_pair(two_sum(a, b)));
        let rhs = expansion_diff(&from_pair(two_product(a, a)), &from_pair(two_product(b, b)));
        assert_eq!(sign(&expansion_diff(&lhs, &rhs)), 0);
        assert_eq!(estimate(&lhs), estimate(&rhs));
    }

    #[test]
    fn scale_by_zero() {
        assert_eq!(sign(&scale_expansion(&[1e-30, 5.0], 0.0)), 0);
        assert_eq!(sign(&scale_expansion(&[], 3.0)), 0);
    }
}
