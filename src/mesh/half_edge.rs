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

/// One directed side of a triangle.
///
/// Half-edges live in groups of three: half-edges `3t`, `3t + 1` and
/// `3t + 2` bound triangle `t` in counter-clockwise order, so `next` and
/// `prev` are pure index arithmetic and are not stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: usize,        // vertex the half-edge starts at
    pub twin: Option<usize>,  // None on the boundary
    pub constrained: bool,    // mirrored on the twin
    pub removed: bool,        // tombstone until the next compaction
}

impl HalfEdge {
    pub fn new(origin: usize) -> Self {
        Self {
            origin,
            twin: None,
            constrained: false,
            removed: false,
        }
    }
}

/// Next half-edge around the same triangle.
#[inline]
pub const fn next(e: usize) -> usize {
    3 * (e / 3) + (e + 1) % 3
}

/// Previous half-edge around the same triangle.
#[inline]
pub const fn prev(e: usize) -> usize {
    3 * (e / 3) + (e + 2) % 3
}

/// Triangle owning half-edge `e`.
#[inline]
pub const fn triangle_of(e: usize) -> usize {
    e / 3
}
