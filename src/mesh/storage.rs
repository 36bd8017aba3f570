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
use crate::mesh::half_edge::{next, prev};

/// Storage capabilities the triangulation algorithms are written against.
///
/// Half-edges are grouped by triangle (`3t`, `3t + 1`, `3t + 2`, counter-
/// clockwise). Removed triangles stay in place as tombstones until
/// [`MeshStorage::invalidate`] compacts them, so half-edge indices stay
/// stable for the duration of one edit.
pub trait MeshStorage {
    fn vertex_count(&self) -> usize;
    fn position(&self, v: usize) -> Point2;
    fn set_position(&mut self, v: usize, position: Point2);

    /// Number of half-edge slots, tombstones included.
    fn half_edge_count(&self) -> usize;
    fn is_removed(&self, e: usize) -> bool;
    fn origin(&self, e: usize) -> usize;
    fn twin(&self, e: usize) -> Option<usize>;
    fn is_constrained(&self, e: usize) -> bool;

    /// Add the counter-clockwise triangle `(a, b, c)` and return the index of
    /// its half-edge `a -> b`; `b -> c` and `c -> a` follow it.
    fn connect(&mut self, a: usize, b: usize, c: usize) -> usize;

    /// Link two opposite half-edges. A constraint on either side ends up on both.
    fn make_twins(&mut self, i: usize, j: usize);

    /// Break the twin link of `i`; both sides become boundary half-edges.
    fn untwin(&mut self, i: usize);

    /// Set the constraint flag of `i` and of its twin.
    fn set_constraint(&mut self, i: usize, constrained: bool);

    /// Tombstone the triangle owning `e`. Outer twins are unlinked and keep
    /// their constraint flags.
    fn remove_triangle(&mut self, e: usize);

    /// Remove a vertex that no live half-edge uses by moving the last vertex
    /// into its slot. Returns the old index of the moved vertex.
    fn swap_remove_vertex(&mut self, v: usize) -> Option<usize>;

    /// Compact tombstones away and rebuild derived buffers.
    fn invalidate(&mut self);

    #[inline]
    fn dest(&self, e: usize) -> usize {
        self.origin(next(e))
    }

    /// Origin of the half-edge opposite `e` inside its triangle.
    #[inline]
    fn apex(&self, e: usize) -> usize {
        self.origin(prev(e))
    }

    #[inline]
    fn is_boundary(&self, e: usize) -> bool {
        self.twin(e).is_none()
    }

    fn live_half_edges(&self) -> Vec<usize> {
        (0..self.half_edge_count())
            .filter(|&e| !self.is_removed(e))
            .collect()
    }

    /// First half-edge of every live triangle.
    fn live_triangles(&self) -> Vec<usize> {
        (0..self.half_edge_count())
            .step_by(3)
            .filter(|&e| !self.is_removed(e))
            .collect()
    }

    fn has_triangles(&self) -> bool {
        (0..self.half_edge_count())
            .step_by(3)
            .any(|e| !self.is_removed(e))
    }

    fn boundary_half_edges(&self) -> Vec<usize> {
        (0..self.half_edge_count())
            .filter(|&e| !self.is_removed(e) && self.twin(e).is_none())
            .collect()
    }

    /// The live half-edge `a -> b`, if any.
    fn find_half_edge(&self, a: usize, b: usize) -> Option<usize> {
        (0..self.half_edge_count())
            .find(|&e| !self.is_removed(e) && self.origin(e) == a && self.dest(e) == b)
    }

    /// Either direction of the edge between `a` and `b`.
    fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.find_half_edge(a, b).or_else(|| self.find_half_edge(b, a))
    }

    /// Live half-edges leaving `v`.
    fn outgoing(&self, v: usize) -> Vec<usize> {
        (0..self.half_edge_count())
            .filter(|&e| !self.is_removed(e) && self.origin(e) == v)
            .collect()
    }

    fn is_connected(&self, v: usize) -> bool {
        (0..self.half_edge_count()).any(|e| !self.is_removed(e) && self.origin(e) == v)
    }

    /// Per-vertex flag telling whether any live triangle uses the vertex.
    fn connected_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.vertex_count()];
        for e in 0..self.half_edge_count() {
            if !self.is_removed(e) {
                mask[self.origin(e)] = true;
            }
        }
        mask
    }

    /// Corner vertices of the triangle owning `e`, starting at its first half-edge.
    fn triangle_vertices(&self, e: usize) -> [usize; 3] {
        let first = 3 * (e / 3);
        [
            self.origin(first),
            self.origin(first + 1),
            self.origin(first + 2),
        ]
    }
}
