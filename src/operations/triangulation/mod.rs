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

//! Incremental constrained Delaunay triangulation.
//!
//! [`Triangulator`] borrows any [`MeshStorage`] and performs one edit at a
//! time: point location, insertion (edge split, Bowyer-Watson cavity or hull
//! extension), vertex removal, constrained edge insertion, and the Lawson
//! flips that restore the Delaunay property afterwards. It never compacts
//! the storage; callers run [`MeshStorage::invalidate`] once per edit.

use tracing::trace;

use crate::geometry::Point2;
use crate::kernel::{incircle, orient2d};
use crate::mesh::basic_types::Rim;
use crate::mesh::half_edge::{next, prev};
use crate::mesh::storage::MeshStorage;

mod constraint;
mod ear_clip;
mod insertion;
mod locate;
mod removal;

pub use ear_clip::EarClip;
pub use locate::locate;

/// Default bound on pocket rollbacks during one constrained edge insertion.
pub const DEFAULT_MAX_ROLLBACKS: usize = 64;

pub struct Triangulator<'a, S: MeshStorage> {
    mesh: &'a mut S,
    max_constraint_rollbacks: usize,
}

impl<'a, S: MeshStorage> Triangulator<'a, S> {
    pub fn new(mesh: &'a mut S) -> Self {
        Self {
            mesh,
            max_constraint_rollbacks: DEFAULT_MAX_ROLLBACKS,
        }
    }

    #[must_use]
    pub fn with_max_constraint_rollbacks(mut self, limit: usize) -> Self {
        self.max_constraint_rollbacks = limit;
        self
    }

    pub fn mesh(&self) -> &S {
        self.mesh
    }

    #[inline]
    fn pos(&self, v: usize) -> Point2 {
        self.mesh.position(v)
    }

    #[inline]
    fn orient(&self, a: usize, b: usize, c: usize) -> f64 {
        orient2d(&self.pos(a), &self.pos(b), &self.pos(c))
    }

    /// Adjacency of `e` to keep once its triangle is gone.
    #[inline]
    fn rim(&self, e: usize) -> Rim {
        Rim {
            twin: self.mesh.twin(e),
            constrained: self.mesh.is_constrained(e),
        }
    }

    /// Glue a freshly connected half-edge into the place described by `rim`.
    fn attach(&mut self, e: usize, rim: Rim) {
        match rim.twin {
            Some(t) => self.mesh.make_twins(e, t),
            None if rim.constrained => self.mesh.set_constraint(e, true),
            None => {}
        }
    }

    /// Lawson flips until no queued edge violates the empty-circle property.
    ///
    /// Queued indices may have been recycled by later edits; every popped
    /// half-edge is re-read from storage, so stale entries are harmless.
    pub fn restore_delaunay(&mut self, queue: Vec<usize>) {
        let mut stack = queue;
        let mut flips = 0usize;
        while let Some(e) = stack.pop() {
            if e >= self.mesh.half_edge_count() || self.mesh.is_removed(e) {
                continue;
            }
            if is_locally_delaunay(&*self.mesh, e) {
                continue;
            }
            if let Some(outer) = self.flip(e) {
                flips += 1;
                stack.extend(outer);
            }
        }
        if flips > 0 {
            trace!(flips, "delaunay restored");
        }
    }

    /// Replace the diagonal `e` of a strictly convex quad by the other one.
    ///
    /// With `e = a -> b` in `(a, b, c)` and its twin in `(b, a, d)`, the quad
    /// becomes `(c, a, d)` and `(d, b, c)`. Returns the four outer half-edges,
    /// or `None` when `e` is a boundary edge or the quad is not convex.
    pub fn flip(&mut self, e: usize) -> Option<[usize; 4]> {
        let t = self.mesh.twin(e)?;
        let a = self.mesh.origin(e);
        let b = self.mesh.dest(e);
        let c = self.mesh.apex(e);
        let d = self.mesh.apex(t);

        if self.orient(c, a, d) <= 0.0 || self.orient(d, b, c) <= 0.0 {
            return None;
        }

        // --- 1) remember the four outer rims ---
        let rim_bc = self.rim(next(e));
        let rim_ca = self.rim(prev(e));
        let rim_ad = self.rim(next(t));
        let rim_db = self.rim(prev(t));

        // --- 2) swap the triangles ---
        self.mesh.remove_triangle(e);
        self.mesh.remove_triangle(t);
        let x = self.mesh.connect(c, a, d);
        let y = self.mesh.connect(d, b, c);

        // --- 3) glue ---
        self.attach(x, rim_ca);
        self.attach(x + 1, rim_ad);
        self.attach(y, rim_db);
        self.attach(y + 1, rim_bc);
        self.mesh.make_twins(x + 2, y + 2);

        Some([x, x + 1, y, y + 1])
    }
}

/// `e` is constrained, on the boundary, or its opposite apex lies on or
/// outside the circumcircle of `e`'s triangle.
pub fn is_locally_delaunay<S: MeshStorage + ?Sized>(mesh: &S, e: usize) -> bool {
    if mesh.is_constrained(e) {
        return true;
    }
    let Some(t) = mesh.twin(e) else {
        return true;
    };
    let a = mesh.position(mesh.origin(e));
    let b = mesh.position(mesh.dest(e));
    let c = mesh.position(mesh.apex(e));
    let d = mesh.position(mesh.apex(t));
    incircle(&a, &b, &c, &d) <= 0.0
}

/// Live half-edges that violate the constrained Delaunay property.
pub fn delaunay_violations<S: MeshStorage + ?Sized>(mesh: &S) -> Vec<usize> {
    (0..mesh.half_edge_count())
        .filter(|&e| !mesh.is_removed(e) && !is_locally_delaunay(mesh, e))
        .collect()
}
