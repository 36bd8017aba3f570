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

use crate::geometry::{Point2, point_segment_distance_squared};
use crate::kernel::{on_open_segment, strictly_inside_triangle};
use crate::mesh::basic_types::Location;
use crate::mesh::storage::MeshStorage;
use crate::operations::triangulation::Triangulator;

/// Classify `p` against the live triangles of `mesh` with a linear scan.
///
/// Vertex coincidence is exact coordinate equality; edge and triangle
/// membership use the exact orientation predicate, so a point is never
/// reported in two places. The nearest boundary half-edge of an outside
/// point is picked by plain floating-point distance.
pub fn locate<S: MeshStorage + ?Sized>(mesh: &S, p: &Point2) -> Location {
    let live = mesh.live_half_edges();
    let pos = |v: usize| mesh.position(v);

    if let Some(&e) = live.iter().find(|&&e| pos(mesh.origin(e)) == *p) {
        return Location::SameVertex(e);
    }

    if let Some(&e) = live
        .iter()
        .find(|&&e| on_open_segment(p, &pos(mesh.origin(e)), &pos(mesh.dest(e))))
    {
        return Location::OnEdge(e);
    }

    for first in mesh.live_triangles() {
        let [a, b, c] = mesh.triangle_vertices(first);
        if strictly_inside_triangle(p, &pos(a), &pos(b), &pos(c)) {
            return Location::InsideTriangle(first);
        }
    }

    let nearest = live
        .iter()
        .copied()
        .filter(|&e| mesh.is_boundary(e))
        .map(|e| {
            let d = point_segment_distance_squared(p, &pos(mesh.origin(e)), &pos(mesh.dest(e)));
            (e, d)
        })
        .min_by(|x, y| x.1.total_cmp(&y.1))
        .map(|(e, _)| e);
    Location::Outside(nearest)
}

impl<S: MeshStorage> Triangulator<'_, S> {
    pub fn locate(&self, p: &Point2) -> Location {
        locate(&*self.mesh, p)
    }
}
