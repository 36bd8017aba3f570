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

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::error::TriangulationError;
use crate::kernel::{incircle, on_open_segment, segments_intersect, strictly_inside_triangle};
use crate::mesh::basic_types::{Insertion, Location, Rim};
use crate::mesh::half_edge::{next, prev, triangle_of};
use crate::mesh::storage::MeshStorage;
use crate::operations::triangulation::Triangulator;

impl<S: MeshStorage> Triangulator<'_, S> {
    /// Insert a vertex that is already stored but not yet triangulated.
    ///
    /// A vertex that is already connected is left alone. Edges touched by
    /// the insertion are handed to [`Triangulator::restore_delaunay`].
    pub fn add_vertex(&mut self, v: usize) -> Result<Insertion, TriangulationError> {
        if self.mesh.is_connected(v) {
            return Ok(Insertion::Inserted);
        }
        if !self.mesh.has_triangles() {
            return self.seed(v);
        }

        let p = self.pos(v);
        let queue = match self.locate(&p) {
            Location::SameVertex(e) => {
                let existing = self.mesh.origin(e);
                debug!(vertex = v, existing, "position already occupied");
                return Ok(Insertion::Duplicate(existing));
            }
            Location::OnEdge(e) => self.split_edge(e, v),
            Location::InsideTriangle(e) => self.insert_in_cavity(e, v),
            Location::Outside(nearest) => {
                debug!(vertex = v, ?nearest, "inserting outside the mesh");
                self.insert_outside(v)?
            }
        };
        self.restore_delaunay(queue);
        Ok(Insertion::Inserted)
    }

    /// Start a triangulation from the unconnected vertices once three of
    /// them are not collinear, then insert the rest.
    fn seed(&mut self, v: usize) -> Result<Insertion, TriangulationError> {
        let p = self.pos(v);
        let loose: Vec<usize> = (0..self.mesh.vertex_count()).filter(|&u| u != v).collect();
        if let Some(&existing) = loose.iter().find(|&&u| self.pos(u) == p) {
            return Ok(Insertion::Duplicate(existing));
        }

        let mut candidates = loose;
        candidates.insert(0, v);
        let b = candidates[1..].iter().copied().find(|&u| self.pos(u) != p);
        let Some(b) = b else {
            return Ok(Insertion::Pending);
        };
        let c = candidates
            .iter()
            .copied()
            .find(|&u| u != v && u != b && self.orient(v, b, u) != 0.0);
        let Some(c) = c else {
            return Ok(Insertion::Pending);
        };

        if self.orient(v, b, c) > 0.0 {
            self.mesh.connect(v, b, c);
        } else {
            self.mesh.connect(v, c, b);
        }
        debug!(a = v, b, c, "seed triangle");

        for u in candidates {
            if u == v || u == b || u == c {
                continue;
            }
            if let Err(err) = self.add_vertex(u) {
                warn!(vertex = u, %err, "could not insert pending vertex");
            }
        }
        Ok(Insertion::Inserted)
    }

    /// Split the edge of half-edge `e` at vertex `v`, which lies strictly
    /// inside it. Both halves keep the constraint flag of the split edge.
    pub(crate) fn split_edge(&mut self, e: usize, v: usize) -> Vec<usize> {
        let a = self.mesh.origin(e);
        let b = self.mesh.dest(e);
        let c = self.mesh.apex(e);
        let constrained = self.mesh.is_constrained(e);
        let rim_bc = self.rim(next(e));
        let rim_ca = self.rim(prev(e));

        let far = self.mesh.twin(e).map(|t| {
            let d = self.mesh.apex(t);
            (t, d, self.rim(next(t)), self.rim(prev(t)))
        });

        self.mesh.remove_triangle(e);
        if let Some((t, ..)) = far {
            self.mesh.remove_triangle(t);
        }

        // (a, v, c) and (v, b, c) on the near side
        let x = self.mesh.connect(a, v, c);
        let y = self.mesh.connect(v, b, c);
        self.attach(x + 2, rim_ca);
        self.attach(y + 1, rim_bc);
        self.mesh.make_twins(x + 1, y + 2);
        let mut queue = vec![x + 2, y + 1];

        if let Some((_, d, rim_ad, rim_db)) = far {
            // (b, v, d) and (v, a, d) on the far side
            let z = self.mesh.connect(b, v, d);
            let w = self.mesh.connect(v, a, d);
            self.attach(z + 2, rim_db);
            self.attach(w + 1, rim_ad);
            self.mesh.make_twins(z + 1, w + 2);
            self.mesh.make_twins(x, w);
            self.mesh.make_twins(y, z);
            queue.extend([z + 2, w + 1]);
        }

        if constrained {
            self.mesh.set_constraint(x, true);
            self.mesh.set_constraint(y, true);
        }
        debug!(vertex = v, a, b, constrained, "edge split");
        queue
    }

    /// Bowyer-Watson insertion of `v` strictly inside the triangle of `e`.
    ///
    /// The cavity is dug depth-first. It grows across an edge only when the
    /// edge is unconstrained, the neighbour's circumcircle contains `v`, and
    /// `v` still sees both new cavity edges strictly, so the cavity stays
    /// star-shaped from `v` and its boundary comes out in CCW order.
    fn insert_in_cavity(&mut self, e: usize, v: usize) -> Vec<usize> {
        let p = self.pos(v);
        let first = 3 * triangle_of(e);
        let mut cavity: SmallVec<[usize; 16]> = SmallVec::new();
        cavity.push(triangle_of(first));
        let mut boundary: Vec<(usize, Rim)> = Vec::new();
        let mut stack = vec![first + 2, first + 1, first];

        while let Some(h) = stack.pop() {
            if let Some(t) = self.mesh.twin(h).filter(|_| !self.mesh.is_constrained(h)) {
                debug_assert!(!cavity.contains(&triangle_of(t)), "cavity reached a triangle twice");
                let a = self.mesh.origin(h);
                let b = self.mesh.dest(h);
                let d = self.mesh.apex(t);
                let grows = incircle(&self.pos(b), &self.pos(a), &self.pos(d), &p) > 0.0
                    && self.orient(a, d, v) > 0.0
                    && self.orient(d, b, v) > 0.0;
                if grows {
                    cavity.push(triangle_of(t));
                    stack.push(prev(t));
                    stack.push(next(t));
                    continue;
                }
            }
            boundary.push((self.mesh.origin(h), self.rim(h)));
        }

        for &t in &cavity {
            self.mesh.remove_triangle(3 * t);
        }

        // fan from v over the cavity boundary
        let n = boundary.len();
        let fan: Vec<usize> = (0..n)
            .map(|i| {
                let (a, rim) = boundary[i];
                let b = boundary[(i + 1) % n].0;
                let f = self.mesh.connect(a, b, v);
                self.attach(f, rim);
                f
            })
            .collect();
        for i in 0..n {
            self.mesh.make_twins(fan[i] + 1, fan[(i + 1) % n] + 2);
        }

        debug!(vertex = v, cavity = cavity.len(), "vertex inserted");
        fan
    }

    /// Attach an exterior vertex to every boundary edge it sees.
    ///
    /// A boundary edge `a -> b` is visible when `v` lies strictly on its
    /// outer side, neither sightline from `v` to its endpoints meets another
    /// boundary edge, and no boundary vertex lies inside `(b, a, v)`.
    fn insert_outside(&mut self, v: usize) -> Result<Vec<usize>, TriangulationError> {
        let p = self.pos(v);
        let boundary = self.mesh.boundary_half_edges();
        let mut rim_vertices: Vec<usize> = boundary.iter().map(|&e| self.mesh.origin(e)).collect();
        rim_vertices.sort_unstable();
        rim_vertices.dedup();

        let visible: Vec<usize> = boundary
            .iter()
            .copied()
            .filter(|&e| {
                let a = self.mesh.origin(e);
                let b = self.mesh.dest(e);
                if self.orient(a, b, v) >= 0.0 {
                    return false;
                }
                if self.sightline_blocked(v, a, e, &boundary)
                    || self.sightline_blocked(v, b, e, &boundary)
                {
                    return false;
                }
                let (pa, pb) = (self.pos(a), self.pos(b));
                !rim_vertices
                    .iter()
                    .any(|&q| strictly_inside_triangle(&self.pos(q), &pb, &pa, &p))
            })
            .collect();

        if visible.is_empty() {
            warn!(vertex = v, "no visible boundary edge");
            return Err(TriangulationError::NoVisibleBoundary(v));
        }

        let mut spokes: AHashMap<(usize, usize), usize> = AHashMap::default();
        let mut queue = Vec::with_capacity(3 * visible.len());
        for &e in &visible {
            let a = self.mesh.origin(e);
            let b = self.mesh.dest(e);
            let f = self.mesh.connect(b, a, v);
            self.mesh.make_twins(f, e);
            spokes.insert((a, v), f + 1);
            spokes.insert((v, b), f + 2);
            queue.extend([f, f + 1, f + 2]);
        }
        for (&(o, d), &h) in &spokes {
            if self.mesh.twin(h).is_none() {
                if let Some(&t) = spokes.get(&(d, o)) {
                    self.mesh.make_twins(h, t);
                }
            }
        }

        debug!(vertex = v, edges = visible.len(), "hull extended");
        Ok(queue)
    }

    /// The open sightline from `v` to boundary vertex `s` touches a boundary
    /// edge other than `own`. Touching another edge only at `s` is allowed
    /// unless that edge runs back along the sightline.
    fn sightline_blocked(&self, v: usize, s: usize, own: usize, boundary: &[usize]) -> bool {
        let (pv, ps) = (self.pos(v), self.pos(s));
        boundary.iter().copied().filter(|&f| f != own).any(|f| {
            let c = self.mesh.origin(f);
            let d = self.mesh.dest(f);
            let (pc, pd) = (self.pos(c), self.pos(d));
            if !segments_intersect(&pv, &ps, &pc, &pd) {
                return false;
            }
            match (c == s, d == s) {
                (true, _) => on_open_segment(&pd, &pv, &ps),
                (_, true) => on_open_segment(&pc, &pv, &ps),
                _ => true,
            }
        })
    }
}
