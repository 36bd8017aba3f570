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

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::error::TriangulationError;
use crate::geometry::Point2;
use crate::mesh::basic_types::{Detached, Insertion, Rim, VertexRemoval};
use crate::mesh::half_edge::{next, prev};
use crate::mesh::storage::MeshStorage;
use crate::operations::triangulation::Triangulator;

impl<S: MeshStorage> Triangulator<'_, S> {
    /// Remove vertex `v` from the triangulation and from storage.
    ///
    /// The last vertex is moved into `v`'s slot. Neighbours left without a
    /// triangle are inserted again. Constrained edges that ended at `v` are
    /// reported but not restored.
    pub fn remove_vertex(&mut self, v: usize) -> VertexRemoval {
        let detached = self.detach_vertex(v);
        let relocated = self.mesh.swap_remove_vertex(v);
        let renumber = |u: usize| if Some(u) == relocated { v } else { u };

        for orphan in detached.orphans.iter().map(|&u| renumber(u)) {
            if let Err(err) = self.add_vertex(orphan) {
                warn!(vertex = orphan, %err, "could not reinsert orphaned vertex");
            }
        }

        VertexRemoval {
            relocated,
            constrained_neighbors: detached
                .constrained_neighbors
                .into_iter()
                .map(renumber)
                .collect(),
        }
    }

    /// Cut `v` out of the triangulation without touching the vertex list.
    ///
    /// Around an interior vertex the star is replaced by an ear-clipped
    /// triangulation of its link polygon, keeping every rim's twin and
    /// constraint flag. The triangles around a boundary vertex are simply
    /// dropped. Orphaned neighbours are reported, not reinserted.
    pub fn detach_vertex(&mut self, v: usize) -> Detached {
        let mut detached = Detached::default();
        let mut queue = Vec::new();

        while let Some(&start) = self.mesh.outgoing(v).first() {
            let spokes = self.fan(start);
            let closed = self.mesh.twin(prev(spokes[spokes.len() - 1])) == Some(spokes[0]);

            for &s in &spokes {
                if self.mesh.is_constrained(s) {
                    detached.constrained_neighbors.push(self.mesh.dest(s));
                }
            }

            if closed {
                let ring: Vec<usize> = spokes.iter().map(|&s| self.mesh.dest(s)).collect();
                let rims: Vec<Rim> = spokes.iter().map(|&s| self.rim(next(s))).collect();
                for &s in &spokes {
                    self.mesh.remove_triangle(s);
                }
                let clip = self.ear_clip(&ring, &rims);
                queue.extend(clip.created);
                debug!(vertex = v, degree = ring.len(), "interior vertex detached");
            } else {
                let last = prev(spokes[spokes.len() - 1]);
                if self.mesh.is_constrained(last) {
                    detached.constrained_neighbors.push(self.mesh.origin(last));
                }
                let mut neighbours: SmallVec<[usize; 8]> =
                    spokes.iter().map(|&s| self.mesh.dest(s)).collect();
                neighbours.push(self.mesh.origin(last));
                for &s in &spokes {
                    self.mesh.remove_triangle(s);
                }
                detached.orphans.extend(neighbours);
                debug!(vertex = v, triangles = spokes.len(), "boundary vertex detached");
            }
        }

        detached.orphans.sort_unstable();
        detached.orphans.dedup();
        detached.orphans.retain(|u| !self.mesh.is_connected(*u));
        detached.constrained_neighbors.sort_unstable();
        detached.constrained_neighbors.dedup();

        self.restore_delaunay(queue);
        detached
    }

    /// Outgoing half-edges of one fan around `origin(start)`, counter-clockwise.
    ///
    /// For a boundary fan the first spoke is the one without a twin.
    fn fan(&self, start: usize) -> Vec<usize> {
        let limit = self.mesh.half_edge_count();

        // rewind clockwise to the boundary spoke, if there is one
        let mut first = start;
        for _ in 0..=limit {
            match self.mesh.twin(first) {
                None => break,
                Some(t) if next(t) == start => {
                    first = start;
                    break;
                }
                Some(t) => first = next(t),
            }
        }

        let mut spokes = vec![first];
        loop {
            let back = prev(spokes[spokes.len() - 1]);
            match self.mesh.twin(back) {
                None => break,
                Some(t) if t == first => break,
                Some(t) => spokes.push(t),
            }
            assert!(
                spokes.len() <= limit,
                "fan: walk around vertex {} does not terminate",
                self.mesh.origin(start)
            );
        }
        spokes
    }

    /// Move vertex `v` to `to` by detaching and reinserting it.
    ///
    /// When the target is occupied or cannot be reached the vertex goes
    /// back to where it was. Constrained edges incident to `v` are inserted
    /// again afterwards.
    pub fn translate_vertex(
        &mut self,
        v: usize,
        to: Point2,
    ) -> Result<Insertion, TriangulationError> {
        let from = self.pos(v);
        if from == to {
            return Ok(Insertion::Inserted);
        }
        if let Some(existing) = (0..self.mesh.vertex_count()).find(|&u| u != v && self.pos(u) == to)
        {
            return Ok(Insertion::Duplicate(existing));
        }

        let detached = self.detach_vertex(v);
        self.mesh.set_position(v, to);
        let outcome = self.add_vertex(v);
        if !matches!(outcome, Ok(Insertion::Inserted | Insertion::Pending)) {
            self.mesh.set_position(v, from);
            if let Err(err) = self.add_vertex(v) {
                warn!(vertex = v, %err, "could not put vertex back");
            }
        }

        for &orphan in &detached.orphans {
            if let Err(err) = self.add_vertex(orphan) {
                warn!(vertex = orphan, %err, "could not reinsert orphaned vertex");
            }
        }
        for &n in &detached.constrained_neighbors {
            if let Err(err) = self.insert_constrained_edge(v, n) {
                warn!(from = v, to = n, %err, "constraint lost while moving vertex");
            }
        }
        outcome
    }
}
