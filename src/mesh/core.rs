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

use crate::error::{MeshError, MeshResult};
use crate::geometry::Point2;
use crate::kernel::orient2d;
use crate::mesh::half_edge::HalfEdge;
use crate::mesh::storage::MeshStorage;
use crate::mesh::vertex::Vertex;

/// Array-backed triangle mesh with twin-linked half-edges.
///
/// Between two calls to [`MeshStorage::invalidate`] the half-edge array may
/// hold tombstoned triangles; their slots are recycled by `connect`. After
/// `invalidate` the storage is dense and [`HalfEdgeMesh::index_buffer`]
/// lists one vertex triple per triangle.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    free_triangles: Vec<usize>,
    index_buffer: Vec<usize>,
}

impl HalfEdgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, v: usize) -> &Vertex {
        &self.vertices[v]
    }

    pub fn vertex_mut(&mut self, v: usize) -> &mut Vertex {
        &mut self.vertices[v]
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Flat vertex triples of the live triangles, valid after `invalidate`.
    pub fn index_buffer(&self) -> &[usize] {
        &self.index_buffer
    }

    pub fn faces(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.index_buffer
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
    }

    pub fn triangle_count(&self) -> usize {
        self.half_edges.iter().step_by(3).filter(|he| !he.removed).count()
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn pop_vertex(&mut self) -> Option<Vertex> {
        self.vertices.pop()
    }

    /// Each constrained edge once, as `(origin, dest)` of one of its half-edges.
    pub fn constrained_edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for (e, he) in self.half_edges.iter().enumerate() {
            if he.removed || !he.constrained {
                continue;
            }
            if he.twin.is_some_and(|t| t < e) {
                continue; // reported from the twin
            }
            edges.push((he.origin, self.dest(e)));
        }
        edges
    }

    /// Tombstone a single half-edge and unlink its twin.
    pub fn remove_half_edge(&mut self, e: usize) {
        if self.half_edges[e].removed {
            return;
        }
        if let Some(t) = self.half_edges[e].twin.take() {
            self.half_edges[t].twin = None;
        }
        self.half_edges[e].removed = true;

        let first = 3 * (e / 3);
        if self.half_edges[first..first + 3].iter().all(|he| he.removed) {
            self.free_triangles.push(first / 3);
        }
    }

    fn rebuild_index_buffer(&mut self) {
        self.index_buffer.clear();
        self.index_buffer.reserve(self.half_edges.len());
        for he in self.half_edges.iter().filter(|he| !he.removed) {
            self.index_buffer.push(he.origin);
        }
    }

    /// Verify the structural invariants of a compacted mesh.
    pub fn check_invariants(&self) -> MeshResult<()> {
        let n = self.half_edges.len();
        if n % 3 != 0 {
            return Err(MeshError::NotTriangulated(n));
        }
        let tombstones = self.half_edges.iter().filter(|he| he.removed).count();
        if tombstones > 0 {
            return Err(MeshError::Tombstones(tombstones));
        }

        let vertex_count = self.vertices.len();
        let mut directed: AHashMap<(usize, usize), usize> =
            AHashMap::with_capacity_and_hasher(n, Default::default());

        for (e, he) in self.half_edges.iter().enumerate() {
            if he.origin >= vertex_count {
                return Err(MeshError::VertexOutOfRange {
                    index: he.origin,
                    len: vertex_count,
                });
            }
            let key = (he.origin, self.dest(e));
            if directed.insert(key, e).is_some() {
                return Err(MeshError::NonManifoldEdge {
                    origin: key.0,
                    dest: key.1,
                });
            }

            let Some(t) = he.twin else { continue };
            if t >= n {
                return Err(MeshError::TwinOutOfRange { half_edge: e, twin: t });
            }
            if self.half_edges[t].twin != Some(e) {
                return Err(MeshError::AsymmetricTwin { half_edge: e, twin: t });
            }
            if self.half_edges[t].origin != self.dest(e) || self.dest(t) != he.origin {
                return Err(MeshError::TwinEndpointMismatch { half_edge: e, twin: t });
            }
            if self.half_edges[t].constrained != he.constrained {
                return Err(MeshError::ConstraintMismatch { half_edge: e, twin: t });
            }
        }

        for triangle in 0..n / 3 {
            let [a, b, c] = self.triangle_vertices(3 * triangle);
            let (pa, pb, pc) = (
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            );
            if orient2d(&pa, &pb, &pc) <= 0.0 {
                return Err(MeshError::NotCounterClockwise { triangle, a, b, c });
            }
        }

        Ok(())
    }
}

impl MeshStorage for HalfEdgeMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn position(&self, v: usize) -> Point2 {
        self.vertices[v].position
    }

    fn set_position(&mut self, v: usize, position: Point2) {
        self.vertices[v].position = position;
    }

    #[inline]
    fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    #[inline]
    fn is_removed(&self, e: usize) -> bool {
        self.half_edges[e].removed
    }

    #[inline]
    fn origin(&self, e: usize) -> usize {
        self.half_edges[e].origin
    }

    #[inline]
    fn twin(&self, e: usize) -> Option<usize> {
        self.half_edges[e].twin
    }

    #[inline]
    fn is_constrained(&self, e: usize) -> bool {
        self.half_edges[e].constrained
    }

    fn connect(&mut self, a: usize, b: usize, c: usize) -> usize {
        let fresh = [HalfEdge::new(a), HalfEdge::new(b), HalfEdge::new(c)];
        match self.free_triangles.pop() {
            Some(t) => {
                let first = 3 * t;
                debug_assert!(self.half_edges[first..first + 3].iter().all(|he| he.removed));
                for (slot, he) in self.half_edges[first..first + 3].iter_mut().zip(fresh) {
                    *slot = he;
                }
                first
            }
            None => {
                let first = self.half_edges.len();
                self.half_edges.extend(fresh);
                first
            }
        }
    }

    fn make_twins(&mut self, i: usize, j: usize) {
        debug_assert_eq!(self.origin(i), self.dest(j), "make_twins: {i} and {j} do not meet");
        debug_assert_eq!(self.dest(i), self.origin(j), "make_twins: {i} and {j} do not meet");
        let constrained = self.half_edges[i].constrained || self.half_edges[j].constrained;
        self.half_edges[i].twin = Some(j);
        self.half_edges[j].twin = Some(i);
        self.half_edges[i].constrained = constrained;
        self.half_edges[j].constrained = constrained;
    }

    fn untwin(&mut self, i: usize) {
        if let Some(j) = self.half_edges[i].twin.take() {
            self.half_edges[j].twin = None;
        }
    }

    fn set_constraint(&mut self, i: usize, constrained: bool) {
        self.half_edges[i].constrained = constrained;
        if let Some(j) = self.half_edges[i].twin {
            self.half_edges[j].constrained = constrained;
        }
    }

    fn remove_triangle(&mut self, e: usize) {
        let first = 3 * (e / 3);
        for k in first..first + 3 {
            self.remove_half_edge(k);
        }
    }

    fn swap_remove_vertex(&mut self, v: usize) -> Option<usize> {
        debug_assert!(!self.is_connected(v), "swap_remove_vertex: vertex {v} is still in use");
        let last = self.vertices.len() - 1;
        self.vertices.swap_remove(v);
        if v == last {
            return None;
        }
        for he in &mut self.half_edges {
            if he.origin == last {
                he.origin = v;
            }
        }
        Some(last)
    }

    fn invalidate(&mut self) {
        let n = self.half_edges.len();
        let mut remap = vec![usize::MAX; n];
        let mut kept = 0;

        // --- 1) decide per triangle, never per half-edge ---
        for first in (0..n).step_by(3) {
            let removed = [
                self.half_edges[first].removed,
                self.half_edges[first + 1].removed,
                self.half_edges[first + 2].removed,
            ];
            match removed {
                [false, false, false] => {
                    for k in 0..3 {
                        remap[first + k] = kept + k;
                    }
                    kept += 3;
                }
                [true, true, true] => {}
                _ => panic!("invalidate: triangle {} is partially removed", first / 3),
            }
        }

        // --- 2) compact and repair twins ---
        let old = std::mem::take(&mut self.half_edges);
        self.half_edges = old
            .into_iter()
            .filter(|he| !he.removed)
            .map(|mut he| {
                he.twin = he.twin.map(|t| match remap[t] {
                    usize::MAX => panic!("invalidate: twin {t} points at a removed half-edge"),
                    new => new,
                });
                he
            })
            .collect();
        self.free_triangles.clear();

        // --- 3) derived buffers ---
        self.rebuild_index_buffer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.push_vertex(Vertex::new(Point2::new(x, y)));
        }
        let t0 = mesh.connect(0, 1, 2);
        let t1 = mesh.connect(0, 2, 3);
        mesh.make_twins(t0 + 2, t1);
        mesh.invalidate();
        mesh
    }

    #[test]
    fn connect_and_twin() {
        let mesh = square();
        assert_eq!(mesh.index_buffer(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.twin(2), Some(3));
        assert_eq!(mesh.boundary_half_edges().len(), 4);
        mesh.check_invariants().unwrap();
    }

    #[test]
    fn constraint_is_mirrored() {
        let mut mesh = square();
        mesh.set_constraint(3, true);
        assert!(mesh.is_constrained(2));
        assert_eq!(mesh.constrained_edges(), vec![(2, 0)]);
        mesh.check_invariants().unwrap();
    }

    #[test]
    fn removed_slot_is_recycled() {
        let mut mesh = square();
        mesh.set_constraint(2, true);
        mesh.remove_triangle(0);
        assert_eq!(mesh.twin(3), None);
        assert!(mesh.is_constrained(3));

        let e = mesh.connect(2, 0, 1);
        assert_eq!(e, 0);
        mesh.make_twins(e, 3);
        mesh.invalidate();
        assert_eq!(mesh.triangle_count(), 2);
        mesh.check_invariants().unwrap();
    }

    #[test]
    fn compaction_remaps_twins() {
        let mut mesh = square();
        mesh.push_vertex(Vertex::new(Point2::new(2.0, 0.5)));
        let t = mesh.connect(1, 4, 2);
        mesh.make_twins(t + 2, 1);
        mesh.remove_triangle(0);
        mesh.invalidate();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.index_buffer(), &[0, 2, 3, 1, 4, 2]);
        assert_eq!(mesh.twin(5), None);
        mesh.check_invariants().unwrap();
    }

    #[test]
    #[should_panic(expected = "partially removed")]
    fn partial_triangle_is_fatal() {
        let mut mesh = square();
        mesh.remove_half_edge(0);
        mesh.invalidate();
    }

    #[test]
    fn swap_remove_remaps_origins() {
        let mut mesh = square();
        mesh.push_vertex(Vertex::new(Point2::new(5.0, 5.0)));
        mesh.remove_triangle(3);
        mesh.invalidate();
        // vertex 3 is unused now; the last vertex moves into its slot
        assert_eq!(mesh.swap_remove_vertex(3), Some(4));
        assert_eq!(mesh.vertex(3).position, Point2::new(5.0, 5.0));
        assert_eq!(mesh.index_buffer(), &[0, 1, 2]);
    }
}
