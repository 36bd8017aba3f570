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

use crate::kernel::inside_or_on_triangle;
use crate::mesh::basic_types::Rim;
use crate::mesh::storage::MeshStorage;
use crate::operations::triangulation::Triangulator;

/// Half-edges produced by [`Triangulator::ear_clip`].
#[derive(Debug, Clone, Default)]
pub struct EarClip {
    /// `edges[i]` realises the polygon edge `polygon[i] -> polygon[i + 1]`.
    pub edges: Vec<usize>,
    /// Every half-edge created, in creation order.
    pub created: Vec<usize>,
}

#[derive(Clone, Copy)]
struct Corner {
    vertex: usize,
    // rim of the edge leaving this corner
    rim: Rim,
    // index of that edge in the input polygon, None for diagonals
    source: Option<usize>,
}

impl<S: MeshStorage> Triangulator<'_, S> {
    /// Triangulate a simple counter-clockwise polygon by clipping ears.
    ///
    /// `rims[i]` describes the outside of edge `polygon[i] -> polygon[i + 1]`;
    /// every realised polygon edge is glued to it. Panics when no ear can be
    /// found, which only happens for polygons that are not simple.
    pub fn ear_clip(&mut self, polygon: &[usize], rims: &[Rim]) -> EarClip {
        assert_eq!(polygon.len(), rims.len(), "ear_clip: one rim per polygon edge");
        assert!(polygon.len() >= 3, "ear_clip: polygon {polygon:?} has fewer than 3 corners");

        let mut ring: Vec<Corner> = polygon
            .iter()
            .zip(rims)
            .enumerate()
            .map(|(i, (&vertex, &rim))| Corner {
                vertex,
                rim,
                source: Some(i),
            })
            .collect();
        let mut out = EarClip {
            edges: vec![usize::MAX; polygon.len()],
            created: Vec::with_capacity(3 * (polygon.len() - 2)),
        };

        while ring.len() > 3 {
            let n = ring.len();
            let ear = (0..n)
                .find(|&i| self.is_ear(&ring, i))
                .unwrap_or_else(|| panic!("ear_clip: no ear in polygon {polygon:?}"));
            let before = (ear + n - 1) % n;
            let after = (ear + 1) % n;

            let f = self.mesh.connect(ring[before].vertex, ring[ear].vertex, ring[after].vertex);
            self.realise(&mut out, f, ring[before]);
            self.realise(&mut out, f + 1, ring[ear]);
            out.created.push(f + 2);

            ring[before].rim = Rim::twinned(f + 2);
            ring[before].source = None;
            ring.remove(ear);
        }

        debug_assert!(
            self.orient(ring[0].vertex, ring[1].vertex, ring[2].vertex) > 0.0,
            "ear_clip: last triangle of {polygon:?} is not counter-clockwise"
        );
        let f = self.mesh.connect(ring[0].vertex, ring[1].vertex, ring[2].vertex);
        for (k, corner) in ring.iter().enumerate() {
            self.realise(&mut out, f + k, *corner);
        }

        out
    }

    fn realise(&mut self, out: &mut EarClip, e: usize, corner: Corner) {
        self.attach(e, corner.rim);
        if let Some(i) = corner.source {
            out.edges[i] = e;
        }
        out.created.push(e);
    }

    fn is_ear(&self, ring: &[Corner], i: usize) -> bool {
        let n = ring.len();
        let p = ring[(i + n - 1) % n].vertex;
        let c = ring[i].vertex;
        let q = ring[(i + 1) % n].vertex;
        if self.orient(p, c, q) <= 0.0 {
            return false;
        }
        let (pp, pc, pq) = (self.pos(p), self.pos(c), self.pos(q));
        ring.iter()
            .map(|corner| corner.vertex)
            .filter(|&v| v != p && v != c && v != q)
            .all(|v| !inside_or_on_triangle(&self.pos(v), &pp, &pc, &pq))
    }
}
