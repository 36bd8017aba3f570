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

use tracing::{debug, warn};

use crate::error::TriangulationError;
use crate::kernel::on_open_segment;
use crate::mesh::basic_types::Rim;
use crate::mesh::half_edge::{next, prev, triangle_of};
use crate::mesh::storage::MeshStorage;
use crate::operations::triangulation::Triangulator;

/// One side of the channel swept by a new constrained edge.
///
/// `rims[i]` belongs to the edge between `vertices[i]` and `vertices[i + 1]`.
#[derive(Debug, Default)]
struct Chain {
    vertices: Vec<usize>,
    rims: Vec<Rim>,
}

impl Chain {
    fn new(a: usize, first: usize, rim: Rim) -> Self {
        Self {
            vertices: vec![a, first],
            rims: vec![rim],
        }
    }
}

/// Triangles and constraints evicted when a chain closes on itself.
#[derive(Debug, Default)]
struct Pocket {
    triangles: Vec<usize>,
    vertices: Vec<usize>,
    constraints: Vec<(usize, usize)>,
}

impl Pocket {
    fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.constraints.is_empty()
    }
}

/// Everything the read-only walk learnt about the crossed channel.
#[derive(Debug)]
struct Sweep {
    end: usize,
    lower: Chain,
    upper: Chain,
    crossed: Vec<usize>,
    pocket: Pocket,
}

impl<S: MeshStorage> Triangulator<'_, S> {
    /// Make the segment `a`-`b` an edge of the triangulation and constrain it.
    ///
    /// Vertices lying exactly on the segment split it into several
    /// constrained edges. Each piece is walked without touching the mesh
    /// first, so a piece that would leave the mesh or cross another
    /// constraint is refused before anything changes. Pieces already
    /// inserted stay, and vertices they evicted are put back either way.
    pub fn insert_constrained_edge(&mut self, a: usize, b: usize) -> Result<(), TriangulationError> {
        for v in [a, b] {
            if !self.mesh.is_connected(v) {
                return Err(TriangulationError::VertexNotConnected(v));
            }
        }
        let mut pocket = Pocket::default();
        let outcome = self.insert_pieces(a, b, &mut pocket);
        self.reinsert(pocket);
        outcome
    }

    fn insert_pieces(
        &mut self,
        a: usize,
        b: usize,
        pocket: &mut Pocket,
    ) -> Result<(), TriangulationError> {
        let mut pieces = vec![(a, b)];
        while let Some((from, to)) = pieces.pop() {
            if from == to {
                continue;
            }
            if let Some(rest) = self.insert_piece(from, to, pocket)? {
                pieces.push(rest);
            }
        }
        Ok(())
    }

    /// Insert the longest prefix of `a`-`b` that ends at a vertex and
    /// return what is left of the segment.
    fn insert_piece(
        &mut self,
        a: usize,
        b: usize,
        pocket: &mut Pocket,
    ) -> Result<Option<(usize, usize)>, TriangulationError> {
        // --- 1) the edge is already there ---
        if let Some(e) = self.mesh.find_edge(a, b) {
            self.mesh.set_constraint(e, true);
            return Ok(None);
        }

        // --- 2) a neighbour of `a` lies on the segment ---
        let (pa, pb) = (self.pos(a), self.pos(b));
        if let Some((x, e)) = self
            .neighbours(a)
            .into_iter()
            .find(|&(x, _)| on_open_segment(&self.pos(x), &pa, &pb))
        {
            self.mesh.set_constraint(e, true);
            return Ok(Some((x, b)));
        }

        // --- 3) sweep the crossed channel, then rebuild it ---
        let sweep = self.sweep(a, b)?;
        let end = sweep.end;
        self.retriangulate(a, sweep, pocket);
        debug!(from = a, to = end, "constrained edge inserted");
        Ok((end != b).then_some((end, b)))
    }

    /// Vertices sharing an edge with `a`, each with one half-edge of that edge.
    fn neighbours(&self, a: usize) -> Vec<(usize, usize)> {
        self.mesh
            .live_half_edges()
            .into_iter()
            .filter_map(|e| {
                if self.mesh.origin(e) == a {
                    Some((self.mesh.dest(e), e))
                } else if self.mesh.dest(e) == a && self.mesh.is_boundary(e) {
                    Some((self.mesh.origin(e), e))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Walk from `a` towards `b` through the triangles the segment crosses.
    ///
    /// The lower chain collects the vertices right of `a -> b`, the upper
    /// chain those on its left. Stops at `b` or at the first vertex lying
    /// exactly on the segment.
    fn sweep(&self, a: usize, b: usize) -> Result<Sweep, TriangulationError> {
        let leaves = TriangulationError::ConstraintLeavesMesh { from: a, to: b };
        let crosses = TriangulationError::ConstraintCrossesConstraint { from: a, to: b };

        // --- 1) the wedge at `a` that holds the direction to `b` ---
        let start = self
            .mesh
            .outgoing(a)
            .into_iter()
            .find(|&e| {
                let x = self.mesh.dest(e);
                let y = self.mesh.apex(e);
                self.orient(a, x, b) > 0.0 && self.orient(a, b, y) > 0.0
            })
            .ok_or(leaves.clone())?;

        let mut lower = Chain::new(a, self.mesh.dest(start), self.rim(start));
        let mut upper = Chain::new(a, self.mesh.apex(start), self.rim(prev(start)));
        let mut crossed = vec![triangle_of(start)];
        let mut pocket = Pocket::default();
        let mut crossing = next(start);

        // --- 2) cross triangles until a vertex on the segment is met ---
        let end = loop {
            if self.mesh.is_constrained(crossing) {
                return Err(crosses);
            }
            let Some(t) = self.mesh.twin(crossing) else {
                return Err(leaves);
            };
            crossed.push(triangle_of(t));

            let z = self.mesh.apex(t);
            let side = self.orient(a, b, z);
            if z == b || side == 0.0 {
                if z != b && !on_open_segment(&self.pos(z), &self.pos(a), &self.pos(b)) {
                    return Err(leaves);
                }
                lower.vertices.push(z);
                lower.rims.push(self.rim(next(t)));
                upper.vertices.push(z);
                upper.rims.push(self.rim(prev(t)));
                break z;
            } else if side < 0.0 {
                self.extend_chain(&mut lower, z, self.rim(next(t)), &crossed, &mut pocket);
                crossing = prev(t);
            } else {
                self.extend_chain(&mut upper, z, self.rim(prev(t)), &crossed, &mut pocket);
                crossing = next(t);
            }
        };

        Ok(Sweep {
            end,
            lower,
            upper,
            crossed,
            pocket,
        })
    }

    /// Append `z` to a chain. When `z` is already on it, the chain closed a
    /// loop around triangles the segment never crosses: the chain is cut
    /// back to the first `z` and the enclosed pocket is evicted.
    fn extend_chain(
        &self,
        chain: &mut Chain,
        z: usize,
        rim: Rim,
        crossed: &[usize],
        pocket: &mut Pocket,
    ) {
        let Some(k) = chain.vertices.iter().position(|&u| u == z) else {
            chain.vertices.push(z);
            chain.rims.push(rim);
            return;
        };

        let mut loop_vertices: Vec<usize> = chain.vertices.drain(k..).collect();
        loop_vertices.push(z);
        chain.vertices.push(z);
        let mut loop_rims: Vec<Rim> = chain.rims.drain(k..).collect();
        loop_rims.push(rim);

        for (i, r) in loop_rims.iter().enumerate() {
            if r.constrained {
                pocket.constraints.push((loop_vertices[i], loop_vertices[i + 1]));
            }
        }
        pocket
            .vertices
            .extend(loop_vertices[1..loop_vertices.len() - 1].iter().copied());

        // flood the pocket from the inner side of the loop
        let mut stack: Vec<usize> = loop_rims.iter().filter_map(|r| r.twin).collect();
        while let Some(h) = stack.pop() {
            let tri = triangle_of(h);
            if crossed.contains(&tri) || pocket.triangles.contains(&tri) {
                continue;
            }
            pocket.triangles.push(tri);
            for g in 3 * tri..3 * tri + 3 {
                pocket.vertices.push(self.mesh.origin(g));
                if self.mesh.is_constrained(g) && self.mesh.twin(g).is_none_or(|t| g < t) {
                    pocket.constraints.push((self.mesh.origin(g), self.mesh.dest(g)));
                }
                if let Some(t) = self.mesh.twin(g) {
                    stack.push(t);
                }
            }
        }
        warn!(
            vertex = z,
            triangles = pocket.triangles.len(),
            "constraint channel closed a pocket"
        );
    }

    /// Replace the crossed channel by two ear-clipped polygons sharing the
    /// new constrained edge `a`-`end`.
    fn retriangulate(&mut self, a: usize, sweep: Sweep, pocket: &mut Pocket) {
        let Sweep {
            end: _,
            lower,
            upper,
            crossed,
            pocket: evicted,
        } = sweep;

        for &tri in crossed.iter().chain(&evicted.triangles) {
            self.mesh.remove_triangle(3 * tri);
        }

        // upper: a -> end -> U_m -> ... -> U_1 -> a
        let mut upper_polygon = vec![a];
        upper_polygon.extend(upper.vertices[1..].iter().rev());
        let mut upper_rims = vec![Rim::open()];
        upper_rims.extend(upper.rims.iter().rev());

        // lower: a -> L_1 -> ... -> L_k -> end -> a
        let lower_polygon = lower.vertices;
        let mut lower_rims = lower.rims;
        lower_rims.push(Rim::open());

        let upper_clip = self.ear_clip(&upper_polygon, &upper_rims);
        let lower_clip = self.ear_clip(&lower_polygon, &lower_rims);

        let forward = upper_clip.edges[0];
        let backward = lower_clip.edges[lower_clip.edges.len() - 1];
        self.mesh.make_twins(forward, backward);
        self.mesh.set_constraint(forward, true);

        let mut queue = upper_clip.created;
        queue.extend(lower_clip.created);
        self.restore_delaunay(queue);

        pocket.vertices.extend(evicted.vertices);
        pocket.constraints.extend(evicted.constraints);
    }

    /// Put evicted pocket vertices and constraints back, for a bounded
    /// number of rounds.
    fn reinsert(&mut self, mut pocket: Pocket) {
        let mut rounds = 0;
        while !pocket.is_empty() {
            if rounds == self.max_constraint_rollbacks {
                warn!(
                    vertices = pocket.vertices.len(),
                    constraints = pocket.constraints.len(),
                    "pocket rollback limit reached, dropping the rest"
                );
                return;
            }
            rounds += 1;

            pocket.vertices.sort_unstable();
            pocket.vertices.dedup();
            for &v in &pocket.vertices {
                if self.mesh.is_connected(v) {
                    continue;
                }
                if let Err(err) = self.add_vertex(v) {
                    warn!(vertex = v, %err, "could not reinsert pocket vertex");
                }
            }

            let mut next_round = Pocket::default();
            for &(u, w) in &pocket.constraints {
                if let Err(err) = self.insert_pieces(u, w, &mut next_round) {
                    warn!(from = u, to = w, %err, "could not restore pocket constraint");
                }
            }
            pocket = next_round;
        }
    }
}
