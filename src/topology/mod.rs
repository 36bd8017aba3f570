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

//! Editing facade over the constrained Delaunay triangulation.
//!
//! [`Topology`] owns the mesh, runs one triangulator edit per call and
//! compacts the storage afterwards, so between calls the index buffer and
//! half-edge indices are dense and stable.

use tracing::{debug, warn};

use crate::config::TopologyConfig;
use crate::error::{MeshResult, TopologyError, TopologyResult};
use crate::geometry::Point2;
use crate::io::MeshSnapshot;
use crate::mesh::{HalfEdgeMesh, Insertion, MeshStorage, Vertex, VertexRemoval};
use crate::operations::triangulation::Triangulator;


pub use hit_test::HitTest;

#[derive(Debug, Clone, Default)]
pub struct Topology {
    mesh: HalfEdgeMesh,
    config: TopologyConfig,
}

impl Topology {
    pub fn new(config: TopologyConfig) -> Self {
        Self {
            mesh: HalfEdgeMesh::new(),
            config,
        }
    }

    /// Rebuild a topology from persisted data.
    pub fn from_snapshot(config: TopologyConfig, snapshot: MeshSnapshot) -> TopologyResult<Self> {
        let mut topology = Self::new(config);
        topology.sync(
            snapshot.vertices,
            &snapshot.constrained_edges,
            &snapshot.faces,
        )?;
        Ok(topology)
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.mesh.vertices()
    }

    pub fn index_buffer(&self) -> &[usize] {
        self.mesh.index_buffer()
    }

    pub fn faces(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.mesh.faces()
    }

    /// Each constrained edge once.
    pub fn constrained_edges(&self) -> Vec<(usize, usize)> {
        self.mesh.constrained_edges()
    }

    pub fn is_constrained(&self, a: usize, b: usize) -> bool {
        self.mesh
            .find_edge(a, b)
            .is_some_and(|e| self.mesh.is_constrained(e))
    }

    pub fn check_invariants(&self) -> MeshResult<()> {
        self.mesh.check_invariants()
    }

    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot::capture(&self.mesh)
    }

    fn triangulator(&mut self) -> Triangulator<'_, HalfEdgeMesh> {
        let limit = self.config.max_constraint_rollbacks;
        Triangulator::new(&mut self.mesh).with_max_constraint_rollbacks(limit)
    }

    /// Compact the mesh and, when configured, fail fast on a broken invariant.
    fn finish_edit(&mut self, edit: &'static str) {
        self.mesh.invalidate();
        if self.config.validate_after_edit {
            if let Err(err) = self.mesh.check_invariants() {
                panic!("{edit}: mesh invariant broken: {err}");
            }
        }
    }

    fn check_vertex(&self, v: usize) -> TopologyResult<()> {
        let len = self.mesh.vertex_count();
        if v >= len {
            return Err(TopologyError::vertex_out_of_range(v, len));
        }
        Ok(())
    }

    fn check_position(position: &Point2) -> TopologyResult<()> {
        if !position.is_finite() {
            return Err(TopologyError::NonFinitePosition {
                x: position.x,
                y: position.y,
            });
        }
        Ok(())
    }

    /// Insert a vertex and return its index.
    ///
    /// When another vertex already sits at the position nothing is added and
    /// the index of the existing vertex is returned.
    pub fn add_vertex(&mut self, vertex: Vertex) -> TopologyResult<usize> {
        Self::check_position(&vertex.position)?;
        let v = self.mesh.push_vertex(vertex);
        let outcome = self.triangulator().add_vertex(v);

        let result = match outcome {
            Ok(Insertion::Inserted) => Ok(v),
            Ok(Insertion::Pending) => {
                debug!(vertex = v, "vertex pending until the mesh can be seeded");
                Ok(v)
            }
            Ok(Insertion::Duplicate(existing)) => {
                self.mesh.pop_vertex();
                Ok(existing)
            }
            Err(err) => {
                self.mesh.pop_vertex();
                warn!(%err, "vertex rejected");
                Err(err.into())
            }
        };
        self.finish_edit("add_vertex");
        result
    }

    /// Remove vertex `v`. The last vertex takes its index; see
    /// [`VertexRemoval::relocated`].
    pub fn remove_vertex(&mut self, v: usize) -> TopologyResult<VertexRemoval> {
        self.check_vertex(v)?;
        let removal = self.triangulator().remove_vertex(v);
        self.finish_edit("remove_vertex");
        Ok(removal)
    }

    /// Move vertex `v` to `to`, keeping its index.
    pub fn translate_vertex(&mut self, v: usize, to: Point2) -> TopologyResult<()> {
        self.check_vertex(v)?;
        Self::check_position(&to)?;
        let outcome = self.triangulator().translate_vertex(v, to);
        self.finish_edit("translate_vertex");
        match outcome? {
            Insertion::Duplicate(existing) => Err(TopologyError::Occupied(existing)),
            Insertion::Inserted | Insertion::Pending => Ok(()),
        }
    }

    /// Constrain the segment `a`-`b`, splitting it at vertices it passes through.
    pub fn insert_constrained_edge(&mut self, a: usize, b: usize) -> TopologyResult<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(TopologyError::DegenerateConstraint(a));
        }
        let outcome = self.triangulator().insert_constrained_edge(a, b);
        self.finish_edit("insert_constrained_edge");
        outcome.map_err(Into::into)
    }

    /// Set or clear the constraint between `a` and `b`.
    ///
    /// Setting inserts the segment when it is not an edge yet. Clearing a
    /// missing edge does nothing; a cleared edge is made Delaunay again.
    pub fn set_constraint(&mut self, a: usize, b: usize, constrained: bool) -> TopologyResult<()> {
        if constrained {
            return self.insert_constrained_edge(a, b);
        }
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if let Some(e) = self.mesh.find_edge(a, b).filter(|&e| self.mesh.is_constrained(e)) {
            self.mesh.set_constraint(e, false);
            self.triangulator().restore_delaunay(vec![e]);
            self.finish_edit("set_constraint");
        }
        Ok(())
    }

    /// Flip the constraint state of `a`-`b` and return the new state.
    pub fn toggle_constraint(&mut self, a: usize, b: usize) -> TopologyResult<bool> {
        let constrained = !self.is_constrained(a, b);
        self.set_constraint(a, b, constrained)?;
        Ok(constrained)
    }

    /// Replace the mesh with externally supplied data.
    pub fn sync(
        &mut self,
        vertices: Vec<Vertex>,
        constrained_edges: &[(usize, usize)],
        faces: &[[usize; 3]],
    ) -> TopologyResult<()> {
        if let Some(vertex) = vertices.iter().find(|v| !v.position.is_finite()) {
            Self::check_position(&vertex.position)?;
        }
        self.mesh.sync(vertices, constrained_edges, faces)?;
        self.finish_edit("sync");
        Ok(())
    }
}
