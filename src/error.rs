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

//! Error types for mesh storage, triangulation and editing operations.

use thiserror::Error;

/// Result type alias for mesh storage operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Result type alias for the editing facade.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Structural problems found in a half-edge mesh or in data handed to `sync`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A half-edge's twin does not point back at it.
    #[error("half-edge {half_edge} twins {twin} but {twin} does not twin it back")]
    AsymmetricTwin { half_edge: usize, twin: usize },

    /// Twins must span the same two vertices in opposite directions.
    #[error("half-edges {half_edge} and {twin} are twins but do not span the same edge")]
    TwinEndpointMismatch { half_edge: usize, twin: usize },

    /// A half-edge and its twin disagree on the constraint flag.
    #[error("half-edge {half_edge} and its twin {twin} disagree on the constraint flag")]
    ConstraintMismatch { half_edge: usize, twin: usize },

    /// Storage still holds tombstones where a compacted mesh is required.
    #[error("mesh holds {0} tombstoned half-edges")]
    Tombstones(usize),

    /// The half-edge array is not made of whole triangles.
    #[error("half-edge count {0} is not a multiple of three")]
    NotTriangulated(usize),

    /// A vertex index is past the end of the vertex list.
    #[error("vertex index {index} out of range ({len} vertices)")]
    VertexOutOfRange { index: usize, len: usize },

    /// A twin index is past the end of the half-edge list.
    #[error("half-edge {half_edge} twins out-of-range index {twin}")]
    TwinOutOfRange { half_edge: usize, twin: usize },

    /// A triangle has zero or negative signed area.
    #[error("triangle {triangle} ({a}, {b}, {c}) is not counter-clockwise")]
    NotCounterClockwise {
        triangle: usize,
        a: usize,
        b: usize,
        c: usize,
    },

    /// A face repeats a vertex or has collinear corners.
    #[error("face {face} is degenerate")]
    DegenerateFace { face: usize },

    /// The same directed edge is used by two faces.
    #[error("directed edge ({origin}, {dest}) is used by more than one face")]
    NonManifoldEdge { origin: usize, dest: usize },

    /// A constrained edge does not exist in the face list.
    #[error("constrained edge ({0}, {1}) is not an edge of any face")]
    MissingConstrainedEdge(usize, usize),
}

/// Edits the triangulator refuses.
///
/// A constrained edge split by collinear vertices is inserted piece by
/// piece, so a refusal keeps the pieces placed before the failing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulationError {
    /// An exterior vertex sees no boundary edge it could be attached to.
    #[error("vertex {0} lies outside the mesh and sees no boundary edge")]
    NoVisibleBoundary(usize),

    /// The requested constraint leaves the triangulated domain.
    #[error("constrained edge ({from}, {to}) leaves the triangulated domain")]
    ConstraintLeavesMesh { from: usize, to: usize },

    /// The requested constraint crosses an existing constrained edge.
    #[error("constrained edge ({from}, {to}) crosses an existing constrained edge")]
    ConstraintCrossesConstraint { from: usize, to: usize },

    /// A constraint endpoint is not part of the triangulation.
    #[error("vertex {0} is not connected to the triangulation")]
    VertexNotConnected(usize),
}

/// Errors reported by the editing facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// The vertex index does not name a vertex.
    #[error("vertex index {index} out of range ({len} vertices)")]
    VertexOutOfRange { index: usize, len: usize },

    /// Another vertex already sits at the requested position.
    #[error("position is occupied by vertex {0}")]
    Occupied(usize),

    /// Vertex coordinates must be finite.
    #[error("vertex position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f64, y: f64 },

    /// A constraint needs two distinct endpoints.
    #[error("constrained edge needs two distinct vertices, got ({0}, {0})")]
    DegenerateConstraint(usize),

    /// The triangulator rejected the edit.
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    /// Persisted data could not be turned into a mesh.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl TopologyError {
    /// Create a vertex out of range error.
    #[must_use]
    pub const fn vertex_out_of_range(index: usize, len: usize) -> Self {
        Self::VertexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::AsymmetricTwin {
            half_edge: 3,
            twin: 7,
        };
        assert!(format!("{err}").contains("does not twin it back"));

        let err = TopologyError::vertex_out_of_range(9, 4);
        assert!(format!("{err}").contains("out of range"));

        let err: TopologyError = TriangulationError::ConstraintLeavesMesh { from: 1, to: 2 }.into();
        assert!(format!("{err}").contains("leaves the triangulated domain"));
    }
}
