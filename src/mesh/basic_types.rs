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

/// Where a query point falls relative to the live triangles.
///
/// Variants are listed in lookup precedence: a point that coincides with a
/// vertex is never reported as on an edge, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The point coincides with the origin of this half-edge.
    SameVertex(usize),
    /// The point lies strictly inside this half-edge's segment.
    OnEdge(usize),
    /// The point lies strictly inside the triangle whose first half-edge is given.
    InsideTriangle(usize),
    /// The point lies outside every triangle; carries the nearest boundary
    /// half-edge when the mesh has one.
    Outside(Option<usize>),
}

/// Outcome of inserting a stored vertex into the triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The vertex is now part of the triangulation.
    Inserted,
    /// Another vertex already occupies the position; nothing changed.
    Duplicate(usize),
    /// Fewer than three non-collinear vertices exist; the vertex waits.
    Pending,
}

/// Report of a vertex removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexRemoval {
    /// Old index of the vertex that was moved into the freed slot.
    pub relocated: Option<usize>,
    /// Far ends of the constrained edges that were incident to the vertex,
    /// already renumbered for the swap.
    pub constrained_neighbors: Vec<usize>,
}

/// What a vertex detachment leaves behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detached {
    /// Former neighbours that no longer belong to any triangle.
    pub orphans: SmallVec<[usize; 8]>,
    /// Far ends of constrained edges that were incident to the vertex.
    pub constrained_neighbors: Vec<usize>,
}

/// Adjacency captured from a half-edge before its triangle is deleted, so
/// the half-edge that replaces it can be glued back in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rim {
    pub twin: Option<usize>,
    pub constrained: bool,
}

impl Rim {
    /// Rim of a freshly created interior edge.
    pub const fn open() -> Self {
        Self {
            twin: None,
            constrained: false,
        }
    }

    pub const fn twinned(twin: usize) -> Self {
        Self {
            twin: Some(twin),
            constrained: false,
        }
    }
}
