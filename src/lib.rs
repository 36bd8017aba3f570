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

//! Incremental constrained Delaunay triangulation on a compact half-edge mesh.
//!
//! The crate is layered leaves first:
//!
//! - [`kernel`]: exact-sign orientation and in-circle predicates built on
//!   floating-point expansion arithmetic.
//! - [`mesh`]: array-backed triangle/half-edge storage with twin links,
//!   tombstones and compaction, behind the [`mesh::MeshStorage`] trait.
//! - [`operations::triangulation`]: point location, Bowyer-Watson and hull
//!   insertion, vertex removal with ear clipping, constrained edge insertion
//!   and Delaunay-restoring flips, written once against [`mesh::MeshStorage`].
//! - [`topology`]: the editing facade consumed by an interactive editor.
//!
//! ```
//! use cdtmesh::geometry::Point2;
//! use cdtmesh::mesh::Vertex;
//! use cdtmesh::topology::Topology;
//!
//! let mut topology = Topology::default();
//! for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
//!     topology.add_vertex(Vertex::new(Point2::new(x, y))).unwrap();
//! }
//! assert_eq!(topology.faces().count(), 2);
//!
//! topology.add_vertex(Vertex::new(Point2::new(0.5, 0.5))).unwrap();
//! assert_eq!(topology.faces().count(), 4);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod operations;
pub mod topology;

pub use config::TopologyConfig;
pub use error::{MeshError, TopologyError, TopologyResult, TriangulationError};
pub use geometry::Point2;
pub use mesh::{HalfEdgeMesh, MeshStorage, Vertex};
pub use topology::{HitTest, Topology};
