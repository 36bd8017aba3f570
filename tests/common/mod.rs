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

#![allow(dead_code)]

use cdtmesh::geometry::Point2;
use cdtmesh::mesh::Vertex;
use cdtmesh::operations::triangulation::delaunay_violations;
use cdtmesh::topology::Topology;

pub fn vertex(x: f64, y: f64) -> Vertex {
    Vertex::new(Point2::new(x, y))
}

/// Insert the points in order and return the topology.
pub fn topology_from(points: &[(f64, f64)]) -> Topology {
    let mut topology = Topology::default();
    for &(x, y) in points {
        topology.add_vertex(vertex(x, y)).unwrap();
    }
    topology
}

/// Unit square; the seed makes 2-0 the diagonal.
pub fn make_unit_square() -> Topology {
    topology_from(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

pub fn assert_valid(topology: &Topology) {
    topology.check_invariants().unwrap();
    let violations = delaunay_violations(topology.mesh());
    assert!(
        violations.is_empty(),
        "half-edges {violations:?} are not locally Delaunay"
    );
}

/// Undirected constrained edges, each as `(min, max)`, sorted.
pub fn constrained_set(topology: &Topology) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = topology
        .constrained_edges()
        .into_iter()
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect();
    edges.sort_unstable();
    edges
}

pub fn face_count(topology: &Topology) -> usize {
    topology.faces().count()
}
