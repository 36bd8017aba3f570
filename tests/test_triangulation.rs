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

mod common;

use cdtmesh::error::{TopologyError, TriangulationError};
use cdtmesh::geometry::Point2;
use cdtmesh::mesh::MeshStorage;

use common::{
    assert_valid, constrained_set, face_count, make_unit_square, topology_from, vertex,
};

#[test]
fn test_square_then_centre() {
    let mut topology = make_unit_square();
    assert_eq!(face_count(&topology), 2);
    assert_valid(&topology);

    let centre = topology.add_vertex(vertex(0.5, 0.5)).unwrap();
    assert_eq!(centre, 4);
    assert_eq!(face_count(&topology), 4);
    assert!(topology.faces().all(|face| face.contains(&centre)));
    assert_valid(&topology);
}

#[test]
fn test_constrained_diagonal_is_kept() {
    let mut topology = make_unit_square();
    // 2-0 is the diagonal after seeding; ask for the other one
    topology.insert_constrained_edge(1, 3).unwrap();
    assert_eq!(face_count(&topology), 2);
    assert!(topology.is_constrained(1, 3));
    assert!(topology.mesh().find_edge(0, 2).is_none());
    assert_valid(&topology);

    // a vertex next to the constraint must not flip it away
    topology.add_vertex(vertex(0.5, 0.2)).unwrap();
    assert!(topology.is_constrained(1, 3));
    assert_eq!(face_count(&topology), 4);
    assert_valid(&topology);
}

#[test]
fn test_remove_centre_restores_square() {
    let mut topology = make_unit_square();
    let centre = topology.add_vertex(vertex(0.5, 0.5)).unwrap();
    let removal = topology.remove_vertex(centre).unwrap();
    assert_eq!(removal.relocated, None);
    assert!(removal.constrained_neighbors.is_empty());
    assert_eq!(topology.vertices().len(), 4);
    assert_eq!(face_count(&topology), 2);
    assert_valid(&topology);
}

#[test]
fn test_outside_vertex_keeps_constraint() {
    let mut topology = make_unit_square();
    topology.insert_constrained_edge(0, 2).unwrap();
    topology.add_vertex(vertex(2.0, 2.0)).unwrap();

    assert_eq!(face_count(&topology), 4);
    assert_eq!(constrained_set(&topology), vec![(0, 2)]);
    assert_valid(&topology);
}

#[test]
fn test_collinear_hull_extension() {
    let mut topology = make_unit_square();
    let v = topology.add_vertex(vertex(2.0, 0.0)).unwrap();
    assert_eq!(face_count(&topology), 3);
    assert!(topology.mesh().find_edge(1, v).is_some());
    assert!(topology.mesh().find_edge(0, v).is_none());
    assert_valid(&topology);
}

#[test]
fn test_vertex_on_boundary_edge() {
    let mut topology = make_unit_square();
    let v = topology.add_vertex(vertex(0.5, 0.0)).unwrap();
    assert_eq!(face_count(&topology), 3);
    assert!(topology.mesh().find_edge(0, v).is_some());
    assert!(topology.mesh().find_edge(v, 1).is_some());
    assert!(topology.mesh().find_edge(0, 1).is_none());
    assert_valid(&topology);
}

#[test]
fn test_duplicate_vertex_is_idempotent() {
    let mut topology = make_unit_square();
    let first = topology.add_vertex(vertex(0.5, 0.5)).unwrap();
    let again = topology.add_vertex(vertex(0.5, 0.5)).unwrap();
    assert_eq!(first, again);
    assert_eq!(topology.vertices().len(), 5);
    assert_eq!(face_count(&topology), 4);

    let corner = topology.add_vertex(vertex(1.0, 1.0)).unwrap();
    assert_eq!(corner, 2);
    assert_eq!(topology.vertices().len(), 5);
}

#[test]
fn test_collinear_vertices_wait_for_a_triangle() {
    let mut topology = topology_from(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert_eq!(topology.vertices().len(), 3);
    assert_eq!(face_count(&topology), 0);

    // duplicates are caught before there is any triangle
    assert_eq!(topology.add_vertex(vertex(1.0, 0.0)).unwrap(), 1);

    topology.add_vertex(vertex(1.0, 1.0)).unwrap();
    assert_eq!(face_count(&topology), 2);
    assert!((0..4).all(|v| topology.mesh().is_connected(v)));
    assert_valid(&topology);
}

#[test]
fn test_split_constrained_edge() {
    let mut topology = make_unit_square();
    topology.insert_constrained_edge(1, 3).unwrap();
    let v = topology.add_vertex(vertex(0.5, 0.5)).unwrap();

    assert_eq!(face_count(&topology), 4);
    assert_eq!(constrained_set(&topology), vec![(1, v), (3, v)]);
    assert!(!topology.is_constrained(1, 3));
    assert_valid(&topology);
}

#[test]
fn test_grid_is_delaunay() {
    let mut points = Vec::new();
    for j in 0..6 {
        for i in 0..6 {
            points.push((f64::from(i), f64::from(j)));
        }
    }
    let topology = topology_from(&points);
    // a convex 6x6 lattice: 2 * 25 unit triangles
    assert_eq!(face_count(&topology), 50);
    assert_valid(&topology);
}

#[test]
fn test_random_points_are_delaunay() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(42);
    let mut topology = cdtmesh::Topology::default();
    for _ in 0..200 {
        let x: f64 = rng.random_range(-10.0..10.0);
        let y: f64 = rng.random_range(-10.0..10.0);
        topology.add_vertex(vertex(x, y)).unwrap();
    }
    assert_eq!(topology.vertices().len(), 200);
    assert_valid(&topology);

    // Euler: faces = 2n - 2 - h for n points with h on the hull
    let hull = topology.mesh().boundary_half_edges().len();
    assert_eq!(face_count(&topology), 2 * 200 - 2 - hull);
}

#[test]
fn test_rejects_bad_input() {
    let mut topology = make_unit_square();
    let err = topology.add_vertex(vertex(f64::NAN, 0.0)).unwrap_err();
    assert!(matches!(err, TopologyError::NonFinitePosition { .. }));
    assert_eq!(topology.vertices().len(), 4);

    assert_eq!(
        topology.remove_vertex(9).unwrap_err(),
        TopologyError::vertex_out_of_range(9, 4)
    );
    assert_eq!(
        topology.insert_constrained_edge(2, 2).unwrap_err(),
        TopologyError::DegenerateConstraint(2)
    );
    assert!(topology.translate_vertex(0, Point2::new(f64::INFINITY, 0.0)).is_err());
}

#[test]
fn test_constraint_needs_connected_endpoints() {
    let mut topology = topology_from(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert_eq!(
        topology.insert_constrained_edge(0, 2).unwrap_err(),
        TopologyError::Triangulation(TriangulationError::VertexNotConnected(0))
    );
}
