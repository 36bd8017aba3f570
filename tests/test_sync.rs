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

use cdtmesh::config::TopologyConfig;
use cdtmesh::error::{MeshError, TopologyError};
use cdtmesh::io::MeshSnapshot;
use cdtmesh::topology::Topology;

use common::{assert_valid, constrained_set, face_count, make_unit_square, vertex};

#[test]
fn test_snapshot_ron_round_trip() {
    let mut topology = make_unit_square();
    topology.add_vertex(vertex(0.5, 0.25)).unwrap();
    topology.insert_constrained_edge(1, 3).unwrap();
    let snapshot = topology.snapshot();

    let text = ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default()).unwrap();
    let restored: MeshSnapshot = ron::from_str(&text).unwrap();
    assert_eq!(restored, snapshot);

    let rebuilt = Topology::from_snapshot(TopologyConfig::default(), restored).unwrap();
    assert_eq!(rebuilt.index_buffer(), topology.index_buffer());
    assert_eq!(constrained_set(&rebuilt), constrained_set(&topology));
    assert_valid(&rebuilt);
}

#[test]
fn test_snapshot_without_constraints_field() {
    let text = r#"(
        vertices: [
            (position: (x: 0.0, y: 0.0)),
            (position: (x: 1.0, y: 0.0)),
            (position: (x: 0.0, y: 1.0)),
        ],
        faces: [(0, 2, 1)],
    )"#;
    let snapshot: MeshSnapshot = ron::from_str(text).unwrap();
    assert!(snapshot.constrained_edges.is_empty());
    assert_eq!(snapshot.vertices[2].color, [1.0; 4]);

    let topology = Topology::from_snapshot(TopologyConfig::default(), snapshot).unwrap();
    assert_eq!(topology.index_buffer(), &[0, 1, 2]);
    topology.check_invariants().unwrap();
}

#[test]
fn test_edit_after_sync() {
    let mut topology = Topology::default();
    let vertices = vec![
        vertex(0.0, 0.0),
        vertex(2.0, 0.0),
        vertex(2.0, 2.0),
        vertex(0.0, 2.0),
    ];
    topology
        .sync(vertices, &[(0, 2)], &[[0, 1, 2], [0, 2, 3]])
        .unwrap();
    assert_eq!(face_count(&topology), 2);

    let v = topology.add_vertex(vertex(1.5, 0.5)).unwrap();
    assert_eq!(v, 4);
    assert_eq!(face_count(&topology), 4);
    assert!(topology.is_constrained(0, 2));
    assert_valid(&topology);
}

#[test]
fn test_failed_sync_keeps_mesh() {
    let mut topology = make_unit_square();
    let before = topology.snapshot();

    let err = topology
        .sync(vec![vertex(0.0, 0.0), vertex(1.0, 0.0)], &[], &[[0, 1, 2]])
        .unwrap_err();
    assert_eq!(
        err,
        TopologyError::Mesh(MeshError::VertexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(topology.snapshot(), before);

    let err = topology
        .sync(vec![vertex(f64::NAN, 0.0)], &[], &[])
        .unwrap_err();
    assert!(matches!(err, TopologyError::NonFinitePosition { .. }));
    assert_eq!(topology.snapshot(), before);
}
