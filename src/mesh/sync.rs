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
use tracing::info;

use crate::error::{MeshError, MeshResult};
use crate::kernel::orient2d;
use crate::mesh::core::HalfEdgeMesh;
use crate::mesh::storage::MeshStorage;
use crate::mesh::vertex::Vertex;

impl HalfEdgeMesh {
    /// Replace the whole mesh with externally supplied data.
    ///
    /// Faces may come in either winding; they are stored counter-clockwise.
    /// Twins are recovered by matching opposite directed edges, then the
    /// constraint flags are replayed. On error `self` is left untouched.
    pub fn sync(
        &mut self,
        vertices: Vec<Vertex>,
        constrained_edges: &[(usize, usize)],
        faces: &[[usize; 3]],
    ) -> MeshResult<()> {
        let len = vertices.len();
        let mut mesh = HalfEdgeMesh::new();
        mesh.vertices = vertices;
        let mut directed: AHashMap<(usize, usize), usize> =
            AHashMap::with_capacity_and_hasher(faces.len() * 3, Default::default());

        // --- 1) faces, normalised to CCW ---
        for (face, &[a, b, c]) in faces.iter().enumerate() {
            if let Some(&index) = [a, b, c].iter().find(|&&v| v >= len) {
                return Err(MeshError::VertexOutOfRange { index, len });
            }
            if a == b || b == c || c == a {
                return Err(MeshError::DegenerateFace { face });
            }
            let orientation = orient2d(
                &mesh.vertices[a].position,
                &mesh.vertices[b].position,
                &mesh.vertices[c].position,
            );
            let (b, c) = if orientation > 0.0 {
                (b, c)
            } else if orientation < 0.0 {
                (c, b)
            } else {
                return Err(MeshError::DegenerateFace { face });
            };

            let e = mesh.connect(a, b, c);
            for (k, key) in [(a, b), (b, c), (c, a)].into_iter().enumerate() {
                if directed.insert(key, e + k).is_some() {
                    return Err(MeshError::NonManifoldEdge {
                        origin: key.0,
                        dest: key.1,
                    });
                }
            }
        }

        // --- 2) twins ---
        for (&(o, d), &e) in &directed {
            if o < d {
                if let Some(&t) = directed.get(&(d, o)) {
                    mesh.make_twins(e, t);
                }
            }
        }

        // --- 3) constraints ---
        for &(a, b) in constrained_edges {
            let e = directed
                .get(&(a, b))
                .or_else(|| directed.get(&(b, a)))
                .copied()
                .ok_or(MeshError::MissingConstrainedEdge(a, b))?;
            mesh.set_constraint(e, true);
        }

        mesh.invalidate();
        info!(
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            constraints = constrained_edges.len(),
            "mesh synchronised"
        );
        *self = mesh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    fn verts(points: &[(f64, f64)]) -> Vec<Vertex> {
        points
            .iter()
            .map(|&(x, y)| Vertex::new(Point2::new(x, y)))
            .collect()
    }

    #[test]
    fn clockwise_faces_are_flipped() {
        let mut mesh = HalfEdgeMesh::new();
        let square = verts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        mesh.sync(square, &[(0, 2)], &[[0, 2, 1], [0, 2, 3]]).unwrap();
        assert_eq!(mesh.index_buffer(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.constrained_edges().len(), 1);
        mesh.check_invariants().unwrap();
    }

    #[test]
    fn bad_input_is_rejected() {
        let mut mesh = HalfEdgeMesh::new();
        let tri = verts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (2.0, 0.0)]);

        let err = mesh.sync(tri.clone(), &[], &[[0, 1, 7]]).unwrap_err();
        assert_eq!(err, MeshError::VertexOutOfRange { index: 7, len: 4 });

        let err = mesh.sync(tri.clone(), &[], &[[0, 1, 3]]).unwrap_err();
        assert_eq!(err, MeshError::DegenerateFace { face: 0 });

        let err = mesh.sync(tri.clone(), &[], &[[0, 1, 2], [1, 2, 0]]).unwrap_err();
        assert!(matches!(err, MeshError::NonManifoldEdge { .. }));

        let err = mesh.sync(tri, &[(1, 3)], &[[0, 1, 2]]).unwrap_err();
        assert_eq!(err, MeshError::MissingConstrainedEdge(1, 3));

        assert!(mesh.vertices().is_empty());
    }
}
