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

use serde::{Deserialize, Serialize};

use crate::mesh::{HalfEdgeMesh, Vertex};

/// Everything needed to rebuild a triangulation: the vertex list, the
/// constrained edges and the faces. The serialization format is up to the
/// host; any serde backend works.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub constrained_edges: Vec<(usize, usize)>,
    pub faces: Vec<[usize; 3]>,
}

impl MeshSnapshot {
    /// Capture a compacted mesh.
    pub fn capture(mesh: &HalfEdgeMesh) -> Self {
        Self {
            vertices: mesh.vertices().to_vec(),
            constrained_edges: mesh.constrained_edges(),
            faces: mesh.faces().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
