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

/// Tunables of the editing facade.
///
/// Missing fields fall back to [`TopologyConfig::default`], so hosts can
/// deserialize partial RON/JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Pick radius around vertices used by [`crate::Topology::pick`].
    pub vertex_radius: f64,
    /// Pick radius around edges used by [`crate::Topology::pick`].
    pub edge_radius: f64,
    /// Upper bound on pocket rollbacks per constrained edge insertion.
    pub max_constraint_rollbacks: usize,
    /// Run the full invariant check after each edit and panic on failure.
    pub validate_after_edit: bool,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            vertex_radius: 0.05,
            edge_radius: 0.03,
            max_constraint_rollbacks: 64,
            validate_after_edit: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_uses_defaults() {
        let config: TopologyConfig = ron::from_str("(vertex_radius: 0.2)").unwrap();
        assert_eq!(config.vertex_radius, 0.2);
        assert_eq!(config.edge_radius, TopologyConfig::default().edge_radius);
        assert_eq!(config.max_constraint_rollbacks, 64);
    }
}
