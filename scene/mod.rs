/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Render-packet derivation.
//!
//! Projects the live store plus the current run state into flat,
//! serializable visuals a renderer can draw without touching core types.
//! Strictly read-only: the scene is rebuilt after every mutation or step,
//! never mutated in place.

use serde::Serialize;

use crate::dijkstra::{Distance, PathfindingEngine};
use crate::graph::{EdgeId, GraphStore, NodeId};

/// Visual classification of a node, in descending precedence. A node that
/// qualifies for several classes gets the highest one (start beats end
/// beats current, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodePaint {
    Start,
    End,
    Current,
    Path,
    Visited,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeVisual {
    pub id: NodeId,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub paint: NodePaint,

    /// Tentative distance to draw under the label; `None` before a run is
    /// initialized.
    pub distance: Option<Distance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeVisual {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
    pub weight: u32,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// One renderable frame of the whole visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Scene {
    pub nodes: Vec<NodeVisual>,
    pub edges: Vec<EdgeVisual>,
}

impl Scene {
    /// Derive a frame from the store and the engine's run state.
    pub fn project(store: &GraphStore, engine: &PathfindingEngine) -> Scene {
        let path = engine.path();
        let has_run_state = !engine.distances().is_empty();

        let nodes = store
            .nodes()
            .map(|(id, node)| {
                let paint = if store.start() == Some(id) {
                    NodePaint::Start
                } else if store.end() == Some(id) {
                    NodePaint::End
                } else if engine.current() == Some(id) {
                    NodePaint::Current
                } else if path.contains(&id) {
                    NodePaint::Path
                } else if engine.visited().contains(&id) {
                    NodePaint::Visited
                } else {
                    NodePaint::Idle
                };
                NodeVisual {
                    id,
                    label: node.label.clone(),
                    x: node.position.x,
                    y: node.position.y,
                    paint,
                    distance: has_run_state.then(|| engine.distance(id)).flatten(),
                }
            })
            .collect();

        let edges = store
            .edges()
            .map(|(id, edge)| {
                let from = store.node(edge.a).map(|n| n.position).unwrap_or_default();
                let to = store.node(edge.b).map(|n| n.position).unwrap_or_default();
                EdgeVisual {
                    id,
                    a: edge.a,
                    b: edge.b,
                    weight: edge.weight,
                    from: (from.x, from.y),
                    to: (to.x, to.y),
                }
            })
            .collect();

        Scene { nodes, edges }
    }
}
