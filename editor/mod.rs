/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pointer/tool interpretation for graph editing.
//!
//! `EditorController` is a state machine over the active [`Tool`],
//! dispatching pointer-down events against the store: node hits take
//! priority over edge hits, which take priority over empty space. It owns
//! the connect tool's two-click protocol and the drag state; modal
//! editing (labels, weights) is delegated to the host via
//! [`EditRequest`].
//!
//! The controller is only driven while the app is in create mode; the app
//! layer gates that.

use euclid::default::{Point2D, Vector2D};
use log::debug;

use crate::graph::{EdgeId, GraphStore, NodeId};

/// Node hit-test radius, matching the drawn node circle.
pub const NODE_RADIUS: f32 = 20.0;

/// Edge hit-test threshold around the segment.
pub const EDGE_HIT_THRESHOLD: f32 = 10.0;

/// Active editing tool. `Inspect` is the no-tool state: it drags nodes
/// and opens the weight editor on edge clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    AddNode,
    Connect,
    SetStart,
    SetEnd,
    Delete,
    #[default]
    Inspect,
}

/// A request for the host's modal/input collaborator. The editor never
/// blocks on these; the host applies the result through
/// [`GraphStore::set_node_label`] / [`GraphStore::set_edge_weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRequest {
    /// Open a label editor for this node.
    NodeLabel(NodeId),

    /// Open a weight editor for this edge.
    EdgeWeight(EdgeId),
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    node: NodeId,

    /// Pointer offset from the node center at drag start, so the node
    /// doesn't snap its center under the cursor.
    offset: Vector2D<f32>,
}

/// Interprets pointer events against the store according to the active
/// tool.
#[derive(Debug, Default)]
pub struct EditorController {
    tool: Tool,

    /// First endpoint of the connect tool's two-click protocol.
    connect_pending: Option<NodeId>,

    drag: Option<DragState>,

    /// Weight applied by the connect tool, mirrored from the host's
    /// weight input. Always >= 1.
    edge_weight: u32,
}

impl EditorController {
    pub fn new() -> Self {
        Self {
            tool: Tool::default(),
            connect_pending: None,
            drag: None,
            edge_weight: 1,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Any pending connect endpoint is discarded.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.connect_pending = None;
    }

    /// Pending first endpoint of the connect protocol, if any.
    pub fn connect_pending(&self) -> Option<NodeId> {
        self.connect_pending
    }

    /// Node currently being dragged, if any.
    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.map(|drag| drag.node)
    }

    /// Mirror the host's edge-weight input. Zero is clamped to 1, the
    /// way the original input falls back on unparsable values.
    pub fn set_edge_weight_input(&mut self, weight: u32) {
        self.edge_weight = weight.max(1);
    }

    pub fn edge_weight_input(&self) -> u32 {
        self.edge_weight
    }

    /// Dispatch a pointer-down at `point`.
    ///
    /// Hit order: node, then edge, then empty space. Returns a modal
    /// request when the interaction needs host input.
    pub fn pointer_down(
        &mut self,
        store: &mut GraphStore,
        point: Point2D<f32>,
    ) -> Option<EditRequest> {
        if let Some(node) = store.find_node_at(point, NODE_RADIUS) {
            return self.node_hit(store, node, point);
        }
        if let Some(edge) = store.find_edge_at(point, EDGE_HIT_THRESHOLD) {
            return self.edge_hit(store, edge);
        }
        self.empty_hit(store, point);
        None
    }

    fn node_hit(
        &mut self,
        store: &mut GraphStore,
        node: NodeId,
        point: Point2D<f32>,
    ) -> Option<EditRequest> {
        match self.tool {
            Tool::AddNode => return Some(EditRequest::NodeLabel(node)),
            Tool::Connect => match self.connect_pending.take() {
                None => {
                    self.connect_pending = Some(node);
                },
                Some(first) => {
                    // A failed attempt (self-click or duplicate edge)
                    // silently drops the pending endpoint.
                    if let Err(err) = store.connect(first, node, self.edge_weight) {
                        debug!("connect rejected: {err}");
                    }
                },
            },
            Tool::SetStart => store.set_start(node),
            Tool::SetEnd => store.set_end(node),
            Tool::Delete => store.delete_node(node),
            Tool::Inspect => {
                let center = store.node(node)?.position;
                self.drag = Some(DragState {
                    node,
                    offset: point - center,
                });
            },
        }
        None
    }

    fn edge_hit(&mut self, store: &mut GraphStore, edge: EdgeId) -> Option<EditRequest> {
        match self.tool {
            Tool::Delete => {
                store.delete_edge(edge);
                None
            },
            _ => Some(EditRequest::EdgeWeight(edge)),
        }
    }

    fn empty_hit(&mut self, store: &mut GraphStore, point: Point2D<f32>) {
        match self.tool {
            Tool::AddNode => {
                store.add_node(point);
            },
            // Click-to-cancel for the two-click protocol.
            Tool::Connect => self.connect_pending = None,
            _ => {},
        }
    }

    /// Pointer moved to `point`; updates the dragged node's position.
    /// No collision or boundary checks: a node may be dragged off-canvas.
    pub fn pointer_move(&mut self, store: &mut GraphStore, point: Point2D<f32>) {
        if let Some(DragState { node, offset }) = self.drag {
            if let Some(target) = store.node_mut(node) {
                target.position = point - offset;
            }
        }
    }

    /// Pointer released or left the canvas; ends any drag unconditionally.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Tool guidance line for the host's instruction text.
    pub fn instruction(&self) -> &'static str {
        match self.tool {
            Tool::AddNode => "Click anywhere to add a node",
            Tool::Connect => {
                if self.connect_pending.is_none() {
                    "Select first node to connect"
                } else {
                    "Select second node to connect"
                }
            },
            Tool::SetStart => "Click a node to set as start",
            Tool::SetEnd => "Click a node to set as end",
            Tool::Delete => "Click a node or edge to delete",
            Tool::Inspect => "Drag nodes to reposition them",
        }
    }
}
