/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the shortest-path visualizer.
//!
//! Core structures:
//! - `GraphStore`: node/edge collections with a derived adjacency view
//! - `Node`: labeled node with a canvas position
//! - `Edge`: undirected weighted pair of node ids
//!
//! Node identities are dense integers `0..node_count()`. Deleting a node
//! reindexes every higher id down by one, atomically with the edge and
//! selection fixups, so callers never observe a dangling reference.

use euclid::default::Point2D;
use log::{debug, warn};
use thiserror::Error;

pub mod hit;

/// Dense node identity. Always in `0..GraphStore::node_count()`.
pub type NodeId = usize;

/// Positional edge identity. Stable only until the edge list is mutated;
/// carries no cross-references, so no reindexing is needed.
pub type EdgeId = usize;

/// A labeled node on the canvas.
#[derive(Debug, Clone)]
pub struct Node {
    /// Display label, user-editable. Auto-generated as A, B, …, Z, AA, AB, …
    pub label: String,

    /// Position in canvas space. Mutated freely by drag; no bounds checks.
    pub position: Point2D<f32>,
}

/// An undirected weighted edge between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,

    /// Positive integer weight, validated at creation/edit time.
    pub weight: u32,
}

impl Edge {
    /// Whether this edge connects the same unordered pair as `(a, b)`.
    fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// Rejected graph mutations. All are recovered locally: the operation is
/// a no-op and prior state is intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cannot connect a node to itself")]
    SelfLoop,

    #[error("an edge between nodes {a} and {b} already exists")]
    DuplicateEdge { a: NodeId, b: NodeId },

    #[error("edge weight must be a positive integer")]
    NonPositiveWeight,

    #[error("node labels may not be empty")]
    EmptyLabel,
}

/// Immutable adjacency + label snapshot handed to the pathfinding engine.
///
/// The engine must never observe live edits made after a run starts, so it
/// operates on this frozen copy rather than borrowing the store.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    adjacency: Vec<Vec<(NodeId, u32)>>,
    labels: Vec<String>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// `(neighbor, weight)` pairs for `node`, in edge-insertion order.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, u32)] {
        &self.adjacency[node]
    }

    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node]
    }
}

/// Owns the node and edge collections plus the derived adjacency view and
/// the start/end selection.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,

    /// Derived view: `adjacency[n]` lists `(neighbor, weight)` for every
    /// edge touching `n`, symmetrically. Rebuilt or patched on every edge
    /// or identity change; never a source of truth.
    adjacency: Vec<Vec<(NodeId, u32)>>,

    start: Option<NodeId>,
    end: Option<NodeId>,

    /// Monotonic counter feeding the auto-label scheme. Reset by `clear`,
    /// not by deletions, so labels stay unique across a session.
    label_counter: usize,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `position` with the next auto-generated label.
    ///
    /// Selection side effect: an unset start takes the new node; otherwise
    /// an unset end takes it when distinct from start.
    pub fn add_node(&mut self, position: Point2D<f32>) -> NodeId {
        let id = self.nodes.len();
        let label = auto_label(self.label_counter);
        self.label_counter += 1;

        self.nodes.push(Node { label, position });
        self.adjacency.push(Vec::new());

        if self.start.is_none() {
            self.start = Some(id);
        } else if self.end.is_none() && self.start != Some(id) {
            self.end = Some(id);
        }

        debug!("added node {id} ({})", self.nodes[id].label);
        id
    }

    /// Insert an undirected edge between `a` and `b`.
    ///
    /// Rejected without mutation for self-loops and duplicate pairs (in
    /// either orientation).
    pub fn connect(&mut self, a: NodeId, b: NodeId, weight: u32) -> Result<EdgeId, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop);
        }
        if weight == 0 {
            return Err(GraphError::NonPositiveWeight);
        }
        if self.edges.iter().any(|edge| edge.joins(a, b)) {
            return Err(GraphError::DuplicateEdge { a, b });
        }

        let id = self.edges.len();
        self.edges.push(Edge { a, b, weight });
        self.adjacency[a].push((b, weight));
        self.adjacency[b].push((a, weight));

        debug!("connected {a} and {b} with weight {weight}");
        Ok(id)
    }

    /// Update an edge's weight, patching both adjacency entries.
    pub fn set_edge_weight(&mut self, edge: EdgeId, weight: u32) -> Result<(), GraphError> {
        if weight == 0 {
            return Err(GraphError::NonPositiveWeight);
        }
        let Some(target) = self.edges.get_mut(edge) else {
            warn!("set_edge_weight on unknown edge {edge}");
            return Ok(());
        };
        target.weight = weight;
        let (a, b) = (target.a, target.b);

        for entry in &mut self.adjacency[a] {
            if entry.0 == b {
                entry.1 = weight;
            }
        }
        for entry in &mut self.adjacency[b] {
            if entry.0 == a {
                entry.1 = weight;
            }
        }
        Ok(())
    }

    /// Replace a node's display label. Empty or whitespace-only labels are
    /// rejected.
    pub fn set_node_label(&mut self, node: NodeId, label: &str) -> Result<(), GraphError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(GraphError::EmptyLabel);
        }
        if let Some(target) = self.nodes.get_mut(node) {
            target.label = trimmed.to_string();
        } else {
            warn!("set_node_label on unknown node {node}");
        }
        Ok(())
    }

    /// Delete a node, atomically reindexing every higher node id down by
    /// one.
    ///
    /// Fixups performed in one pass before any caller can observe state:
    /// edges touching the node are dropped, surviving endpoints `> id` are
    /// decremented, start/end are decremented when `> id` and reset when
    /// they named the deleted node (start falls back to node 0 when any
    /// node remains, end to node 1 when at least two remain).
    pub fn delete_node(&mut self, id: NodeId) {
        if id >= self.nodes.len() {
            warn!("delete_node on unknown node {id}");
            return;
        }

        self.edges.retain(|edge| edge.a != id && edge.b != id);
        for edge in &mut self.edges {
            if edge.a > id {
                edge.a -= 1;
            }
            if edge.b > id {
                edge.b -= 1;
            }
        }

        self.nodes.remove(id);

        self.start = match self.start {
            Some(s) if s == id => (!self.nodes.is_empty()).then_some(0),
            Some(s) if s > id => Some(s - 1),
            other => other,
        };
        self.end = match self.end {
            Some(e) if e == id => (self.nodes.len() > 1).then_some(1),
            Some(e) if e > id => Some(e - 1),
            other => other,
        };

        self.rebuild_adjacency();
        debug!("deleted node {id}; {} nodes remain", self.nodes.len());
    }

    /// Remove an edge and both of its adjacency entries. Ids are
    /// positional, so no reindexing is needed.
    pub fn delete_edge(&mut self, edge: EdgeId) {
        if edge >= self.edges.len() {
            warn!("delete_edge on unknown edge {edge}");
            return;
        }
        let Edge { a, b, .. } = self.edges.remove(edge);
        self.adjacency[a].retain(|(neighbor, _)| *neighbor != b);
        self.adjacency[b].retain(|(neighbor, _)| *neighbor != a);
    }

    /// Empty every collection and reset the selection and label counter.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.start = None;
        self.end = None;
        self.label_counter = 0;
    }

    pub fn set_start(&mut self, node: NodeId) {
        if node < self.nodes.len() {
            self.start = Some(node);
        }
    }

    pub fn set_end(&mut self, node: NodeId) {
        if node < self.nodes.len() {
            self.end = Some(node);
        }
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `(neighbor, weight)` pairs for `node` from the derived adjacency
    /// view.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, u32)] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Freeze the adjacency view and labels for a pathfinding run.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            adjacency: self.adjacency.clone(),
            labels: self.nodes.iter().map(|node| node.label.clone()).collect(),
        }
    }

    /// Topmost node whose center lies within `radius` of `point`.
    ///
    /// Topmost means last-inserted, matching the visual stacking order, so
    /// the scan runs from the highest id down.
    pub fn find_node_at(&self, point: Point2D<f32>, radius: f32) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| hit::within_radius(point, node.position, radius))
            .map(|(id, _)| id)
    }

    /// First edge (in insertion order) whose segment passes within
    /// `threshold` of `point`.
    pub fn find_edge_at(&self, point: Point2D<f32>, threshold: f32) -> Option<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .find(|(_, edge)| {
                let from = self.nodes[edge.a].position;
                let to = self.nodes[edge.b].position;
                hit::near_segment(point, from, to, threshold)
            })
            .map(|(id, _)| id)
    }

    fn rebuild_adjacency(&mut self) {
        self.adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            self.adjacency[edge.a].push((edge.b, edge.weight));
            self.adjacency[edge.b].push((edge.a, edge.weight));
        }
    }
}

/// Spreadsheet-style label for the nth auto-created node: A..Z, then AA,
/// AB, … The original raw-ASCII scheme walked past `Z` into punctuation;
/// bijective base-26 extends instead.
fn auto_label(mut n: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    out.into_iter().rev().collect()
}
