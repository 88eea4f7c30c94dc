/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Steppable single-source single-target Dijkstra.
//!
//! The engine walks the standard algorithm one `step()` at a time so a
//! host can animate it: each step visits exactly one node and relaxes its
//! unvisited neighbors. It operates on a [`GraphSnapshot`] frozen at
//! `init` time, never on the live store, so graph edits made mid-run are
//! invisible to it.
//!
//! Phase machine: `Uninitialized → Ready → Stepping → {Completed |
//! Unreachable}`. Terminal phases are absorbing; stepping there is a
//! no-op.

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::graph::{GraphSnapshot, NodeId};

/// Tentative distance from the start node. `Infinite` is the unreached
/// sentinel; the derived ordering makes every finite value compare below
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    /// Add an edge weight. Infinity absorbs.
    fn plus(self, weight: u32) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d + u64::from(weight)),
            Distance::Infinite => Distance::Infinite,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run state; `init` has not been called (or `reset` discarded it).
    Uninitialized,

    /// Initialized, no step taken yet.
    Ready,

    /// At least one step taken, not yet terminal.
    Stepping,

    /// Target reached; `path()` holds the start→end sequence.
    Completed,

    /// No path exists from start to end; `path()` is empty.
    Unreachable,
}

/// What a single `step()` did. Only `Visited` means more work remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Visited `node` and relaxed its unvisited neighbors.
    Visited { node: NodeId },

    /// Visited the target; the run is complete with this distance.
    TargetReached { distance: u64 },

    /// Every remaining unvisited node is unreachable.
    NoPathRemains,

    /// The unvisited set emptied without reaching the target.
    Exhausted,

    /// Step called in a terminal (or uninitialized) phase; nothing
    /// changed.
    Idle,
}

impl StepOutcome {
    /// True while the run should keep stepping.
    pub fn more_work(self) -> bool {
        matches!(self, StepOutcome::Visited { .. })
    }
}

/// Steppable Dijkstra run over a frozen graph snapshot.
#[derive(Debug, Default)]
pub struct PathfindingEngine {
    snapshot: Option<GraphSnapshot>,
    start: NodeId,
    end: NodeId,
    phase: Phase,

    distances: Vec<Distance>,
    previous: Vec<Option<NodeId>>,
    visited: HashSet<NodeId>,

    /// Unvisited node ids in insertion order (ascending id). Minimum
    /// selection scans this in order with a strict `<`, so ties go to the
    /// first-inserted candidate — the same visit order the insertion-order
    /// set of the reference behavior produces.
    unvisited: Vec<NodeId>,

    current: Option<NodeId>,
    path: Vec<NodeId>,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Uninitialized
    }
}

impl PathfindingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run from `start` to `end` over `snapshot`.
    ///
    /// Every distance starts at infinity except `start` at zero; all nodes
    /// are unvisited. Phase becomes `Ready`.
    pub fn init(&mut self, snapshot: GraphSnapshot, start: NodeId, end: NodeId) {
        let count = snapshot.node_count();
        debug_assert!(start < count && end < count);

        self.distances = vec![Distance::Infinite; count];
        self.distances[start] = Distance::Finite(0);
        self.previous = vec![None; count];
        self.visited = HashSet::new();
        self.unvisited = (0..count).collect();
        self.current = None;
        self.path = Vec::new();
        self.start = start;
        self.end = end;
        self.snapshot = Some(snapshot);
        self.phase = Phase::Ready;
        debug!("dijkstra initialized: {count} nodes, start {start}, end {end}");
    }

    /// Discard all run state and return to `Uninitialized`. The snapshot
    /// is dropped; a fresh one is taken on the next `init`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the algorithm by one visited node.
    ///
    /// Terminal and uninitialized phases are no-ops returning
    /// [`StepOutcome::Idle`].
    pub fn step(&mut self) -> StepOutcome {
        match self.phase {
            Phase::Uninitialized => {
                warn!("step() before init()");
                return StepOutcome::Idle;
            },
            Phase::Completed | Phase::Unreachable => return StepOutcome::Idle,
            Phase::Ready | Phase::Stepping => {},
        }
        self.phase = Phase::Stepping;

        if self.unvisited.is_empty() {
            self.finalize_path();
            return StepOutcome::Exhausted;
        }

        // Unvisited node with the minimum tentative distance; strict `<`
        // keeps the first-encountered candidate on ties.
        let mut min = Distance::Infinite;
        let mut min_node = None;
        for &node in &self.unvisited {
            if self.distances[node] < min {
                min = self.distances[node];
                min_node = Some(node);
            }
        }

        let Some(node) = min_node else {
            // Minimum is infinite: nothing left is reachable.
            self.finalize_path();
            return StepOutcome::NoPathRemains;
        };

        self.current = Some(node);
        self.unvisited.retain(|&candidate| candidate != node);
        self.visited.insert(node);

        if node == self.end {
            self.finalize_path();
            let distance = match self.distances[node] {
                Distance::Finite(d) => d,
                // The selected minimum was finite by construction.
                Distance::Infinite => 0,
            };
            return StepOutcome::TargetReached { distance };
        }

        if let Some(snapshot) = &self.snapshot {
            for &(neighbor, weight) in snapshot.neighbors(node) {
                if self.visited.contains(&neighbor) {
                    continue;
                }
                let candidate = self.distances[node].plus(weight);
                if candidate < self.distances[neighbor] {
                    self.distances[neighbor] = candidate;
                    self.previous[neighbor] = Some(node);
                }
            }
        }

        StepOutcome::Visited { node }
    }

    /// Walk the predecessor links backward from `end` and publish the
    /// result.
    ///
    /// The path is valid (ordered start→end) only when the walk terminates
    /// at `start`; otherwise it is cleared and the phase becomes
    /// `Unreachable`. Idempotent; callable from either termination branch
    /// of `step()`.
    pub fn finalize_path(&mut self) {
        let mut walk = Vec::new();
        let mut cursor = Some(self.end);
        while let Some(node) = cursor {
            walk.push(node);
            cursor = self.previous.get(node).copied().flatten();
        }
        walk.reverse();

        if walk.first() == Some(&self.start) {
            self.path = walk;
            self.phase = Phase::Completed;
        } else {
            self.path = Vec::new();
            self.phase = Phase::Unreachable;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Completed | Phase::Unreachable)
    }

    /// Tentative distance for `node`, or `None` before `init`.
    pub fn distance(&self, node: NodeId) -> Option<Distance> {
        self.distances.get(node).copied()
    }

    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    pub fn visited(&self) -> &HashSet<NodeId> {
        &self.visited
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Final start→end sequence; empty unless the phase is `Completed`.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// The frozen snapshot backing the current run, for label lookups.
    pub fn snapshot(&self) -> Option<&GraphSnapshot> {
        self.snapshot.as_ref()
    }
}
