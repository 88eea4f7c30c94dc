/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application state for the shortest-path visualizer.
//!
//! `PathLabApp` is the owned context object: it holds the store, editor
//! and run controller (no module-level globals), gates editing by mode,
//! enforces the run-mode preconditions, and turns engine step outcomes
//! into user-facing status text. Hosts drive it from their event loop and
//! read [`PathLabApp::scene`] after every mutation or step.

use euclid::default::{Point2D, Size2D};
use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::dijkstra::StepOutcome;
use crate::editor::{EditRequest, EditorController, Tool};
use crate::generate;
use crate::graph::{EdgeId, GraphError, GraphStore, NodeId};
use crate::run::{RunController, Scheduler, TimerToken};
use crate::scene::Scene;

/// Top-level interaction mode. Editing happens in `Create`; the algorithm
/// runs in `Run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Run,
}

/// Why a switch into run mode was rejected. Surfaced to the user; the
/// mode is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeSwitchError {
    #[error("create at least 2 nodes before running the algorithm ({count} so far)")]
    NotEnoughNodes { count: usize },

    #[error("set start and end nodes before running the algorithm")]
    EndpointsUnset,
}

const STATUS_NOT_STARTED: &str = "Algorithm not started";

/// Owns the whole visualizer state and mediates every mutation.
#[derive(Debug, Default)]
pub struct PathLabApp {
    store: GraphStore,
    editor: EditorController,
    run: RunController,
    mode: Mode,

    /// Current algorithm status line shown by the host.
    status: String,
}

impl PathLabApp {
    pub fn new() -> Self {
        Self {
            store: GraphStore::new(),
            editor: EditorController::new(),
            run: RunController::new(),
            mode: Mode::Create,
            status: STATUS_NOT_STARTED.to_string(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn editor(&self) -> &EditorController {
        &self.editor
    }

    pub fn run(&self) -> &RunController {
        &self.run
    }

    /// Status line for the host's "current step" text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Guidance line for the active tool (create mode) or run mode.
    pub fn instruction(&self) -> &'static str {
        match self.mode {
            Mode::Create => self.editor.instruction(),
            Mode::Run => "Use the run controls to step the algorithm",
        }
    }

    /// Switch interaction mode. Entering run mode requires at least two
    /// nodes and both endpoints set. Any switch resets an in-progress
    /// run.
    pub fn set_mode(
        &mut self,
        mode: Mode,
        scheduler: &mut dyn Scheduler,
    ) -> Result<(), ModeSwitchError> {
        if mode == Mode::Run {
            let count = self.store.node_count();
            if count < 2 {
                return Err(ModeSwitchError::NotEnoughNodes { count });
            }
            if self.store.start().is_none() || self.store.end().is_none() {
                return Err(ModeSwitchError::EndpointsUnset);
            }
        }
        self.mode = mode;
        self.reset_run(scheduler);
        debug!("mode switched to {mode:?}");
        Ok(())
    }

    // --- create-mode editing -------------------------------------------

    pub fn set_tool(&mut self, tool: Tool) {
        self.editor.set_tool(tool);
    }

    pub fn set_edge_weight_input(&mut self, weight: u32) {
        self.editor.set_edge_weight_input(weight);
    }

    /// Pointer-down on the canvas. Ignored outside create mode.
    pub fn pointer_down(&mut self, point: Point2D<f32>) -> Option<EditRequest> {
        if self.mode != Mode::Create {
            return None;
        }
        self.editor.pointer_down(&mut self.store, point)
    }

    pub fn pointer_move(&mut self, point: Point2D<f32>) {
        if self.mode == Mode::Create {
            self.editor.pointer_move(&mut self.store, point);
        }
    }

    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    /// Apply the host modal's label edit for an [`EditRequest::NodeLabel`].
    pub fn apply_label_edit(&mut self, node: NodeId, label: &str) -> Result<(), GraphError> {
        self.store.set_node_label(node, label)
    }

    /// Apply the host modal's weight edit for an
    /// [`EditRequest::EdgeWeight`].
    pub fn apply_weight_edit(&mut self, edge: EdgeId, weight: u32) -> Result<(), GraphError> {
        self.store.set_edge_weight(edge, weight)
    }

    /// Empty the graph entirely. Also discards any run state.
    pub fn clear_graph(&mut self, scheduler: &mut dyn Scheduler) {
        self.store.clear();
        self.reset_run(scheduler);
    }

    /// Replace the graph with a generated example.
    pub fn load_example<R: Rng>(
        &mut self,
        rng: &mut R,
        canvas: Size2D<f32>,
        scheduler: &mut dyn Scheduler,
    ) {
        generate::populate_example(&mut self.store, rng, canvas);
        self.reset_run(scheduler);
    }

    // --- run lifecycle -------------------------------------------------

    /// Start (or restart) the algorithm run. Valid only in run mode,
    /// whose entry guard already ensured the preconditions.
    pub fn start_run(&mut self, scheduler: &mut dyn Scheduler) -> Result<(), ModeSwitchError> {
        let count = self.store.node_count();
        if count < 2 {
            return Err(ModeSwitchError::NotEnoughNodes { count });
        }
        let (Some(start), Some(end)) = (self.store.start(), self.store.end()) else {
            return Err(ModeSwitchError::EndpointsUnset);
        };

        let outcome = self
            .run
            .start(self.store.snapshot(), start, end, scheduler);
        self.apply_outcome(outcome);
        Ok(())
    }

    /// Host relay for a fired scheduler timer.
    pub fn on_timer(&mut self, token: TimerToken, scheduler: &mut dyn Scheduler) {
        if let Some(outcome) = self.run.on_timer(token, scheduler) {
            self.apply_outcome(outcome);
        }
    }

    pub fn pause_run(&mut self) {
        self.run.pause();
    }

    pub fn resume_run(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(outcome) = self.run.resume(scheduler) {
            self.apply_outcome(outcome);
        }
    }

    pub fn reset_run(&mut self, scheduler: &mut dyn Scheduler) {
        self.run.reset(scheduler);
        self.status = STATUS_NOT_STARTED.to_string();
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.run.set_speed(speed);
    }

    /// Current renderable frame.
    pub fn scene(&self) -> Scene {
        Scene::project(&self.store, self.run.engine())
    }

    fn apply_outcome(&mut self, outcome: StepOutcome) {
        let engine = self.run.engine();
        self.status = match outcome {
            StepOutcome::Visited { node } => {
                let label = engine
                    .snapshot()
                    .map(|snapshot| snapshot.label(node).to_string())
                    .unwrap_or_else(|| node.to_string());
                format!("Visiting node {label}. Updated distances to neighbors.")
            },
            StepOutcome::TargetReached { distance } => {
                format!("End node reached! Path found with distance: {distance}")
            },
            StepOutcome::NoPathRemains => "No path exists to remaining nodes.".to_string(),
            StepOutcome::Exhausted => {
                "No path exists between start and end nodes.".to_string()
            },
            StepOutcome::Idle => return,
        };
    }
}
