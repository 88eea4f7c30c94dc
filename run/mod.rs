/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Run lifecycle: drives the pathfinding engine over an external timer.
//!
//! The controller never owns a clock. The host supplies a [`Scheduler`]
//! (a wall-clock timer on desktop, a fake in tests); the controller asks
//! it to fire once after a delay and reacts in [`RunController::on_timer`]
//! when the host relays the callback. Single-threaded and cooperative:
//! nothing here runs concurrently with anything else.

use std::time::Duration;

use log::{debug, warn};

use crate::dijkstra::{PathfindingEngine, StepOutcome};
use crate::graph::{GraphSnapshot, NodeId};

/// Handle for one scheduled callback. Tokens are allocated by the
/// scheduler and never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(raw: u64) -> Self {
        TimerToken(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Delayed single-shot callback source supplied by the host.
///
/// `cancel` must be idempotent: canceling a token that already fired or
/// was already canceled is a no-op, never an error.
pub trait Scheduler {
    /// Arrange for the host to call [`RunController::on_timer`] with the
    /// returned token after `delay`.
    fn schedule_after(&mut self, delay: Duration) -> TimerToken;

    fn cancel(&mut self, token: TimerToken);
}

/// Default inter-step delay (speed 2 on the host slider).
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// Wraps [`PathfindingEngine`] with a pausable, resettable stepping loop.
#[derive(Debug, Default)]
pub struct RunController {
    engine: PathfindingEngine,

    /// Token of the one outstanding scheduled step, if any. Stale tokens
    /// relayed after a reset/restart are ignored by comparison against
    /// this.
    pending: Option<TimerToken>,

    running: bool,
    paused: bool,
    delay: Duration,
}

impl RunController {
    pub fn new() -> Self {
        Self {
            engine: PathfindingEngine::new(),
            pending: None,
            running: false,
            paused: false,
            delay: DEFAULT_STEP_DELAY,
        }
    }

    /// Begin a run. If one is already in progress this performs an
    /// implicit reset first, so a restart never double-schedules.
    ///
    /// Takes one step immediately, then schedules the next.
    pub fn start(
        &mut self,
        snapshot: GraphSnapshot,
        start: NodeId,
        end: NodeId,
        scheduler: &mut dyn Scheduler,
    ) -> StepOutcome {
        if self.running || self.pending.is_some() {
            debug!("start() while running: implicit reset");
            self.reset(scheduler);
        }

        self.engine.init(snapshot, start, end);
        self.running = true;
        self.paused = false;
        self.step_and_schedule(scheduler)
    }

    /// Host relay for a fired timer. Stale tokens (from before a reset or
    /// restart) are ignored. While paused the fired timer is consumed
    /// without stepping; `resume` re-enters the loop.
    pub fn on_timer(
        &mut self,
        token: TimerToken,
        scheduler: &mut dyn Scheduler,
    ) -> Option<StepOutcome> {
        if self.pending != Some(token) {
            debug!("ignoring stale timer token {}", token.raw());
            return None;
        }
        self.pending = None;

        if self.paused {
            return None;
        }
        Some(self.step_and_schedule(scheduler))
    }

    /// Suspend stepping. The outstanding timer is left to fire and be
    /// consumed; the pause flag is what stops the loop.
    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    /// Re-enter the stepping loop after a pause. Does not re-run `init`:
    /// the run continues from where it stopped. Any still-outstanding
    /// timer is canceled first so the loop is never entered twice.
    pub fn resume(&mut self, scheduler: &mut dyn Scheduler) -> Option<StepOutcome> {
        if !self.running || !self.paused {
            return None;
        }
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
        self.paused = false;
        Some(self.step_and_schedule(scheduler))
    }

    /// Cancel any pending step and discard all run state. The graph is
    /// untouched.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
        self.running = false;
        self.paused = false;
        self.engine.reset();
    }

    /// Derive the inter-step delay from the user-facing speed value:
    /// `delay = 1000ms / speed`.
    pub fn set_speed(&mut self, speed: f64) {
        if !(speed > 0.0) {
            warn!("ignoring non-positive speed {speed}");
            return;
        }
        self.delay = Duration::from_secs_f64(1.0 / speed);
    }

    pub fn step_delay(&self) -> Duration {
        self.delay
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Read-only view of the engine for scene projection and status text.
    pub fn engine(&self) -> &PathfindingEngine {
        &self.engine
    }

    fn step_and_schedule(&mut self, scheduler: &mut dyn Scheduler) -> StepOutcome {
        let outcome = self.engine.step();
        if outcome.more_work() {
            self.pending = Some(scheduler.schedule_after(self.delay));
        } else {
            self.running = false;
        }
        outcome
    }
}
