/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pathlab: interactive weighted-graph editing with a steppable Dijkstra
//! shortest-path engine.
//!
//! The crate is the headless core of a canvas visualizer. Rendering, DOM
//! widgets, and concrete timers live in host programs; this crate owns:
//!
//! - [`graph::GraphStore`]: node/edge collections with dense integer
//!   identities, a symmetric adjacency view, and hit-testing.
//! - [`editor::EditorController`]: tool/mode state machine that interprets
//!   pointer events against the store.
//! - [`dijkstra::PathfindingEngine`]: single-source single-target Dijkstra
//!   exposed one `step()` at a time.
//! - [`run::RunController`]: pause/resume/reset lifecycle driving the
//!   engine via an abstract, cancelable [`run::Scheduler`].
//! - [`scene`]: read-only projection of store + run state into
//!   serializable render packets.
//!
//! [`app::PathLabApp`] wires the pieces together and owns the mode-switch
//! guard and user-facing status text.

pub mod app;
pub mod dijkstra;
pub mod editor;
pub mod generate;
pub mod graph;
pub mod run;
pub mod scene;
