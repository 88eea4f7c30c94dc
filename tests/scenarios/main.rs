/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! End-to-end scenarios: build a graph through pointer events, switch
//! modes, and drive the algorithm through a fake scheduler the way a
//! host event loop would.

use std::time::Duration;

use euclid::default::{Point2D, Size2D};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pathlab::app::{Mode, ModeSwitchError, PathLabApp};
use pathlab::dijkstra::{Distance, Phase};
use pathlab::editor::Tool;
use pathlab::graph::GraphStore;
use pathlab::run::{Scheduler, TimerToken};
use pathlab::scene::NodePaint;

/// Queue-backed scheduler standing in for the host timer facility.
#[derive(Default)]
struct FakeScheduler {
    next_token: u64,
    queue: Vec<TimerToken>,
}

impl FakeScheduler {
    fn fire_next(&mut self) -> Option<TimerToken> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.remove(0))
        }
    }
}

impl Scheduler for FakeScheduler {
    fn schedule_after(&mut self, _delay: Duration) -> TimerToken {
        let token = TimerToken::new(self.next_token);
        self.next_token += 1;
        self.queue.push(token);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.queue.retain(|queued| *queued != token);
    }
}

fn p(x: f32, y: f32) -> Point2D<f32> {
    Point2D::new(x, y)
}

fn drain(app: &mut PathLabApp, scheduler: &mut FakeScheduler) {
    while let Some(token) = scheduler.fire_next() {
        app.on_timer(token, scheduler);
    }
}

/// Four-node diamond built entirely through pointer events: a cheap
/// A-B-D-C route against a costly direct A-D edge.
fn build_diamond(app: &mut PathLabApp) {
    app.set_tool(Tool::AddNode);
    for point in [p(100.0, 100.0), p(300.0, 100.0), p(100.0, 300.0), p(300.0, 300.0)] {
        app.pointer_down(point);
    }

    app.set_tool(Tool::Connect);
    for (from, to, weight) in [
        (p(100.0, 100.0), p(300.0, 100.0), 1u32),
        (p(300.0, 100.0), p(300.0, 300.0), 2),
        (p(100.0, 100.0), p(300.0, 300.0), 5),
        (p(300.0, 300.0), p(100.0, 300.0), 1),
    ] {
        app.set_edge_weight_input(weight);
        app.pointer_down(from);
        app.pointer_down(to);
    }

    app.set_tool(Tool::SetStart);
    app.pointer_down(p(100.0, 100.0));
    app.set_tool(Tool::SetEnd);
    app.pointer_down(p(100.0, 300.0));
}

#[test]
fn scenario_build_and_run_to_completion() {
    let mut app = PathLabApp::new();
    let mut scheduler = FakeScheduler::default();
    build_diamond(&mut app);

    app.set_mode(Mode::Run, &mut scheduler).unwrap();
    app.start_run(&mut scheduler).unwrap();
    drain(&mut app, &mut scheduler);

    assert_eq!(app.run().engine().phase(), Phase::Completed);
    // A -> B (1) -> D (2) -> C (1), total 4, beats the direct A-D of 5.
    assert_eq!(app.run().engine().path(), &[0, 1, 3, 2]);
    assert_eq!(app.run().engine().distance(2), Some(Distance::Finite(4)));
    assert_eq!(app.status(), "End node reached! Path found with distance: 4");

    let scene = app.scene();
    assert_eq!(scene.nodes[0].paint, NodePaint::Start);
    assert_eq!(scene.nodes[2].paint, NodePaint::End);
    assert_eq!(scene.nodes[1].paint, NodePaint::Path);
    assert_eq!(scene.nodes[3].paint, NodePaint::Path);
}

#[test]
fn scenario_delete_node_then_run_on_reindexed_graph() {
    let mut app = PathLabApp::new();
    let mut scheduler = FakeScheduler::default();
    build_diamond(&mut app);

    // Deleting B severs the cheap route. Removing node 1 renumbers C to
    // 1 and D to 2; only A-D (5) and D-C (1) survive.
    app.set_tool(Tool::Delete);
    app.pointer_down(p(300.0, 100.0));
    assert_eq!(app.store().node_count(), 3);
    assert_eq!(app.store().start(), Some(0));
    assert_eq!(app.store().end(), Some(1));

    app.set_mode(Mode::Run, &mut scheduler).unwrap();
    app.start_run(&mut scheduler).unwrap();
    drain(&mut app, &mut scheduler);

    assert_eq!(app.run().engine().phase(), Phase::Completed);
    assert_eq!(app.run().engine().path(), &[0, 2, 1]);
    assert_eq!(app.run().engine().distance(1), Some(Distance::Finite(6)));
}

#[test]
fn scenario_pause_resume_mid_run() {
    let mut app = PathLabApp::new();
    let mut scheduler = FakeScheduler::default();
    build_diamond(&mut app);
    app.set_mode(Mode::Run, &mut scheduler).unwrap();

    app.start_run(&mut scheduler).unwrap();
    app.pause_run();

    // Fired-while-paused timers are consumed without stepping.
    let visited_at_pause = app.run().engine().visited().len();
    drain(&mut app, &mut scheduler);
    assert_eq!(app.run().engine().visited().len(), visited_at_pause);
    assert_eq!(app.run().engine().phase(), Phase::Stepping);

    app.resume_run(&mut scheduler);
    drain(&mut app, &mut scheduler);
    assert_eq!(app.run().engine().phase(), Phase::Completed);
}

#[test]
fn scenario_reset_and_rerun_is_deterministic() {
    let mut app = PathLabApp::new();
    let mut scheduler = FakeScheduler::default();
    build_diamond(&mut app);
    app.set_mode(Mode::Run, &mut scheduler).unwrap();

    app.start_run(&mut scheduler).unwrap();
    drain(&mut app, &mut scheduler);
    let first_path = app.run().engine().path().to_vec();

    app.reset_run(&mut scheduler);
    assert_eq!(app.run().engine().phase(), Phase::Uninitialized);
    assert_eq!(app.status(), "Algorithm not started");

    app.start_run(&mut scheduler).unwrap();
    drain(&mut app, &mut scheduler);
    assert_eq!(app.run().engine().path(), first_path.as_slice());
}

#[test]
fn scenario_generated_example_always_runnable() {
    for seed in 0..8u64 {
        let mut app = PathLabApp::new();
        let mut scheduler = FakeScheduler::default();
        let mut rng = StdRng::seed_from_u64(seed);

        app.load_example(&mut rng, Size2D::new(800.0, 600.0), &mut scheduler);
        assert_eq!(app.store().node_count(), 10);

        app.set_mode(Mode::Run, &mut scheduler).unwrap();
        app.start_run(&mut scheduler).unwrap();
        drain(&mut app, &mut scheduler);

        // Sparse seeds may leave the end node unreachable; either way
        // the run must land in a terminal phase.
        assert!(app.run().engine().is_terminal(), "seed {seed} never terminated");
    }
}

#[test]
fn scenario_mode_guard_blocks_run_without_nodes() {
    let mut app = PathLabApp::new();
    let mut scheduler = FakeScheduler::default();

    assert_eq!(
        app.set_mode(Mode::Run, &mut scheduler),
        Err(ModeSwitchError::NotEnoughNodes { count: 0 })
    );
    assert_eq!(app.mode(), Mode::Create);
}

#[test]
fn scenario_drag_moves_node_without_breaking_edges() {
    let mut app = PathLabApp::new();
    build_diamond(&mut app);

    app.set_tool(Tool::Inspect);
    app.pointer_down(p(100.0, 100.0));
    app.pointer_move(p(150.0, 180.0));
    app.pointer_up();

    let node = app.store().node(0).unwrap();
    assert_eq!(node.position, p(150.0, 180.0));
    assert_eq!(app.store().edge_count(), 4);

    let scene = app.scene();
    let touching_a = scene
        .edges
        .iter()
        .filter(|edge| edge.from == (150.0, 180.0) || edge.to == (150.0, 180.0))
        .count();
    assert_eq!(touching_a, 2);
}

proptest! {
    /// Node ids stay dense and edges never dangle through arbitrary
    /// delete sequences over a generated graph.
    #[test]
    fn prop_delete_sequences_keep_store_consistent(
        seed in 0u64..256,
        deletions in proptest::collection::vec(0usize..10, 0..10),
    ) {
        let mut store = GraphStore::new();
        let mut rng = StdRng::seed_from_u64(seed);
        pathlab::generate::populate_example(&mut store, &mut rng, Size2D::new(800.0, 600.0));

        for raw in deletions {
            if store.node_count() == 0 {
                break;
            }
            let id = raw % store.node_count();
            store.delete_node(id);

            let count = store.node_count();
            for edge_id in 0..store.edge_count() {
                let edge = store.edge(edge_id).unwrap();
                prop_assert!(edge.a < count && edge.b < count);
            }
            if let Some(start) = store.start() {
                prop_assert!(start < count);
            }
            if let Some(end) = store.end() {
                prop_assert!(end < count);
            }
            let snapshot = store.snapshot();
            prop_assert_eq!(snapshot.node_count(), count);
        }
    }
}
