/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Bulk example-graph generation.
//!
//! Produces the demo graph a user can load instead of drawing one by
//! hand: a fixed number of nodes at random positions inside the canvas
//! margin, each unordered pair connected with a fixed probability, edge
//! weight derived from euclidean distance. The random source is injected
//! so test fixtures can seed it.

use euclid::default::{Point2D, Size2D};
use rand::Rng;

use crate::graph::GraphStore;

/// Nodes in a generated example graph.
pub const EXAMPLE_NODE_COUNT: usize = 10;

/// Independent probability of an edge between each unordered pair.
pub const EXAMPLE_EDGE_PROBABILITY: f64 = 0.3;

/// Nodes are placed at least this far from the canvas border.
const PLACEMENT_MARGIN: f32 = 50.0;

/// Replace the store's contents with a generated example graph.
///
/// Start becomes node 0 and end the last node. Edge weight is
/// `floor(distance / 10) + 1`, so longer edges cost more.
pub fn populate_example<R: Rng>(store: &mut GraphStore, rng: &mut R, canvas: Size2D<f32>) {
    store.clear();

    let span_x = (canvas.width - 2.0 * PLACEMENT_MARGIN).max(1.0);
    let span_y = (canvas.height - 2.0 * PLACEMENT_MARGIN).max(1.0);
    for _ in 0..EXAMPLE_NODE_COUNT {
        let x = PLACEMENT_MARGIN + rng.gen::<f32>() * span_x;
        let y = PLACEMENT_MARGIN + rng.gen::<f32>() * span_y;
        store.add_node(Point2D::new(x, y));
    }

    for a in 0..EXAMPLE_NODE_COUNT {
        for b in (a + 1)..EXAMPLE_NODE_COUNT {
            if rng.gen::<f64>() < EXAMPLE_EDGE_PROBABILITY {
                let weight = edge_weight_for_distance(distance_between(store, a, b));
                // Fresh store and a < b: connect cannot fail here.
                let _ = store.connect(a, b, weight);
            }
        }
    }

    store.set_start(0);
    store.set_end(EXAMPLE_NODE_COUNT - 1);
}

fn distance_between(store: &GraphStore, a: usize, b: usize) -> f32 {
    match (store.node(a), store.node(b)) {
        (Some(from), Some(to)) => (to.position - from.position).length(),
        _ => 0.0,
    }
}

/// `floor(distance / 10) + 1`: always a positive integer.
fn edge_weight_for_distance(distance: f32) -> u32 {
    (distance / 10.0).floor() as u32 + 1
}
