/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Hit-testing geometry for pointer dispatch.
//!
//! Nodes are circles around their center; edges are line segments tested
//! by point-to-segment distance, clipped to the segment's bounding extent
//! with a threshold margin so clicks past the endpoints don't register.

use euclid::default::Point2D;

/// Whether `point` lies within `radius` of `center`.
pub fn within_radius(point: Point2D<f32>, center: Point2D<f32>, radius: f32) -> bool {
    (point - center).square_length() <= radius * radius
}

/// Whether `point` lies within `threshold` of the segment `from`-`to`.
///
/// Projects the point onto the segment, clamping the projection parameter
/// to `[0, 1]`. A zero-length segment has no defined projection; the
/// distance to the (coincident) endpoints is used instead. A final
/// bounding-extent check (expanded by `threshold`) rejects hits that are
/// close to the infinite line but past the segment's span.
pub fn near_segment(
    point: Point2D<f32>,
    from: Point2D<f32>,
    to: Point2D<f32>,
    threshold: f32,
) -> bool {
    let to_point = point - from;
    let span = to - from;
    let len_sq = span.square_length();

    let closest = if len_sq == 0.0 {
        from
    } else {
        let param = (to_point.dot(span) / len_sq).clamp(0.0, 1.0);
        from + span * param
    };

    if (point - closest).square_length() > threshold * threshold {
        return false;
    }

    let min_x = from.x.min(to.x) - threshold;
    let max_x = from.x.max(to.x) + threshold;
    let min_y = from.y.min(to.y) - threshold;
    let max_y = from.y.max(to.y) + threshold;
    point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
}
