//! C3 — Stability Scorer.
//!
//! Scores how safely an upper layer rests on a base layer. Mirrors
//! `original_source/pallet_engine.py::calculate_layer_stability_score` and
//! `is_box_laterally_supported`.

use crate::model::{Layer, Placement};

const COLUMN_OVERLAP_THRESHOLD: f64 = 0.90;
const MIN_LATERAL_NEIGHBORS: usize = 3;
const EDGE_TOLERANCE: i64 = 1;

/// True when `v` touches `u`'s opposite edge on one axis (within
/// `EDGE_TOLERANCE`) and their extents overlap strictly on the other axis.
/// Checked both ways (vertical neighbor, horizontal neighbor).
fn is_neighbor(u: &Placement, v: &Placement) -> bool {
    let vertical_touch = (i64::from(u.top()) - i64::from(v.y)).abs() < EDGE_TOLERANCE
        || (i64::from(u.y) - i64::from(v.top())).abs() < EDGE_TOLERANCE;
    if vertical_touch && u.x < v.right() && u.right() > v.x {
        return true;
    }
    let horizontal_touch = (i64::from(u.x) - i64::from(v.right())).abs() < EDGE_TOLERANCE
        || (i64::from(u.right()) - i64::from(v.x)).abs() < EDGE_TOLERANCE;
    horizontal_touch && u.y < v.top() && u.top() > v.y
}

/// Whether `target` is flanked by at least `MIN_LATERAL_NEIGHBORS` other
/// boxes in the same layer.
fn is_laterally_supported(target: &Placement, layer: &Layer) -> bool {
    let count = layer
        .iter()
        .filter(|other| other.id != target.id && is_neighbor(target, other))
        .count();
    count >= MIN_LATERAL_NEIGHBORS
}

/// Computes the §4.3 stability score for `upper` resting on `base`.
/// Returns negative infinity when `upper` is empty.
pub fn score(base: &Layer, upper: &Layer) -> f64 {
    if upper.is_empty() {
        return f64::NEG_INFINITY;
    }

    let mut unstable_columns = 0u32;
    let mut support_ratio_sum = 0.0f64;

    for u in upper.iter() {
        let area = u.area() as f64;
        if area == 0.0 {
            continue;
        }

        let mut supported_area = 0u64;
        let mut is_column = false;
        for b in base.iter() {
            let overlap = u.overlap_area(b);
            if overlap as f64 / area > COLUMN_OVERLAP_THRESHOLD {
                is_column = true;
            }
            supported_area += overlap;
        }

        if is_column && !is_laterally_supported(u, upper) {
            unstable_columns += 1;
        }

        // Defensive clamp (§9 open question): the base layer must not
        // contain overlapping boxes, so this should never exceed 1.
        let ratio = (supported_area as f64 / area).clamp(0.0, 1.0);
        support_ratio_sum += ratio;
    }

    let count = upper.box_count() as f64;
    1000.0 * count - 500.0 * unstable_columns as f64 + 100.0 * (support_ratio_sum / count)
}
