//! C2 — Gravity Compactor.
//!
//! Translates every placement toward the `y = 0` edge, then toward the
//! `x = 0` edge, until it rests against another box or a wall. Mirrors
//! `original_source/pallet_engine.py::compact_layer` line for line in
//! structure, expressed with `sort_by_key` sweeps instead of index-sorted
//! loops.

use crate::model::Layer;

/// Compacts `layer` in place and returns it, for ergonomic chaining
/// (`solve_layer(..)?.compact()`).
pub fn compact(mut layer: Layer) -> Layer {
    compact_in_place(&mut layer);
    layer
}

fn compact_in_place(layer: &mut Layer) {
    if layer.is_empty() {
        return;
    }

    // Vertical sweep: ascending y, each box drops onto the highest box
    // beneath it that shares horizontal extent, or the floor.
    let mut order: Vec<usize> = (0..layer.0.len()).collect();
    order.sort_by_key(|&i| layer.0[i].y);
    for pass in 0..order.len() {
        let i = order[pass];
        let (x, bw) = (layer.0[i].x, layer.0[i].bw);
        let mut support = 0u32;
        for &j in &order[..pass] {
            let other = layer.0[j];
            if x < other.x + other.bw && x + bw > other.x {
                support = support.max(other.y + other.bh);
            }
        }
        layer.0[i].y = support;
    }

    // Horizontal sweep: same procedure with axes transposed.
    order.sort_by_key(|&i| layer.0[i].x);
    for pass in 0..order.len() {
        let i = order[pass];
        let (y, bh) = (layer.0[i].y, layer.0[i].bh);
        let mut support = 0u32;
        for &j in &order[..pass] {
            let other = layer.0[j];
            if y < other.y + other.bh && y + bh > other.y {
                support = support.max(other.x + other.bw);
            }
        }
        layer.0[i].x = support;
    }
}
