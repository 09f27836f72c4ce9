//! C5 — Template Formatter.
//!
//! Turns a pair of compacted layers plus a stability score into the
//! ordered, label-annotated `Template` that ships in a bundle. Mirrors
//! `original_source/pallet_engine.py::format_layer_for_json` and
//! `determine_label_face`.

use crate::model::{Placement, PlacementRecord, Template};

const EDGE_TOLERANCE: i64 = 1;

/// Which of a box's four side faces is accessible — neither touching
/// another box in the same layer nor the pallet's outer boundary. Checked
/// in priority order 1 (bottom, toward `y=0`), 2 (right, toward `x=L`), 3
/// (top), 4 (left), returning the first clear one. Falls back to face `1`
/// when all four are blocked — matching the original's silent "first
/// true, else 1" behavior (§9 open question).
fn label_face(target: &Placement, layer: &[Placement], pallet_l: u32, pallet_w: u32) -> u8 {
    let blocked_on = |check: &dyn Fn(&Placement) -> bool| -> bool {
        layer.iter().any(|other| {
            if std::ptr::eq(other, target) {
                return false;
            }
            check(other)
        })
    };

    // Face 1: bottom, toward y=0. Blocked by a neighbor immediately below
    // sharing x-extent, or by sitting on the pallet's own y=0 edge.
    let face1_blocked = target.y < EDGE_TOLERANCE as u32
        || blocked_on(&|o| {
            (i64::from(o.top()) - i64::from(target.y)).abs() < EDGE_TOLERANCE
                && o.x < target.right()
                && o.right() > target.x
        });
    if !face1_blocked {
        return 1;
    }

    // Face 2: right, toward x=L.
    let face2_blocked = (i64::from(pallet_l) - i64::from(target.right())).abs() < EDGE_TOLERANCE
        || blocked_on(&|o| {
            (i64::from(o.x) - i64::from(target.right())).abs() < EDGE_TOLERANCE
                && o.y < target.top()
                && o.top() > target.y
        });
    if !face2_blocked {
        return 2;
    }

    // Face 3: top, symmetric to face 1.
    let face3_blocked = (i64::from(pallet_w) - i64::from(target.top())).abs() < EDGE_TOLERANCE
        || blocked_on(&|o| {
            (i64::from(o.y) - i64::from(target.top())).abs() < EDGE_TOLERANCE
                && o.x < target.right()
                && o.right() > target.x
        });
    if !face3_blocked {
        return 3;
    }

    // Face 4: left, symmetric to face 2.
    let face4_blocked = target.x < EDGE_TOLERANCE as u32
        || blocked_on(&|o| {
            (i64::from(o.right()) - i64::from(target.x)).abs() < EDGE_TOLERANCE
                && o.y < target.top()
                && o.top() > target.y
        });
    if !face4_blocked {
        return 4;
    }

    1
}

/// Produces the ordered, label-annotated records for one layer: placement
/// order follows ascending `(y, x)`, matching `format_layer_for_json`.
fn format_layer(layer: &crate::model::Layer, pallet_l: u32, pallet_w: u32) -> Vec<PlacementRecord> {
    let mut boxes: Vec<&Placement> = layer.iter().collect();
    boxes.sort_by_key(|p| (p.y, p.x));

    boxes
        .iter()
        .enumerate()
        .map(|(i, &p)| PlacementRecord {
            placement_order: (i + 1) as u32,
            x: p.x,
            y: p.y,
            width: p.bw,
            height: p.bh,
            rotation: p.rotation.degrees(),
            label_face: label_face(p, &layer.0, pallet_l, pallet_w),
        })
        .collect()
}

/// Builds the emitted `Template` for a pair of compacted layers and their
/// stability score.
pub fn build_template(
    layer1: &crate::model::Layer,
    layer2: &crate::model::Layer,
    score: f64,
    pallet_l: u32,
    pallet_w: u32,
) -> Template {
    Template {
        score,
        layer1_box_count: layer1.box_count(),
        layer2_box_count: layer2.box_count(),
        layer1: format_layer(layer1, pallet_l, pallet_w),
        layer2: format_layer(layer2, pallet_l, pallet_w),
    }
}
