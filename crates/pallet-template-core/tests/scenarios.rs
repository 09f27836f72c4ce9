use std::time::Duration;

use pallet_template_core::prelude::{compact, score};
use pallet_template_core::{generate, BoxDims, EngineConfig, PalletDims, Placement, Rotation};

fn p(id: u32, x: u32, y: u32, bw: u32, bh: u32) -> Placement {
    Placement {
        id,
        x,
        y,
        bw,
        bh,
        rotation: Rotation::Deg0,
    }
}

fn fast_cfg(num_solutions: usize, seed: u64) -> EngineConfig {
    EngineConfig::builder()
        .num_solutions(num_solutions)
        .workers(2)
        .seed(Some(seed))
        .base_time_limit(Duration::from_millis(200))
        .upper_time_limit(Duration::from_millis(150))
        .diversification_attempts_factor(5)
        .build()
}

/// S1: a single box exactly covering a single-box pallet is fully
/// supported and scores exactly 1100 (1000*1 - 500*0 + 100*1).
#[test]
fn s1_single_fully_supported_box_scores_1100() {
    let base = pallet_template_core::Layer(vec![p(0, 0, 0, 100, 100)]);
    let upper = pallet_template_core::Layer(vec![p(0, 0, 0, 100, 100)]);
    assert!((score(&base, &upper) - 1100.0).abs() < 1e-9);
}

/// S2: two upper boxes each a column over its own base box, with no
/// lateral neighbors, both count as unstable.
#[test]
fn s2_two_isolated_columns_are_both_penalized() {
    let base = pallet_template_core::Layer(vec![p(0, 0, 0, 100, 100), p(1, 100, 0, 100, 100)]);
    let upper = pallet_template_core::Layer(vec![p(0, 0, 0, 100, 100), p(1, 100, 0, 100, 100)]);
    assert!((score(&base, &upper) - 1100.0).abs() < 1e-9);
}

/// S3: `L×W=300×200`, `l×w=100×100`, `num_solutions=3` — a 3x2 grid of
/// non-overlapping 100x100 boxes fits the pallet exactly, so every
/// returned template's base layer must contain exactly 6 boxes. Between 1
/// and 3 templates come back, non-increasing by score, with pairwise
/// distinct upper-layer signatures.
#[test]
fn s3_easy_grid_pallet_always_fills_six_base_boxes() {
    let pallet = PalletDims::new(300, 200);
    let box_dims = BoxDims::new(100, 100, 1);
    let bundle = generate(pallet, box_dims, &fast_cfg(3, 11)).unwrap();

    assert!(bundle.templates.len() >= 1 && bundle.templates.len() <= 3);
    for template in &bundle.templates {
        assert_eq!(template.layer1_box_count, 6);
    }
    for pair in bundle.templates.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let mut signatures: Vec<Vec<(u32, u32, u32, u32)>> = bundle
        .templates
        .iter()
        .map(|t| {
            let mut sig: Vec<(u32, u32, u32, u32)> =
                t.layer2.iter().map(|r| (r.x, r.y, r.width, r.height)).collect();
            sig.sort_unstable();
            sig
        })
        .collect();
    let before = signatures.len();
    signatures.sort();
    signatures.dedup();
    assert_eq!(signatures.len(), before, "upper-layer signatures must be pairwise distinct");
}

/// S4 (covered by generator_properties.rs): diversification never yields
/// duplicate upper-layer geometries within one bundle.

/// S5: every template's layers independently satisfy the packing
/// invariants (no overlap, footprint matches box dims up to rotation,
/// fully inside the pallet).
#[test]
fn s5_every_template_layer_is_internally_consistent() {
    let pallet = PalletDims::new(500, 500);
    let box_dims = BoxDims::new(120, 90, 1);
    let bundle = generate(pallet, box_dims, &fast_cfg(3, 22)).unwrap();
    for template in &bundle.templates {
        for layer in [&template.layer1, &template.layer2] {
            for a in layer.iter() {
                assert!(a.x + a.width <= pallet.l);
                assert!(a.y + a.height <= pallet.w);
            }
            for i in 0..layer.len() {
                for j in (i + 1)..layer.len() {
                    let (ax, ay, aw, ah) = (layer[i].x, layer[i].y, layer[i].width, layer[i].height);
                    let (bx, by, bw, bh) = (layer[j].x, layer[j].y, layer[j].width, layer[j].height);
                    let overlap = ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah;
                    assert!(!overlap, "layers must not contain overlapping boxes");
                }
            }
        }
    }
}

/// S6: compaction settles a loosely scattered layer without changing its
/// box count or introducing overlaps, mirroring a generator-internal step.
#[test]
fn s6_compaction_settles_a_scattered_layer_safely() {
    let scattered = pallet_template_core::Layer(vec![
        p(0, 0, 80, 50, 50),
        p(1, 60, 120, 50, 50),
        p(2, 120, 40, 50, 50),
    ]);
    let settled = compact(scattered);
    assert_eq!(settled.box_count(), 3);
    let boxes: Vec<_> = settled.iter().collect();
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            assert!(!boxes[i].overlaps(boxes[j]));
        }
    }
}
