//! C4 — Template Generator.
//!
//! Orchestrates the base solve, gravity compaction, and a diversification
//! loop over randomized obstacles to produce a ranked bundle of two-layer
//! templates. Mirrors `original_source/pallet_engine.py::generate_pallet_solutions`.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::{debug, instrument, warn};

use crate::compactor::compact;
use crate::config::{EngineConfig, SolveRequest};
use crate::error::{EngineError, Result};
use crate::format::build_template;
use crate::model::{BoxDims, GenerationInfo, Obstacle, PalletDims, Template, TemplateBundle};
use crate::scorer::score as score_layers;
use crate::solver::solve_layer;

/// Draws a random obstacle for one diversification attempt: a 1x1 keep-out
/// cell sized to the *box*, not the pallet, matching the original's
/// `ox in [l // 4, l)`, `oy in [w // 4, w)` draw (`l`/`w` being the box
/// dimensions) — a narrow perturbation near one corner of the footprint,
/// not a region that can span most of the pallet.
fn random_obstacle(box_dims: BoxDims, rng: &mut StdRng) -> Obstacle {
    let lo_x = (box_dims.l / 4).max(1);
    let lo_y = (box_dims.w / 4).max(1);
    let ox = if lo_x < box_dims.l {
        rng.gen_range(lo_x..box_dims.l)
    } else {
        box_dims.l - 1
    };
    let oy = if lo_y < box_dims.w {
        rng.gen_range(lo_y..box_dims.w)
    } else {
        box_dims.w - 1
    };
    Obstacle {
        x: ox,
        y: oy,
        w: 1,
        h: 1,
    }
}

/// Generates up to `cfg.num_solutions` ranked two-layer templates for a
/// pallet and box size. Returns `EngineError::BaseInfeasible` if no base
/// layer placement exists; otherwise always succeeds, possibly with fewer
/// templates than requested.
#[instrument(skip(cfg), fields(pallet_l = pallet.l, pallet_w = pallet.w, box_l = box_dims.l, box_w = box_dims.w))]
pub fn generate(pallet: PalletDims, box_dims: BoxDims, cfg: &EngineConfig) -> Result<TemplateBundle> {
    cfg.validate()?;
    if box_dims.l == 0 || box_dims.w == 0 || pallet.l == 0 || pallet.w == 0 {
        return Err(EngineError::InvalidInput(
            "pallet and box dimensions must be strictly positive".into(),
        ));
    }

    let start = Instant::now();
    let base_seed = cfg.seed.unwrap_or_else(|| rand::random());
    let mut rng = StdRng::seed_from_u64(base_seed);

    let base_req = SolveRequest {
        pallet,
        box_dims,
        time_limit: cfg.base_time_limit,
        workers: cfg.workers,
        seed: Some(base_seed),
        obstacle: None,
    };
    let base_layer = compact(solve_layer(&base_req)?);
    if base_layer.is_empty() {
        return Err(EngineError::BaseInfeasible);
    }
    debug!(box_count = base_layer.box_count(), "base layer solved");

    let mut templates: Vec<Template> = Vec::new();
    let mut seen_signatures: Vec<Vec<(u32, u32, u32, u32)>> = Vec::new();
    let max_attempts = cfg.diversification_attempts_factor * cfg.num_solutions;
    let mut attempts_made = 0usize;

    for _ in 0..max_attempts {
        if templates.len() >= cfg.num_solutions {
            break;
        }
        attempts_made += 1;

        let obstacle = random_obstacle(box_dims, &mut rng);
        let upper_req = SolveRequest {
            pallet,
            box_dims,
            time_limit: cfg.upper_time_limit,
            workers: cfg.workers,
            seed: Some(rng.gen()),
            obstacle: Some(obstacle),
        };
        let upper_layer = match solve_layer(&upper_req) {
            Ok(layer) => compact(layer),
            Err(err) => {
                // Transient per-attempt failure (§7 UpperInfeasible):
                // skip and keep trying other obstacles.
                warn!(%err, "upper layer attempt failed, skipping");
                continue;
            }
        };
        if upper_layer.is_empty() {
            continue;
        }

        let signature = upper_layer.signature();
        if seen_signatures.contains(&signature) {
            // §7 SignatureCollision: geometrically identical to a layer
            // already kept, skip without counting toward num_solutions.
            continue;
        }

        let stability = score_layers(&base_layer, &upper_layer);
        let template = build_template(&base_layer, &upper_layer, stability, pallet.l, pallet.w);
        seen_signatures.push(signature);
        templates.push(template);
    }

    templates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    Ok(TemplateBundle {
        generation_info: GenerationInfo {
            duration_seconds: start.elapsed().as_secs_f64(),
            num_solutions_found: templates.len(),
            attempts_made,
        },
        pallet_dimensions: pallet,
        box_dimensions: box_dims,
        templates,
    })
}
