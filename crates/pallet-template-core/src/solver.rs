//! C1 — Layout Solver.
//!
//! Finds a set of non-overlapping, axis-aligned, optionally-rotated
//! placements of a single box size on a rectangular pallet, maximizing box
//! count within a time budget. `spec.md` models this as a CP-SAT 2D
//! no-overlap problem; no such binding exists in this ecosystem, so this
//! substitutes a randomized multi-restart constructive search built on the
//! same free-rectangle bookkeeping as a MaxRects bin packer (see
//! `FreeRect::place` below), racing `workers` independent trials in
//! parallel and keeping the one that placed the most boxes.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::SolveRequest;
use crate::error::Result;
use crate::model::{Layer, Obstacle, Placement, Rotation};

/// A candidate free rectangle in the current trial's free list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FreeRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl FreeRect {
    fn right(&self) -> u32 {
        self.x + self.w
    }
    fn top(&self) -> u32 {
        self.y + self.h
    }
    fn intersects(&self, o: &FreeRect) -> bool {
        !(self.x >= o.right() || o.x >= self.right() || self.y >= o.top() || o.y >= self.top())
    }
    fn contains(&self, o: &FreeRect) -> bool {
        o.x >= self.x && o.y >= self.y && o.right() <= self.right() && o.top() <= self.top()
    }
}

/// Splits every free rectangle that intersects `placed` into the leftover
/// slivers around it, then prunes rectangles fully contained in another.
/// Mirrors `MaxRectsPacker::place_rect`/`prune_free_list` from the teacher,
/// generalized to take any placed rectangle (a real box or the virtual
/// obstacle).
fn split_free_list(free: &[FreeRect], placed: &FreeRect) -> Vec<FreeRect> {
    let mut next = Vec::with_capacity(free.len());
    for fr in free {
        if !fr.intersects(placed) {
            next.push(*fr);
            continue;
        }
        if placed.x > fr.x {
            next.push(FreeRect {
                x: fr.x,
                y: fr.y,
                w: placed.x - fr.x,
                h: fr.h,
            });
        }
        if placed.right() < fr.right() {
            next.push(FreeRect {
                x: placed.right(),
                y: fr.y,
                w: fr.right() - placed.right(),
                h: fr.h,
            });
        }
        if placed.y > fr.y {
            next.push(FreeRect {
                x: fr.x,
                y: fr.y,
                w: fr.w,
                h: placed.y - fr.y,
            });
        }
        if placed.top() < fr.top() {
            next.push(FreeRect {
                x: fr.x,
                y: placed.top(),
                w: fr.w,
                h: fr.top() - placed.top(),
            });
        }
    }
    prune_dominated(next)
}

/// Drops every rectangle fully contained in another (including zero-area
/// slivers, which are contained in anything).
fn prune_dominated(rects: Vec<FreeRect>) -> Vec<FreeRect> {
    let rects: Vec<FreeRect> = rects.into_iter().filter(|r| r.w > 0 && r.h > 0).collect();
    let mut keep = Vec::with_capacity(rects.len());
    for (i, a) in rects.iter().enumerate() {
        let dominated = rects.iter().enumerate().any(|(j, b)| {
            if i == j || !b.contains(a) {
                return false;
            }
            // equal rectangles mutually contain each other; keep only the
            // lower-indexed copy so true duplicates don't vanish entirely
            if a.contains(b) {
                j < i
            } else {
                true
            }
        });
        if !dominated {
            keep.push(*a);
        }
    }
    keep
}

/// Best-area-fit score for placing a `w x h` box into free rect `fr`: lower
/// is better, matching `MaxRectsHeuristic::BestAreaFit` in the teacher.
fn area_fit_score(fr: &FreeRect, w: u32, h: u32) -> i64 {
    fr.w as i64 * fr.h as i64 - w as i64 * h as i64
}

/// One randomized constructive trial: repeatedly insert the box until no
/// free rectangle admits it (in either orientation), shuffling candidate
/// order each step so distinct RNG streams explore distinct fill orders.
fn run_trial(
    pallet_l: u32,
    pallet_w: u32,
    box_l: u32,
    box_w: u32,
    allow_rotation: bool,
    obstacle: Option<Obstacle>,
    rng: &mut StdRng,
    deadline: Instant,
) -> Layer {
    let mut free = vec![FreeRect {
        x: 0,
        y: 0,
        w: pallet_l,
        h: pallet_w,
    }];
    if let Some(o) = obstacle {
        free = split_free_list(
            &free,
            &FreeRect {
                x: o.x,
                y: o.y,
                w: o.w,
                h: o.h,
            },
        );
    }

    let mut placements = Vec::new();
    let mut next_id = 0u32;

    loop {
        if Instant::now() >= deadline {
            break;
        }
        let mut order: Vec<usize> = (0..free.len()).collect();
        order.shuffle(rng);

        let mut best: Option<(usize, FreeRect, bool, i64)> = None;
        for idx in order {
            let fr = free[idx];
            if fr.w >= box_l && fr.h >= box_w {
                let s = area_fit_score(&fr, box_l, box_w);
                if best.map(|(_, _, _, bs)| s < bs).unwrap_or(true) {
                    best = Some((idx, FreeRect { x: fr.x, y: fr.y, w: box_l, h: box_w }, false, s));
                }
            }
            if allow_rotation && fr.w >= box_w && fr.h >= box_l {
                let s = area_fit_score(&fr, box_w, box_l);
                if best.map(|(_, _, _, bs)| s < bs).unwrap_or(true) {
                    best = Some((idx, FreeRect { x: fr.x, y: fr.y, w: box_w, h: box_l }, true, s));
                }
            }
        }

        let Some((_, placed, rotated, _)) = best else {
            break;
        };
        free = split_free_list(&free, &placed);
        placements.push(Placement {
            id: next_id,
            x: placed.x,
            y: placed.y,
            bw: placed.w,
            bh: placed.h,
            rotation: if rotated { Rotation::Deg90 } else { Rotation::Deg0 },
        });
        next_id += 1;
    }

    Layer(placements)
}

/// Runs `req.workers` independent randomized trials in parallel, racing a
/// shared `req.time_limit` deadline, and keeps the trial that placed the
/// most boxes.
///
/// Returns an empty layer if no placement fit within the time limit — this
/// is never an error (§4.1 Failure: "the empty assignment is always
/// valid").
pub fn solve_layer(req: &SolveRequest) -> Result<Layer> {
    req.validate()?;

    let start = Instant::now();
    let deadline = start + req.time_limit;
    let base_seed = req.seed.unwrap_or_else(|| rand::random());

    let box_l = req.box_dims.l;
    let box_w = req.box_dims.w;
    let pallet_l = req.pallet.l;
    let pallet_w = req.pallet.w;
    let obstacle = req.obstacle;

    let trials: Vec<Layer> = (0..req.workers)
        .into_par_iter()
        .map(|worker_idx| {
            let mut rng = StdRng::seed_from_u64(base_seed ^ (worker_idx as u64).wrapping_mul(0x9E3779B97F4A7C15));
            run_trial(pallet_l, pallet_w, box_l, box_w, true, obstacle, &mut rng, deadline)
        })
        .collect();

    let best = trials
        .into_iter()
        .max_by_key(|l| l.box_count())
        .unwrap_or_else(Layer::empty);

    Ok(best)
}
