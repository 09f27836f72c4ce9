//! Core library for generating stable two-layer pallet palletization
//! templates.
//!
//! - Algorithms: a randomized multi-restart constructive placer (`solver`),
//!   a gravity compactor (`compactor`), and a physical stability scorer
//!   (`scorer`), orchestrated by `generator` into ranked `Template`s.
//! - Data model is serde-serializable; `generate` is the single entry point
//!   most callers need.
//!
//! Quick example:
//! ```ignore
//! use pallet_template_core::{generate, BoxDims, EngineConfig, PalletDims};
//! # fn main() -> pallet_template_core::Result<()> {
//! let pallet = PalletDims::new(1200, 1000);
//! let box_dims = BoxDims::new(300, 200, 150);
//! let cfg = EngineConfig::builder().num_solutions(3).build();
//! let bundle = generate(pallet, box_dims, &cfg)?;
//! println!("templates found: {}", bundle.templates.len());
//! # Ok(()) }
//! ```

pub mod compactor;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod model;
pub mod scorer;
pub mod solver;

pub use config::*;
pub use error::*;
pub use generator::generate;
pub use model::*;

/// Convenience prelude for common types and functions.
/// Importing `pallet_template_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::compactor::compact;
    pub use crate::config::{EngineConfig, EngineConfigBuilder, SolveRequest};
    pub use crate::error::{EngineError, Result};
    pub use crate::format::build_template;
    pub use crate::generator::generate;
    pub use crate::model::{
        BoxDims, GenerationInfo, Layer, Obstacle, PalletDims, Placement, PlacementRecord,
        Rotation, Template, TemplateBundle,
    };
    pub use crate::scorer::score;
    pub use crate::solver::solve_layer;
}
