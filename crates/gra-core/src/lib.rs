//! GRA Multiverse Core
//!
//! Multilevel functional over hierarchically indexed complex vectors, and a
//! finite-difference gradient-descent optimizer that minimizes it.
//!
//! # Core Concepts
//!
//! - [`MultiIndex`]: Hierarchical key of one state component
//! - [`Level`] / [`Goal`]: Abstraction tiers and their documented intent
//! - [`MultiverseState`]: Deep-copyable map from multi-index to complex vector
//! - [`FoamFunctional`]: Pairwise interference among components of one level
//! - [`MultiverseFunctional`]: `J_multiverse = Σ_l Λ_l · J^(l)`, `Λ_l = λ₀ αˡ`
//! - [`MultiverseOptimizer`]: Central-difference gradient descent with a
//!   convergence loop
//! - [`OptimizerConfig`]: Tunables, loadable from TOML
//!
//! # Example
//!
//! ```rust,ignore
//! use gra_core::prelude::*;
//!
//! let level0 = Level::new(0, "local");
//! let functional = MultiverseFunctional::new(vec![level0.clone()], vec![])
//!     .with_level_fn(ConstantLevel(0));
//!
//! let state = MultiverseState::new()
//!     .with_component([0], from_real(&[1.0, 0.0]))
//!     .with_component([1], from_real(&[0.0, 2.0]));
//!
//! assert_eq!(functional.evaluate(&state)?, 2.5);
//!
//! let optimizer = MultiverseOptimizer::new(functional);
//! let optimized = optimizer.run_to_convergence(&state, 100, 1e-6, None)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod error;
mod foam;
mod functional;
mod index;
mod level;
pub mod linalg;
mod optimizer;
mod state;

// Re-exports
pub use config::OptimizerConfig;
pub use error::{MultiverseError, Result};
pub use foam::{FoamFunctional, IdentityProjector, Projector};
pub use functional::{LevelContribution, MultiverseFunctional};
pub use index::{ConstantLevel, DepthLevel, LevelAssignment, MultiIndex, TrailingComponent};
pub use level::{Goal, Level};
pub use linalg::ComplexVector;
pub use num_complex::Complex64;
pub use optimizer::{MultiverseOptimizer, OptimizationReport};
pub use state::MultiverseState;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and optimizing a multiverse
    pub use crate::linalg::from_real;
    pub use crate::{
        Complex64, ConstantLevel, Goal, Level, LevelAssignment, MultiIndex, MultiverseError,
        MultiverseFunctional, MultiverseOptimizer, MultiverseState, OptimizerConfig,
        TrailingComponent,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
