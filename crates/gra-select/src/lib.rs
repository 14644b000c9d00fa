//! GRA Multiverse Selection
//!
//! Consensus selection over candidate sets, built on the multiverse
//! optimizer in `gra-core`.
//!
//! # Core Concepts
//!
//! - [`Embedder`]: Maps a candidate to a complex vector
//! - [`ConsensusSelector`]: Candidates at level 0, a mean meta node at
//!   level 1, cosine argmax after optimization
//! - [`AnswerSelector`]: Picks the most consistent text answer
//! - [`ProfileSelector`]: Picks the network profile closest to the
//!   stability and stealth target
//!
//! # Example
//!
//! ```rust,ignore
//! use gra_select::AnswerSelector;
//!
//! let selection = AnswerSelector::new().select(&["Paris", "paris", "Lyon"])?;
//! assert_eq!(selection.index, Some(0));
//! println!("{}", selection.debug);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod answers;
mod consensus;
mod embed;
mod error;
mod profiles;

// Re-exports
pub use answers::{AnswerSelection, AnswerSelector, ANSWER_META_GOAL};
pub use consensus::{Consensus, ConsensusSelector};
pub use embed::{CharHistogramEmbedder, Embedder, NetworkProfile, ProfileEmbedder, CHAR_ALPHABET};
pub use error::{Result, SelectError};
pub use profiles::{ProfileSelection, ProfileSelector, PROFILE_META_GOAL};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
