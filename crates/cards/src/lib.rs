//! Card primitives, seeded dealing, and hand evaluation.
//!
//! Representations are optimized for bijective encoding and fast bitwise
//! operations, so a full seven-card hand fits in a single machine word.
//!
//! ## Core Types
//!
//! - [`Card`] — A single card as a `(Rank, Suit)` tuple encoded in one byte
//! - [`Hand`] — An unordered set of cards as a 64-bit bitmask
//! - [`Hole`] — A player's two private cards
//! - [`Deck`] — A seeded, ordered deck for deterministic dealing
//!
//! ## Evaluation
//!
//! - [`Evaluator`] — Bitwise best-five-of-seven evaluator
//! - [`Strength`] — Evaluated ranking with kicker resolution; totally ordered
//! - [`Ranking`] — Hand category (high card through straight flush)
//!
//! ## Randomness
//!
//! - [`Rng`] — Injected `next() -> f64 in [0,1)` capability
//! - [`SeededRng`] — Deterministic implementation for audit replay
//!
//! [`Street`] encodes the betting rounds preflop through river plus the
//! terminal showdown phase.
mod card;
mod deck;
mod evaluator;
mod hand;
mod hole;
mod kicks;
mod rank;
mod ranking;
mod rng;
mod street;
mod strength;
mod suit;

pub use card::*;
pub use deck::*;
pub use evaluator::*;
pub use hand::*;
pub use hole::*;
pub use kicks::*;
pub use rank::*;
pub use ranking::*;
pub use rng::*;
pub use street::*;
pub use strength::*;
pub use suit::*;
