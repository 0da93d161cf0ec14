//! Deterministic multi-mode poker betting state machine.
//!
//! The crate is pure: no clocks, no I/O, no global state. Randomness
//! enters exclusively through the injected deck seed, so a recorded hand
//! replays bit-for-bit.
//!
//! ## Core Types
//!
//! - [`Game`] — Copy-on-write hand state; [`Game::apply`] returns a fresh
//!   successor and never mutates its receiver
//! - [`Config`] — Immutable per-hand stakes (Limit/No-Limit/Pot-Limit)
//! - [`Action`] — Player decisions (fold, check, call, bet, raise)
//! - [`Event`] — Strictly sequenced hand events for audit and transport
//! - [`Seat`] — Per-player chips, wagers, and status within a hand
//!
//! ## Supporting Modules
//!
//! - [`position`] — Blind seats, turn order, dealer rotation, seat labels
//! - [`Pot`]/[`partition`] — Eligibility-layered side-pot math
//! - [`Showdown`] — Pot resolution against evaluated hand strengths
//! - [`GameError`] — Stable machine-readable rule violations
mod action;
mod config;
mod error;
mod event;
mod game;
pub mod position;
mod pot;
mod ranges;
mod seat;
mod showdown;

pub use action::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use position::Label;
pub use pot::*;
pub use ranges::*;
pub use seat::*;
pub use showdown::*;
