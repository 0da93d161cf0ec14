//! Async per-table session actors for live play.
//!
//! Each table is one session task owning all mutable state and one inbox;
//! the cloneable [`Table`] handle is how the outside world reaches it. No
//! two actions against the same table ever interleave, and tables never
//! share state beyond the [`Casino`] registry.
//!
//! ## Responsibilities
//!
//! - Seat roster with buy-ins and soft removal ([`Roster`])
//! - Per-hand seeding and delegation to the `agp-gameplay` engine
//! - At-most-once effect for retried requests (idempotency cache)
//! - Monotonic per-agent sequence counters (replay protection)
//! - Inactivity deadline that checks or folds for stalled seats ([`Timer`])
//! - Bounded hand history ([`History`]) and collaborator notification
//!   ([`Audit`], [`Ledger`])
mod casino;
mod command;
mod error;
mod history;
mod hooks;
mod roster;
mod session;
mod table;
mod timer;

pub use casino::*;
pub use command::Outcome;
pub use error::*;
pub use history::*;
pub use hooks::*;
pub use roster::*;
pub use table::*;
pub use timer::*;
