//! Career profiles
//!
//! Per-user progression counters and the store contract that persists them.

pub mod career;
pub mod store;

pub use career::{CareerProfile, AwardOutcome, MAX_STAT_VALUE};
pub use store::{ProfileStore, MemoryStore, StoreError};
