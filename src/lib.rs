//! ringkit: a bounded lock-free MPMC ring buffer and a fixed-capacity
//! LRU cache, sharing a small toolbox of arena-backed data structures.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod policy;
pub mod queue;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
