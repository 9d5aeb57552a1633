//! `tablog-core` — foundational types for the `tablog` metric logger.
//!
//! This crate is a dependency of every other `tablog-*` crate.  It
//! intentionally has no `tablog-*` dependencies and minimal external ones
//! (only `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`value`]    | `Scalar` — the primitive cell value                   |
//! | [`record`]   | `TabularRecord`, `StatPlacement`                      |
//! | [`input`]    | `LogInput` — the datum dispatched to outputs          |
//! | [`warn`]     | `WarnOnce` — per-instance diagnostic deduplication    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Scalar`.                |

pub mod input;
pub mod record;
pub mod value;
pub mod warn;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use input::LogInput;
pub use record::{StatPlacement, TabularRecord};
pub use value::Scalar;
pub use warn::WarnOnce;
