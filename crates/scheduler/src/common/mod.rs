//! Common utilities and types used throughout the scheduler model.
//!
//! This module provides fundamental building blocks shared across the payload
//! array and the immediate resolvers. It includes:
//! 1. **Selectors:** The bit-set row addressing used by every read and write port.
//! 2. **Constants:** Capacity limits and address widths.
//! 3. **Error Handling:** Contract-violation errors for static wiring mistakes.

/// Capacity limits and address widths.
pub mod constants;

/// Contract-violation error types.
pub mod error;

/// Bit-set row selectors.
pub mod selector;

pub use constants::{MAX_ENTRIES, VADDR_BITS};
pub use error::SchedError;
pub use selector::Selector;
