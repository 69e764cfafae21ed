//! Contract violation errors.
//!
//! This module defines the error type for static wiring mistakes. It covers:
//! 1. **Configuration Errors:** Dimension and port counts a payload array cannot be built with.
//! 2. **Class Selection Errors:** Execution-unit class combinations no resolver variant covers.
//! 3. **Port Errors:** Posting to a port index the configuration never provisioned.
//!
//! None of these are runtime-recoverable conditions: each one indicates that
//! the surrounding scheduler was wired incorrectly, so they surface as
//! `Result` at construction seams and as debug assertions on per-step paths.
//! Write collisions are deliberately *not* represented here — a collision is
//! advisory telemetry carried by the collision audit, not a fault.

use thiserror::Error;

use crate::common::constants::{MAX_DATA_BITS, MAX_ENTRIES};

/// A static wiring mistake in how the scheduler model was configured or driven.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    /// The configured entry count exceeds what a selector word can address.
    #[error("entry count {0} exceeds the supported maximum of {MAX_ENTRIES}")]
    TooManyEntries(usize),

    /// The configured entry count is zero.
    #[error("a payload array needs at least one entry")]
    NoEntries,

    /// The configured column count is zero.
    #[error("a payload array needs at least one operand column")]
    NoColumns,

    /// The configured operand width is zero or wider than the backing word.
    #[error("operand width {0} is outside the supported range 1..={MAX_DATA_BITS}")]
    BadDataBits(u32),

    /// Mid-pipeline writes target the first two columns, so a configuration
    /// with `has_mid_state` must provide at least two.
    #[error("mid-state writes need at least 2 operand columns, got {0}")]
    MidStateNeedsTwoColumns(usize),

    /// A port class was configured with zero ports.
    #[error("{kind} port count must be at least 1")]
    NoPorts {
        /// Which port class was misconfigured.
        kind: &'static str,
    },

    /// More than one execution-unit class flag was asserted for one resolver.
    #[error("ambiguous execution-unit class: more than one class flag asserted")]
    AmbiguousUnitClass,
}
