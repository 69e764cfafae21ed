//! Reservation-station operand storage model.
//!
//! This crate implements a cycle-level model of the operand path inside an
//! out-of-order scheduler with the following:
//! 1. **Payload Array:** Multi-column, multi-ported operand storage with enqueue,
//!    wakeup, delayed, and partial write classes.
//! 2. **Bypass:** One-cycle read-after-write forwarding for partial (mid-pipeline) writes.
//! 3. **Collision Audit:** Per-(column, slot) write-clash telemetry for verification.
//! 4. **Immediate Resolution:** Per-execution-unit-class substitution of immediate/PC
//!    operands at issue time.
//! 5. **Configuration:** JSON-deserializable dimensions, port counts, and unit class.

/// Common types (selectors, constants, contract errors).
pub mod common;
/// Scheduler configuration (defaults, enums, validation).
pub mod config;
/// Immediate resolver family and decode helpers.
pub mod resolver;
/// Payload array, storage planes, collision audit, and the station composition.
pub mod station;
/// Activity counters and reporting.
pub mod stats;
/// Per-instruction metadata consumed by the resolvers.
pub mod uop;

/// Station configuration; use `SchedConfig::default()` or deserialize from JSON.
pub use crate::config::SchedConfig;
/// Execution-unit class selecting the resolver variant.
pub use crate::config::UnitClass;
/// Contract-violation error type.
pub use crate::common::error::SchedError;
/// Bit-set row selector used by every port.
pub use crate::common::selector::Selector;
/// Per-issue-port immediate resolver.
pub use crate::resolver::ImmResolver;
/// The multi-ported operand payload array.
pub use crate::station::payload::PayloadArray;
/// Payload array plus resolvers; construct with `ReservationStation::new`.
pub use crate::station::ReservationStation;
