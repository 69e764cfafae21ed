//! Global Scheduler Constants.
//!
//! This module defines limits and widths shared across the scheduler model. It includes:
//! 1. **Capacity Limits:** The maximum number of scheduler entries one array can hold.
//! 2. **Address Widths:** The virtual address width used when sign-extending a program counter.
//! 3. **Column Limits:** The number of operand columns reachable by mid-pipeline writes.

/// Maximum number of scheduler entries supported by one payload array.
///
/// Selectors are backed by a single 128-bit word, so an array may not be
/// configured with more rows than this.
pub const MAX_ENTRIES: usize = 128;

/// Virtual address width in bits (Sv39 convention).
///
/// Program counters are sign-extended from this width when a resolver
/// substitutes the PC for a stored operand.
pub const VADDR_BITS: u32 = 39;

/// Number of operand columns reachable by the mid-pipeline (partial) write class.
///
/// Partial results are only ever produced for the first two source slots;
/// columns beyond this index never see a partial write or its bypass.
pub const MID_STATE_COLUMNS: usize = 2;

/// Widest operand value carried by a payload column, in bits.
pub const MAX_DATA_BITS: u32 = 64;
