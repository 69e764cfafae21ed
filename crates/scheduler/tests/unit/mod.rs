//! # Unit Components
//!
//! This module serves as the central hub for the scheduler model's unit
//! tests, organized per component.


/// Unit tests for the payload array.
///
/// This module covers the write classes, masked and broadcast addressing,
/// the partial-write capture register and bypass, and collision reporting.
pub mod payload;
