//! Synchronous storage plane backing one operand column.
//!
//! `SyncRam` models the raw indexed storage primitive: a plane of cells with
//! any number of write ports posting during a step and reads returning the
//! state committed at the previous step boundary. It knows nothing about
//! write classes, arbitration, or bypass — that all lives in the payload
//! array above it. In particular, several writers hitting one cell in the
//! same step simply commit in post order; the primitive imposes no priority
//! and reports nothing.

use crate::common::selector::Selector;

/// One column of synchronous storage cells.
#[derive(Debug, Clone)]
pub struct SyncRam {
    cells: Vec<u64>,
    pending: Vec<(Selector, u64)>,
}

impl SyncRam {
    /// Creates a plane of `entries` cells, all zero.
    pub fn new(entries: usize) -> Self {
        Self {
            cells: vec![0; entries],
            pending: Vec::new(),
        }
    }

    /// Returns the number of cells in the plane.
    #[inline]
    pub fn entries(&self) -> usize {
        self.cells.len()
    }

    /// Reads the committed value of the lowest slot `sel` selects.
    ///
    /// Returns zero for an empty selector. Writes posted this step are not
    /// visible: reads reflect the previous boundary only.
    pub fn read(&self, sel: &Selector) -> u64 {
        debug_assert_eq!(sel.width(), self.cells.len());
        sel.first().map_or(0, |slot| self.cells[slot])
    }

    /// Posts a write for every slot `sel` selects, to commit at the next tick.
    pub fn write(&mut self, sel: Selector, value: u64) {
        debug_assert_eq!(sel.width(), self.cells.len());
        self.pending.push((sel, value));
    }

    /// Commits all posted writes at the step boundary, in post order.
    pub fn tick(&mut self) {
        for (sel, value) in self.pending.drain(..) {
            for slot in sel.iter() {
                self.cells[slot] = value;
            }
        }
    }
}
