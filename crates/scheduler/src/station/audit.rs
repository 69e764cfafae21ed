//! Write-collision auditing.
//!
//! More than one enabled writer selecting the same (column, slot) in one step
//! is a logical-design error in the surrounding scheduler: the committed
//! value is unspecified, exactly as the electrical behavior of the modeled
//! storage would be. The audit is a read-only observer over each step's
//! write-source list — it records and logs every clash but never arbitrates,
//! so commit semantics stay untouched and tests can assert on the record.

use tracing::warn;

use crate::common::selector::Selector;

/// One diagnosed write collision: two or more enabled writers selected the
/// same slot of the same column during the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// Operand column the writers clashed on.
    pub column: usize,
    /// Scheduler slot the writers clashed on.
    pub slot: usize,
    /// Step at which the clashing writes committed.
    pub step: u64,
}

/// Read-only observer collecting [`CollisionEvent`]s across steps.
#[derive(Debug, Default)]
pub struct CollisionAudit {
    events: Vec<CollisionEvent>,
}

impl CollisionAudit {
    /// Creates an audit with no recorded events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspects one column's write-source list for one step.
    ///
    /// Records an event for every slot selected by at least two of the given
    /// selectors and returns how many events were recorded.
    pub fn inspect_column(&mut self, column: usize, step: u64, writes: &[Selector]) -> usize {
        let mut once: u128 = 0;
        let mut twice: u128 = 0;
        for sel in writes {
            twice |= once & sel.raw();
            once |= sel.raw();
        }
        if twice == 0 {
            return 0;
        }

        let mut recorded = 0;
        let mut slot = 0usize;
        let mut bits = twice;
        while bits != 0 {
            let skip = bits.trailing_zeros() as usize;
            slot += skip;
            bits >>= skip;
            warn!(column, slot, step, "write collision: committed value is unspecified");
            self.events.push(CollisionEvent { column, slot, step });
            recorded += 1;
            slot += 1;
            bits >>= 1;
        }
        recorded
    }

    /// Returns every event recorded so far, oldest first.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Discards the recorded events (verification scaffolding).
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
