//! Multi-ported operand payload array.
//!
//! The payload array holds pending source-operand values for instructions
//! waiting to issue: `num_src` independent columns of `num_entries` cells.
//! It provides:
//! 1. **Write Classes:** Enqueue (masked), wakeup (broadcast), delayed, and partial ports.
//! 2. **Reads:** Combinational per-step reads of previously committed state.
//! 3. **Bypass:** Same-step forwarding of the registered partial write to reads.
//! 4. **Collision Audit:** Per-(column, slot) clash telemetry, never arbitration.
//!
//! Execution is step-based: callers post all of a step's writes, perform all
//! of its reads, then call [`PayloadArray::tick`] to commit at the boundary.
//! Columns never contend with each other; a single column's write-source set
//! for one step is the only contention domain.

use tracing::trace;

use crate::common::constants::MID_STATE_COLUMNS;
use crate::common::error::SchedError;
use crate::common::selector::Selector;
use crate::config::SchedConfig;
use crate::station::audit::{CollisionAudit, CollisionEvent};
use crate::station::ram::SyncRam;
use crate::stats::SchedStats;

/// A masked multi-column write request (enqueue and delayed classes).
///
/// `mask[c]` gates whether column `c` is updated; `data[c]` is the value for
/// that column. Both run the full column count of the array.
#[derive(Debug, Clone)]
pub struct MaskedWrite {
    /// Rows to update.
    pub addr: Selector,
    /// Per-column write enable.
    pub mask: Vec<bool>,
    /// Per-column value.
    pub data: Vec<u64>,
}

/// A partial (mid-pipeline) write request.
///
/// Partial results exist only for the first two columns. The request is
/// captured into a one-cycle register at the next boundary and committed —
/// and bypassed to reads — the step after that capture.
#[derive(Debug, Clone)]
pub struct PartialWrite {
    /// Rows to update.
    pub addr: Selector,
    /// Write enable for columns 0 and 1.
    pub mask: [bool; MID_STATE_COLUMNS],
    /// Values for columns 0 and 1.
    pub data: [u64; MID_STATE_COLUMNS],
}

/// The one-cycle capture register between a partial write request and its
/// commit. Held as explicit state so the read path stays pure.
#[derive(Debug, Clone)]
struct MidReg {
    en: [bool; MID_STATE_COLUMNS],
    addr: Selector,
    data: [u64; MID_STATE_COLUMNS],
}

impl MidReg {
    fn idle(width: usize) -> Self {
        Self {
            en: [false; MID_STATE_COLUMNS],
            addr: Selector::empty(width),
            data: [0; MID_STATE_COLUMNS],
        }
    }
}

/// Multi-column, write-arbitrated operand storage with partial-write bypass.
#[derive(Debug)]
pub struct PayloadArray {
    num_entries: usize,
    num_src: usize,
    num_enq: usize,
    num_wakeup: usize,
    delayed_src: bool,
    has_mid_state: bool,
    data_mask: u64,

    /// One synchronous storage plane per column.
    rams: Vec<SyncRam>,
    /// Enqueue requests posted this step, per port.
    enq: Vec<Option<MaskedWrite>>,
    /// Wakeup requests posted this step, per port and column.
    wakeup: Vec<Vec<Option<(Selector, u64)>>>,
    /// Delayed requests posted this step, per enqueue port.
    delayed: Vec<Option<MaskedWrite>>,
    /// Partial requests posted this step, per dequeue port.
    partial: Vec<Option<PartialWrite>>,
    /// Registered partial writes committing (and bypassing) this step.
    mid: Vec<MidReg>,

    audit: CollisionAudit,
    step: u64,
}

impl PayloadArray {
    /// Builds the array described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchedError`] when the configuration fails validation.
    pub fn new(config: &SchedConfig) -> Result<Self, SchedError> {
        config.validate()?;

        let data_mask = if config.data_bits == u64::BITS {
            u64::MAX
        } else {
            (1u64 << config.data_bits) - 1
        };
        let mid_ports = if config.has_mid_state {
            config.num_deq
        } else {
            0
        };
        let delayed_ports = if config.delayed_src { config.num_enq } else { 0 };

        Ok(Self {
            num_entries: config.num_entries,
            num_src: config.num_src,
            num_enq: config.num_enq,
            num_wakeup: config.num_wakeup,
            delayed_src: config.delayed_src,
            has_mid_state: config.has_mid_state,
            data_mask,
            rams: (0..config.num_src)
                .map(|_| SyncRam::new(config.num_entries))
                .collect(),
            enq: vec![None; config.num_enq],
            wakeup: vec![vec![None; config.num_src]; config.num_wakeup],
            delayed: vec![None; delayed_ports],
            partial: vec![None; mid_ports],
            mid: (0..mid_ports)
                .map(|_| MidReg::idle(config.num_entries))
                .collect(),
            audit: CollisionAudit::new(),
            step: 0,
        })
    }

    /// Current step number (advanced by [`PayloadArray::tick`]).
    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Number of rows per column.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    /// Number of operand columns.
    #[inline]
    pub fn num_src(&self) -> usize {
        self.num_src
    }

    /// Posts an enqueue write for this step.
    pub fn post_enqueue(&mut self, port: usize, write: MaskedWrite, stats: &mut SchedStats) {
        debug_assert!(port < self.num_enq, "enqueue port {port} not provisioned");
        self.check_masked(&write);
        stats.enqueue_writes += 1;
        self.enq[port] = Some(write);
    }

    /// Posts a wakeup (broadcast) write for this step.
    ///
    /// Each wakeup port writes one column per request; the selector may span
    /// every waiting entry that needs the broadcast value.
    pub fn post_wakeup(
        &mut self,
        port: usize,
        column: usize,
        addr: Selector,
        data: u64,
        stats: &mut SchedStats,
    ) {
        debug_assert!(port < self.num_wakeup, "wakeup port {port} not provisioned");
        debug_assert!(column < self.num_src, "column {column} out of range");
        debug_assert_eq!(addr.width(), self.num_entries);
        stats.wakeup_writes += 1;
        self.wakeup[port][column] = Some((addr, data));
    }

    /// Posts a delayed write for this step.
    ///
    /// Only available when the configuration sets `delayed_src`; there is one
    /// delayed port per enqueue port.
    pub fn post_delayed(&mut self, port: usize, write: MaskedWrite, stats: &mut SchedStats) {
        debug_assert!(self.delayed_src, "delayed write class not configured");
        debug_assert!(port < self.delayed.len(), "delayed port {port} not provisioned");
        self.check_masked(&write);
        stats.delayed_writes += 1;
        self.delayed[port] = Some(write);
    }

    /// Posts a partial (mid-pipeline) write for this step.
    ///
    /// Only available when the configuration sets `has_mid_state`; there is
    /// one partial port per dequeue port. The value is captured at the next
    /// boundary and lands — with bypass — the step after.
    pub fn post_partial(&mut self, port: usize, mut write: PartialWrite, stats: &mut SchedStats) {
        debug_assert!(self.has_mid_state, "partial write class not configured");
        debug_assert!(port < self.partial.len(), "partial port {port} not provisioned");
        debug_assert_eq!(write.addr.width(), self.num_entries);
        // Truncate on capture so the registered value, the bypass, and the
        // commit all carry the same width-limited data.
        for value in &mut write.data {
            *value &= self.data_mask;
        }
        stats.partial_writes += 1;
        self.partial[port] = Some(write);
    }

    /// Reads one value per column for the rows `sel` selects.
    ///
    /// Reads reflect the state committed at the previous boundary, except
    /// that for columns 0 and 1 a registered partial write committing this
    /// step is forwarded when its selector intersects `sel` (first matching
    /// port wins). Without that bypass, a read issued the same step a partial
    /// result lands would see the stale cell.
    pub fn read(&self, sel: &Selector) -> Vec<u64> {
        debug_assert_eq!(sel.width(), self.num_entries);
        let mut out = Vec::with_capacity(self.num_src);

        for (column, ram) in self.rams.iter().enumerate() {
            let mut value = ram.read(sel);
            if column < MID_STATE_COLUMNS {
                for mid in &self.mid {
                    if mid.en[column] && mid.addr.intersects(sel) {
                        trace!(column, step = self.step, "partial-write bypass hit");
                        value = mid.data[column];
                        break;
                    }
                }
            }
            out.push(value);
        }

        out
    }

    /// Every write collision diagnosed so far, oldest first.
    pub fn collisions(&self) -> &[CollisionEvent] {
        self.audit.events()
    }

    /// Commits the step: audits the write set, writes the storage planes,
    /// captures newly posted partials, and advances the step counter.
    ///
    /// Where several enabled writers selected the same (column, slot), the
    /// committed value is unspecified; the clash is recorded by the audit
    /// and counted in `stats`, nothing more.
    pub fn tick(&mut self, stats: &mut SchedStats) {
        for column in 0..self.num_src {
            let writes = self.collect_column_writes(column);

            let selectors: Vec<Selector> = writes.iter().map(|&(sel, _)| sel).collect();
            stats.collisions += self.audit.inspect_column(column, self.step, &selectors) as u64;

            for (sel, value) in writes {
                self.rams[column].write(sel, value & self.data_mask);
            }
            self.rams[column].tick();
        }

        // Capture this step's partial requests into the mid registers; they
        // commit and bypass next step.
        for (port, mid) in self.mid.iter_mut().enumerate() {
            *mid = match self.partial[port].take() {
                Some(req) => MidReg {
                    en: req.mask,
                    addr: req.addr,
                    data: req.data,
                },
                None => MidReg::idle(self.num_entries),
            };
        }

        self.enq.fill(None);
        for port in &mut self.wakeup {
            port.fill(None);
        }
        self.delayed.fill(None);

        stats.steps += 1;
        self.step += 1;
    }

    /// Gathers one column's enabled write sources for this step, in class
    /// order: enqueue, wakeup, delayed, then the registered partials.
    fn collect_column_writes(&self, column: usize) -> Vec<(Selector, u64)> {
        let mut writes = Vec::new();

        for req in self.enq.iter().flatten() {
            if req.mask[column] {
                writes.push((req.addr, req.data[column]));
            }
        }
        for port in &self.wakeup {
            if let Some((addr, data)) = port[column] {
                writes.push((addr, data));
            }
        }
        for req in self.delayed.iter().flatten() {
            if req.mask[column] {
                writes.push((req.addr, req.data[column]));
            }
        }
        if column < MID_STATE_COLUMNS {
            for mid in &self.mid {
                if mid.en[column] {
                    writes.push((mid.addr, mid.data[column]));
                }
            }
        }

        writes
    }

    fn check_masked(&self, write: &MaskedWrite) {
        debug_assert_eq!(write.addr.width(), self.num_entries);
        debug_assert_eq!(write.mask.len(), self.num_src);
        debug_assert_eq!(write.data.len(), self.num_src);
    }
}
