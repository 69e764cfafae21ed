//! Reservation station: payload storage composed with immediate resolution.
//!
//! This module wires the two halves of the scheduler's operand path together.
//! It provides:
//! 1. **Payload Array:** The multi-ported, write-arbitrated storage columns.
//! 2. **Storage Primitive:** The synchronous cell planes backing each column.
//! 3. **Collision Audit:** Per-(column, slot) write-clash telemetry.
//! 4. **Composition:** The station that feeds array reads through a resolver at issue.

/// Write-collision observer.
pub mod audit;
/// The multi-ported operand payload array.
pub mod payload;
/// Synchronous storage planes.
pub mod ram;

use crate::common::error::SchedError;
use crate::common::selector::Selector;
use crate::config::SchedConfig;
use crate::resolver::{ImmResolver, ResolveInputs};
use crate::station::audit::CollisionEvent;
use crate::station::payload::{MaskedWrite, PartialWrite, PayloadArray};
use crate::stats::SchedStats;
use crate::uop::UopMeta;

/// One reservation station: a payload array plus one immediate resolver per
/// dequeue port, all serving the station's execution-unit class.
///
/// The station is the shared caller the two components are specified
/// against: completion sources post writes into the array every step, and
/// the values pulled for an issuing entry pass through the issue port's
/// resolver before they reach the execution unit.
#[derive(Debug)]
pub struct ReservationStation {
    config: SchedConfig,
    payload: PayloadArray,
    resolvers: Vec<ImmResolver>,
    stats: SchedStats,
}

impl ReservationStation {
    /// Builds a station from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`SchedError`] when the configuration cannot be realized.
    pub fn new(config: SchedConfig) -> Result<Self, SchedError> {
        let payload = PayloadArray::new(&config)?;
        let resolvers = (0..config.num_deq)
            .map(|_| ImmResolver::new(config.unit_class, config.num_src, config.data_bits))
            .collect();
        Ok(Self {
            config,
            payload,
            resolvers,
            stats: SchedStats::new(),
        })
    }

    /// The configuration the station was built from.
    #[inline]
    pub fn config(&self) -> &SchedConfig {
        &self.config
    }

    /// Activity counters accumulated so far.
    #[inline]
    pub fn stats(&self) -> &SchedStats {
        &self.stats
    }

    /// Current step number.
    #[inline]
    pub fn step(&self) -> u64 {
        self.payload.step()
    }

    /// Posts an enqueue write for this step.
    pub fn post_enqueue(&mut self, port: usize, write: MaskedWrite) {
        self.payload.post_enqueue(port, write, &mut self.stats);
    }

    /// Posts a wakeup (broadcast) write for this step.
    pub fn post_wakeup(&mut self, port: usize, column: usize, addr: Selector, data: u64) {
        self.payload
            .post_wakeup(port, column, addr, data, &mut self.stats);
    }

    /// Posts a delayed write for this step.
    pub fn post_delayed(&mut self, port: usize, write: MaskedWrite) {
        self.payload.post_delayed(port, write, &mut self.stats);
    }

    /// Posts a partial (mid-pipeline) write for this step.
    pub fn post_partial(&mut self, port: usize, write: PartialWrite) {
        self.payload.post_partial(port, write, &mut self.stats);
    }

    /// Reads the stored operand values for the rows `sel` selects, one value
    /// per column, including the partial-write bypass.
    pub fn read(&self, sel: &Selector) -> Vec<u64> {
        self.payload.read(sel)
    }

    /// Issues one entry through dequeue port `port`: reads its stored values
    /// and resolves them against the instruction's metadata.
    ///
    /// `jump_target` is the externally computed branch/jump target; it is
    /// only consulted when the station serves the jump class.
    pub fn issue(
        &mut self,
        port: usize,
        sel: &Selector,
        meta: &UopMeta,
        jump_target: u64,
    ) -> Vec<u64> {
        debug_assert!(port < self.resolvers.len(), "dequeue port {port} not provisioned");
        let src = self.payload.read(sel);
        self.stats.issues += 1;
        self.resolvers[port].resolve(&ResolveInputs {
            meta,
            src: &src,
            jump_target,
        })
    }

    /// Every write collision diagnosed so far, oldest first.
    pub fn collisions(&self) -> &[CollisionEvent] {
        self.payload.collisions()
    }

    /// Commits the step boundary.
    pub fn tick(&mut self) {
        self.payload.tick(&mut self.stats);
    }
}
