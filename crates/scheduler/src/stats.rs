//! Scheduler model statistics collection and reporting.
//!
//! This module tracks activity counters for the payload array and issue
//! path. It provides:
//! 1. **Write Traffic:** Posted writes broken down by class.
//! 2. **Issue Traffic:** Resolved issues per station.
//! 3. **Diagnostics:** Diagnosed write collisions and elapsed steps.
//!
//! The counters are advisory telemetry for tests and performance analysis;
//! nothing in the model changes behavior based on them.

/// Activity counters for one reservation station.
#[derive(Debug, Clone, Default)]
pub struct SchedStats {
    /// Steps committed so far.
    pub steps: u64,
    /// Enqueue writes posted.
    pub enqueue_writes: u64,
    /// Wakeup (broadcast) writes posted.
    pub wakeup_writes: u64,
    /// Delayed writes posted.
    pub delayed_writes: u64,
    /// Partial (mid-pipeline) writes posted.
    pub partial_writes: u64,
    /// Instructions issued through a resolver.
    pub issues: u64,
    /// Write collisions diagnosed by the audit.
    pub collisions: u64,
}

impl SchedStats {
    /// Creates a zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total writes posted across every class.
    #[inline]
    pub fn total_writes(&self) -> u64 {
        self.enqueue_writes + self.wakeup_writes + self.delayed_writes + self.partial_writes
    }

    /// Renders a human-readable summary of the counters.
    pub fn report(&self) -> String {
        format!(
            "steps: {}\n\
             writes: {} (enqueue {}, wakeup {}, delayed {}, partial {})\n\
             issues: {}\n\
             write collisions: {}",
            self.steps,
            self.total_writes(),
            self.enqueue_writes,
            self.wakeup_writes,
            self.delayed_writes,
            self.partial_writes,
            self.issues,
            self.collisions,
        )
    }
}
