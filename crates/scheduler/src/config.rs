//! Configuration system for the scheduler model.
//!
//! This module defines the structures that parameterize a reservation
//! station's payload array and immediate resolvers. It provides:
//! 1. **Defaults:** Baseline dimensions for a small dual-issue station.
//! 2. **Structures:** The `SchedConfig` record of array dimensions and port counts.
//! 3. **Enums:** The execution-unit class that selects the immediate-resolver variant.
//!
//! Configuration is supplied as JSON (deserialize `SchedConfig` with
//! `serde_json`) or built in code from `SchedConfig::default()`.

use serde::Deserialize;

use crate::common::constants::{MAX_DATA_BITS, MAX_ENTRIES, MID_STATE_COLUMNS};
use crate::common::error::SchedError;

/// Default configuration constants for the scheduler model.
///
/// These values define a small dual-issue reservation station when not
/// explicitly overridden in a JSON configuration.
mod defaults {
    /// Default number of scheduler entries (rows) per payload array.
    pub const NUM_ENTRIES: usize = 16;

    /// Default number of source-operand columns per entry.
    pub const NUM_SRC: usize = 2;

    /// Default operand width in bits.
    pub const DATA_BITS: u32 = 64;

    /// Default number of enqueue (dispatch) write ports.
    pub const NUM_ENQ: usize = 2;

    /// Default number of dequeue (issue) ports.
    ///
    /// The array exposes one read port per dequeue port plus one extra for
    /// the entry selected speculatively ahead of issue.
    pub const NUM_DEQ: usize = 2;

    /// Default number of wakeup (broadcast) write ports.
    pub const NUM_WAKEUP: usize = 4;
}

/// Execution-unit class served by one reservation station.
///
/// Selects the immediate-resolver variant once at construction time; it is
/// not re-decided per instruction. `None` keeps the identity resolver (the
/// instruction supplies exactly its stored operands).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum UnitClass {
    /// No override: stored operands pass through unchanged.
    #[default]
    None,
    /// Jump/branch unit: slot 0 may take the PC, slot 1 the computed target.
    Jump,
    /// ALU: slot 1 may take an I-form or U-form immediate.
    Alu,
    /// Multiply/divide unit: slot 1 may take an I-form immediate only.
    #[serde(alias = "Mul")]
    MulDiv,
    /// Load unit: slot 0 may take the load-path upper immediate.
    Load,
}

impl UnitClass {
    /// Derives the class from the four per-unit flags carried by schedulers
    /// that still wire classes as booleans.
    ///
    /// At most one flag may be asserted; asserting several is a wiring
    /// mistake no resolver variant covers.
    ///
    /// # Errors
    ///
    /// Returns [`SchedError::AmbiguousUnitClass`] when more than one flag is set.
    pub fn from_flags(
        is_jump: bool,
        is_alu: bool,
        is_mul: bool,
        is_load: bool,
    ) -> Result<Self, SchedError> {
        let set = u32::from(is_jump) + u32::from(is_alu) + u32::from(is_mul) + u32::from(is_load);
        if set > 1 {
            return Err(SchedError::AmbiguousUnitClass);
        }
        Ok(if is_jump {
            Self::Jump
        } else if is_alu {
            Self::Alu
        } else if is_mul {
            Self::MulDiv
        } else if is_load {
            Self::Load
        } else {
            Self::None
        })
    }
}

/// Dimensions and port provisioning for one reservation station.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use rstation_core::config::{SchedConfig, UnitClass};
///
/// let json = r#"{
///     "num_entries": 4,
///     "num_src": 2,
///     "num_enq": 1,
///     "num_wakeup": 1,
///     "unit_class": "Alu"
/// }"#;
/// let config: SchedConfig = serde_json::from_str(json).unwrap();
/// config.validate().unwrap();
/// assert_eq!(config.num_entries, 4);
/// assert_eq!(config.unit_class, UnitClass::Alu);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SchedConfig {
    /// Number of scheduler entries (rows) in the payload array.
    #[serde(default = "SchedConfig::default_num_entries")]
    pub num_entries: usize,

    /// Number of source-operand columns per entry.
    #[serde(default = "SchedConfig::default_num_src")]
    pub num_src: usize,

    /// Operand width in bits; committed values are truncated to this width.
    #[serde(default = "SchedConfig::default_data_bits")]
    pub data_bits: u32,

    /// Number of enqueue (dispatch) write ports.
    #[serde(default = "SchedConfig::default_num_enq")]
    pub num_enq: usize,

    /// Number of dequeue (issue) ports; the array has `num_deq + 1` read ports.
    #[serde(default = "SchedConfig::default_num_deq")]
    pub num_deq: usize,

    /// Number of wakeup (broadcast) write ports.
    #[serde(default = "SchedConfig::default_num_wakeup")]
    pub num_wakeup: usize,

    /// Provision one delayed write port per enqueue port, for operands that
    /// become available one cycle after dispatch.
    #[serde(default)]
    pub delayed_src: bool,

    /// Provision one partial (mid-pipeline) write port per dequeue port,
    /// including the one-cycle capture register and read bypass.
    #[serde(default)]
    pub has_mid_state: bool,

    /// Execution-unit class served by this station.
    #[serde(default)]
    pub unit_class: UnitClass,
}

impl SchedConfig {
    /// Returns the default entry count.
    fn default_num_entries() -> usize {
        defaults::NUM_ENTRIES
    }

    /// Returns the default column count.
    fn default_num_src() -> usize {
        defaults::NUM_SRC
    }

    /// Returns the default operand width.
    fn default_data_bits() -> u32 {
        defaults::DATA_BITS
    }

    /// Returns the default enqueue port count.
    fn default_num_enq() -> usize {
        defaults::NUM_ENQ
    }

    /// Returns the default dequeue port count.
    fn default_num_deq() -> usize {
        defaults::NUM_DEQ
    }

    /// Returns the default wakeup port count.
    fn default_num_wakeup() -> usize {
        defaults::NUM_WAKEUP
    }

    /// Number of read ports the payload array exposes.
    #[inline]
    pub fn num_read_ports(&self) -> usize {
        self.num_deq + 1
    }

    /// Checks that the configuration describes a buildable station.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchedError`] describing why the dimensions or
    /// port counts cannot be realized.
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.num_entries == 0 {
            return Err(SchedError::NoEntries);
        }
        if self.num_entries > MAX_ENTRIES {
            return Err(SchedError::TooManyEntries(self.num_entries));
        }
        if self.num_src == 0 {
            return Err(SchedError::NoColumns);
        }
        if self.data_bits == 0 || self.data_bits > MAX_DATA_BITS {
            return Err(SchedError::BadDataBits(self.data_bits));
        }
        if self.has_mid_state && self.num_src < MID_STATE_COLUMNS {
            return Err(SchedError::MidStateNeedsTwoColumns(self.num_src));
        }
        if self.num_enq == 0 {
            return Err(SchedError::NoPorts { kind: "enqueue" });
        }
        if self.num_deq == 0 {
            return Err(SchedError::NoPorts { kind: "dequeue" });
        }
        if self.num_wakeup == 0 {
            return Err(SchedError::NoPorts { kind: "wakeup" });
        }
        Ok(())
    }
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            num_entries: defaults::NUM_ENTRIES,
            num_src: defaults::NUM_SRC,
            data_bits: defaults::DATA_BITS,
            num_enq: defaults::NUM_ENQ,
            num_deq: defaults::NUM_DEQ,
            num_wakeup: defaults::NUM_WAKEUP,
            delayed_src: false,
            has_mid_state: false,
            unit_class: UnitClass::None,
        }
    }
}
