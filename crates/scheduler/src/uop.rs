//! Per-instruction metadata carried alongside stored operands.
//!
//! This module defines the slice of a micro-op's decode record that the
//! immediate resolvers consume. It provides:
//! 1. **Operand Kinds:** Per-slot tags saying where each source value comes from.
//! 2. **Immediate Encoding:** The raw immediate field and its format selector.
//! 3. **Program Counter:** The instruction's PC, for PC-relative substitution.

use serde::Deserialize;

/// Where a source-operand slot's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OperandKind {
    /// The value was produced into the payload array by a register read or
    /// a completing instruction; use it as stored.
    #[default]
    Reg,
    /// The value is encoded in the instruction's immediate field.
    Imm,
    /// The value is derived from the instruction's program counter.
    Pc,
}

/// Which decode the immediate field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImmFormat {
    /// Standard 12-bit sign-extended immediate.
    #[default]
    I,
    /// Upper immediate: 20 bits placed in bits [31:12].
    U,
}

/// The per-instruction metadata record the resolvers read.
///
/// Decode produces one of these per micro-op; the reservation station keeps
/// it beside the entry and hands it to the issue port's resolver together
/// with the values pulled from the payload array.
#[derive(Debug, Clone, Default)]
pub struct UopMeta {
    /// Operand-kind tag per source slot. Slots beyond the vector's length
    /// default to [`OperandKind::Reg`] (pass-through).
    pub kinds: Vec<OperandKind>,
    /// Raw immediate field as carried by the decode record.
    pub imm: u32,
    /// Which decode the immediate field uses.
    pub imm_fmt: ImmFormat,
    /// Program counter of the instruction.
    pub pc: u64,
}

impl UopMeta {
    /// Returns the operand kind of `slot`, defaulting to register sourcing.
    #[inline]
    pub fn kind(&self, slot: usize) -> OperandKind {
        self.kinds.get(slot).copied().unwrap_or_default()
    }
}
