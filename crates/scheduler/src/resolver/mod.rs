//! Immediate resolution for issuing instructions.
//!
//! Some operands never live in the payload array: an ALU immediate, a
//! PC-relative jump operand, a load's upper immediate. This module decides,
//! per source slot, whether the value pulled from the array is used as-is or
//! replaced by a value synthesized from the instruction's metadata. It
//! provides:
//! 1. **Variant Family:** One override rule per execution-unit class, plus identity.
//! 2. **Resolution:** A single `resolve` operation applied at issue time.
//! 3. **Decoding:** Sign-extended immediate extraction shared by the variants.

/// Immediate field decoding helpers.
pub mod imm;

use crate::common::constants::VADDR_BITS;
use crate::config::UnitClass;
use crate::uop::{ImmFormat, OperandKind, UopMeta};

use imm::{imm_i, imm_u, imm_u_load, sign_extend};

/// Everything one resolution needs, sampled at issue time.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInputs<'a> {
    /// The issuing micro-op's metadata record.
    pub meta: &'a UopMeta,
    /// The values pulled from the payload array, one per source slot.
    pub src: &'a [u64],
    /// The externally computed jump/branch target address.
    ///
    /// Only the Jump variant reads this; every other variant ignores it.
    pub jump_target: u64,
}

/// Per-issue-port immediate resolver.
///
/// The variant is fixed at construction from the execution-unit class of the
/// issue port it serves; `resolve` then applies the same closed rule to every
/// instruction. There are no error conditions: slots whose operand kind does
/// not match the variant's rule pass the array value through untouched.
#[derive(Debug, Clone)]
pub struct ImmResolver {
    class: UnitClass,
    num_src: usize,
    data_mask: u64,
}

impl ImmResolver {
    /// Creates a resolver for the given execution-unit class and operand shape.
    pub fn new(class: UnitClass, num_src: usize, data_bits: u32) -> Self {
        debug_assert!(num_src >= 1);
        debug_assert!(data_bits >= 1 && data_bits <= u64::BITS);
        let data_mask = if data_bits == u64::BITS {
            u64::MAX
        } else {
            (1u64 << data_bits) - 1
        };
        Self {
            class,
            num_src,
            data_mask,
        }
    }

    /// Returns the execution-unit class this resolver serves.
    #[inline]
    pub fn class(&self) -> UnitClass {
        self.class
    }

    /// Resolves the operand values for one issuing instruction.
    ///
    /// Returns one value per source slot: the array-resolved input, except
    /// where the variant's rule fires and substitutes immediate/PC data.
    pub fn resolve(&self, inp: &ResolveInputs<'_>) -> Vec<u64> {
        debug_assert_eq!(inp.src.len(), self.num_src);
        let mut out = inp.src.to_vec();

        match self.class {
            UnitClass::None => {}
            UnitClass::Jump => {
                if inp.meta.kind(0) == OperandKind::Pc {
                    out[0] = self.mask(sign_extend(inp.meta.pc, VADDR_BITS));
                }
                // Explicitly "not plain register": register-sourced slot-1
                // operands (e.g. an sfence ASID) must pass through.
                if self.num_src > 1 && inp.meta.kind(1) != OperandKind::Reg {
                    out[1] = self.mask(inp.jump_target);
                }
            }
            UnitClass::Alu => {
                if self.num_src > 1 && inp.meta.kind(1) == OperandKind::Imm {
                    out[1] = self.mask(match inp.meta.imm_fmt {
                        ImmFormat::U => imm_u(inp.meta.imm),
                        ImmFormat::I => imm_i(inp.meta.imm),
                    });
                }
            }
            UnitClass::MulDiv => {
                // This unit never uses U-form immediates.
                if self.num_src > 1 && inp.meta.kind(1) == OperandKind::Imm {
                    out[1] = self.mask(imm_i(inp.meta.imm));
                }
            }
            UnitClass::Load => {
                if inp.meta.kind(0) == OperandKind::Imm {
                    out[0] = self.mask(imm_u_load(inp.meta.imm));
                }
            }
        }

        out
    }

    #[inline]
    fn mask(&self, value: u64) -> u64 {
        value & self.data_mask
    }
}
