//! Immediate field decoding.
//!
//! This module turns the raw immediate field of a decode record into a
//! sign-extended operand value. It handles the standard (I-form) decode, the
//! ALU upper-immediate decode, and the load pipe's distinct upper-immediate
//! extraction.

/// Number of significant bits in a standard (I-form) immediate.
const I_IMM_BITS: u32 = 12;

/// Bit mask for the standard immediate field (bits [11:0]).
const I_IMM_MASK: u32 = 0xFFF;

/// Bit mask for the compacted 20-bit upper-immediate field (bits [19:0]).
///
/// The ALU pipe receives the upper immediate as a compacted low-aligned
/// field and shifts it into position.
const U_IMM_FIELD_MASK: u32 = 0xF_FFFF;

/// Shift placing the compacted upper-immediate field into bits [31:12].
const U_IMM_SHIFT: u32 = 12;

/// Bit mask for the in-place upper-immediate field (bits [31:12]).
///
/// The load pipe's decode record carries the upper immediate already placed
/// at its architectural position, so extraction is a mask, not a shift.
const U_IMM_PLACED_MASK: u32 = 0xFFFF_F000;

/// Sign-extends the low `bits` bits of `value` to 64 bits.
///
/// `bits` must be in `1..=64`; the callers in this crate only pass decode
/// widths and the virtual address width.
#[inline]
pub fn sign_extend(value: u64, bits: u32) -> u64 {
    debug_assert!(bits >= 1 && bits <= u64::BITS);
    let shift = u64::BITS - bits;
    ((value << shift) as i64 >> shift) as u64
}

/// Decodes a standard immediate: bits [11:0], sign-extended.
#[inline]
pub fn imm_i(raw: u32) -> u64 {
    sign_extend(u64::from(raw & I_IMM_MASK), I_IMM_BITS)
}

/// Decodes the ALU upper immediate: the compacted 20-bit field shifted into
/// bits [31:12], then sign-extended from 32 bits.
#[inline]
pub fn imm_u(raw: u32) -> u64 {
    (((raw & U_IMM_FIELD_MASK) << U_IMM_SHIFT) as i32) as i64 as u64
}

/// Decodes the load-pipe upper immediate: the in-place field in bits
/// [31:12], masked and sign-extended from 32 bits.
#[inline]
pub fn imm_u_load(raw: u32) -> u64 {
    ((raw & U_IMM_PLACED_MASK) as i32) as i64 as u64
}
