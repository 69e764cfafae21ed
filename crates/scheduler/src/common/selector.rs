//! Row selectors for payload array ports.
//!
//! Every read and write port addresses the array with a `Selector`: a bit-set
//! over slot indices rather than a single integer index. Broadcast-style
//! writers (wakeup) legitimately select many rows at once, so the set
//! representation is load-bearing, not a convenience. It provides:
//! 1. **Construction:** Empty, one-hot, and multi-slot selectors of a fixed width.
//! 2. **Queries:** Membership, population, one-hot checks, and O(1) intersection.
//! 3. **Iteration:** Ascending traversal of the selected slot indices.

use std::fmt;

use crate::common::constants::MAX_ENTRIES;

/// A fixed-width bit-set over scheduler slot indices.
///
/// Bit *i* set means "this operation targets slot *i*". The width is the
/// entry count of the array the selector addresses; applying a selector of
/// the wrong width to an array is a caller contract violation and is checked
/// with debug assertions on the port paths.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    bits: u128,
    width: usize,
}

impl Selector {
    /// Creates an empty selector of the given width.
    ///
    /// Widths above [`MAX_ENTRIES`] cannot be represented; array constructors
    /// reject such configurations before any selector is built.
    pub fn empty(width: usize) -> Self {
        debug_assert!(width >= 1 && width <= MAX_ENTRIES);
        Self { bits: 0, width }
    }

    /// Creates a one-hot selector targeting a single slot.
    pub fn one_hot(width: usize, slot: usize) -> Self {
        let mut sel = Self::empty(width);
        sel.set(slot);
        sel
    }

    /// Creates a selector targeting every slot in `slots`.
    pub fn from_slots(width: usize, slots: &[usize]) -> Self {
        let mut sel = Self::empty(width);
        for &slot in slots {
            sel.set(slot);
        }
        sel
    }

    /// Returns the width (entry count) this selector addresses.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Marks `slot` as selected.
    #[inline]
    pub fn set(&mut self, slot: usize) {
        debug_assert!(slot < self.width, "slot {slot} out of range");
        self.bits |= 1u128 << slot;
    }

    /// Returns true if `slot` is selected.
    #[inline]
    pub fn test(&self, slot: usize) -> bool {
        debug_assert!(slot < self.width, "slot {slot} out of range");
        self.bits >> slot & 1 == 1
    }

    /// Returns true if no slot is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns true if exactly one slot is selected.
    #[inline]
    pub fn is_one_hot(&self) -> bool {
        self.bits.count_ones() == 1
    }

    /// Returns the number of selected slots.
    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if any slot is selected by both `self` and `other`.
    ///
    /// This is the intersection test the bypass and collision logic are built
    /// on; it is a single AND over the backing word.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        debug_assert_eq!(self.width, other.width);
        self.bits & other.bits != 0
    }

    /// Returns the lowest selected slot, or `None` if the selector is empty.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        if self.bits == 0 {
            None
        } else {
            Some(self.bits.trailing_zeros() as usize)
        }
    }

    /// Iterates over the selected slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let bits = self.bits;
        (0..self.width).filter(move |i| bits >> i & 1 == 1)
    }

    /// Returns the raw backing word (collision audit internals).
    #[inline]
    pub(crate) fn raw(&self) -> u128 {
        self.bits
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({:#x}/{})", self.bits, self.width)
    }
}

impl fmt::Display for Selector {
    /// Formats the selector as a `{slot, slot, ...}` set for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut sep = "";
        for slot in self.iter() {
            write!(f, "{sep}{slot}")?;
            sep = ", ";
        }
        write!(f, "}}")
    }
}
