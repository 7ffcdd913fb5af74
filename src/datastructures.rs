use bitvec::prelude::*;

/// Fixed size set of small integers, used to track which city ids a tour under
/// construction already holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet {
    bit_vec: BitVec,
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            bit_vec: bitvec![0; size],
        }
    }

    /// Sets `idx`, returns whether it was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if self.at(idx) {
            true
        } else {
            self.bit_vec.set(idx, true);
            false
        }
    }

    /// Out of range indices are reported as unset.
    #[inline]
    pub fn at(&self, idx: usize) -> bool {
        idx < self.bit_vec.len() && self.bit_vec[idx]
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::BitSet;

    #[test]
    fn set_bit_reports_previous_state() {
        let mut set = BitSet::new(70);
        assert!(!set.set_bit(3));
        assert!(set.set_bit(3));
        assert!(!set.set_bit(69));
        assert!(set.at(3));
        assert!(set.at(69));
        assert!(!set.at(4));
    }

    #[test]
    fn out_of_range_is_unset() {
        let mut set = BitSet::new(3);
        set.set_bit(2);
        assert!(!set.at(3));
        assert!(!BitSet::new(0).at(0));
    }
}
