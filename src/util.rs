use crate::datastructures::BitSet;

/// Generates a consuming builder setter `fn $field(mut self, $field: $type) -> Self`.
macro_rules! impl_setter {
    ($self:ident, $field:ident, $type:ty) => {
        pub fn $field(mut $self, $field: $type) -> Self {
            $self.$field = $field;
            $self
        }
    };
}

/// Whether `order` holds every id in `0..n` exactly once.
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = BitSet::new(n);
    order.iter().all(|id| *id < n && !seen.set_bit(*id))
}

#[cfg(test)]
mod tests {
    use crate::util::is_permutation;

    #[test]
    fn detects_permutations() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }
}
