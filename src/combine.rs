//! Combination expansion: Cartesian products over candidate slots
//!
//! Shared by mock assembly (one slot per parameter or field) and scenario
//! synthesis (one slot per interactive element).

/// Expand per-slot candidates into every combination.
///
/// Tuple position `i` always holds a candidate from `slots[i]`. Iteration
/// matches nested loops: the first slot varies slowest, the last fastest.
///
/// - `slots = []` yields exactly one empty tuple.
/// - Any empty slot yields no tuples at all.
///
/// # Examples
/// ```
/// use compose_testgen::combine::expand;
/// let combos = expand(&[vec![1, 2], vec![3, 4]]);
/// assert_eq!(combos, vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);
/// ```
pub fn expand<V: Clone>(slots: &[Vec<V>]) -> Vec<Vec<V>> {
    let mut combinations: Vec<Vec<V>> = vec![Vec::with_capacity(slots.len())];

    for slot in slots {
        let mut next = Vec::with_capacity(combinations.len() * slot.len());
        for prefix in &combinations {
            for candidate in slot {
                let mut tuple = prefix.clone();
                tuple.push(candidate.clone());
                next.push(tuple);
            }
        }
        combinations = next;
    }

    combinations
}

/// Number of tuples [`expand`] would produce, saturating on overflow
pub fn count<V>(slots: &[Vec<V>]) -> usize {
    slots
        .iter()
        .fold(1usize, |acc, slot| acc.saturating_mul(slot.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_slots_is_one_empty_tuple() {
        let slots: Vec<Vec<u8>> = vec![];
        assert_eq!(expand(&slots), vec![Vec::<u8>::new()]);
        assert_eq!(count(&slots), 1);
    }

    #[test]
    fn test_empty_slot_collapses_product() {
        let slots = vec![vec!['a', 'b'], vec![], vec!['c']];
        assert!(expand(&slots).is_empty());
        assert_eq!(count(&slots), 0);
    }

    #[test]
    fn test_last_slot_varies_fastest() {
        let slots = vec![vec!["x", "y"], vec!["1", "2", "3"]];
        let combos = expand(&slots);
        assert_eq!(
            combos,
            vec![
                vec!["x", "1"],
                vec!["x", "2"],
                vec!["x", "3"],
                vec!["y", "1"],
                vec!["y", "2"],
                vec!["y", "3"],
            ]
        );
    }

    #[test]
    fn test_single_candidate_slots() {
        let slots = vec![vec![1], vec![2], vec![3]];
        assert_eq!(expand(&slots), vec![vec![1, 2, 3]]);
    }

    proptest! {
        #[test]
        fn test_size_is_product_of_slot_sizes(
            slots in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..4), 0..5)
        ) {
            let expected: usize = slots.iter().map(Vec::len).product();
            prop_assert_eq!(expand(&slots).len(), expected);
            prop_assert_eq!(count(&slots), expected);
        }

        #[test]
        fn test_tuple_positions_come_from_their_slot(
            slots in prop::collection::vec(prop::collection::vec(0u8..50, 1..4), 1..5)
        ) {
            for tuple in expand(&slots) {
                prop_assert_eq!(tuple.len(), slots.len());
                for (i, value) in tuple.iter().enumerate() {
                    prop_assert!(slots[i].contains(value));
                }
            }
        }

        #[test]
        fn test_first_tuple_and_last_tuple(
            slots in prop::collection::vec(prop::collection::vec(any::<u16>(), 1..4), 1..5)
        ) {
            let combos = expand(&slots);
            let first: Vec<u16> = slots.iter().map(|s| s[0]).collect();
            let last: Vec<u16> = slots.iter().map(|s| s[s.len() - 1]).collect();
            prop_assert_eq!(&combos[0], &first);
            prop_assert_eq!(&combos[combos.len() - 1], &last);
        }
    }
}
