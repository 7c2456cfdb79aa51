//! Property tests for rotation order under mutation.

use proptest::prelude::*;

use robin_rs::Robin;

proptest! {
    /// Unlinking values never reorders the survivors.
    #[test]
    fn removal_preserves_relative_order(
        values in prop::collection::btree_set(0u16..500, 1..40),
        drop_mask in prop::collection::vec(any::<bool>(), 40),
    ) {
        let values: Vec<u16> = values.into_iter().collect();
        let mut robin = Robin::unbounded();
        robin.add(values.iter().copied());

        let (dropped, kept): (Vec<_>, Vec<_>) = values
            .iter()
            .zip(&drop_mask)
            .partition(|(_, drop)| **drop);
        let dropped: Vec<u16> = dropped.into_iter().map(|(v, _)| *v).collect();
        let kept: Vec<u16> = kept.into_iter().map(|(v, _)| *v).collect();

        robin.remove(&dropped);
        prop_assert_eq!(robin.len(), kept.len());

        let rotation: Vec<u16> = (0..kept.len()).filter_map(|_| robin.next()).collect();
        prop_assert_eq!(rotation, kept);
    }

    /// Each value appears exactly once per full rotation.
    #[test]
    fn every_value_once_per_rotation(
        first in prop::collection::vec(0u8..64, 0..30),
        second in prop::collection::vec(0u8..64, 0..30),
        skip in 0usize..10,
    ) {
        let mut robin = Robin::unbounded();
        robin.add(first);
        for _ in 0..skip {
            robin.next();
        }
        robin.add(second);

        let n = robin.len();
        let mut seen: Vec<u8> = (0..n).filter_map(|_| robin.next()).collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), n);
    }
}
