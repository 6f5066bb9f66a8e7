use std::fmt::Debug;

use pretty_assertions::assert_eq;

/// Asserts that two collections hold the same items, ignoring order but not
/// multiplicity.
pub fn assert_in_any_order<T: Ord + Debug>(
    values: impl IntoIterator<Item = T>,
    expected: impl IntoIterator<Item = T>,
) {
    let sorted = |items: Vec<T>| {
        let mut items = items;
        items.sort_unstable();
        items
    };

    assert_eq!(
        sorted(values.into_iter().collect()),
        sorted(expected.into_iter().collect())
    );
}
