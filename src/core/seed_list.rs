//! Ordered seed list used to drive OPTICS cluster expansion.
//!
//! A [`SeedList`] holds point identifiers paired with a priority (the
//! reachability distance) and keeps them sorted in a configured direction.
//! Priority updates are expressed as remove-then-reinsert.
//!
//! # Example
//!
//! ```
//! use optics_ordering::core::seed_list::{SeedList, SortOrder};
//!
//! let mut seeds = SeedList::new(SortOrder::Ascending);
//! seeds.insert(7, 2.0);
//! seeds.insert(3, 1.0);
//! assert_eq!(seeds.elements(), &[3, 7]);
//! ```

use thiserror::Error;

/// Errors raised while building a seed list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeedListError {
    /// Initial identifiers and priorities differ in length.
    #[error(
        "invalid argument: elements has {elements_len} entries, priorities has {priorities_len}"
    )]
    InvalidArgument {
        elements_len: usize,
        priorities_len: usize,
    },
}

/// Result type for seed list operations.
pub type Result<T> = std::result::Result<T, SeedListError>;

/// Direction in which a [`SeedList`] keeps its priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest priority first.
    Ascending,
    /// Largest priority first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns true if `candidate` should be placed in front of `existing`.
    #[inline]
    fn precedes(self, candidate: f64, existing: f64) -> bool {
        match self {
            SortOrder::Ascending => candidate < existing,
            SortOrder::Descending => candidate > existing,
        }
    }
}

/// Identifiers kept sorted by an associated priority.
///
/// Identifiers and priorities live in two parallel vectors; index `i` of
/// [`SeedList::elements`] pairs with index `i` of [`SeedList::priorities`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeedList {
    elements: Vec<usize>,
    priorities: Vec<f64>,
    order: SortOrder,
}

impl SeedList {
    /// Creates an empty seed list sorted in `order`.
    pub fn new(order: SortOrder) -> Self {
        Self {
            elements: Vec::new(),
            priorities: Vec::new(),
            order,
        }
    }

    /// Creates a seed list pre-filled from parallel identifier/priority slices.
    ///
    /// Entries are inserted one by one in the given order, so the result is
    /// sorted and ties keep their input order.
    ///
    /// # Errors
    ///
    /// Returns [`SeedListError::InvalidArgument`] if the slices differ in length.
    pub fn with_elements(elements: &[usize], priorities: &[f64], order: SortOrder) -> Result<Self> {
        if elements.len() != priorities.len() {
            return Err(SeedListError::InvalidArgument {
                elements_len: elements.len(),
                priorities_len: priorities.len(),
            });
        }

        let mut list = Self {
            elements: Vec::with_capacity(elements.len()),
            priorities: Vec::with_capacity(priorities.len()),
            order,
        };
        for (&id, &priority) in elements.iter().zip(priorities) {
            list.insert(id, priority);
        }
        Ok(list)
    }

    /// Inserts `id` at the position that keeps the list sorted.
    ///
    /// Scans from the back towards the front. Every scanned entry that the new
    /// priority strictly beats moves the insertion point onto that entry, so
    /// the new element lands after all entries of equal priority.
    pub fn insert(&mut self, id: usize, priority: f64) {
        let mut insert_at = self.elements.len();
        for index in (0..self.priorities.len()).rev() {
            if self.order.precedes(priority, self.priorities[index]) {
                insert_at = index;
            }
        }

        self.elements.insert(insert_at, id);
        self.priorities.insert(insert_at, priority);
    }

    /// Removes the first occurrence of `id`. Does nothing if `id` is absent.
    pub fn remove(&mut self, id: usize) {
        if let Some(index) = self.elements.iter().position(|&e| e == id) {
            self.elements.remove(index);
            self.priorities.remove(index);
        }
    }

    /// Current identifiers in sorted order.
    #[inline]
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Priority stored at position `index`, if any.
    #[inline]
    pub fn element_priority(&self, index: usize) -> Option<f64> {
        self.priorities.get(index).copied()
    }

    /// Current priorities, parallel to [`SeedList::elements`].
    #[inline]
    pub fn priorities(&self) -> &[f64] {
        &self.priorities
    }

    /// `(id, priority)` pairs in sorted order.
    pub fn elements_with_priorities(&self) -> Vec<(usize, f64)> {
        self.elements
            .iter()
            .copied()
            .zip(self.priorities.iter().copied())
            .collect()
    }

    /// Sort direction this list was built with.
    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted(priorities: &[f64], order: SortOrder) -> bool {
        priorities.windows(2).all(|w| match order {
            SortOrder::Ascending => w[0] <= w[1],
            SortOrder::Descending => w[0] >= w[1],
        })
    }

    #[test]
    fn test_with_elements_descending() {
        // elements [1,2,3,4] with priorities [4,1,2,3] -> [1,4,3,2]
        let list =
            SeedList::with_elements(&[1, 2, 3, 4], &[4.0, 1.0, 2.0, 3.0], SortOrder::Descending)
                .unwrap();
        assert_eq!(list.elements(), &[1, 4, 3, 2]);
        assert_eq!(list.priorities(), &[4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_with_elements_length_mismatch() {
        let result = SeedList::with_elements(&[1, 2], &[1.0], SortOrder::Ascending);
        match result.unwrap_err() {
            SeedListError::InvalidArgument {
                elements_len,
                priorities_len,
            } => {
                assert_eq!(elements_len, 2);
                assert_eq!(priorities_len, 1);
            }
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_ascending_keeps_order() {
        let mut list = SeedList::new(SortOrder::Ascending);
        for (id, p) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 0.5), (4, 9.0)] {
            list.insert(id, p);
            assert!(is_sorted(list.priorities(), SortOrder::Ascending));
        }
        assert_eq!(list.elements(), &[3, 1, 2, 0, 4]);
    }

    #[test]
    fn test_insert_descending_keeps_order() {
        let mut list = SeedList::new(SortOrder::Descending);
        for (id, p) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 0.5), (4, 9.0)] {
            list.insert(id, p);
        }
        assert!(is_sorted(list.priorities(), SortOrder::Descending));
        assert_eq!(list.elements(), &[4, 0, 2, 1, 3]);
    }

    #[test]
    fn test_insert_equal_priority_is_stable() {
        let mut list = SeedList::new(SortOrder::Ascending);
        list.insert(10, 2.0);
        list.insert(11, 2.0);
        list.insert(12, 1.0);
        list.insert(13, 2.0);
        assert_eq!(list.elements(), &[12, 10, 11, 13]);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let mut list = SeedList::new(SortOrder::Ascending);
        list.insert(5, 1.0);
        list.insert(6, 2.0);
        list.insert(5, 3.0);
        assert_eq!(list.len(), 3);

        list.remove(5);
        assert_eq!(list.len(), 2);
        assert_eq!(list.elements_with_priorities(), vec![(6, 2.0), (5, 3.0)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = SeedList::new(SortOrder::Ascending);
        list.insert(1, 1.0);
        list.remove(42);
        assert_eq!(list.elements(), &[1]);

        let mut empty = SeedList::new(SortOrder::Descending);
        empty.remove(0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_reinsert_updates_priority() {
        let mut list = SeedList::new(SortOrder::Ascending);
        list.insert(1, 4.0);
        list.insert(2, 2.0);
        list.insert(3, 3.0);

        list.remove(1);
        list.insert(1, 1.0);
        assert_eq!(list.elements(), &[1, 2, 3]);
        assert!(is_sorted(list.priorities(), SortOrder::Ascending));
    }

    #[test]
    fn test_priority_accessors() {
        let list =
            SeedList::with_elements(&[8, 9], &[0.5, 0.25], SortOrder::Ascending).unwrap();
        assert_eq!(list.element_priority(0), Some(0.25));
        assert_eq!(list.element_priority(1), Some(0.5));
        assert_eq!(list.element_priority(2), None);
        assert_eq!(list.order(), SortOrder::Ascending);
    }

    #[test]
    fn test_interleaved_inserts_and_removals_stay_sorted_and_stable() {
        // Ids are handed out in insertion order, so among equal priorities
        // the earlier insert must hold the smaller id.
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let mut state: u64 = 12345;
            let mut next = move |bound: u64| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 33) % bound
            };

            let mut list = SeedList::new(order);
            let mut next_id = 0usize;
            for _ in 0..500 {
                if list.is_empty() || next(3) > 0 {
                    list.insert(next_id, next(5) as f64);
                    next_id += 1;
                } else {
                    let before = list.len();
                    let id = list.elements()[next(before as u64) as usize];
                    list.remove(id);
                    assert_eq!(list.len(), before - 1);
                    assert!(!list.elements().contains(&id));
                }

                assert!(is_sorted(list.priorities(), order));
                for (a, b) in list
                    .elements_with_priorities()
                    .windows(2)
                    .map(|w| (w[0], w[1]))
                {
                    if a.1 == b.1 {
                        assert!(a.0 < b.0, "tie {:?} placed before {:?}", a, b);
                    }
                }
            }
        }
    }
}
