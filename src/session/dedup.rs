use std::collections::{HashSet, VecDeque};

use crate::types::TelemetryEvent;

/// Outcome of offering an event to the deduplicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Event carried the "no valid reading" identifier.
    Sentinel,
    /// Identifier is still in the recent window.
    Duplicate,
}

/// Bounded set of recently accepted event identifiers.
///
/// Membership lives in `seen`, arrival order in `order`. Both always hold the
/// same identifiers, so eviction takes the front of `order` and is independent
/// of hash iteration order.
#[derive(Debug)]
pub struct EventDeduplicator {
    seen: HashSet<i64>,
    order: VecDeque<i64>,
    capacity: usize,
}

impl EventDeduplicator {
    pub fn new(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Records the event's id unless it is the sentinel or already present.
    pub fn admit(&mut self, event: &TelemetryEvent) -> Admission {
        if event.is_sentinel() {
            return Admission::Sentinel;
        }
        if !self.seen.insert(event.id) {
            return Admission::Duplicate;
        }
        self.order.push_back(event.id);

        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        Admission::Accepted
    }

    pub fn accept(&mut self, event: &TelemetryEvent) -> bool {
        self.admit(event) == Admission::Accepted
    }

    pub fn contains(&self, id: i64) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Accepted identifiers, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(id: i64) -> TelemetryEvent {
        TelemetryEvent::new(id, "HARDWARE", 0.1, -0.1, 0.14, false, "00:00:00:000")
    }

    #[test]
    fn fresh_id_is_accepted_once() {
        let mut dedup = EventDeduplicator::new(50);
        assert!(dedup.accept(&event(7)));
        assert_eq!(dedup.len(), 1);
        assert!(dedup.contains(7));

        assert_eq!(dedup.admit(&event(7)), Admission::Duplicate);
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn sentinel_is_never_stored() {
        let mut dedup = EventDeduplicator::new(50);
        assert_eq!(dedup.admit(&event(-1)), Admission::Sentinel);
        assert!(dedup.is_empty());
        assert!(!dedup.contains(-1));
    }

    #[test]
    fn oldest_id_is_evicted_past_capacity() {
        let mut dedup = EventDeduplicator::new(50);
        for id in 1..=51 {
            assert!(dedup.accept(&event(id)));
        }

        assert_eq!(dedup.len(), 50);
        assert!(!dedup.contains(1));
        assert!(dedup.contains(2));
        assert!(dedup.contains(51));
    }

    #[test]
    fn eviction_follows_arrival_not_numeric_order() {
        let mut dedup = EventDeduplicator::new(3);
        for id in [30, 10, 20, 5] {
            dedup.accept(&event(id));
        }

        assert_eq!(dedup.ids().collect::<Vec<_>>(), vec![10, 20, 5]);
        assert!(!dedup.contains(30));
    }

    #[test]
    fn evicted_id_can_be_accepted_again() {
        let mut dedup = EventDeduplicator::new(2);
        dedup.accept(&event(1));
        dedup.accept(&event(2));
        dedup.accept(&event(3));

        assert!(dedup.accept(&event(1)));
        assert_eq!(dedup.ids().collect::<Vec<_>>(), vec![3, 1]);
    }

    proptest! {
        #[test]
        fn sentinel_rejected_after_any_history(ids in proptest::collection::vec(0i64..500, 0..120)) {
            let mut dedup = EventDeduplicator::new(50);
            for id in &ids {
                dedup.accept(&event(*id));
            }
            let before: Vec<i64> = dedup.ids().collect();

            prop_assert!(!dedup.accept(&event(-1)));
            prop_assert_eq!(dedup.ids().collect::<Vec<_>>(), before);
        }

        #[test]
        fn size_never_exceeds_capacity(ids in proptest::collection::vec(-5i64..1000, 0..300), capacity in 1usize..64) {
            let mut dedup = EventDeduplicator::new(capacity);
            for id in ids {
                dedup.accept(&event(id));
                prop_assert!(dedup.len() <= capacity);
                prop_assert_eq!(dedup.len(), dedup.seen.len());
            }
        }
    }
}
