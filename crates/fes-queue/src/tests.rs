//! Unit and property tests for fes-queue.

use fes_core::{EventId, EventQueue, VirtualTime};

use crate::{HeapEventQueue, SortedSetEventQueue, TwoTierEventQueue};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Id = EventId;

fn t(v: f64) -> VirtualTime {
    VirtualTime::new(v)
}

fn ev(n: u64) -> Id {
    EventId(n)
}

fn heap() -> HeapEventQueue<Id, VirtualTime> {
    HeapEventQueue::new()
}

fn sorted() -> SortedSetEventQueue<Id, VirtualTime> {
    SortedSetEventQueue::new()
}

fn two_tier(threshold: usize) -> TwoTierEventQueue<Id, VirtualTime> {
    TwoTierEventQueue::new(threshold).unwrap()
}

/// Run `check` against a fresh instance of every strategy.
fn for_each_strategy(check: impl Fn(&mut dyn EventQueue<Id, VirtualTime>)) {
    check(&mut heap());
    check(&mut sorted());
    check(&mut two_tier(2));
    check(&mut two_tier(100));
}

fn sorted_vec(mut v: Vec<Id>) -> Vec<Id> {
    v.sort();
    v
}

// ── Contract, every strategy ──────────────────────────────────────────────────

#[cfg(test)]
mod contract {
    use fes_core::QueueError;

    use super::*;

    #[test]
    fn bulk_extract_scenario() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(5.0)).unwrap(); // A
            q.enqueue(ev(1), t(2.0)).unwrap(); // B
            q.enqueue(ev(2), t(2.0)).unwrap(); // C
            q.enqueue(ev(3), t(9.0)).unwrap(); // D

            assert_eq!(q.get_min(), Some(t(2.0)), "{}", q.name());
            assert_eq!(sorted_vec(q.dequeue_all()), vec![ev(1), ev(2)], "{}", q.name());
            assert_eq!(q.len(), 2);
            assert_eq!(q.get_min(), Some(t(5.0)), "{}", q.name());
            assert_eq!(q.get_time(&ev(0)), Some(t(5.0)));
            assert_eq!(q.get_time(&ev(3)), Some(t(9.0)));
        });
    }

    #[test]
    fn round_trip_by_reference() {
        for_each_strategy(|q| {
            q.enqueue(ev(7), t(3.25)).unwrap();
            assert_eq!(q.dequeue_event(&ev(7)), Some(t(3.25)), "{}", q.name());
            assert_eq!(q.get_time(&ev(7)), None);
            assert_eq!(q.dequeue_event(&ev(7)), None);
            assert!(q.is_empty());
        });
    }

    #[test]
    fn empty_queue() {
        for_each_strategy(|q| {
            assert_eq!(q.get_min(), None);
            assert!(q.dequeue().is_none());
            assert!(q.dequeue_all().is_empty());
            assert!(q.dequeue_all_at(t(1.0)).is_empty());
            assert_eq!(q.len(), 0);
        });
    }

    #[test]
    fn dequeue_returns_ascending_times() {
        for_each_strategy(|q| {
            let times = [8.0, 1.0, 4.0, 4.0, 0.0, 12.5, 3.0, 7.0, 1.0];
            for (i, &time) in times.iter().enumerate() {
                q.enqueue(ev(i as u64), t(time)).unwrap();
            }
            let mut out = Vec::new();
            while let Some(entry) = q.dequeue() {
                assert_eq!(q.get_time(entry.event()), None);
                out.push(entry.time().as_f64());
            }
            let mut expected = times.to_vec();
            expected.sort_by(f64::total_cmp);
            assert_eq!(out, expected, "{}", q.name());
        });
    }

    #[test]
    fn dequeue_all_leaves_strictly_greater_min() {
        for_each_strategy(|q| {
            for i in 0..20u64 {
                q.enqueue(ev(i), t((i % 4) as f64)).unwrap();
            }
            while let Some(min) = q.get_min() {
                let before = q.len();
                let batch = q.dequeue_all();
                assert_eq!(batch.len(), 5);
                assert_eq!(q.len(), before - 5);
                if let Some(next) = q.get_min() {
                    assert!(next > min, "{}", q.name());
                }
            }
        });
    }

    #[test]
    fn dequeue_all_at_arbitrary_time() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(1.0)).unwrap();
            q.enqueue(ev(1), t(6.0)).unwrap();
            q.enqueue(ev(2), t(6.0)).unwrap();
            q.enqueue(ev(3), t(9.0)).unwrap();
            assert_eq!(sorted_vec(q.dequeue_all_at(t(6.0))), vec![ev(1), ev(2)], "{}", q.name());
            assert!(q.dequeue_all_at(t(6.0)).is_empty());
            assert!(q.dequeue_all_at(t(2.0)).is_empty());
            assert_eq!(q.len(), 2);
            assert_eq!(q.get_min(), Some(t(1.0)));
            assert_eq!(q.get_time(&ev(3)), Some(t(9.0)));
        });
    }

    #[test]
    fn requeue_equals_remove_then_enqueue() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(5.0)).unwrap();
            q.enqueue(ev(1), t(3.0)).unwrap();
            assert_eq!(q.requeue(ev(0), t(1.0)).unwrap(), Some(t(5.0)));
            assert_eq!(q.get_time(&ev(0)), Some(t(1.0)));
            assert_eq!(q.len(), 2);
            assert_eq!(q.get_min(), Some(t(1.0)), "{}", q.name());

            assert_eq!(q.requeue(ev(0), t(10.0)).unwrap(), Some(t(1.0)));
            assert_eq!(q.get_min(), Some(t(3.0)), "{}", q.name());

            assert_eq!(q.requeue(ev(42), t(2.0)).unwrap(), None);
            assert_eq!(q.len(), 2);
        });
    }

    #[test]
    fn requeue_from_uses_known_old_time() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(5.0)).unwrap();
            assert_eq!(q.requeue_from(ev(0), t(4.0), t(1.0)).unwrap(), None);
            assert_eq!(q.get_time(&ev(0)), Some(t(5.0)));
            assert_eq!(q.requeue_from(ev(0), t(5.0), t(1.0)).unwrap(), Some(t(5.0)));
            assert_eq!(q.get_min(), Some(t(1.0)));
        });
    }

    #[test]
    fn negative_and_nan_times_are_rejected() {
        for_each_strategy(|q| {
            assert!(matches!(q.enqueue(ev(0), t(-1.0)), Err(QueueError::InvalidTime(_))));
            assert!(matches!(q.enqueue(ev(1), t(f64::NAN)), Err(QueueError::InvalidTime(_))));
            assert!(q.is_empty(), "{}", q.name());
            assert_eq!(q.get_time(&ev(0)), None);

            q.enqueue(ev(2), t(4.0)).unwrap();
            assert!(q.requeue(ev(2), t(-3.0)).is_err());
            assert_eq!(q.get_time(&ev(2)), Some(t(4.0)));
        });
    }

    #[test]
    fn zero_time_is_valid() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(-0.0)).unwrap();
            assert_eq!(q.get_min(), Some(VirtualTime::ZERO));
        });
    }

    #[test]
    fn duplicate_enqueue_is_rejected() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(1.0)).unwrap();
            assert!(matches!(q.enqueue(ev(0), t(2.0)), Err(QueueError::DuplicateEvent(_))));
            assert_eq!(q.len(), 1);
            assert_eq!(q.get_time(&ev(0)), Some(t(1.0)));
        });
    }

    #[test]
    fn infinite_time_is_parked() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), VirtualTime::INFINITY).unwrap();
            q.enqueue(ev(1), t(2.0)).unwrap();
            assert_eq!(q.len(), 2);
            assert_eq!(q.get_time(&ev(0)), Some(VirtualTime::INFINITY));

            assert_eq!(q.dequeue().map(|e| *e.event()), Some(ev(1)));
            // Only the parked event remains: nothing is extractable.
            assert_eq!(q.get_min(), None, "{}", q.name());
            assert!(q.dequeue().is_none());
            assert!(q.dequeue_all().is_empty());
            assert!(q.dequeue_all_at(VirtualTime::INFINITY).is_empty());
            assert_eq!(q.len(), 1);
            assert!(!q.is_empty());

            assert_eq!(q.dequeue_event(&ev(0)), Some(VirtualTime::INFINITY));
            assert!(q.is_empty());
        });
    }

    #[test]
    fn requeue_out_of_and_into_parking() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), VirtualTime::INFINITY).unwrap();
            assert_eq!(q.requeue(ev(0), t(3.0)).unwrap(), Some(VirtualTime::INFINITY));
            assert_eq!(q.get_min(), Some(t(3.0)), "{}", q.name());

            assert_eq!(q.requeue(ev(0), VirtualTime::INFINITY).unwrap(), Some(t(3.0)));
            assert_eq!(q.get_min(), None);
            assert_eq!(q.len(), 1);
        });
    }

    #[test]
    fn size_hint_below_len_is_capacity_error() {
        for_each_strategy(|q| {
            for i in 0..3 {
                q.enqueue(ev(i), t(1.0)).unwrap();
            }
            assert_eq!(q.set_size_hint(2), Err(QueueError::Capacity { hint: 2, len: 3 }));
            assert_eq!(q.len(), 3);
            assert!(q.set_size_hint(3).is_ok());
            assert!(q.set_size_hint(1_000).is_ok());
        });
    }

    #[test]
    fn clear_empties_everything() {
        for_each_strategy(|q| {
            q.enqueue(ev(0), t(1.0)).unwrap();
            q.enqueue(ev(1), VirtualTime::INFINITY).unwrap();
            q.clear();
            assert!(q.is_empty());
            assert_eq!(q.get_min(), None);
            q.enqueue(ev(0), t(4.0)).unwrap();
            assert_eq!(q.get_min(), Some(t(4.0)));
        });
    }
}

// ── HeapEventQueue ────────────────────────────────────────────────────────────

#[cfg(test)]
mod heap_queue {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn index_survives_random_workload() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut q = heap();
        let mut next = 0u64;
        for _ in 0..2_000 {
            match rng.gen_range(0..4) {
                0 | 1 => {
                    q.enqueue(ev(next), t(rng.gen_range(0..50) as f64)).unwrap();
                    next += 1;
                }
                2 => {
                    q.dequeue();
                }
                _ => {
                    let target = ev(rng.gen_range(0..next.max(1)));
                    let _ = q.requeue(target, t(rng.gen_range(0..50) as f64));
                }
            }
            q.assert_invariants();
        }
    }

    #[test]
    fn requeue_in_place_both_directions() {
        let mut q = heap();
        for i in 0..10 {
            q.enqueue(ev(i), t(i as f64 * 10.0)).unwrap();
        }
        q.requeue(ev(9), t(0.5)).unwrap();
        q.assert_invariants();
        assert_eq!(q.dequeue().map(|e| e.time()), Some(t(0.0)));
        assert_eq!(q.dequeue().map(|e| *e.event()), Some(ev(9)));

        q.requeue(ev(1), t(1_000.0)).unwrap();
        q.assert_invariants();
        assert_eq!(q.get_min(), Some(t(20.0)));
    }

    #[test]
    fn ties_pop_smallest_event_first() {
        let mut q = heap();
        for i in [5, 3, 9, 1] {
            q.enqueue(ev(i), t(2.0)).unwrap();
        }
        assert_eq!(q.dequeue().map(|e| *e.event()), Some(ev(1)));
        assert_eq!(q.dequeue().map(|e| *e.event()), Some(ev(3)));
    }

    #[test]
    fn parked_events_counted_separately() {
        let mut q = heap();
        q.enqueue(ev(0), VirtualTime::INFINITY).unwrap();
        q.enqueue(ev(1), t(1.0)).unwrap();
        assert_eq!(q.parked_len(), 1);
        assert_eq!(q.len(), 2);
        q.assert_invariants();
    }
}

// ── SortedSetEventQueue ───────────────────────────────────────────────────────

#[cfg(test)]
mod sorted_set_queue {
    use super::*;

    #[test]
    fn many_events_share_one_timestamp() {
        let mut q = sorted();
        for i in 0..1_000 {
            q.enqueue(ev(i), t(3.0)).unwrap();
        }
        q.enqueue(ev(5_000), t(1.0)).unwrap();
        assert_eq!(q.len(), 1_001);
        q.assert_invariants();

        assert_eq!(q.dequeue_all(), vec![ev(5_000)]);
        let batch = q.dequeue_all();
        assert_eq!(batch.len(), 1_000);
        // Ascending walk yields events in tie-break order.
        assert!(batch.windows(2).all(|w| w[0] < w[1]));
        assert!(q.is_empty());
    }

    #[test]
    fn iter_is_time_ordered_and_skips_parked() {
        let mut q = sorted();
        q.enqueue(ev(0), t(4.0)).unwrap();
        q.enqueue(ev(1), VirtualTime::INFINITY).unwrap();
        q.enqueue(ev(2), t(1.0)).unwrap();
        let times: Vec<_> = q.iter().map(|e| e.time()).collect();
        assert_eq!(times, vec![t(1.0), t(4.0)]);
    }

    #[test]
    fn probe_does_not_match_neighbouring_times() {
        let mut q = sorted();
        q.enqueue(ev(0), t(1.0)).unwrap();
        q.enqueue(ev(1), t(2.0)).unwrap();
        q.enqueue(ev(2), t(3.0)).unwrap();
        assert_eq!(q.dequeue_all_at(t(2.0)), vec![ev(1)]);
        q.assert_invariants();
        assert_eq!(q.len(), 2);
    }
}

// ── TwoTierEventQueue ─────────────────────────────────────────────────────────

#[cfg(test)]
mod two_tier_queue {
    use fes_core::{QueueConfig, QueueError, QueueKind};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn near_far_split_and_single_refill() {
        let mut q = two_tier(2);
        for i in 1..=5u64 {
            q.enqueue(ev(i), t(i as f64)).unwrap();
        }
        assert_eq!(q.near_times(), vec![t(1.0), t(2.0)]);
        assert_eq!(q.far_times(), vec![t(3.0), t(4.0), t(5.0)]);
        q.assert_invariants();

        let popped: Vec<f64> = (0..4)
            .map(|_| q.dequeue().map(|e| e.time().as_f64()).unwrap())
            .collect();
        assert_eq!(popped, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(q.refill_count(), 1);
        assert_eq!(q.len(), 1);
        q.assert_invariants();
    }

    #[test]
    fn full_near_evicts_max_bucket() {
        let mut q = two_tier(2);
        q.enqueue(ev(0), t(2.0)).unwrap();
        q.enqueue(ev(1), t(8.0)).unwrap();
        q.enqueue(ev(2), t(8.0)).unwrap();
        // Near is full {2, 8}; 5 < max_near so the 8-bucket is evicted.
        q.enqueue(ev(3), t(5.0)).unwrap();
        assert_eq!(q.near_times(), vec![t(2.0), t(5.0)]);
        assert_eq!(q.far_times(), vec![t(8.0)]);
        q.assert_invariants();

        // Above the advisory far bound: straight to far.
        q.enqueue(ev(4), t(9.0)).unwrap();
        assert_eq!(q.far_times(), vec![t(8.0), t(9.0)]);
        q.assert_invariants();

        assert_eq!(sorted_vec(q.dequeue_all_at(t(8.0))), vec![ev(1), ev(2)]);
        q.assert_invariants();
    }

    #[test]
    fn full_near_routes_later_time_to_far() {
        let mut q = two_tier(2);
        q.enqueue(ev(0), t(1.0)).unwrap();
        q.enqueue(ev(1), t(2.0)).unwrap();
        q.enqueue(ev(2), t(7.0)).unwrap();
        assert_eq!(q.near_times(), vec![t(1.0), t(2.0)]);
        assert_eq!(q.far_times(), vec![t(7.0)]);
        // Below max_near with near full: the max bucket is evicted.
        q.enqueue(ev(3), t(1.5)).unwrap();
        assert_eq!(q.near_times(), vec![t(1.0), t(1.5)]);
        assert_eq!(q.far_times(), vec![t(2.0), t(7.0)]);
        q.assert_invariants();
        // Above max_near but below the far bound, near still full: far.
        q.enqueue(ev(4), t(1.8)).unwrap();
        assert_eq!(q.near_times(), vec![t(1.0), t(1.5)]);
        assert_eq!(q.far_times(), vec![t(1.8), t(2.0), t(7.0)]);
        q.assert_invariants();
        assert_eq!(q.dequeue().map(|e| e.time()), Some(t(1.0)));
        assert_eq!(q.dequeue().map(|e| e.time()), Some(t(1.5)));
        assert_eq!(q.get_min(), Some(t(1.8)));
    }

    #[test]
    fn removing_max_near_bucket_recomputes_bound() {
        let mut q = two_tier(4);
        for (i, time) in [1.0, 3.0, 6.0].into_iter().enumerate() {
            q.enqueue(ev(i as u64), t(time)).unwrap();
        }
        assert_eq!(q.dequeue_event(&ev(2)), Some(t(6.0)));
        q.assert_invariants();
        q.enqueue(ev(9), t(4.0)).unwrap();
        assert_eq!(q.near_times(), vec![t(1.0), t(3.0), t(4.0)]);
        q.assert_invariants();
    }

    #[test]
    fn threshold_one_moves_one_bucket_per_refill() {
        let mut q = two_tier(1);
        assert_eq!(q.move_buckets(), 0);
        for i in 0..4u64 {
            q.enqueue(ev(i), t(i as f64)).unwrap();
        }
        for i in 0..4u64 {
            assert_eq!(q.dequeue().map(|e| *e.event()), Some(ev(i)));
            q.assert_invariants();
        }
        assert_eq!(q.refill_count(), 3);
    }

    #[test]
    fn invalid_parameters_are_config_errors() {
        assert!(matches!(
            TwoTierEventQueue::<Id, VirtualTime>::new(0),
            Err(QueueError::Config(_))
        ));
        assert!(TwoTierEventQueue::<Id, VirtualTime>::with_move_buckets(4, 4).is_err());
        let q = TwoTierEventQueue::<Id, VirtualTime>::with_move_buckets(4, 3).unwrap();
        assert_eq!(q.threshold(), 4);

        let cfg = QueueConfig { threshold: 8, ..QueueConfig::for_kind(QueueKind::TwoTier) };
        let q = TwoTierEventQueue::<Id, VirtualTime>::from_config(&cfg).unwrap();
        assert_eq!(q.move_buckets(), 4);
    }

    #[test]
    fn invariants_hold_under_random_workload() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut q = two_tier(6);
        let mut next = 0u64;
        let mut now = 0.0f64;
        for _ in 0..5_000 {
            match rng.gen_range(0..6) {
                0..=2 => {
                    let delay = rng.gen_range(0..30) as f64;
                    q.enqueue(ev(next), t(now + delay)).unwrap();
                    next += 1;
                }
                3 => {
                    if let Some(entry) = q.dequeue() {
                        assert!(entry.time().as_f64() >= now);
                        now = entry.time().as_f64();
                    }
                }
                4 => {
                    q.dequeue_event(&ev(rng.gen_range(0..next.max(1))));
                }
                _ => {
                    let target = ev(rng.gen_range(0..next.max(1)));
                    let _ = q.requeue(target, t(now + rng.gen_range(0..30) as f64));
                }
            }
            q.assert_invariants();
        }
    }
}

// ── Strategy selection ────────────────────────────────────────────────────────

#[cfg(test)]
mod select {
    use fes_core::{QueueConfig, QueueKind};

    use crate::{build_queue, resolve_kind};

    use super::*;

    #[test]
    fn default_picks_highest_efficiency() {
        let cfg = QueueConfig::default();
        assert_eq!(resolve_kind(&cfg), QueueKind::TwoTier);
        let q = build_queue::<Id, VirtualTime>(&cfg).unwrap();
        assert_eq!(q.name(), "two_tier");
    }

    #[test]
    fn explicit_kind_wins() {
        for kind in QueueKind::ALL {
            let q = build_queue::<Id, VirtualTime>(&QueueConfig::for_kind(kind)).unwrap();
            assert_eq!(q.name(), kind.as_str());
        }
    }

    #[test]
    fn invalid_two_tier_config_fails() {
        let cfg = QueueConfig { threshold: 0, ..QueueConfig::for_kind(QueueKind::TwoTier) };
        assert!(build_queue::<Id, VirtualTime>(&cfg).is_err());
        // Two-tier parameters are irrelevant to other strategies.
        let heap_cfg = QueueConfig { threshold: 0, ..QueueConfig::for_kind(QueueKind::Heap) };
        assert!(build_queue::<Id, VirtualTime>(&heap_cfg).is_ok());
    }

    #[test]
    fn built_queue_is_usable() {
        let cfg = QueueConfig { capacity_hint: Some(64), ..QueueConfig::default() };
        let mut q = build_queue::<Id, VirtualTime>(&cfg).unwrap();
        q.enqueue(ev(0), t(1.0)).unwrap();
        assert_eq!(q.get_min(), Some(t(1.0)));
    }
}

// ── Cross-strategy equivalence ────────────────────────────────────────────────

#[cfg(test)]
mod proptests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        Enqueue(u64),
        Dequeue,
        DequeueAll,
        DequeueAllAt(usize),
        Remove(usize),
        Requeue(usize, u64),
        GetMin,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u64..40).prop_map(Op::Enqueue),
            2 => Just(Op::Dequeue),
            1 => Just(Op::DequeueAll),
            1 => any::<usize>().prop_map(Op::DequeueAllAt),
            1 => any::<usize>().prop_map(Op::Remove),
            1 => (any::<usize>(), 0u64..40).prop_map(|(k, s)| Op::Requeue(k, s)),
            1 => Just(Op::GetMin),
        ]
    }

    /// Integer times unique per event: `slot * 1024 + id`.
    fn unique_time(slot: u64, id: u64) -> u64 {
        slot * 1024 + id
    }

    /// Apply `ops`, checking against a `BTreeMap` oracle, and return the
    /// observation trace.
    fn run_unique<Q: EventQueue<Id, u64>>(
        q: &mut Q,
        ops: &[Op],
        check: impl Fn(&Q),
    ) -> Vec<String> {
        let mut model: BTreeMap<Id, u64> = BTreeMap::new();
        let mut next = 0u64;
        let mut trace = Vec::new();
        let pick = |model: &BTreeMap<Id, u64>, k: usize| {
            model.keys().nth(k % model.len().max(1)).copied()
        };

        for op in ops {
            match op {
                Op::Enqueue(slot) => {
                    let time = unique_time(*slot, next);
                    q.enqueue(ev(next), time).unwrap();
                    model.insert(ev(next), time);
                    next += 1;
                }
                Op::Dequeue => {
                    let got = q.dequeue().map(|e| e.into_parts());
                    if let Some((e, time)) = got {
                        assert_eq!(model.remove(&e), Some(time));
                    }
                    trace.push(format!("dequeue {got:?}"));
                }
                Op::DequeueAll => {
                    let got = sorted_vec(q.dequeue_all());
                    for e in &got {
                        model.remove(e);
                    }
                    trace.push(format!("all {got:?}"));
                }
                Op::DequeueAllAt(k) => {
                    let time = pick(&model, *k).map_or(7, |e| model[&e]);
                    let got = sorted_vec(q.dequeue_all_at(time));
                    for e in &got {
                        model.remove(e);
                    }
                    trace.push(format!("at {time} {got:?}"));
                }
                Op::Remove(k) => {
                    if let Some(e) = pick(&model, *k) {
                        let got = q.dequeue_event(&e);
                        assert_eq!(got, model.remove(&e));
                        trace.push(format!("remove {e} {got:?}"));
                    }
                }
                Op::Requeue(k, slot) => {
                    if let Some(e) = pick(&model, *k) {
                        let time = unique_time(*slot, e.raw());
                        let old = q.requeue(e, time).unwrap();
                        assert_eq!(old, model.insert(e, time));
                        assert_eq!(q.get_time(&e), Some(time));
                    }
                }
                Op::GetMin => {
                    let min = q.get_min();
                    assert_eq!(min, model.values().min().copied());
                    trace.push(format!("min {min:?}"));
                }
            }
            assert_eq!(q.len(), model.len());
            check(&*q);
        }
        trace.push(format!("len {}", q.len()));
        trace
    }

    proptest! {
        #[test]
        fn strategies_agree_on_unique_times(ops in prop::collection::vec(op(), 0..200)) {
            let a = run_unique(&mut HeapEventQueue::<Id, u64>::new(), &ops, |q| q.assert_invariants());
            let b = run_unique(&mut SortedSetEventQueue::<Id, u64>::new(), &ops, |q| q.assert_invariants());
            let c = run_unique(
                &mut TwoTierEventQueue::<Id, u64>::new(3).unwrap(),
                &ops,
                |q| q.assert_invariants(),
            );
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&a, &c);
        }

        #[test]
        fn strategies_agree_on_min_sequence_with_ties(
            ops in prop::collection::vec((0u8..4, 0u8..6), 0..300)
        ) {
            let mut queues: Vec<Box<dyn EventQueue<Id, VirtualTime>>> = vec![
                Box::new(heap()),
                Box::new(sorted()),
                Box::new(two_tier(2)),
                Box::new(two_tier(5)),
            ];
            let mut traces = vec![Vec::new(); queues.len()];
            for (i, q) in queues.iter_mut().enumerate() {
                for (n, &(kind, slot)) in ops.iter().enumerate() {
                    let obs = match kind {
                        0 | 1 => {
                            q.enqueue(ev(n as u64), t(slot as f64)).unwrap();
                            None
                        }
                        2 => Some(q.dequeue().map(|e| e.time())),
                        _ => {
                            let before = q.get_min();
                            let taken = q.dequeue_all().len();
                            Some(before.filter(|_| taken > 0))
                        }
                    };
                    traces[i].push((obs, q.get_min(), q.len()));
                }
            }
            for trace in &traces[1..] {
                prop_assert_eq!(trace, &traces[0]);
            }
        }
    }
}
