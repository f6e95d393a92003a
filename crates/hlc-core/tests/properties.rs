use hlc_core::{Clock, ClockState, ManualClock, NodeId, Timestamp};
use proptest::prelude::*;

fn node_id() -> impl Strategy<Value = NodeId> {
    "[A-Za-z0-9_.-]{1,16}".prop_map(|s| NodeId::new(s).unwrap())
}

fn timestamp() -> impl Strategy<Value = Timestamp> {
    (any::<u64>(), any::<u16>(), node_id())
        .prop_map(|(physical, logical, node)| Timestamp::new(physical, logical, node))
}

/// One step against a clock: move the wall clock, then tick or merge.
#[derive(Debug, Clone)]
enum Step {
    Tick { now: u64 },
    Update { now: u64, remote_physical: u64, remote_logical: u16 },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1_000u64..1_100).prop_map(|now| Step::Tick { now }),
        (1_000u64..1_100, 1_000u64..1_100, 0u16..1_000).prop_map(
            |(now, remote_physical, remote_logical)| Step::Update {
                now,
                remote_physical,
                remote_logical,
            }
        ),
    ]
}

proptest! {
    /// Each returned timestamp orders after the previous one, whatever the wall clock does.
    #[test]
    fn prop_clock_is_monotonic(steps in prop::collection::vec(step(), 1..200)) {
        let source = ManualClock::new(1_000);
        let mut clock = Clock::with_source(NodeId::new("local").unwrap(), source.clone());
        let mut last = clock.current();

        for step in steps {
            let next = match step {
                Step::Tick { now } => {
                    source.set(now);
                    clock.tick()
                }
                Step::Update { now, remote_physical, remote_logical } => {
                    source.set(now);
                    let remote = Timestamp::new(
                        remote_physical,
                        remote_logical,
                        NodeId::new("remote").unwrap(),
                    );
                    let merged = clock.update(&remote);
                    prop_assert!(merged.happens_after(&remote));
                    merged
                }
            };
            prop_assert!(next.happens_after(&last), "{} !> {}", next, last);
            last = next;
        }
    }

    /// A clock that observed a peer's timestamp stamps the receive event after it.
    #[test]
    fn prop_update_preserves_causality(
        a_state in (1_000u64..2_000, 0u16..60_000),
        b_state in (1_000u64..2_000, 0u16..60_000),
        a_now in 1_000u64..2_000,
        b_now in 1_000u64..2_000,
    ) {
        let mut a = Clock::from_state_with_source(
            ClockState { physical_time: a_state.0, logical_time: a_state.1, node_id: NodeId::new("A").unwrap() },
            ManualClock::new(a_now),
        );
        let mut b = Clock::from_state_with_source(
            ClockState { physical_time: b_state.0, logical_time: b_state.1, node_id: NodeId::new("B").unwrap() },
            ManualClock::new(b_now),
        );

        let sent = a.tick();
        let received = b.update(&sent);
        prop_assert!(received.happens_after(&sent));
        prop_assert_eq!(received.node_id.as_str(), "B");
    }

    /// Distinct timestamps are ordered exactly one way and never concurrent.
    #[test]
    fn prop_total_order(a in timestamp(), b in timestamp()) {
        prop_assert!(!a.is_concurrent_with(&b));
        if a == b {
            prop_assert!(!a.happens_before(&b) && !a.happens_after(&b));
        } else {
            prop_assert!(a.happens_before(&b) ^ a.happens_after(&b));
            prop_assert_eq!(a.happens_before(&b), b.happens_after(&a));
        }
    }

    #[test]
    fn prop_string_roundtrip(t in timestamp()) {
        prop_assert_eq!(Timestamp::decode(&t.encode()).unwrap(), t);
    }

    #[test]
    fn prop_record_roundtrip(t in timestamp()) {
        prop_assert_eq!(Timestamp::from_record(&t.to_record()).unwrap(), t);
    }

    /// Arbitrary text either decodes to a timestamp that re-encodes identically, or fails.
    #[test]
    fn prop_decode_never_yields_partial_timestamps(s in "[0-9a-z:+-]{0,24}") {
        if let Ok(t) = Timestamp::decode(&s) {
            let reencoded = t.encode();
            prop_assert_eq!(Timestamp::decode(&reencoded).unwrap(), t);
            prop_assert_eq!(s.matches(':').count(), 2);
        }
    }
}
