//! # Payload Array Tests
//!
//! Tests for the write classes, masked and broadcast addressing, step-boundary
//! commit semantics, the partial-write capture register and bypass, and the
//! collision audit.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use rstation_core::config::SchedConfig;
use rstation_core::station::payload::{MaskedWrite, PartialWrite, PayloadArray};
use rstation_core::stats::SchedStats;
use rstation_core::Selector;

fn config() -> SchedConfig {
    SchedConfig {
        num_entries: 4,
        num_src: 2,
        data_bits: 64,
        num_enq: 1,
        num_deq: 1,
        num_wakeup: 2,
        ..SchedConfig::default()
    }
}

fn array(config: &SchedConfig) -> PayloadArray {
    PayloadArray::new(config).unwrap()
}

fn full_write(width: usize, slot: usize, values: &[u64]) -> MaskedWrite {
    MaskedWrite {
        addr: Selector::one_hot(width, slot),
        mask: vec![true; values.len()],
        data: values.to_vec(),
    }
}

#[test]
fn test_fresh_array_reads_zero() {
    let array = array(&config());
    assert_eq!(array.read(&Selector::one_hot(4, 0)), vec![0, 0]);
    assert_eq!(array.step(), 0);
}

#[test]
fn test_enqueue_visible_after_tick_not_before() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    array.post_enqueue(0, full_write(4, 2, &[0x10, 0x20]), &mut stats);
    // Reads this step still see the previous boundary's state.
    assert_eq!(array.read(&Selector::one_hot(4, 2)), vec![0, 0]);

    array.tick(&mut stats);
    assert_eq!(array.read(&Selector::one_hot(4, 2)), vec![0x10, 0x20]);
    assert_eq!(stats.enqueue_writes, 1);
    assert_eq!(stats.steps, 1);
}

#[rstest]
#[case([true, false], [0xAA, 0], 0)]
#[case([false, true], [0, 0xBB], 1)]
fn test_enqueue_mask_gates_columns(
    #[case] mask: [bool; 2],
    #[case] expected: [u64; 2],
    #[case] written_column: usize,
) {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    let data = [0xAA, 0xBB];
    array.post_enqueue(
        0,
        MaskedWrite {
            addr: Selector::one_hot(4, 1),
            mask: mask.to_vec(),
            data: data.to_vec(),
        },
        &mut stats,
    );
    array.tick(&mut stats);

    let out = array.read(&Selector::one_hot(4, 1));
    assert_eq!(out, expected.to_vec());
    assert_eq!(out[written_column], data[written_column]);
}

#[test]
fn test_wakeup_broadcasts_to_many_slots() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    array.post_wakeup(0, 1, Selector::from_slots(4, &[0, 2, 3]), 0x77, &mut stats);
    array.tick(&mut stats);

    for slot in [0, 2, 3] {
        assert_eq!(array.read(&Selector::one_hot(4, slot)), vec![0, 0x77]);
    }
    assert_eq!(array.read(&Selector::one_hot(4, 1)), vec![0, 0]);
    assert_eq!(stats.wakeup_writes, 1);
}

#[test]
fn test_wakeup_ports_hit_disjoint_columns_without_collision() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    let addr = Selector::one_hot(4, 3);
    array.post_wakeup(0, 0, addr, 0x11, &mut stats);
    array.post_wakeup(1, 1, addr, 0x22, &mut stats);
    array.tick(&mut stats);

    assert_eq!(array.read(&addr), vec![0x11, 0x22]);
    assert!(array.collisions().is_empty());
    assert_eq!(stats.collisions, 0);
}

#[test]
fn test_delayed_commits_at_boundary() {
    let cfg = SchedConfig {
        delayed_src: true,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();

    array.post_delayed(0, full_write(4, 0, &[0x5, 0x6]), &mut stats);
    assert_eq!(array.read(&Selector::one_hot(4, 0)), vec![0, 0]);
    array.tick(&mut stats);
    assert_eq!(array.read(&Selector::one_hot(4, 0)), vec![0x5, 0x6]);
    assert_eq!(stats.delayed_writes, 1);
}

#[test]
fn test_partial_write_bypass_matches_committed_value() {
    let cfg = SchedConfig {
        has_mid_state: true,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();
    let addr = Selector::one_hot(4, 1);

    // Step 0: post the partial. Not yet captured, so no bypass.
    array.post_partial(
        0,
        PartialWrite {
            addr,
            mask: [true, true],
            data: [0xC0, 0xC1],
        },
        &mut stats,
    );
    assert_eq!(array.read(&addr), vec![0, 0]);
    array.tick(&mut stats);

    // Step 1: the captured value commits this step and is bypassed to reads.
    let bypassed = array.read(&addr);
    assert_eq!(bypassed, vec![0xC0, 0xC1]);
    array.tick(&mut stats);

    // Step 2: the committed cell agrees with what the bypass forwarded.
    assert_eq!(array.read(&addr), bypassed);
    assert_eq!(stats.partial_writes, 1);
}

#[test]
fn test_partial_bypass_requires_intersection() {
    let cfg = SchedConfig {
        has_mid_state: true,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();

    array.post_partial(
        0,
        PartialWrite {
            addr: Selector::one_hot(4, 1),
            mask: [true, false],
            data: [0xC0, 0],
        },
        &mut stats,
    );
    array.tick(&mut stats);

    // A read of a different slot must not pick up the registered partial.
    assert_eq!(array.read(&Selector::one_hot(4, 2)), vec![0, 0]);
    // Column 1 was not enabled, so only column 0 forwards.
    assert_eq!(array.read(&Selector::one_hot(4, 1)), vec![0xC0, 0]);
}

#[test]
fn test_partial_bypass_truncates_to_data_bits() {
    let cfg = SchedConfig {
        data_bits: 16,
        has_mid_state: true,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();
    let addr = Selector::one_hot(4, 2);

    array.post_partial(
        0,
        PartialWrite {
            addr,
            mask: [true, true],
            data: [0x12_3456, 0xF_00FF],
        },
        &mut stats,
    );
    array.tick(&mut stats);

    // The forwarded value is already width-limited, exactly like the cell
    // the commit writes this step.
    let bypassed = array.read(&addr);
    assert_eq!(bypassed, vec![0x3456, 0x00FF]);
    array.tick(&mut stats);
    assert_eq!(array.read(&addr), bypassed);
}

#[test]
fn test_partial_bypass_first_matching_port_wins() {
    let cfg = SchedConfig {
        num_deq: 2,
        has_mid_state: true,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();

    array.post_partial(
        0,
        PartialWrite {
            addr: Selector::one_hot(4, 1),
            mask: [true, true],
            data: [0xA0, 0xA1],
        },
        &mut stats,
    );
    array.post_partial(
        1,
        PartialWrite {
            addr: Selector::from_slots(4, &[1, 2]),
            mask: [true, true],
            data: [0xB0, 0xB1],
        },
        &mut stats,
    );
    array.tick(&mut stats);

    // Both registered partials match slot 1; the lowest port forwards.
    assert_eq!(array.read(&Selector::one_hot(4, 1)), vec![0xA0, 0xA1]);
    // Slot 2 only matches port 1's selector.
    assert_eq!(array.read(&Selector::one_hot(4, 2)), vec![0xB0, 0xB1]);
}

#[test]
fn test_partial_register_clears_after_one_step() {
    let cfg = SchedConfig {
        has_mid_state: true,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();
    let addr = Selector::one_hot(4, 0);

    array.post_partial(
        0,
        PartialWrite {
            addr,
            mask: [true, true],
            data: [0x1, 0x2],
        },
        &mut stats,
    );
    array.tick(&mut stats);
    array.tick(&mut stats);

    // Two steps later a fresh enqueue to the same slot must win the read;
    // the stale capture register no longer forwards anything.
    array.post_enqueue(0, full_write(4, 0, &[0x9, 0xA]), &mut stats);
    array.tick(&mut stats);
    assert_eq!(array.read(&addr), vec![0x9, 0xA]);
}

#[test]
fn test_enqueue_and_wakeup_collide() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();
    let addr = Selector::one_hot(4, 2);

    array.post_enqueue(0, full_write(4, 2, &[0x10, 0x20]), &mut stats);
    array.post_wakeup(0, 0, addr, 0x99, &mut stats);
    array.tick(&mut stats);

    let events = array.collisions();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].column, 0);
    assert_eq!(events[0].slot, 2);
    assert_eq!(events[0].step, 0);
    assert_eq!(stats.collisions, 1);

    // Column 1 had a single writer; its value is well defined.
    assert_eq!(array.read(&addr)[1], 0x20);
}

#[test]
fn test_disjoint_writers_do_not_collide() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    array.post_enqueue(0, full_write(4, 0, &[1, 2]), &mut stats);
    array.post_wakeup(0, 0, Selector::one_hot(4, 3), 0x99, &mut stats);
    array.tick(&mut stats);

    assert!(array.collisions().is_empty());
    assert_eq!(array.read(&Selector::one_hot(4, 0)), vec![1, 2]);
    assert_eq!(array.read(&Selector::one_hot(4, 3)), vec![0x99, 0]);
}

#[test]
fn test_collision_step_tracks_current_step() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();
    let addr = Selector::one_hot(4, 1);

    array.tick(&mut stats);
    array.tick(&mut stats);

    array.post_wakeup(0, 1, addr, 0xA, &mut stats);
    array.post_wakeup(1, 1, addr, 0xB, &mut stats);
    array.tick(&mut stats);

    let events = array.collisions();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].column, 1);
    assert_eq!(events[0].step, 2);
}

#[test]
fn test_broadcast_collision_reports_every_clashing_slot() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    array.post_wakeup(0, 0, Selector::from_slots(4, &[0, 1, 2]), 0xA, &mut stats);
    array.post_wakeup(1, 0, Selector::from_slots(4, &[1, 2, 3]), 0xB, &mut stats);
    array.tick(&mut stats);

    let slots: Vec<usize> = array.collisions().iter().map(|e| e.slot).collect();
    assert_eq!(slots, vec![1, 2]);
    assert_eq!(stats.collisions, 2);
}

#[test]
fn test_data_bits_truncate_committed_values() {
    let cfg = SchedConfig {
        data_bits: 16,
        ..config()
    };
    let mut array = array(&cfg);
    let mut stats = SchedStats::new();

    array.post_enqueue(0, full_write(4, 0, &[0x12_3456, 0xFFFF_FFFF]), &mut stats);
    array.tick(&mut stats);

    assert_eq!(array.read(&Selector::one_hot(4, 0)), vec![0x3456, 0xFFFF]);
}

#[test]
fn test_last_value_survives_across_steps() {
    let mut array = array(&config());
    let mut stats = SchedStats::new();

    array.post_enqueue(0, full_write(4, 3, &[7, 8]), &mut stats);
    array.tick(&mut stats);
    for _ in 0..5 {
        array.tick(&mut stats);
    }
    assert_eq!(array.read(&Selector::one_hot(4, 3)), vec![7, 8]);
}

proptest! {
    /// A single-writer enqueue followed by a boundary always reads back
    /// the written values, truncated to the configured width.
    #[test]
    fn prop_write_then_read(slot in 0usize..16, v0: u64, v1: u64, bits in 1u32..=64) {
        let cfg = SchedConfig {
            num_entries: 16,
            data_bits: bits,
            ..config()
        };
        let mut array = PayloadArray::new(&cfg).unwrap();
        let mut stats = SchedStats::new();
        let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };

        array.post_enqueue(0, full_write(16, slot, &[v0, v1]), &mut stats);
        array.tick(&mut stats);

        prop_assert_eq!(
            array.read(&Selector::one_hot(16, slot)),
            vec![v0 & mask, v1 & mask]
        );
        prop_assert!(array.collisions().is_empty());
    }
}
