// ABOUTME: Tests for the gap-policy driven downsample engine
// ABOUTME: Validates subsequence/order properties, edge cases, and randomized policy bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use nsexport::core::downsample::{
    downsample, only_after, FixedGap, GapPolicy, RandomizedGap, Timestamped,
};

#[derive(Debug, Clone, PartialEq)]
struct Sample {
    id: usize,
    ts: DateTime<Utc>,
}

impl Timestamped for Sample {
    fn timestamp(&self) -> DateTime<Utc> {
        self.ts
    }
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

fn minute_spaced(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|id| Sample {
            id,
            ts: base() + TimeDelta::minutes(id as i64),
        })
        .collect()
}

#[test]
fn test_empty_input_yields_empty_output() {
    let samples: Vec<Sample> = Vec::new();
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::minutes(10)));
    assert!(kept.is_empty());
}

#[test]
fn test_single_sample_always_kept() {
    let samples = minute_spaced(1);
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::minutes(10)));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, 0);
}

#[test]
fn test_first_sample_always_kept() {
    let samples = minute_spaced(50);
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::hours(2)));
    assert_eq!(kept[0].id, 0);
}

#[test]
fn test_hundred_minute_samples_ten_minute_gap() {
    // 100 samples spaced 1 minute apart with a 10-minute gap: a sample is
    // kept only when strictly more than 10 minutes past the last kept one,
    // so ids 0, 11, 22, ..., 99 survive.
    let samples = minute_spaced(100);
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::minutes(10)));

    assert_eq!(kept.len(), 10);
    assert_eq!(kept.first().unwrap().id, 0);
    assert_eq!(kept.last().unwrap().id, 99);
}

#[test]
fn test_output_is_ordered_subsequence() {
    let samples = minute_spaced(60);
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::minutes(7)));

    for pair in kept.windows(2) {
        assert!(pair[0].id < pair[1].id);
        assert!(pair[0].ts < pair[1].ts);
    }
}

#[test]
fn test_consecutive_kept_samples_exceed_gap() {
    let gap = TimeDelta::minutes(10);
    let samples = minute_spaced(100);
    let kept = downsample(&samples, &mut FixedGap::new(gap));

    for pair in kept.windows(2) {
        assert!(pair[1].ts - pair[0].ts > gap);
    }
}

#[test]
fn test_unsorted_input_is_sorted_before_filtering() {
    let mut shuffled = minute_spaced(40);
    shuffled.reverse();
    shuffled.swap(3, 17);
    shuffled.swap(8, 30);

    let sorted = minute_spaced(40);

    let from_shuffled: Vec<usize> = downsample(&shuffled, &mut FixedGap::new(TimeDelta::minutes(5)))
        .iter()
        .map(|s| s.id)
        .collect();
    let from_sorted: Vec<usize> = downsample(&sorted, &mut FixedGap::new(TimeDelta::minutes(5)))
        .iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(from_shuffled, from_sorted);
}

#[test]
fn test_zero_gap_keeps_every_sample() {
    let samples = minute_spaced(25);
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::zero()));
    assert_eq!(kept.len(), 25);
}

#[test]
fn test_negative_gap_keeps_every_sample() {
    let samples = minute_spaced(25);
    let kept = downsample(&samples, &mut FixedGap::new(TimeDelta::minutes(-5)));
    assert_eq!(kept.len(), 25);
}

#[test]
fn test_randomized_policy_respects_bounds() {
    // avg 90 with 30% spread: every draw lands in [63, 117) minutes.
    let mut policy = RandomizedGap::with_seed(90, 30, 7);
    for _ in 0..1000 {
        let gap = policy.next_gap();
        assert!(gap >= TimeDelta::minutes(63));
        assert!(gap < TimeDelta::minutes(117));
    }
}

#[test]
fn test_randomized_policy_is_reproducible_with_seed() {
    let mut a = RandomizedGap::with_seed(90, 30, 42);
    let mut b = RandomizedGap::with_seed(90, 30, 42);

    let gaps_a: Vec<_> = (0..100).map(|_| a.next_gap()).collect();
    let gaps_b: Vec<_> = (0..100).map(|_| b.next_gap()).collect();

    assert_eq!(gaps_a, gaps_b);
}

#[test]
fn test_randomized_policy_zero_spread_is_constant() {
    let mut policy = RandomizedGap::with_seed(90, 0, 1);
    for _ in 0..10 {
        assert_eq!(policy.next_gap(), TimeDelta::minutes(90));
    }
}

#[test]
fn test_randomized_downsample_thins_more_than_fixed_short_gap() {
    // Samples every 5 minutes for a day; a ~90 minute randomized gap keeps
    // roughly one sample per interval draw, far fewer than the input.
    let samples: Vec<Sample> = (0..288)
        .map(|id| Sample {
            id,
            ts: base() + TimeDelta::minutes(id as i64 * 5),
        })
        .collect();

    let mut policy = RandomizedGap::with_seed(90, 30, 3);
    let kept = downsample(&samples, &mut policy);

    assert!(!kept.is_empty());
    assert!(kept.len() < 40);
    assert_eq!(kept[0].id, 0);
}

#[test]
fn test_only_after_is_strict() {
    let samples = minute_spaced(10);
    let cutoff = base() + TimeDelta::minutes(4);

    let filtered = only_after(samples, cutoff);

    assert_eq!(filtered.len(), 5);
    assert!(filtered.iter().all(|s| s.ts > cutoff));
}
