// ABOUTME: Gap-policy driven downsampling of time-ordered samples
// ABOUTME: Single forward pass keeping samples separated by more than the policy's minimum gap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! # Downsample Engine
//!
//! Thins a sequence of timestamped samples so that consecutive kept samples
//! are separated by more than a minimum gap. The gap is supplied by a
//! [`GapPolicy`] and is re-evaluated on **every** comparison, which lets a
//! randomized policy produce variable spacing — that per-call redraw is what
//! makes the synthesised "unscheduled" bucket look like irregular manual
//! scans, so it must not be hoisted out of the loop.
//!
//! Input is sorted ascending by timestamp before filtering and the keep test
//! compares `current − last_kept`; the engine therefore accepts feeds in any
//! order. The first sample (after sorting) is always kept.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything carrying a sample instant.
pub trait Timestamped {
    /// The instant this sample was taken.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Strategy returning the minimum separation required to keep the next
/// sample. Implementations may be stateful (randomized policies own their
/// RNG).
pub trait GapPolicy {
    /// The minimum gap for the next comparison, evaluated fresh each call.
    fn next_gap(&mut self) -> TimeDelta;
}

/// Policy returning one constant gap. Produces the regularly spaced
/// "scheduled" bucket.
#[derive(Debug, Clone, Copy)]
pub struct FixedGap(TimeDelta);

impl FixedGap {
    /// Create a fixed-gap policy.
    #[must_use]
    pub fn new(gap: TimeDelta) -> Self {
        Self(gap)
    }
}

impl GapPolicy for FixedGap {
    fn next_gap(&mut self) -> TimeDelta {
        self.0
    }
}

/// Policy drawing a fresh uniform gap on every call, in whole minutes from
/// `[avg − spread%, avg + spread%)`. Produces the irregular "unscheduled"
/// bucket that mimics manual meter scans.
#[derive(Debug)]
pub struct RandomizedGap {
    min_minutes: i64,
    max_minutes: i64,
    rng: StdRng,
}

impl RandomizedGap {
    /// Create a randomized policy around `avg_minutes` with the given
    /// percentage spread, seeded from system entropy.
    #[must_use]
    pub fn new(avg_minutes: i64, spread_percent: u32) -> Self {
        Self::with_rng(avg_minutes, spread_percent, StdRng::from_entropy())
    }

    /// Create a randomized policy with a caller-supplied seed, for
    /// deterministic tests.
    #[must_use]
    pub fn with_seed(avg_minutes: i64, spread_percent: u32, seed: u64) -> Self {
        Self::with_rng(avg_minutes, spread_percent, StdRng::seed_from_u64(seed))
    }

    fn with_rng(avg_minutes: i64, spread_percent: u32, rng: StdRng) -> Self {
        let spread = avg_minutes * i64::from(spread_percent) / 100;
        Self {
            min_minutes: avg_minutes - spread,
            max_minutes: avg_minutes + spread,
            rng,
        }
    }
}

impl GapPolicy for RandomizedGap {
    fn next_gap(&mut self) -> TimeDelta {
        let minutes = if self.max_minutes > self.min_minutes {
            self.rng.gen_range(self.min_minutes..self.max_minutes)
        } else {
            self.min_minutes
        };
        TimeDelta::minutes(minutes)
    }
}

/// Thin `entries` with the given gap policy.
///
/// Returns a borrowed subsequence in ascending timestamp order: the first
/// sample is always kept, and each further sample is kept only when it lies
/// more than `policy.next_gap()` after the previously kept one. A policy
/// returning zero or negative gaps keeps every sample. Empty input yields
/// empty output.
pub fn downsample<'a, T, P>(entries: &'a [T], policy: &mut P) -> Vec<&'a T>
where
    T: Timestamped,
    P: GapPolicy + ?Sized,
{
    let mut ordered: Vec<&T> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.timestamp());

    let mut kept = Vec::new();
    let mut last_kept: Option<DateTime<Utc>> = None;

    for entry in ordered {
        match last_kept {
            None => {
                last_kept = Some(entry.timestamp());
                kept.push(entry);
            }
            Some(previous) => {
                if entry.timestamp() - previous > policy.next_gap() {
                    last_kept = Some(entry.timestamp());
                    kept.push(entry);
                }
            }
        }
    }

    kept
}

/// Keep only entries strictly after `cutoff`. Used to apply the watermark
/// (plus its one-minute pad) to every fetched sequence.
pub fn only_after<T: Timestamped>(entries: Vec<T>, cutoff: DateTime<Utc>) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| entry.timestamp() > cutoff)
        .collect()
}
