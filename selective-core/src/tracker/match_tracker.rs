/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt;

use static_assertions::assert_impl_all;
use tracing::{debug, trace, warn};

use crate::accumulator::{Accumulator, BitSet, SlotCounter};
use crate::config::{DuplicatePolicy, SearchStrategy, TrackerConfig};
use crate::tracker::{MatchFailure, MatchList, RoundState};

/// Collects exactly one item per slot of a match list, in any order.
///
/// A round begins with one of the `start_round` calls, advances with
/// [`MatchTracker::match_item`] and ends `Matched` or `Failed`. Both outcomes
/// are terminal; every later `match_item` returns `false` until the next
/// `start_round` or [`MatchTracker::restart`].
///
/// The accumulator defaults to [`BitSet`] (one hit per slot). Use
/// [`SlotCounter`] when every slot must be hit a fixed number of times.
///
/// The tracker is a plain single-threaded structure. Confine it to one
/// actor's sequential message loop.
///
/// # Examples
///
/// ```
/// use selective_core::prelude::*;
///
/// let mut tracker: MatchTracker<'static, char> = MatchTracker::new();
/// tracker.start_round_adopted(vec!['a', 'b', 'c'], ());
///
/// assert!(!tracker.match_item(&'a'));
/// assert!(!tracker.match_item(&'x'));
/// assert!(!tracker.match_item(&'b'));
/// assert!(!tracker.match_item(&'c'));
/// assert_eq!(tracker.failure(), Some(MatchFailure::UnexpectedValue));
/// ```
pub struct MatchTracker<'a, T, A: Accumulator = BitSet> {
    match_list: MatchList<'a, T>,
    matches: A,
    /// Accumulator arguments of the current round, reused by `restart`.
    args: Option<A::Args>,
    received: usize,
    state: RoundState,
    config: TrackerConfig,
}

assert_impl_all!(MatchTracker<'static, u32>: Send, Sync);
assert_impl_all!(MatchTracker<'static, String, SlotCounter>: Send, Sync);

impl<'a, T, A: Accumulator> MatchTracker<'a, T, A> {
    /// Creates an uninitialized tracker with the default [`TrackerConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Creates an uninitialized tracker with an explicit [`TrackerConfig`].
    #[must_use]
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            match_list: MatchList::default(),
            matches: A::default(),
            args: None,
            received: 0,
            state: RoundState::Uninitialized,
            config,
        }
    }

    /// Starts a round over `match_list` in whichever ownership mode it carries.
    ///
    /// Any round in progress is abandoned.
    pub fn start_round(&mut self, match_list: impl Into<MatchList<'a, T>>, args: A::Args) {
        self.match_list = match_list.into();
        self.init(args);
    }

    /// Starts a round that borrows the caller's list.
    ///
    /// The list must stay alive and unmodified for the whole round.
    pub fn start_round_borrowed(&mut self, match_list: &'a [T], args: A::Args) {
        self.start_round(MatchList::Borrowed(match_list), args);
    }

    /// Starts a round over an independent copy of `match_list`.
    pub fn start_round_copied(&mut self, match_list: &[T], args: A::Args)
    where
        T: Clone,
    {
        self.start_round(MatchList::Owned(match_list.to_vec()), args);
    }

    /// Starts a round that takes ownership of the caller's list.
    pub fn start_round_adopted(&mut self, match_list: Vec<T>, args: A::Args) {
        self.start_round(MatchList::Owned(match_list), args);
    }

    /// Starts a fresh round over the current match list with the arguments of
    /// the last `start_round`.
    ///
    /// Does nothing on a tracker that never started a round.
    pub fn restart(&mut self) {
        match self.args.clone() {
            Some(args) => self.init(args),
            None => warn!("restart requested before any round was started"),
        }
    }

    /// Feeds one incoming item to the round.
    ///
    /// Returns `true` only on the call that completes the round. Every call in
    /// the `Uninitialized`, `Matched` or `Failed` state returns `false` and
    /// changes nothing.
    pub fn match_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        if self.state != RoundState::Active {
            trace!(state = ?self.state, "discarding item outside an active round");
            return false;
        }

        let Some(idx) = self.locate(item) else {
            self.fail(MatchFailure::UnexpectedValue);
            return false;
        };

        if self.config.duplicates == DuplicatePolicy::Immediate && self.matches.is_slot_matched(idx)
        {
            self.fail(MatchFailure::DuplicateMatch);
            return false;
        }

        self.matches.log_a_match(idx);
        self.received += 1;
        trace!(slot = idx, received = self.received, "logged match");

        if self.received == self.matches.expected_hits() {
            if self.matches.all_matched() {
                debug!(received = self.received, "round matched");
                self.state = RoundState::Matched;
            } else {
                self.fail(MatchFailure::IncompleteCoverage);
            }
        }
        self.state == RoundState::Matched
    }

    /// Returns `true` once the round has been completed successfully.
    #[inline]
    #[must_use]
    pub fn matched(&self) -> bool {
        self.state == RoundState::Matched
    }

    /// Returns `true` once the round has failed.
    #[inline]
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.state, RoundState::Failed(_))
    }

    /// The reason the round failed, if it has.
    #[must_use]
    pub const fn failure(&self) -> Option<MatchFailure> {
        match self.state {
            RoundState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Current round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Items accepted so far this round.
    #[must_use]
    pub const fn received_count(&self) -> usize {
        self.received
    }

    /// Items a complete round accepts.
    #[must_use]
    pub fn expected_count(&self) -> usize {
        self.matches.expected_hits()
    }

    /// The match list of the current round; empty before the first round.
    #[must_use]
    pub fn match_list(&self) -> &[T] {
        &self.match_list
    }

    /// The accumulator of the current round.
    #[must_use]
    pub const fn accumulator(&self) -> &A {
        &self.matches
    }

    /// The configuration this tracker was built with.
    #[must_use]
    pub const fn config(&self) -> TrackerConfig {
        self.config
    }

    fn init(&mut self, args: A::Args) {
        self.matches = A::with_slots(self.match_list.len(), args.clone());
        self.args = Some(args);
        self.received = 0;
        // nothing to wait for
        self.state = if self.matches.expected_hits() == 0 {
            RoundState::Matched
        } else {
            RoundState::Active
        };
        debug!(
            slots = self.match_list.len(),
            expected = self.matches.expected_hits(),
            borrowed = self.match_list.is_borrowed(),
            state = ?self.state,
            "round started"
        );
    }

    /// Incoming items tend to follow list order, so once half the round is in
    /// the remaining items are likelier near the tail.
    fn locate(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let from_head = self.config.search == SearchStrategy::Forward
            || self.received < self.matches.expected_hits() / 2;
        if from_head {
            self.match_list.iter().position(|expected| expected == item)
        } else {
            self.match_list.iter().rposition(|expected| expected == item)
        }
    }

    fn fail(&mut self, reason: MatchFailure) {
        debug!(%reason, received = self.received, "round failed");
        self.state = RoundState::Failed(reason);
    }
}

impl<T, A: Accumulator> Default for MatchTracker<'_, T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, A: Accumulator + fmt::Debug> fmt::Debug for MatchTracker<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchTracker")
            .field("match_list", &self.match_list)
            .field("matches", &self.matches)
            .field("received", &self.received)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Reply {
        A,
        B,
        C,
        X,
    }
    use Reply::{A, B, C, X};

    fn immediate() -> TrackerConfig {
        TrackerConfig {
            duplicates: DuplicatePolicy::Immediate,
            ..TrackerConfig::default()
        }
    }

    #[test]
    fn out_of_order_replies_complete_on_last() {
        let expected = [A, B, C];
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_borrowed(&expected, ());

        assert!(!tracker.match_item(&C));
        assert!(!tracker.match_item(&A));
        assert!(tracker.match_item(&B));
        assert!(tracker.matched());
        assert_eq!(tracker.state(), RoundState::Matched);
    }

    #[test]
    fn unexpected_value_is_sticky() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B, C], ());

        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&X));
        assert!(!tracker.match_item(&B));
        assert!(!tracker.match_item(&C));
        assert!(!tracker.matched());
        assert_eq!(tracker.failure(), Some(MatchFailure::UnexpectedValue));
        // the late items were discarded, not counted
        assert_eq!(tracker.received_count(), 1);
    }

    #[test]
    fn matched_round_discards_further_input() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(vec![A], ());
        assert!(tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&X));
        assert!(tracker.matched());
        assert!(!tracker.is_failed());
    }

    #[test]
    fn deferred_duplicate_fails_at_count_boundary() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B, C], ());

        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert_eq!(tracker.state(), RoundState::Active);
        assert!(!tracker.match_item(&B));
        assert_eq!(tracker.failure(), Some(MatchFailure::IncompleteCoverage));
        assert!(!tracker.match_item(&C));
        assert!(!tracker.matched());
    }

    #[test]
    fn immediate_duplicate_fails_on_the_duplicate() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::with_config(immediate());
        tracker.start_round_adopted(vec![A, B, C], ());

        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert_eq!(tracker.failure(), Some(MatchFailure::DuplicateMatch));
        assert_eq!(tracker.received_count(), 1);
    }

    #[test]
    fn backward_scan_resolves_repeated_values() {
        // first A lands on slot 0 scanning forward, second A on slot 2 scanning backward
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B, A], ());

        assert!(!tracker.match_item(&A));
        assert!(tracker.accumulator().get(0));
        assert!(!tracker.match_item(&A));
        assert!(tracker.accumulator().get(2));
        assert!(tracker.match_item(&B));
    }

    #[test]
    fn forward_scan_cannot_reach_second_copy() {
        let config = TrackerConfig {
            search: SearchStrategy::Forward,
            ..TrackerConfig::default()
        };
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::with_config(config);
        tracker.start_round_adopted(vec![A, B, A], ());

        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&B));
        assert_eq!(tracker.failure(), Some(MatchFailure::IncompleteCoverage));
    }

    #[test]
    fn restart_reuses_list_and_clears_failure() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B], ());
        assert!(!tracker.match_item(&X));
        assert!(tracker.is_failed());

        tracker.restart();
        assert_eq!(tracker.state(), RoundState::Active);
        assert_eq!(tracker.received_count(), 0);
        assert_eq!(tracker.match_list(), &[A, B]);
        assert!(!tracker.match_item(&B));
        assert!(tracker.match_item(&A));
    }

    #[test]
    fn restart_before_start_stays_uninitialized() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.restart();
        assert_eq!(tracker.state(), RoundState::Uninitialized);
        assert!(!tracker.match_item(&A));
        assert!(tracker.match_list().is_empty());
    }

    #[test]
    fn empty_list_is_matched_at_start() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(Vec::new(), ());
        assert!(tracker.matched());
        assert!(!tracker.match_item(&A));
    }

    #[test]
    fn copied_round_is_independent_of_caller() {
        let mut expected = vec![A, B];
        let mut tracker: MatchTracker<'static, Reply> = MatchTracker::new();
        tracker.start_round_copied(&expected, ());
        expected.clear();

        assert!(!tracker.match_item(&A));
        assert!(tracker.match_item(&B));
    }

    #[test]
    fn start_round_abandons_previous_round() {
        let mut tracker: MatchTracker<'_, Reply> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B], ());
        assert!(!tracker.match_item(&A));

        tracker.start_round_adopted(vec![C], ());
        assert_eq!(tracker.received_count(), 0);
        assert!(tracker.match_item(&C));
    }

    #[test]
    fn slot_counter_round_needs_target_hits_per_slot() {
        let mut tracker: MatchTracker<'_, Reply, SlotCounter> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B], 2);
        assert_eq!(tracker.expected_count(), 4);

        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&B));
        assert!(!tracker.match_item(&B));
        assert!(tracker.match_item(&A));
        assert_eq!(tracker.accumulator().count(0), 2);
    }

    #[test]
    fn slot_counter_overcount_fails_at_boundary() {
        let mut tracker: MatchTracker<'_, Reply, SlotCounter> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B], 2);

        for _ in 0..3 {
            assert!(!tracker.match_item(&A));
        }
        assert!(!tracker.match_item(&B));
        assert_eq!(tracker.failure(), Some(MatchFailure::IncompleteCoverage));
    }

    #[test]
    fn slot_counter_restart_keeps_target() {
        let mut tracker: MatchTracker<'_, Reply, SlotCounter> =
            MatchTracker::with_config(immediate());
        tracker.start_round_adopted(vec![A], 3);
        assert!(!tracker.match_item(&A));
        tracker.restart();

        assert_eq!(tracker.accumulator().target(), 3);
        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert!(tracker.match_item(&A));
    }

    #[test]
    fn slot_counter_huge_target_saturates_expected_count() {
        let mut tracker: MatchTracker<'_, u8, SlotCounter> = MatchTracker::new();
        tracker.start_round_adopted(vec![1, 2], usize::MAX);

        assert_eq!(tracker.expected_count(), usize::MAX);
        assert_eq!(tracker.state(), RoundState::Active);
        assert!(!tracker.match_item(&1));
        assert!(!tracker.match_item(&2));
        assert_eq!(tracker.received_count(), 2);
        assert!(!tracker.is_failed());
    }

    #[test]
    fn slot_counter_switches_direction_at_half_of_all_hits() {
        // 6 hits expected, so the scan stays forward for the first 3 items
        let mut tracker: MatchTracker<'_, Reply, SlotCounter> = MatchTracker::new();
        tracker.start_round_adopted(vec![A, B, A], 2);

        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert_eq!(tracker.accumulator().count(0), 2);
        assert_eq!(tracker.accumulator().count(2), 0);

        assert!(!tracker.match_item(&B));
        assert!(!tracker.match_item(&B));
        assert_eq!(tracker.accumulator().count(1), 2);

        // past the half-way point the remaining copies land on the tail slot
        assert!(!tracker.match_item(&A));
        assert_eq!(tracker.accumulator().count(2), 1);
        assert!(tracker.match_item(&A));
        assert_eq!(tracker.accumulator().count(0), 2);
        assert_eq!(tracker.accumulator().count(2), 2);
    }

    #[test]
    fn slot_counter_immediate_rejects_past_target() {
        let mut tracker: MatchTracker<'_, Reply, SlotCounter> =
            MatchTracker::with_config(immediate());
        tracker.start_round_adopted(vec![A, B], 1);
        assert!(!tracker.match_item(&A));
        assert!(!tracker.match_item(&A));
        assert_eq!(tracker.failure(), Some(MatchFailure::DuplicateMatch));
    }
}
