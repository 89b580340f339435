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

//! Per-slot completion tracking for a matching round.
//!
//! An accumulator maps every slot of the match list to a satisfaction state.
//! [`BitSet`] expects exactly one hit per slot; [`SlotCounter`] expects a
//! configurable number of hits per slot.

pub use bit_set::BitSet;
pub use slot_counter::SlotCounter;

mod bit_set;
mod slot_counter;

/// Completion accounting used by [`MatchTracker`](crate::MatchTracker).
///
/// The tracker builds a fresh accumulator for every round, sized to the match
/// list, and forwards [`Accumulator::Args`] from the round's start call.
pub trait Accumulator: Default {
    /// Extra construction arguments beyond the slot count.
    type Args: Clone;

    /// Creates an accumulator with `slots` unsatisfied slots.
    fn with_slots(slots: usize, args: Self::Args) -> Self;

    /// Total hits a fully satisfied accumulator has absorbed, saturating at
    /// `usize::MAX`.
    fn expected_hits(&self) -> usize;

    /// Records one hit against slot `idx`.
    fn log_a_match(&mut self, idx: usize);

    /// Returns `true` once slot `idx` needs no further hits.
    fn is_slot_matched(&self, idx: usize) -> bool;

    /// Returns `true` when every slot is satisfied.
    fn all_matched(&self) -> bool;
}

impl Accumulator for BitSet {
    type Args = ();

    fn with_slots(slots: usize, (): ()) -> Self {
        Self::new(slots, false)
    }

    fn expected_hits(&self) -> usize {
        self.len()
    }

    #[inline]
    fn log_a_match(&mut self, idx: usize) {
        self.set(idx, true);
    }

    #[inline]
    fn is_slot_matched(&self, idx: usize) -> bool {
        self.get(idx)
    }

    fn all_matched(&self) -> bool {
        self.all_set()
    }
}

impl Accumulator for SlotCounter {
    type Args = usize;

    fn with_slots(slots: usize, target: usize) -> Self {
        Self::new(slots, target)
    }

    fn expected_hits(&self) -> usize {
        // a total past usize::MAX is unreachable anyway
        self.len().saturating_mul(self.target())
    }

    #[inline]
    fn log_a_match(&mut self, idx: usize) {
        Self::log_a_match(self, idx);
    }

    #[inline]
    fn is_slot_matched(&self, idx: usize) -> bool {
        self.count(idx) >= self.target()
    }

    fn all_matched(&self) -> bool {
        Self::all_matched(self)
    }
}
