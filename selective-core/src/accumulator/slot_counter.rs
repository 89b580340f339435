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

/// Per-slot hit counters with a shared target.
///
/// A slot is satisfied once its counter equals the target. Counters are not
/// capped: a slot may be counted past the target, after which it no longer
/// equals it, and [`SlotCounter::all_matched`] reports `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotCounter {
    counts: Vec<usize>,
    target: usize,
}

impl SlotCounter {
    /// Creates `slots` counters at zero, each expected to reach `target`.
    #[must_use]
    pub fn new(slots: usize, target: usize) -> Self {
        Self {
            counts: vec![0; slots],
            target,
        }
    }

    /// Increments the counter for slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a slot.
    #[inline]
    pub fn log_a_match(&mut self, idx: usize) {
        self.counts[idx] += 1;
    }

    /// Current count for slot `idx`.
    #[inline]
    #[must_use]
    pub fn count(&self, idx: usize) -> usize {
        self.counts[idx]
    }

    /// The count every slot must reach.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Returns `true` iff every counter equals the target exactly.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.counts.iter().all(|&count| count == self.target)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
