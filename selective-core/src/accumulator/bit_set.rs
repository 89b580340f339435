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

type Word = u64;

const WORD_BITS: usize = Word::BITS as usize;
const FULL: Word = !0;
const EMPTY: Word = 0;

/// A fixed-capacity bit array packed into `u64` words.
///
/// The capacity is fixed at construction. Bits past the capacity in the last
/// word ("padding") are never observed: [`BitSet::all_set`] masks them in for
/// the comparison only and never writes them.
///
/// # Examples
///
/// ```
/// use selective_core::BitSet;
///
/// let mut bits = BitSet::new(3, false);
/// bits.set(0, true);
/// bits.set(2, true);
/// assert!(!bits.all_set());
/// bits.set(1, true);
/// assert!(bits.all_set());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitSet {
    words: Vec<Word>,
    len: usize,
    padding_mask: Word,
}

impl BitSet {
    /// Creates a bit set holding `len` bits, every bit equal to `initial`.
    #[must_use]
    pub fn new(len: usize, initial: bool) -> Self {
        let fill = if initial { FULL } else { EMPTY };
        let tail = len % WORD_BITS;
        Self {
            words: vec![fill; len.div_ceil(WORD_BITS)],
            len,
            // a full last word has no padding to hide
            padding_mask: if tail == 0 { EMPTY } else { FULL << tail },
        }
    }

    /// Sets bit `idx` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` falls outside the storage words.
    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        let word = &mut self.words[idx / WORD_BITS];
        if value {
            *word |= Self::mask(idx);
        } else {
            *word &= !Self::mask(idx);
        }
    }

    /// Returns the value of bit `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` falls outside the storage words.
    #[inline]
    #[must_use]
    pub fn get(&self, idx: usize) -> bool {
        self.words[idx / WORD_BITS] & Self::mask(idx) != 0
    }

    /// Returns `true` iff every one of the `len` logical bits is set.
    #[must_use]
    pub fn all_set(&self) -> bool {
        let Some((last, head)) = self.words.split_last() else {
            return true;
        };
        head.iter().all(|&word| word == FULL) && (last | self.padding_mask) == FULL
    }

    /// Number of set bits among the logical bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        let Some((last, head)) = self.words.split_last() else {
            return 0;
        };
        let head_ones: usize = head.iter().map(|word| word.count_ones() as usize).sum();
        head_ones + (last & !self.padding_mask).count_ones() as usize
    }

    /// Number of logical bits.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the set was built with zero capacity.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    const fn mask(idx: usize) -> Word {
        1 << (idx % WORD_BITS)
    }
}

/// Equality compares the logical bits only; padding is masked out.
impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        match (self.words.split_last(), other.words.split_last()) {
            (Some((last, head)), Some((other_last, other_head))) => {
                head == other_head
                    && (last & !self.padding_mask) == (other_last & !other.padding_mask)
            }
            _ => true,
        }
    }
}

impl Eq for BitSet {}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bit size: {}", self.len)?;
        for (idx, word) in self.words.iter().enumerate() {
            writeln!(f, "block idx({idx}):{word:064b}")?;
        }
        write!(f, "padding_mask: {:064b}", self.padding_mask)
    }
}
