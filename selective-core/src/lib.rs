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

#![forbid(unsafe_code)]
#![forbid(missing_docs)]

//! # Selective Core
//!
//! The synchronous engine behind Erlang-style selective receive: an actor that
//! must collect exactly one reply from each member of a known set of
//! correspondents, in any arrival order, before it continues.
//!
//! ## Key Concepts
//!
//! - **Match list**: the ordered reference sequence of expected items for one
//!   round, held borrowed, copied or adopted ([`MatchList`]).
//! - **Accumulators**: per-slot completion tracking. [`BitSet`] expects one hit
//!   per slot, [`SlotCounter`] expects a fixed number of hits per slot.
//! - **Tracker (`MatchTracker`)**: consumes incoming values one at a time and
//!   reports whether the whole set is now satisfied. Failures are terminal and
//!   silent; the reason is kept as a [`MatchFailure`].
//! - **Configuration (`SelectiveConfig`)**: TOML settings loaded from
//!   XDG-compliant locations.
//!
//! ## Quick Start
//!
//! ```rust
//! use selective_core::prelude::*;
//!
//! let expected = vec!["a", "b", "c"];
//! let mut tracker: MatchTracker<'_, &str> = MatchTracker::new();
//! tracker.start_round_borrowed(&expected, ());
//!
//! assert!(!tracker.match_item(&"c"));
//! assert!(!tracker.match_item(&"a"));
//! assert!(tracker.match_item(&"b"));
//! assert!(tracker.matched());
//! ```

/// Per-slot completion tracking structures.
pub(crate) mod accumulator;

/// The configuration system.
pub mod config;

/// Match-list ownership, the tracker and its round state machine.
pub(crate) mod tracker;

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// *   [`crate::BitSet`]: Word-packed bit array, the default accumulator.
/// *   [`crate::SlotCounter`]: Per-slot counter with a target count.
/// *   [`crate::Accumulator`]: Trait implemented by every accumulator.
/// *   [`crate::MatchList`]: Borrowed or owned match list.
/// *   [`crate::MatchTracker`]: The matching engine.
/// *   [`crate::RoundState`] and [`crate::MatchFailure`]: Round outcome types.
/// *   [`crate::config::SelectiveConfig`] and [`crate::config::TrackerConfig`]: Configuration.
pub mod prelude {
    pub use crate::accumulator::{Accumulator, BitSet, SlotCounter};
    pub use crate::config::{
        DuplicatePolicy, SearchStrategy, SelectiveConfig, TrackerConfig, CONFIG,
    };
    pub use crate::tracker::{MatchFailure, MatchList, MatchTracker, RoundState};
}

pub use accumulator::{Accumulator, BitSet, SlotCounter};
pub use tracker::{MatchFailure, MatchList, MatchTracker, RoundState};
