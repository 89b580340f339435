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

//! The matching engine and the types describing a round.
//!
//! *   [`MatchList`]: the expected items, borrowed from the caller or owned.
//! *   [`MatchTracker`]: consumes incoming items and reports completion.
//! *   [`RoundState`]: `Uninitialized`, `Active`, `Matched` or `Failed`.
//! *   [`MatchFailure`]: why a round failed.

pub use match_list::MatchList;
pub use match_tracker::MatchTracker;
pub use round_state::{MatchFailure, RoundState};

mod match_list;
mod match_tracker;
mod round_state;
