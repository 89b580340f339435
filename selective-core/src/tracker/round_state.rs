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

/// Why a round ended in the failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchFailure {
    /// An incoming item matched nothing in the match list.
    UnexpectedValue,
    /// The received count reached the list length but some slot was never
    /// satisfied, because another slot was hit more than once.
    IncompleteCoverage,
    /// An item hit a slot that was already satisfied.
    DuplicateMatch,
}

impl std::fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedValue => write!(f, "received a value absent from the match list"),
            Self::IncompleteCoverage => {
                write!(f, "received every expected item count without covering every slot")
            }
            Self::DuplicateMatch => write!(f, "received a second match for a satisfied slot"),
        }
    }
}

impl std::error::Error for MatchFailure {}

/// Where a [`MatchTracker`](crate::MatchTracker) is in its round.
///
/// `Matched` and `Failed` are terminal: further input is discarded until the
/// next `start_round` or `restart`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoundState {
    /// No match list has been installed yet.
    #[default]
    Uninitialized,
    /// Collecting items.
    Active,
    /// Every slot was satisfied.
    Matched,
    /// The round failed and absorbs all further input.
    Failed(MatchFailure),
}

impl RoundState {
    /// Returns `true` for `Matched` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Matched | Self::Failed(_))
    }
}
