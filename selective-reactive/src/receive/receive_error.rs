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
use selective_core::MatchFailure;

/// Represents the ways a reply collection can end without a matched round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveError {
    /// The tracker reached its failed state.
    RoundFailed(MatchFailure),
    /// Every sender was dropped before the round completed.
    InboxClosed {
        /// Items accepted before the inbox closed.
        received: usize,
        /// Items the round needed.
        expected: usize,
    },
    /// The receive deadline passed before the round completed.
    TimedOut {
        /// Items accepted before the deadline.
        received: usize,
        /// Items the round needed.
        expected: usize,
    },
    /// The collector's cancellation token fired.
    Cancelled,
    /// The tracker has no match list installed.
    NotStarted,
    /// A reply could not be delivered because the collector is gone.
    SendFailed(String),
}

impl std::fmt::Display for ReceiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoundFailed(reason) => write!(f, "Round failed: {reason}"),
            Self::InboxClosed { received, expected } => {
                write!(f, "Inbox closed after {received} of {expected} replies")
            }
            Self::TimedOut { received, expected } => {
                write!(f, "Timed out after {received} of {expected} replies")
            }
            Self::Cancelled => write!(f, "Collection cancelled"),
            Self::NotStarted => write!(f, "No round started"),
            Self::SendFailed(msg) => write!(f, "Failed to send reply: {msg}"),
        }
    }
}

impl std::error::Error for ReceiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RoundFailed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<MatchFailure> for ReceiveError {
    fn from(reason: MatchFailure) -> Self {
        Self::RoundFailed(reason)
    }
}

/// Converts a `SendError` from Tokio's MPSC channel to a `ReceiveError`.
impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ReceiveError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::SendFailed("Channel closed".into())
    }
}
