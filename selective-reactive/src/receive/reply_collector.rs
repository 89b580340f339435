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

use std::future;
use std::time::Duration;

use selective_core::config::CONFIG;
use selective_core::{Accumulator, MatchTracker, RoundState};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};

use crate::receive::ReceiveError;

/// Creates a reply channel whose inbox capacity comes from the global configuration.
#[must_use]
pub fn reply_channel<T>() -> (ReplySender<T>, ReplyCollector<T>) {
    reply_channel_with_capacity(CONFIG.inbox_capacity())
}

/// Creates a reply channel with an explicit inbox capacity.
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn reply_channel_with_capacity<T>(capacity: usize) -> (ReplySender<T>, ReplyCollector<T>) {
    let (outbox, inbox) = mpsc::channel(capacity);
    let collector = ReplyCollector {
        inbox,
        cancellation_token: CancellationToken::new(),
        receive_timeout: CONFIG.receive_timeout(),
    };
    (ReplySender { outbox }, collector)
}

/// The sending half handed to each correspondent. Cheap to clone.
#[derive(Debug)]
pub struct ReplySender<T> {
    outbox: Sender<T>,
}

impl<T> Clone for ReplySender<T> {
    fn clone(&self) -> Self {
        Self {
            outbox: self.outbox.clone(),
        }
    }
}

impl<T> ReplySender<T> {
    /// Delivers one reply to the collector's inbox, waiting for capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveError::SendFailed`] if the collector has been dropped.
    pub async fn send(&self, reply: T) -> Result<(), ReceiveError> {
        self.outbox.send(reply).await?;
        Ok(())
    }

    /// Returns `true` once the collector has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.outbox.is_closed()
    }
}

/// The receiving half: an inbox that feeds a [`MatchTracker`] in arrival order.
///
/// Collection stops on the first of: the round matching, the round failing,
/// every sender being dropped, the receive deadline passing, or the
/// cancellation token firing. Replies still queued when collection stops stay
/// in the inbox for the next round.
#[derive(Debug)]
pub struct ReplyCollector<T> {
    inbox: Receiver<T>,
    cancellation_token: CancellationToken,
    receive_timeout: Option<Duration>,
}

impl<T> ReplyCollector<T> {
    /// Replaces the receive deadline applied to each `collect` call; `None`
    /// waits without limit.
    #[must_use]
    pub fn with_timeout(mut self, receive_timeout: Option<Duration>) -> Self {
        self.receive_timeout = receive_timeout;
        self
    }

    /// Replaces the cancellation token, e.g. with a child of an actor's own token.
    #[must_use]
    pub fn with_cancellation_token(mut self, cancellation_token: CancellationToken) -> Self {
        self.cancellation_token = cancellation_token;
        self
    }

    /// A clone of the token that cancels collection.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Feeds inbound replies to `tracker` until its round reaches a terminal state.
    ///
    /// A tracker that is already `Matched` returns `Ok(())` without receiving.
    ///
    /// # Errors
    ///
    /// - [`ReceiveError::NotStarted`] if the tracker has no round.
    /// - [`ReceiveError::RoundFailed`] once the tracker fails.
    /// - [`ReceiveError::InboxClosed`] if every sender is dropped first.
    /// - [`ReceiveError::TimedOut`] if the receive deadline passes first.
    /// - [`ReceiveError::Cancelled`] if the cancellation token fires first.
    #[instrument(skip(self, tracker), fields(expected = tracker.expected_count()))]
    pub async fn collect<A: Accumulator>(
        &mut self,
        tracker: &mut MatchTracker<'_, T, A>,
    ) -> Result<(), ReceiveError>
    where
        T: PartialEq,
    {
        match tracker.state() {
            RoundState::Uninitialized => return Err(ReceiveError::NotStarted),
            RoundState::Matched => return Ok(()),
            RoundState::Failed(reason) => return Err(reason.into()),
            RoundState::Active => {}
        }

        let cancel_token = self.cancellation_token.clone();
        let cancelled = cancel_token.cancelled();
        tokio::pin!(cancelled);

        let deadline = self.receive_timeout.map(|timeout| Instant::now() + timeout);
        let expired = async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        };
        tokio::pin!(expired);

        loop {
            tokio::select! {
                () = &mut cancelled => {
                    trace!(received = tracker.received_count(), "collection cancelled");
                    return Err(ReceiveError::Cancelled);
                }

                () = &mut expired => {
                    debug!(received = tracker.received_count(), "receive deadline passed");
                    return Err(ReceiveError::TimedOut {
                        received: tracker.received_count(),
                        expected: tracker.expected_count(),
                    });
                }

                incoming = self.inbox.recv() => {
                    let Some(reply) = incoming else {
                        debug!(received = tracker.received_count(), "inbox closed mid-round");
                        return Err(ReceiveError::InboxClosed {
                            received: tracker.received_count(),
                            expected: tracker.expected_count(),
                        });
                    };
                    if tracker.match_item(&reply) {
                        return Ok(());
                    }
                    if let Some(reason) = tracker.failure() {
                        return Err(reason.into());
                    }
                }
            }
        }
    }

    /// Adopts `match_list` into a fresh one-hit-per-slot round using the
    /// globally configured tracker settings, and collects it.
    ///
    /// # Errors
    ///
    /// As for [`ReplyCollector::collect`].
    pub async fn collect_from(&mut self, match_list: Vec<T>) -> Result<(), ReceiveError>
    where
        T: PartialEq,
    {
        let mut tracker: MatchTracker<'_, T> = MatchTracker::with_config(CONFIG.tracker);
        tracker.start_round_adopted(match_list, ());
        self.collect(&mut tracker).await
    }
}
