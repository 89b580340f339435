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

//! # Selective Reactive
//!
//! Connects the [`selective_core`] match tracker to Tokio mailboxes. An actor
//! that must hear from every member of a known set before it proceeds hands
//! out [`ReplySender`]s, then awaits [`ReplyCollector::collect`], which feeds
//! each arriving payload to the tracker in arrival order and resolves once the
//! round is matched or has failed.
//!
//! ## Quick Start
//!
//! ```rust
//! use selective_reactive::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ReceiveError> {
//! let (outbox, mut collector) = reply_channel::<u32>();
//! for id in [2, 0, 1] {
//!     let outbox = outbox.clone();
//!     tokio::spawn(async move { outbox.send(id).await });
//! }
//!
//! collector.collect_from(vec![0, 1, 2]).await?;
//! # Ok(())
//! # }
//! ```

/// Mailbox-driven collection of replies.
pub(crate) mod receive;

/// A prelude module for conveniently importing the most commonly used items.
///
/// Re-exports everything in [`selective_core::prelude`] plus:
///
/// *   [`crate::ReplyCollector`]: Receiving half that drives a match tracker.
/// *   [`crate::ReplySender`]: Cloneable sending half handed to correspondents.
/// *   [`crate::ReceiveError`]: Why a collection did not end matched.
/// *   [`crate::reply_channel`] and [`crate::reply_channel_with_capacity`]: Constructors.
pub mod prelude {
    pub use selective_core::prelude::*;

    pub use crate::receive::{
        reply_channel, reply_channel_with_capacity, ReceiveError, ReplyCollector, ReplySender,
    };
}

pub use receive::{
    reply_channel, reply_channel_with_capacity, ReceiveError, ReplyCollector, ReplySender,
};
