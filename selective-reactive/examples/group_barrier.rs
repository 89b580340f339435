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

//! Event-handling barrier in the style of bencherl's `ehb`.
//!
//! A master spawns `GROUPS` groups. Each group spawns `GROUP_SIZE` receivers
//! and as many senders; every sender fires `LOOPS` batches at every receiver.
//! The master waits for `ready` from every group, tells them all to go, then
//! waits for `done` from every group. Inside each group the same pattern
//! repeats: the group waits for `done` from each of its receivers, whose
//! tracker counts one message per sender per loop.
//!
//! Run with: `cargo run --example group_barrier -p selective-reactive`

use std::time::Instant;

use anyhow::Context;
use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use selective_reactive::prelude::*;

const GROUPS: usize = 8;
const GROUP_SIZE: usize = 20;
const LOOPS: usize = 16;

/// Awaits every task, surfacing the first panic or error.
async fn join_tasks(tasks: Vec<JoinHandle<anyhow::Result<()>>>) -> anyhow::Result<()> {
    for joined in join_all(tasks).await {
        joined.context("task panicked")??;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Ready(usize),
    Done(usize),
}

async fn receiver(
    id: usize,
    mut inbox: ReplyCollector<usize>,
    group: ReplySender<Report>,
) -> anyhow::Result<()> {
    let senders: Vec<usize> = (0..GROUP_SIZE).collect();
    let mut tracker: MatchTracker<'_, usize, SlotCounter> = MatchTracker::new();
    tracker.start_round_borrowed(&senders, LOOPS);
    inbox.collect(&mut tracker).await?;
    trace!(receiver = id, "heard every sender");
    group.send(Report::Done(id)).await?;
    Ok(())
}

async fn group(
    id: usize,
    master: ReplySender<Report>,
    mut go: mpsc::Receiver<()>,
) -> anyhow::Result<()> {
    let (to_group, mut from_receivers) = reply_channel_with_capacity(GROUP_SIZE);
    let mut receiver_outboxes = Vec::with_capacity(GROUP_SIZE);
    let mut tasks = Vec::with_capacity(2 * GROUP_SIZE);
    for receiver_id in 0..GROUP_SIZE {
        let (outbox, inbox) = reply_channel_with_capacity(GROUP_SIZE * LOOPS);
        receiver_outboxes.push(outbox);
        tasks.push(tokio::spawn(receiver(receiver_id, inbox, to_group.clone())));
    }
    drop(to_group);

    master.send(Report::Ready(id)).await?;
    go.recv().await.context("master went away before go")?;

    for sender_id in 0..GROUP_SIZE {
        let outboxes = receiver_outboxes.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..LOOPS {
                for outbox in &outboxes {
                    outbox.send(sender_id).await?;
                }
            }
            Ok::<(), anyhow::Error>(())
        }));
    }
    drop(receiver_outboxes);

    let done: Vec<Report> = (0..GROUP_SIZE).map(Report::Done).collect();
    from_receivers.collect_from(done).await?;
    join_tasks(tasks).await?;
    master.send(Report::Done(id)).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.tracing.level))
        .compact()
        .init();

    let started = Instant::now();
    let (to_master, mut master_inbox) = reply_channel_with_capacity(GROUPS);
    let mut go_senders = Vec::with_capacity(GROUPS);
    let mut groups_running = Vec::with_capacity(GROUPS);
    for id in 0..GROUPS {
        let (go_tx, go_rx) = mpsc::channel(1);
        go_senders.push(go_tx);
        groups_running.push(tokio::spawn(group(id, to_master.clone(), go_rx)));
    }
    drop(to_master);

    let groups: Vec<usize> = (0..GROUPS).collect();
    let mut tracker: MatchTracker<'static, Report> = MatchTracker::with_config(CONFIG.tracker);
    tracker.start_round_adopted(groups.iter().copied().map(Report::Ready).collect(), ());
    master_inbox.collect(&mut tracker).await?;
    info!(groups = GROUPS, "every group is ready");

    for go in &go_senders {
        go.send(()).await?;
    }
    tracker.start_round_adopted(groups.iter().copied().map(Report::Done).collect(), ());
    master_inbox.collect(&mut tracker).await?;
    join_tasks(groups_running).await?;

    info!(
        groups = GROUPS,
        group_size = GROUP_SIZE,
        loops = LOOPS,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "barrier complete"
    );
    Ok(())
}
