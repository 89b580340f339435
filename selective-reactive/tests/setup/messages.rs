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

/// Replies a barrier master expects from each of its groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupReply {
    /// The group is spawned and waiting for `go`.
    Ready(usize),
    /// The group finished its work.
    Done(usize),
}

/// One `Ready` per group, in group order.
pub fn ready_list(groups: usize) -> Vec<GroupReply> {
    (0..groups).map(GroupReply::Ready).collect()
}

/// One `Done` per group, in group order.
pub fn done_list(groups: usize) -> Vec<GroupReply> {
    (0..groups).map(GroupReply::Done).collect()
}
