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

use std::ops::Deref;

/// The expected items of a round, with the ownership mode chosen at round start.
///
/// A borrowed list is a back-reference: the caller keeps it alive and unchanged
/// for the whole round, which the `'a` lifetime enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchList<'a, T> {
    /// A non-owning view of a caller's sequence.
    Borrowed(&'a [T]),
    /// A sequence owned by the tracker, either copied or adopted.
    Owned(Vec<T>),
}

impl<T> MatchList<'_, T> {
    /// Returns `true` when the tracker holds a reference rather than its own copy.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }
}

impl<T> Default for MatchList<'_, T> {
    fn default() -> Self {
        Self::Owned(Vec::new())
    }
}

impl<T> Deref for MatchList<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        match self {
            Self::Borrowed(items) => items,
            Self::Owned(items) => items,
        }
    }
}

impl<'a, T> From<&'a [T]> for MatchList<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Self::Borrowed(items)
    }
}

impl<'a, T> From<&'a Vec<T>> for MatchList<'a, T> {
    fn from(items: &'a Vec<T>) -> Self {
        Self::Borrowed(items)
    }
}

impl<T> From<Vec<T>> for MatchList<'_, T> {
    fn from(items: Vec<T>) -> Self {
        Self::Owned(items)
    }
}
