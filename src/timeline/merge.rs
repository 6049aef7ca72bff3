// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lazy k-way merge of per-task occurrence sequences.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{DateTime, TimeZone, Utc};

use super::Occurrence;

/// Next pending start of one source.
#[derive(Debug, PartialEq, Eq)]
struct Head {
    start: DateTime<Utc>,
    source: usize,
}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        // Earliest start first, then lowest source index.
        other
            .start
            .cmp(&self.start)
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges ascending occurrence sequences into one ascending sequence.
///
/// Each source is pulled one element ahead at most. Ties on start time go
/// to the source with the lower index.
pub struct MergeByStart<Tz: TimeZone, I> {
    sources: Vec<I>,
    pending: Vec<Option<Occurrence<Tz>>>,
    heap: BinaryHeap<Head>,
}

impl<Tz, I> MergeByStart<Tz, I>
where
    Tz: TimeZone,
    I: Iterator<Item = Occurrence<Tz>>,
{
    /// Creates the merge; sources are listed in tie-break order.
    pub fn new(sources: Vec<I>) -> Self {
        let mut merge = Self {
            pending: sources.iter().map(|_| None).collect(),
            heap: BinaryHeap::with_capacity(sources.len()),
            sources,
        };
        for source in 0..merge.sources.len() {
            merge.advance(source);
        }
        merge
    }

    fn advance(&mut self, source: usize) {
        if let Some(occurrence) = self.sources[source].next() {
            self.heap.push(Head {
                start: occurrence.start.with_timezone(&Utc),
                source,
            });
            self.pending[source] = Some(occurrence);
        }
    }
}

impl<Tz, I> Iterator for MergeByStart<Tz, I>
where
    Tz: TimeZone,
    I: Iterator<Item = Occurrence<Tz>>,
{
    type Item = Occurrence<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let Head { source, .. } = self.heap.pop()?;
        let occurrence = self.pending[source].take();
        self.advance(source);
        occurrence
    }
}
