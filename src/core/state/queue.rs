// src/core/state/queue.rs

//! The wait queue: an ordered sequence of pending requesters.
//!
//! Positions are plain indexes into the current sequence. An index obtained
//! from `list` may no longer refer to the same entry by the time a `del`
//! issued against it executes; this is a known property of index-addressed
//! deletion under concurrent mutation, preserved from the protocol's design.

use chrono::Utc;
use tokio::sync::Mutex;

/// One pending requester, rendered for transport and storage as the display
/// string `"<username>-<timestamp>"` (Unix seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub username: String,
    pub enqueued_at: i64,
}

impl QueueEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(username: &str) -> Self {
        Self {
            username: username.to_string(),
            enqueued_at: Utc::now().timestamp(),
        }
    }

    /// Renders the entry's display string.
    pub fn display(&self) -> String {
        format!("{}-{}", self.username, self.enqueued_at)
    }

    /// Parses a snapshot line back into an entry. A line without a numeric
    /// trailing `-<seconds>` segment loads as a bare username with timestamp
    /// zero; loading never fails on malformed lines.
    pub fn parse(line: &str) -> Self {
        if let Some((name, ts)) = line.rsplit_once('-')
            && let Ok(enqueued_at) = ts.parse::<i64>()
        {
            return Self {
                username: name.to_string(),
                enqueued_at,
            };
        }
        Self {
            username: line.to_string(),
            enqueued_at: 0,
        }
    }
}

/// The outcome of an insertion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was appended to the tail of the queue.
    Added,
    /// An entry for this username already exists; the queue is unchanged.
    AlreadyQueued,
}

/// The raw ordered sequence. Only `SharedQueue` holds one; everything else
/// goes through the locked accessor.
#[derive(Debug, Default)]
pub struct WaitQueue {
    entries: Vec<QueueEntry>,
}

impl WaitQueue {
    /// Appends an entry for `username` unless one already matches. The
    /// duplicate check is a prefix match on the username, faithful to the
    /// wire behavior: an existing `alice` entry also blocks `al`.
    pub fn add(&mut self, username: &str) -> AddOutcome {
        if self
            .entries
            .iter()
            .any(|e| e.username.starts_with(username))
        {
            return AddOutcome::AlreadyQueued;
        }
        self.entries.push(QueueEntry::now(username));
        AddOutcome::Added
    }

    /// Removes the entry at `pos`, returning false if the index is out of
    /// range.
    pub fn remove_at(&mut self, pos: usize) -> bool {
        if pos < self.entries.len() {
            self.entries.remove(pos);
            true
        } else {
            false
        }
    }

    /// The display strings of every entry, in queue order.
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(QueueEntry::display).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }
}

/// The locked accessor for the wait queue. Every operation takes the lock
/// for the duration of one in-memory list operation; check-then-append is a
/// single critical section, and the lock is never held across a network
/// write.
#[derive(Debug, Default)]
pub struct SharedQueue {
    inner: Mutex<WaitQueue>,
}

impl SharedQueue {
    pub async fn add(&self, username: &str) -> AddOutcome {
        self.inner.lock().await.add(username)
    }

    pub async fn remove_at(&self, pos: usize) -> bool {
        self.inner.lock().await.remove_at(pos)
    }

    pub async fn render(&self) -> Vec<String> {
        self.inner.lock().await.render()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Clones the current entries, for snapshotting outside the lock.
    pub async fn entries(&self) -> Vec<QueueEntry> {
        self.inner.lock().await.entries().to_vec()
    }

    /// Replaces the queue wholesale, used when restoring a snapshot at
    /// startup.
    pub async fn replace(&self, entries: Vec<QueueEntry>) {
        self.inner.lock().await.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_parse() {
        let entry = QueueEntry {
            username: "alice".to_string(),
            enqueued_at: 1_724_680_000,
        };
        assert_eq!(QueueEntry::parse(&entry.display()), entry);
    }

    #[test]
    fn parse_tolerates_missing_timestamp() {
        let entry = QueueEntry::parse("bob");
        assert_eq!(entry.username, "bob");
        assert_eq!(entry.enqueued_at, 0);
    }

    #[test]
    fn add_rejects_prefix_duplicates() {
        let mut queue = WaitQueue::default();
        assert_eq!(queue.add("alice"), AddOutcome::Added);
        assert_eq!(queue.add("alice"), AddOutcome::AlreadyQueued);
        // "alice" starts with "al", so "al" is blocked too.
        assert_eq!(queue.add("al"), AddOutcome::AlreadyQueued);
        assert_eq!(queue.len(), 1);
    }
}
