//! Single-value result mailboxes.
//!
//! A [`ResultSlot`] holds whatever the most recently completed operation
//! published into it. Under [`ResultOrdering::Arrival`] every publish
//! overwrites the slot, so concurrent operations land in completion order.
//! Under [`ResultOrdering::LatestIssued`] a publish whose sequence number is
//! older than the one already shown is dropped.

use ordergate_core::ResultOrdering;
use tokio::sync::watch;

/// A value together with the sequence number of the operation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Published<T> {
    pub seq: u64,
    pub value: T,
}

#[derive(Debug)]
pub struct ResultSlot<T> {
    tx: watch::Sender<Option<Published<T>>>,
    ordering: ResultOrdering,
}

impl<T> ResultSlot<T> {
    pub fn new(ordering: ResultOrdering) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx, ordering }
    }

    pub fn ordering(&self) -> ResultOrdering {
        self.ordering
    }

    /// Publishes `value` for the operation issued as `seq`.
    ///
    /// Returns whether the slot was overwritten.
    pub fn publish(&self, seq: u64, value: T) -> bool {
        let ordering = self.ordering;
        self.tx.send_if_modified(move |current| {
            let stale = ordering == ResultOrdering::LatestIssued
                && current.as_ref().is_some_and(|shown| shown.seq > seq);
            if stale {
                tracing::debug!(seq, "Discarding stale result");
                return false;
            }
            *current = Some(Published { seq, value });
            true
        })
    }

    /// Receives every overwrite of this slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Published<T>>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> ResultSlot<T> {
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().as_ref().map(|published| published.value.clone())
    }

    pub fn latest_published(&self) -> Option<Published<T>> {
        self.tx.borrow().clone()
    }
}
