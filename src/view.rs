//! Sequenced report view state.
//!
//! A view issues a ticket for every refresh it starts and only accepts the
//! response carrying the newest ticket. Responses that arrive late, or after
//! the view was closed, are dropped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

/// Identifies one refresh of a [`ReportView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// The ticket's sequence number, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// The value applied by a refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<T> {
    /// Ticket of the refresh that produced the value.
    pub ticket: RequestTicket,
    /// The applied value.
    pub value: T,
}

/// Displayed state of one report view.
#[derive(Debug)]
pub struct ReportView<T> {
    issued: AtomicU64,
    closed: AtomicBool,
    current: Mutex<Option<Snapshot<T>>>,
}

impl<T> Default for ReportView<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            current: Mutex::new(None),
        }
    }
}

impl<T> ReportView<T> {
    /// Creates an open, empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a refresh and returns its ticket.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if no newer refresh has started since `ticket`.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `value` if `ticket` is still the latest and the view is open.
    ///
    /// Returns whether the value was applied.
    pub fn apply(&self, ticket: RequestTicket, value: T) -> bool {
        let mut current = self.lock();
        if self.is_closed() {
            debug!(ticket = ticket.0, "Discarding response for closed view");
            return false;
        }
        if !self.is_latest(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued.load(Ordering::SeqCst),
                "Discarding stale response"
            );
            return false;
        }
        *current = Some(Snapshot { ticket, value });
        true
    }

    /// Tears the view down. Later applies are rejected and the state is cleared.
    pub fn close(&self) {
        let mut current = self.lock();
        self.closed.store(true, Ordering::SeqCst);
        *current = None;
    }

    /// Returns true once [`ReportView::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Snapshot<T>>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> ReportView<T> {
    /// The latest applied snapshot, if any.
    pub fn current(&self) -> Option<Snapshot<T>> {
        self.lock().clone()
    }
}
