//! Supersede-by-ticket debouncing.
//!
//! Each keystroke schedules the latest query and gets a [`Ticket`]. When the
//! quiet-period timer for a ticket elapses, [`Debouncer::fire`] hands back the
//! value only if nothing newer was scheduled since. Older timers fire into
//! nothing. The debouncer itself owns no clock; the caller supplies wake-ups.

/// Quiet period before a search runs.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Debouncer {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `value`, superseding anything still pending.
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Called when the timer for `ticket` elapses.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drop the pending value; outstanding tickets fire into nothing.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
