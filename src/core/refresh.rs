//! Ordering for overlapping loads.
//!
//! Every load takes a [`Ticket`] before it starts. When it finishes it
//! publishes its result into a [`Latest`], which keeps it only if no load that
//! started later has already been accepted. A slow early load can therefore
//! never overwrite a fast later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Sequencer {
    next: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strictly increasing across threads; the first ticket is 1.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Debug)]
struct Slot<T> {
    accepted: u64,
    value: Option<T>,
}

#[derive(Debug)]
pub struct Latest<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot {
                accepted: 0,
                value: None,
            }),
        }
    }
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // a panicking renderer must not wedge later refreshes
        self.slot.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Store `value` if `ticket` is newer than anything accepted so far.
    /// Returns whether it was accepted.
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        self.publish_and(ticket, value, |_| {})
    }

    /// [`Latest::publish`], running `on_accept` under the lock so that
    /// accepted values are observed in ticket order.
    pub fn publish_and(&self, ticket: Ticket, value: T, on_accept: impl FnOnce(&T)) -> bool {
        let mut slot = self.lock();
        if ticket.0 <= slot.accepted {
            log::debug!(
                "Discarding stale result #{} (already showing #{})",
                ticket.0,
                slot.accepted
            );
            return false;
        }

        slot.accepted = ticket.0;
        on_accept(&value);
        slot.value = Some(value);
        true
    }

    /// Ticket number of the value currently held, 0 if none.
    pub fn accepted(&self) -> u64 {
        self.lock().accepted
    }
}

impl<T: Clone> Latest<T> {
    pub fn get(&self) -> Option<T> {
        self.lock().value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn late_response_of_early_request_is_discarded() {
        let seq = Sequencer::new();
        let latest = Latest::new();

        let first = seq.ticket();
        let second = seq.ticket();

        assert!(latest.publish(second, "fresh"));
        assert!(!latest.publish(first, "stale"));
        assert_eq!(latest.get(), Some("fresh"));
        assert_eq!(latest.accepted(), second.number());
    }

    #[test]
    fn same_ticket_is_only_accepted_once() {
        let seq = Sequencer::new();
        let latest = Latest::new();
        let t = seq.ticket();

        assert!(latest.publish(t, 1));
        assert!(!latest.publish(t, 2));
        assert_eq!(latest.get(), Some(1));
    }

    #[test]
    fn concurrent_publishers_end_on_highest_ticket() {
        let seq = Arc::new(Sequencer::new());
        let latest = Arc::new(Latest::new());

        let tickets: Vec<Ticket> = (0..32).map(|_| seq.ticket()).collect();
        let max = tickets.iter().max().copied().unwrap();

        let handles: Vec<_> = tickets
            .into_iter()
            .rev()
            .map(|t| {
                let latest = Arc::clone(&latest);
                thread::spawn(move || {
                    latest.publish(t, t.number());
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(latest.get(), Some(max.number()));
    }

    #[test]
    fn callback_runs_only_for_accepted_values() {
        let seq = Sequencer::new();
        let latest = Latest::new();
        let mut seen = Vec::new();

        let a = seq.ticket();
        let b = seq.ticket();
        latest.publish_and(b, "b", |v| seen.push(*v));
        latest.publish_and(a, "a", |v| seen.push(*v));

        assert_eq!(seen, vec!["b"]);
    }
}
