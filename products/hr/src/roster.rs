use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use tracing::debug;

use crate::model::Employee;

/// Issued when a refresh starts; only the newest completed refresh is kept.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Default)]
struct Snapshot {
    generation: u64,
    records: Arc<[Employee]>,
}

/// Last roster received from the backend. Only ever replaced as a whole.
#[derive(Debug, Default)]
pub struct RosterCache {
    issued: AtomicU64,
    current: RwLock<Snapshot>,
}

impl RosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the roster with `records` unless a newer refresh already landed.
    pub fn apply(&self, ticket: RefreshTicket, records: Vec<Employee>) -> bool {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if ticket.0 <= current.generation {
            debug!(
                ticket = ticket.0,
                applied = current.generation,
                "dropping stale roster response"
            );
            return false;
        }
        current.generation = ticket.0;
        current.records = records.into();
        true
    }

    pub fn snapshot(&self) -> Arc<[Employee]> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    pub fn find(&self, id: i64) -> Option<Employee> {
        self.snapshot().iter().find(|record| record.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
