use std::sync::{Mutex, MutexGuard, PoisonError};

pub const ADDED: &str = "Employee added successfully.";
pub const ADD_FAILED: &str = "Error adding employee.";
pub const UPDATED: &str = "Employee updated successfully.";
pub const UPDATE_FAILED: &str = "Error updating employee.";
pub const DELETED: &str = "Employee deleted.";
pub const DELETE_FAILED: &str = "Error deleting employee.";
pub const FETCH_FAILED: &str = "Failed to fetch employees.";
pub const NOT_FOUND: &str = "Employee not found.";

/// The one message currently shown to the operator. Each write replaces it.
#[derive(Debug, Default)]
pub struct StatusReporter {
    slot: Mutex<Option<String>>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, message: impl Into<String>) {
        *self.slot() = Some(message.into());
    }

    pub fn clear(&self) {
        *self.slot() = None;
    }

    pub fn current(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
