//! HR vertical slice: keeps a local employee roster in step with the remote
//! employee API and mediates the shared add/edit form.

pub mod form;
pub mod lookup;
pub mod manager;
pub mod model;
pub mod roster;
pub mod status;
pub mod sync;
pub mod validator;

#[cfg(test)]
mod testing;

pub use form::{FormBuffer, FormController, FormMode};
pub use lookup::LookupPanel;
pub use manager::{EmployeeManager, SubmitOutcome};
pub use model::{Employee, EmployeeField, Gender};
pub use roster::RosterCache;
pub use status::StatusReporter;
pub use sync::{DEFAULT_PREFIX, EmployeeApi, SyncClient};
pub use validator::ValidationError;
