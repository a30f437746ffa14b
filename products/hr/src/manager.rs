//! Coordinator over the roster, form, lookup and status cells.
//!
//! Operations take `&self` so several can be in flight at once; completions
//! apply in arrival order. Locks are never held across an await point.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::{
    form::{FormBuffer, FormController, FormMode},
    lookup::LookupPanel,
    model::{Employee, EmployeeField},
    roster::RosterCache,
    status::{self, StatusReporter},
    sync::EmployeeApi,
    validator::ValidationError,
};

/// Result of a form submission. The status message is written either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected(ValidationError),
    Failed,
}

#[derive(Copy, Clone, Debug)]
enum Intent {
    Create,
    Update,
}

impl Intent {
    fn success_notice(self) -> &'static str {
        match self {
            Intent::Create => status::ADDED,
            Intent::Update => status::UPDATED,
        }
    }

    fn failure_notice(self) -> &'static str {
        match self {
            Intent::Create => status::ADD_FAILED,
            Intent::Update => status::UPDATE_FAILED,
        }
    }

    fn expects(self, mode: FormMode) -> bool {
        match self {
            Intent::Create => !mode.is_editing(),
            Intent::Update => mode.is_editing(),
        }
    }
}

pub struct EmployeeManager<A> {
    api: A,
    roster: RosterCache,
    form: Mutex<FormController>,
    lookup: Mutex<LookupPanel>,
    status: StatusReporter,
}

impl<A: EmployeeApi> EmployeeManager<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            roster: RosterCache::new(),
            form: Mutex::new(FormController::new()),
            lookup: Mutex::new(LookupPanel::new()),
            status: StatusReporter::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn roster(&self) -> Arc<[Employee]> {
        self.roster.snapshot()
    }

    pub fn status(&self) -> Option<String> {
        self.status.current()
    }

    pub fn form_mode(&self) -> FormMode {
        self.form().mode()
    }

    pub fn form_buffer(&self) -> FormBuffer {
        self.form().buffer().clone()
    }

    pub fn lookup_query(&self) -> String {
        self.lookup().query().to_string()
    }

    pub fn lookup_result(&self) -> Option<Employee> {
        self.lookup().result().cloned()
    }

    /// Initial roster load.
    pub async fn load(&self) -> bool {
        self.refresh().await
    }

    /// Re-fetch the whole roster. On failure the previous roster is kept.
    pub async fn refresh(&self) -> bool {
        let ticket = self.roster.begin_refresh();
        match self.api.fetch_all().await {
            Ok(records) => {
                if self.roster.apply(ticket, records) {
                    debug!("roster replaced");
                }
                true
            }
            Err(err) => {
                warn!(error = %err, code = err.code(), "roster refresh failed");
                self.status.set(status::FETCH_FAILED);
                false
            }
        }
    }

    pub fn begin_edit(&self, record: &Employee) {
        self.form().begin_edit(record);
    }

    /// Start editing the roster entry with `id`; false when it is not listed.
    pub fn edit_by_id(&self, id: i64) -> bool {
        match self.roster.find(id) {
            Some(record) => {
                self.begin_edit(&record);
                true
            }
            None => false,
        }
    }

    pub fn field_changed(&self, field: EmployeeField, value: impl Into<String>) {
        self.form().field_changed(field, value);
    }

    /// Discard the buffer and return to create mode. Also serves as "cancel".
    pub fn reset(&self) {
        self.form().reset();
    }

    pub async fn submit_create(&self) -> SubmitOutcome {
        self.submit(Intent::Create).await
    }

    pub async fn submit_update(&self) -> SubmitOutcome {
        self.submit(Intent::Update).await
    }

    async fn submit(&self, intent: Intent) -> SubmitOutcome {
        let (mode, candidate) = {
            let form = self.form();
            (form.mode(), form.candidate())
        };
        if !intent.expects(mode) {
            warn!(?intent, ?mode, "submission does not match form mode");
        }
        let record = match candidate {
            Ok(record) => record,
            Err(err) => {
                debug!(field = %err.field, "submission rejected");
                self.status.set(err.to_string());
                return SubmitOutcome::Rejected(err);
            }
        };

        let result = match intent {
            Intent::Create => self.api.create(&record).await,
            Intent::Update => self.api.update(&record).await,
        };
        match result {
            Ok(_) => {
                info!(?intent, id = record.id, "employee saved");
                self.status.set(intent.success_notice());
                self.reset();
                self.refresh().await;
                SubmitOutcome::Submitted
            }
            Err(err) => {
                warn!(
                    ?intent,
                    id = record.id,
                    error = %err,
                    code = err.code(),
                    "employee save failed"
                );
                self.status.set(intent.failure_notice());
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete on the server, then re-fetch; the roster is never spliced locally.
    pub async fn delete(&self, id: i64) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                info!(id, "employee deleted");
                self.status.set(status::DELETED);
                self.refresh().await;
                true
            }
            Err(err) => {
                warn!(id, error = %err, code = err.code(), "employee delete failed");
                self.status.set(status::DELETE_FAILED);
                false
            }
        }
    }

    pub fn set_lookup_query(&self, text: impl Into<String>) {
        self.lookup().set_query(text);
    }

    /// Look up a single record. Any failure reads as "not found".
    pub async fn fetch_by_id(&self, id: i64) -> Option<Employee> {
        match self.api.fetch_one(id).await {
            Ok(record) => {
                self.lookup().store(record.clone());
                self.status.clear();
                Some(record)
            }
            Err(err) => {
                debug!(id, error = %err, code = err.code(), "lookup failed");
                self.lookup().clear_result();
                self.status.set(status::NOT_FOUND);
                None
            }
        }
    }

    /// Look up the id currently typed into the lookup query.
    pub async fn fetch_query(&self) -> Option<Employee> {
        let parsed = self.lookup().parsed_query();
        match parsed {
            Some(id) => self.fetch_by_id(id).await,
            None => {
                self.lookup().clear_result();
                self.status.set(status::NOT_FOUND);
                None
            }
        }
    }

    fn form(&self) -> MutexGuard<'_, FormController> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self) -> MutexGuard<'_, LookupPanel> {
        self.lookup.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
