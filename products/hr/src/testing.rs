//! In-memory [`EmployeeApi`] used by the controller tests.

use std::{
    collections::{HashSet, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use platform_api::{ApiError, ApiResult};
use reqwest::StatusCode;
use tokio::sync::{Notify, oneshot};

use crate::{model::Employee, sync::EmployeeApi};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    FetchAll,
    FetchOne(i64),
    Create(Employee),
    Update(Employee),
    Delete(i64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
pub struct FakeApi {
    records: Mutex<Vec<Employee>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Op>>,
    held_fetches: Mutex<VecDeque<oneshot::Receiver<()>>>,
    fetch_entered: Notify,
}

impl FakeApi {
    pub fn with_records(records: Vec<Employee>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn fail(&self, op: Op) {
        lock(&self.failing).insert(op);
    }

    /// The next `fetch_all` reads the store, then waits for `gate` before answering.
    pub fn hold_next_fetch(&self, gate: oneshot::Receiver<()>) {
        lock(&self.held_fetches).push_back(gate);
    }

    /// Signalled once a held fetch has read the store.
    pub fn fetch_entered(&self) -> &Notify {
        &self.fetch_entered
    }

    fn record(&self, call: Call, op: Op) -> ApiResult<()> {
        lock(&self.calls).push(call);
        if lock(&self.failing).contains(&op) {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "injected failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeApi for FakeApi {
    async fn fetch_all(&self) -> ApiResult<Vec<Employee>> {
        self.record(Call::FetchAll, Op::FetchAll)?;
        let snapshot = lock(&self.records).clone();
        let gate = lock(&self.held_fetches).pop_front();
        if let Some(gate) = gate {
            self.fetch_entered.notify_one();
            let _ = gate.await;
        }
        Ok(snapshot)
    }

    async fn fetch_one(&self, id: i64) -> ApiResult<Employee> {
        self.record(Call::FetchOne(id), Op::FetchOne)?;
        lock(&self.records)
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn create(&self, record: &Employee) -> ApiResult<Option<Employee>> {
        self.record(Call::Create(record.clone()), Op::Create)?;
        lock(&self.records).push(record.clone());
        Ok(Some(record.clone()))
    }

    async fn update(&self, record: &Employee) -> ApiResult<Option<Employee>> {
        self.record(Call::Update(record.clone()), Op::Update)?;
        let mut records = lock(&self.records);
        let slot = records
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(ApiError::NotFound)?;
        *slot = record.clone();
        Ok(None)
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.record(Call::Delete(id), Op::Delete)?;
        lock(&self.records).retain(|record| record.id != id);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
