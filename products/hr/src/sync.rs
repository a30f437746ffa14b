use async_trait::async_trait;
use platform_api::{
    ApiError, ApiResult, Endpoint, ensure_success, read_json, read_optional_json,
};
use tracing::{debug, instrument};

use crate::model::Employee;

pub const DEFAULT_PREFIX: &str = "employeeapi";

const USER_AGENT: &str = concat!("roster-console/", env!("CARGO_PKG_VERSION"));

/// The employee collection as seen by the controller.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Employee>>;

    async fn fetch_one(&self, id: i64) -> ApiResult<Employee>;

    /// Not idempotent: submitting twice creates two records.
    async fn create(&self, record: &Employee) -> ApiResult<Option<Employee>>;

    async fn update(&self, record: &Employee) -> ApiResult<Option<Employee>>;

    /// Deleting an id that is already gone is treated as success.
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// `reqwest` implementation of [`EmployeeApi`].
#[derive(Clone, Debug)]
pub struct SyncClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl SyncClient {
    pub fn new(endpoint: Endpoint) -> ApiResult<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl EmployeeApi for SyncClient {
    #[instrument(name = "employee_api.fetch_all", skip_all)]
    async fn fetch_all(&self) -> ApiResult<Vec<Employee>> {
        let response = self.http.get(self.endpoint.url(["all"])).send().await?;
        let records: Vec<Employee> = read_json(ensure_success(response).await?).await?;
        debug!(count = records.len(), "roster fetched");
        Ok(records)
    }

    #[instrument(name = "employee_api.fetch_one", skip(self))]
    async fn fetch_one(&self, id: i64) -> ApiResult<Employee> {
        let url = self.endpoint.url(["get".to_string(), id.to_string()]);
        let response = self.http.get(url).send().await?;
        read_json(ensure_success(response).await?).await
    }

    #[instrument(name = "employee_api.create", skip_all, fields(id = record.id))]
    async fn create(&self, record: &Employee) -> ApiResult<Option<Employee>> {
        let response = self
            .http
            .post(self.endpoint.url(["add"]))
            .json(record)
            .send()
            .await?;
        read_optional_json(ensure_success(response).await?).await
    }

    #[instrument(name = "employee_api.update", skip_all, fields(id = record.id))]
    async fn update(&self, record: &Employee) -> ApiResult<Option<Employee>> {
        let response = self
            .http
            .put(self.endpoint.url(["update"]))
            .json(record)
            .send()
            .await?;
        read_optional_json(ensure_success(response).await?).await
    }

    #[instrument(name = "employee_api.delete", skip(self))]
    async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = self.endpoint.url(["delete".to_string(), id.to_string()]);
        let response = self.http.delete(url).send().await?;
        match ensure_success(response).await {
            Ok(_) => Ok(()),
            Err(ApiError::NotFound) => {
                debug!(id, "employee already absent");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
