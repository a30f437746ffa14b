use anyhow::Result;
use platform_api::{ApiError, Endpoint};
use products_hr::{
    DEFAULT_PREFIX, Employee, EmployeeApi, EmployeeField, EmployeeManager, FormBuffer, FormMode,
    Gender, SubmitOutcome, SyncClient, status,
};
use roster_tests::{RecordedRequest, StubBackend};
use serde_json::json;

fn employee(id: i64, name: &str) -> Employee {
    Employee {
        id,
        name: name.into(),
        gender: Gender::Female,
        department: "Ops".into(),
        email: format!("{id}@example.test"),
        contact: "555-0100".into(),
        salary: "5000".into(),
    }
}

async fn setup(seed: Vec<Employee>) -> Result<(StubBackend, EmployeeManager<SyncClient>)> {
    let backend = StubBackend::spawn(seed).await?;
    let endpoint = Endpoint::new(&backend.base_url(), DEFAULT_PREFIX)?;
    let manager = EmployeeManager::new(SyncClient::new(endpoint)?);
    Ok((backend, manager))
}

fn fill(manager: &EmployeeManager<SyncClient>, values: [&str; 7]) {
    for (field, value) in EmployeeField::ALL.into_iter().zip(values) {
        manager.field_changed(field, value);
    }
}

#[tokio::test]
async fn create_posts_form_payload_and_refetches() -> Result<()> {
    let (backend, manager) = setup(vec![employee(2, "Grace")]).await?;
    assert!(manager.load().await);
    fill(&manager, ["1", "A", "MALE", "X", "a@a.com", "1", "100"]);

    assert_eq!(manager.submit_create().await, SubmitOutcome::Submitted);

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[1],
        RecordedRequest {
            method: "POST",
            path: "/add".into(),
            body: Some(json!({
                "id": 1,
                "name": "A",
                "gender": "MALE",
                "department": "X",
                "email": "a@a.com",
                "contact": "1",
                "salary": "100"
            })),
        }
    );
    assert_eq!(requests[2].path, "/all");
    assert_eq!(manager.status().as_deref(), Some(status::ADDED));
    assert_eq!(manager.form_buffer(), FormBuffer::empty());
    let ids: Vec<i64> = manager.roster().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);
    Ok(())
}

#[tokio::test]
async fn validation_failure_never_reaches_the_server() -> Result<()> {
    let (backend, manager) = setup(Vec::new()).await?;
    fill(&manager, ["1", "A", "MALE", "X", "a@a.com", "1", ""]);

    assert!(matches!(
        manager.submit_create().await,
        SubmitOutcome::Rejected(_)
    ));
    assert!(backend.requests().is_empty());
    assert_eq!(manager.status().as_deref(), Some("Please fill out salary"));
    Ok(())
}

#[tokio::test]
async fn edit_submits_put_and_returns_to_create_mode() -> Result<()> {
    let (backend, manager) = setup(vec![employee(4, "Linus")]).await?;
    manager.load().await;
    assert!(manager.edit_by_id(4));
    manager.field_changed(EmployeeField::Salary, "6100");

    assert_eq!(manager.submit_update().await, SubmitOutcome::Submitted);

    assert_eq!(backend.records()[0].salary, "6100");
    assert_eq!(manager.roster()[0].salary, "6100");
    assert_eq!(manager.form_mode(), FormMode::Creating);
    assert_eq!(manager.status().as_deref(), Some(status::UPDATED));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_record_reports_error() -> Result<()> {
    let (_backend, manager) = setup(Vec::new()).await?;
    manager.begin_edit(&employee(40, "Ghost"));

    assert_eq!(manager.submit_update().await, SubmitOutcome::Failed);
    assert_eq!(manager.status().as_deref(), Some(status::UPDATE_FAILED));
    assert_eq!(manager.form_mode(), FormMode::Editing { original_id: 40 });
    Ok(())
}

#[tokio::test]
async fn delete_refreshes_and_repeat_delete_is_tolerated() -> Result<()> {
    let (backend, manager) = setup(vec![employee(7, "Ken"), employee(8, "Dennis")]).await?;
    manager.load().await;

    assert!(manager.delete(7).await);
    assert!(manager.roster().iter().all(|e| e.id != 7));
    assert!(manager.delete(7).await);

    assert_eq!(manager.status().as_deref(), Some(status::DELETED));
    assert_eq!(backend.records(), vec![employee(8, "Dennis")]);
    Ok(())
}

#[tokio::test]
async fn lookup_collapses_failures_into_not_found() -> Result<()> {
    let (backend, manager) = setup(vec![employee(3, "Barbara")]).await?;

    assert_eq!(manager.fetch_by_id(3).await, Some(employee(3, "Barbara")));
    assert_eq!(manager.status(), None);

    assert_eq!(manager.fetch_by_id(30).await, None);
    assert_eq!(manager.lookup_result(), None);
    assert_eq!(manager.status().as_deref(), Some(status::NOT_FOUND));

    backend.set_failing(true);
    manager.fetch_by_id(3).await;
    assert_eq!(manager.status().as_deref(), Some(status::NOT_FOUND));
    assert!(manager.roster().is_empty());
    Ok(())
}

#[tokio::test]
async fn server_errors_keep_last_known_roster() -> Result<()> {
    let (backend, manager) = setup(vec![employee(1, "Edsger")]).await?;
    manager.load().await;
    backend.set_failing(true);

    assert!(!manager.refresh().await);
    assert_eq!(manager.status().as_deref(), Some(status::FETCH_FAILED));

    fill(&manager, ["2", "B", "FEMALE", "Y", "b@b.com", "2", "200"]);
    assert_eq!(manager.submit_create().await, SubmitOutcome::Failed);
    assert_eq!(manager.status().as_deref(), Some(status::ADD_FAILED));

    assert!(!manager.delete(1).await);
    assert_eq!(manager.status().as_deref(), Some(status::DELETE_FAILED));

    assert_eq!(manager.roster().to_vec(), vec![employee(1, "Edsger")]);
    assert_eq!(manager.form_buffer().id, "2");
    Ok(())
}

#[tokio::test]
async fn sync_client_maps_statuses() -> Result<()> {
    let backend = StubBackend::spawn(vec![employee(5, "Margaret")]).await?;
    let client = SyncClient::new(Endpoint::new(&backend.base_url(), DEFAULT_PREFIX)?)?;

    assert_eq!(client.fetch_all().await?.len(), 1);
    assert!(matches!(client.fetch_one(6).await, Err(ApiError::NotFound)));
    let created = client.create(&employee(6, "Frances")).await?;
    assert_eq!(created, Some(employee(6, "Frances")));

    backend.set_failing(true);
    match client.fetch_all().await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() -> Result<()> {
    let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let endpoint = Endpoint::new(&format!("http://127.0.0.1:{port}"), DEFAULT_PREFIX)?;
    let client = SyncClient::new(endpoint)?;

    assert!(matches!(client.fetch_all().await, Err(ApiError::Transport(_))));
    let manager = EmployeeManager::new(client);
    assert!(!manager.load().await);
    assert_eq!(manager.status().as_deref(), Some(status::FETCH_FAILED));
    Ok(())
}
