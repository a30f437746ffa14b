mod config;
mod shell;
mod view;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{EmployeeField, EmployeeManager, SubmitOutcome, SyncClient, status};
use tracing::info;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "roster-console", version, about = "Employee roster console")]
struct Cli {
    /// Server root of the employee API (overrides EMPLOYEE_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show all employees
    List,
    /// Look up one employee by id
    Get { id: String },
    /// Add an employee
    Add(RecordArgs),
    /// Update a listed employee; omitted fields keep their current value
    Update(RecordArgs),
    /// Delete an employee by id
    Delete { id: i64 },
    /// Interactive session over a single form
    Shell,
}

#[derive(Args, Debug, Default)]
struct RecordArgs {
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    salary: Option<String>,
}

impl RecordArgs {
    fn values(&self) -> [(EmployeeField, Option<&String>); 7] {
        [
            (EmployeeField::Id, self.id.as_ref()),
            (EmployeeField::Name, self.name.as_ref()),
            (EmployeeField::Gender, self.gender.as_ref()),
            (EmployeeField::Department, self.department.as_ref()),
            (EmployeeField::Email, self.email.as_ref()),
            (EmployeeField::Contact, self.contact.as_ref()),
            (EmployeeField::Salary, self.salary.as_ref()),
        ]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().with_api_url(cli.base_url.clone());
    init_tracing(ObsConfig::default().with_filter(config.log_filter.clone()))?;

    let endpoint = config.endpoint()?;
    info!(endpoint = endpoint.as_str(), "employee api configured");
    let client = SyncClient::new(endpoint).context("failed to build HTTP client")?;
    let manager = EmployeeManager::new(client);

    match cli.command {
        Commands::List => list(&manager).await,
        Commands::Get { id } => get(&manager, id).await,
        Commands::Add(args) => add(&manager, &args).await,
        Commands::Update(args) => update(&manager, &args).await,
        Commands::Delete { id } => delete(&manager, id).await,
        Commands::Shell => shell::run(&manager).await,
    }
}

type Manager = EmployeeManager<SyncClient>;

async fn list(manager: &Manager) -> anyhow::Result<()> {
    if !manager.load().await {
        bail!(status_or(manager, "roster unavailable"));
    }
    print!("{}", view::roster_table(&manager.roster()));
    Ok(())
}

async fn get(manager: &Manager, id: String) -> anyhow::Result<()> {
    manager.set_lookup_query(id);
    match manager.fetch_query().await {
        Some(record) => {
            print!("{}", view::record(&record));
            Ok(())
        }
        None => bail!(status_or(manager, "lookup failed")),
    }
}

async fn add(manager: &Manager, args: &RecordArgs) -> anyhow::Result<()> {
    for (field, value) in args.values() {
        manager.field_changed(field, value.cloned().unwrap_or_default());
    }
    report(manager, manager.submit_create().await, status::ADDED)
}

async fn update(manager: &Manager, args: &RecordArgs) -> anyhow::Result<()> {
    let Some(id) = args.id.as_deref().and_then(|raw| raw.trim().parse::<i64>().ok()) else {
        bail!("--id is required to update an employee");
    };
    if !manager.load().await {
        bail!(status_or(manager, "roster unavailable"));
    }
    if !manager.edit_by_id(id) {
        bail!("employee {id} not found");
    }
    for (field, value) in args.values() {
        if let Some(value) = value {
            manager.field_changed(field, value.clone());
        }
    }
    report(manager, manager.submit_update().await, status::UPDATED)
}

async fn delete(manager: &Manager, id: i64) -> anyhow::Result<()> {
    if !manager.delete(id).await {
        bail!(status_or(manager, "delete failed"));
    }
    println!("{}", status::DELETED);
    refresh_outcome(manager.status().as_deref())
}

fn report(manager: &Manager, outcome: SubmitOutcome, notice: &str) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Submitted => {
            println!("{notice}");
            refresh_outcome(manager.status().as_deref())
        }
        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed => {
            bail!(status_or(manager, "submission failed"))
        }
    }
}

/// A mutation that landed can still leave the roster stale when the re-fetch fails.
fn refresh_outcome(current: Option<&str>) -> anyhow::Result<()> {
    match current {
        Some(message) if message == status::FETCH_FAILED => {
            bail!("change saved, but the roster could not be re-fetched: {message}")
        }
        _ => Ok(()),
    }
}

fn status_or(manager: &Manager, fallback: &str) -> String {
    manager.status().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_refetch_after_save_is_an_error() {
        let err = refresh_outcome(Some(status::FETCH_FAILED)).unwrap_err();
        assert!(err.to_string().contains("change saved"));
        assert!(err.to_string().contains(status::FETCH_FAILED));
    }

    #[test]
    fn settled_mutations_exit_cleanly() {
        assert!(refresh_outcome(Some(status::ADDED)).is_ok());
        assert!(refresh_outcome(Some(status::DELETED)).is_ok());
        assert!(refresh_outcome(None).is_ok());
    }
}
