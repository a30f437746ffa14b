use anyhow::Result;
use products_hr::{EmployeeApi, EmployeeField, EmployeeManager};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, stdin, stdout};

use crate::view;

const HELP: &str = "\
commands:
  list                  re-fetch and show all employees
  edit <id>             load a listed employee into the form
  set <field> <value>   change one form field
  form                  show the form
  submit                add (or update, while editing) the form record
  cancel                clear the form
  delete <id>           delete an employee
  fetch <id>            look up a single employee
  status                show the last message
  quit                  leave the shell
";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Edit(i64),
    Set(EmployeeField, String),
    Form,
    Submit,
    Cancel,
    Delete(i64),
    Fetch(String),
    Status,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));
        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "refresh" => ShellCommand::List,
            "edit" => ShellCommand::Edit(parse_id(rest)?),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = field
                    .parse::<EmployeeField>()
                    .map_err(|err| err.to_string())?;
                ShellCommand::Set(field, value.trim().to_string())
            }
            "form" | "show" => ShellCommand::Form,
            "submit" | "save" => ShellCommand::Submit,
            "cancel" | "reset" => ShellCommand::Cancel,
            "delete" | "rm" => ShellCommand::Delete(parse_id(rest)?),
            "fetch" | "get" => ShellCommand::Fetch(rest.to_string()),
            "status" => ShellCommand::Status,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command {other:?}; try `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse().map_err(|_| format!("expected an employee id, got {raw:?}"))
}

/// Line-driven front end over one manager. Returns when stdin closes or on `quit`.
pub async fn run<A: EmployeeApi>(manager: &EmployeeManager<A>) -> Result<()> {
    let mut out = stdout();
    manager.load().await;
    write_status(&mut out, manager).await?;
    out.write_all(view::roster_table(&manager.roster()).as_bytes()).await?;
    out.write_all(b"type `help` for commands\n").await?;
    out.flush().await?;

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                out.write_all(format!("{message}\n").as_bytes()).await?;
                out.flush().await?;
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        execute(&mut out, manager, command).await?;
        out.flush().await?;
    }
    Ok(())
}

async fn execute<A, W>(
    out: &mut W,
    manager: &EmployeeManager<A>,
    command: ShellCommand,
) -> Result<()>
where
    A: EmployeeApi,
    W: AsyncWrite + Unpin,
{
    match command {
        ShellCommand::List => {
            manager.refresh().await;
            write_status(out, manager).await?;
            out.write_all(view::roster_table(&manager.roster()).as_bytes()).await?;
        }
        ShellCommand::Edit(id) => {
            if manager.edit_by_id(id) {
                let rendered = view::form(manager.form_mode(), &manager.form_buffer());
                out.write_all(rendered.as_bytes()).await?;
            } else {
                let message = format!("employee {id} is not in the roster; run `list`\n");
                out.write_all(message.as_bytes()).await?;
            }
        }
        ShellCommand::Set(field, value) => manager.field_changed(field, value),
        ShellCommand::Form => {
            let rendered = view::form(manager.form_mode(), &manager.form_buffer());
            out.write_all(rendered.as_bytes()).await?;
        }
        ShellCommand::Submit => {
            if manager.form_mode().is_editing() {
                manager.submit_update().await;
            } else {
                manager.submit_create().await;
            }
            write_status(out, manager).await?;
        }
        ShellCommand::Cancel => manager.reset(),
        ShellCommand::Delete(id) => {
            manager.delete(id).await;
            write_status(out, manager).await?;
        }
        ShellCommand::Fetch(query) => {
            manager.set_lookup_query(query);
            if let Some(record) = manager.fetch_query().await {
                out.write_all(view::record(&record).as_bytes()).await?;
            }
            write_status(out, manager).await?;
        }
        ShellCommand::Status => write_status(out, manager).await?,
        ShellCommand::Help => out.write_all(HELP.as_bytes()).await?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

async fn write_status<A, W>(out: &mut W, manager: &EmployeeManager<A>) -> Result<()>
where
    A: EmployeeApi,
    W: AsyncWrite + Unpin,
{
    if let Some(message) = manager.status() {
        out.write_all(format!("{message}\n").as_bytes()).await?;
    }
    Ok(())
}
