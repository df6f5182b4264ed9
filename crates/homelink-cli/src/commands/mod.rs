//! Command dispatch for the interactive shell.
//!
//! Commands are matched case-insensitively on whitespace-delimited
//! tokens, one module per resource namespace. Every command error is
//! printed and control returns to the prompt; only `exit` (or EOF)
//! ends the process.

pub mod device;
pub mod host;
pub mod house;
pub mod thdata;
pub mod user;

use std::io::{self, Write};

use anyhow::Result;
use tracing::warn;
use uuid::Uuid;

use homelink_core::{ApiClient, ClientError, Config};

pub enum LoopAction {
    Continue,
    Quit,
}

const OVERVIEW: &str = "\
Commands:
  connect <mail>     Log in to the server (prompts for password)
  logout             Drop the current session
  server-url         Change the server URL (prompts, logs out)
  user ...           Account commands (try `help user`)
  device ...         Device commands (try `help device`)
  host ...           Host commands (try `help host`)
  house ...          House commands (try `help house`)
  thdata ...         Sensor history commands (try `help thdata`)
  license            Show the license text
  help [command]     Show this list, or one namespace in detail
  exit               Leave the shell";

pub async fn dispatch(client: &ApiClient, config: &mut Config, line: &str) -> LoopAction {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((command, args)) = tokens.split_first() else {
        return LoopAction::Continue;
    };

    match command.to_ascii_lowercase().as_str() {
        "connect" => report(connect(client, args).await),
        "logout" => {
            client.logout().await;
            println!("Logged out");
        }
        "server-url" => report(server_url(client, config).await),
        "user" => report(user::run(client, args).await),
        "device" => report(device::run(client, args).await),
        "host" => report(host::run(client, args).await),
        "house" => report(house::run(client, args).await),
        "thdata" => report(thdata::run(client, args).await),
        "license" => println!("{}", crate::LICENSE_TEXT),
        "help" => help(args),
        "exit" => {
            println!("Bye");
            return LoopAction::Quit;
        }
        other => println!("Unknown command: {other}. Type `help` for the command list."),
    }
    LoopAction::Continue
}

fn help(args: &[&str]) {
    let topic = args.first().map(|s| s.to_ascii_lowercase());
    match topic.as_deref() {
        Some("user") => println!("{}", user::HELP),
        Some("device") => println!("{}", device::HELP),
        Some("host") => println!("{}", host::HELP),
        Some("house") => println!("{}", house::HELP),
        Some("thdata") => println!("{}", thdata::HELP),
        _ => println!("{OVERVIEW}"),
    }
}

async fn connect(client: &ApiClient, args: &[&str]) -> Result<()> {
    let mail = arg(args, 0, "mail")?;
    let password = rpassword::prompt_password("Password: ")?;
    client.login(mail, &password).await?;
    println!("Successfully logged in");
    Ok(())
}

async fn server_url(client: &ApiClient, config: &mut Config) -> Result<()> {
    let url = prompt("New server url: ")?;
    if url.is_empty() {
        println!("Empty URL");
        return Ok(());
    }
    client.change_base_url(&url).await;
    // Tokens target the old server, so the session ends here
    client.logout().await;
    config.server_url = url;
    if let Err(e) = config.save() {
        warn!(error = %e, "could not persist config");
    }
    println!("Success. You need to login again.");
    Ok(())
}

/// Print one error and move on; malformed local input gets its message
/// verbatim, everything else is prefixed.
fn report(result: Result<()>) {
    if let Err(e) = result {
        match e.downcast_ref::<ClientError>() {
            Some(ClientError::MalformedInput(msg)) => println!("{msg}"),
            _ => println!("Error: {e:#}"),
        }
    }
}

pub(crate) fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub(crate) fn arg<'a>(args: &[&'a str], index: usize, what: &str) -> Result<&'a str, ClientError> {
    args.get(index)
        .copied()
        .ok_or_else(|| ClientError::MalformedInput(format!("Missing argument: {what}")))
}

pub(crate) fn uuid_arg(args: &[&str], index: usize, what: &str) -> Result<Uuid, ClientError> {
    let raw = arg(args, index, what)?;
    Uuid::parse_str(raw).map_err(|_| ClientError::MalformedInput(format!("Malformed UUID: {what}")))
}

/// Optional UUIDs print as `-` when absent.
pub(crate) fn fmt_id(id: Option<Uuid>) -> String {
    id.map(|u| u.to_string()).unwrap_or_else(|| "-".to_string())
}
