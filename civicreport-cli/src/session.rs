//! Session commands: login, logout, whoami

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_WARNING;
use colored::Colorize;

pub async fn run_login(username: String, password: Option<String>) -> CliResult<()> {
    let context = CliContext::new()?;

    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| CliError::new(format!("Failed to read password: {e}"), EXIT_WARNING))?,
    };

    match context.sessions().login(&username, &password).await? {
        Some(user) => {
            println!(
                "Logged in as {} ({})",
                user.display_name.bold(),
                user.role
            );
            Ok(())
        }
        None => Err(CliError::new(
            "Invalid username or password",
            EXIT_WARNING,
        )),
    }
}

pub async fn run_logout() -> CliResult<()> {
    let context = CliContext::new()?;
    context.sessions().logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn run_whoami() -> CliResult<()> {
    let context = CliContext::new()?;
    match context.sessions().current_user().await? {
        Some(user) => println!("{} ({})", user.display_name, user.role),
        None => println!("Not logged in"),
    }
    Ok(())
}
