use std::process;

mod cli;
mod completions;
mod context;
mod error;
mod exit_codes;
mod report;
mod session;

use clap::CommandFactory;
use cli::{Cli, Commands};
use error::handle_cli_result;
use exit_codes::{EXIT_SUCCESS, EXIT_WARNING};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help
    if cli.command.is_none() {
        Cli::command().print_help().expect("Failed to print help");
        process::exit(EXIT_SUCCESS);
    }

    use tracing::Level;

    let log_level = if cli.quiet {
        Level::ERROR
    } else if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level)
        .init();

    let exit_code = match cli.command {
        Some(Commands::Login { username, password }) => {
            handle_cli_result(session::run_login(username, password).await)
        }
        Some(Commands::Logout) => handle_cli_result(session::run_logout().await),
        Some(Commands::Whoami) => handle_cli_result(session::run_whoami().await),
        Some(Commands::Report {
            title,
            category,
            description,
            lat,
            lng,
            address,
            media_url,
        }) => handle_cli_result(
            report::run_report(title, category, description, lat, lng, address, media_url).await,
        ),
        Some(Commands::List { json }) => handle_cli_result(report::run_list(json).await),
        Some(Commands::Show { id }) => handle_cli_result(report::run_show(id).await),
        Some(Commands::Comment { id, text }) => {
            handle_cli_result(report::run_comment(id, text).await)
        }
        Some(Commands::Upvote { id }) => handle_cli_result(report::run_upvote(id).await),
        Some(Commands::SetStatus { id, status }) => {
            handle_cli_result(report::run_set_status(id, status).await)
        }
        Some(Commands::Completion { shell }) => match completions::print_completion(shell) {
            Ok(_) => EXIT_SUCCESS,
            Err(e) => {
                tracing::error!("Completion error: {}", e);
                EXIT_WARNING
            }
        },
        None => {
            // Handled early above
            unreachable!()
        }
    };

    process::exit(exit_code);
}
