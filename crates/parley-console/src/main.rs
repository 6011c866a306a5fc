#![allow(non_snake_case)]

mod cli;
mod config;
mod token_file;

use parley_client::api::{user, ApiCall};
use parley_client::{HttpClient, RequestError};
use parley_types::Session;
use serde::Serialize;
use thiserror::Error;

use crate::cli::{CliError, Command};
use crate::token_file::FileTokenStore;

#[derive(Debug, Error)]
enum ConsoleError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<(), ConsoleError> {
    let invocation = cli::parse(args)?;

    let appConfig = config::load(&invocation.config_path);
    tracing::info!(
        "loaded config from {}: base_url={}",
        invocation.config_path,
        appConfig.client.base_url
    );

    let session = Session::new(FileTokenStore::new(&appConfig.session.token_path));
    let client = HttpClient::new(appConfig.client.clone(), session.clone())?;

    match invocation.command {
        Command::RegisterCode { phone } => {
            print_json(&settle(user::get_register_code(&client, &phone)).await?)
        }
        Command::ResetCode { phone } => {
            print_json(&settle(user::get_reset_code(&client, &phone)).await?)
        }
        Command::Register(payload) => print_json(&settle(user::register(&client, &payload)).await?),
        Command::Login(payload) => {
            let login = settle(user::password_login(&client, &payload)).await?;
            session.sign_in(&login.token);
            tracing::info!("signed in, token stored at {}", appConfig.session.token_path);
            Ok(())
        }
        Command::ResetPassword(payload) => {
            print_json(&settle(user::reset_password(&client, &payload)).await?)
        }
        Command::Info => print_json(&settle(user::get_user_info(&client)).await?),
        Command::UpdateInfo(payload) => {
            print_json(&settle(user::update_user_info(&client, &payload)).await?)
        }
        Command::Logout => {
            session.sign_out();
            tracing::info!("signed out");
            Ok(())
        }
    }
}

/// Awaits the call, cancelling it through its source on Ctrl-C.
async fn settle<T>(call: ApiCall<T>) -> Result<T, RequestError> {
    let (mut request, source) = call.into_parts();
    tokio::select! {
        outcome = &mut request => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, cancelling request");
            source.cancel();
            request.await
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ConsoleError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
