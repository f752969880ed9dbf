//! Terminal front end for the Roster API.
//!
//! Reads one command per line from stdin and redraws the user table after
//! each one. The API location comes from `ROSTER_API_URL`.

use roster_client::{Command, UserApiClient, UserConsole, DEFAULT_API_URL};
use roster_core::RosterResult;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env file loaded: {e}");
    }

    init_logging();

    if let Err(e) = run().await {
        error!("Console error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> RosterResult<()> {
    let base_url = std::env::var("ROSTER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let api = UserApiClient::new(&base_url)?;
    println!("Roster console - {}", api.base_url());

    let mut console = UserConsole::new(api);
    console.load().await;
    print!("{}", console.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| roster_core::RosterError::Internal(format!("stdin: {e}")))?
    {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message} (try `help`)");
                continue;
            }
        };

        match command {
            Command::List => console.load().await,
            Command::Draft(field, value) => console.set_draft_field(field, value),
            Command::Create => console.create().await,
            Command::Edit(id) => console.open_edit(id).await,
            Command::Set(field, value) => console.set_edit_field(field, value),
            Command::Save => console.save_edit().await,
            Command::Cancel => console.cancel_edit(),
            Command::Delete(id) => console.delete(id).await,
            Command::Help => {
                println!("{}", roster_client::command::HELP);
                continue;
            }
            Command::Quit => break,
        }

        print!("{}", console.render());
    }

    Ok(())
}
