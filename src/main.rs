use chrono::Utc;
use std::process::ExitCode;
use streak_card::{Config, GithubClient, Result};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("streak card update failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String> {
    let config = Config::from_env()?;
    let client = GithubClient::new(&config)?;
    let stats = streak_card::run(&config, &client, Utc::now()).await?;
    Ok(stats.summary_line())
}
