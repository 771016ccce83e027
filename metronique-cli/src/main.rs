mod cli;
mod commands;
mod config;
mod demo;
mod render;
mod state_store;

use anyhow::{Context, Result};
use clap::Parser;
use metronique::api::HttpWorkApi;
use metronique::session::{AuthToken, ClientStateStore, MemoryStateStore};
use metronique::{ProjectId, WorkError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::MetroniqueConfig;
use state_store::FileStateStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = if cli.dev {
        let mut state = MemoryStateStore::new();
        state.save_token(&AuthToken::new(demo::DEMO_TOKEN))?;
        state.save_current_project(&ProjectId::from(demo::DEMO_PROJECT))?;
        commands::run(demo::backend(), &mut state, cli.command)
            .await
            .map_err(login_hint)?
    } else {
        let config = MetroniqueConfig::load()?;
        let api = HttpWorkApi::new(&config.api_url)
            .with_context(|| format!("Invalid api_url in config: {}", config.api_url))?;
        let mut state = FileStateStore::open()?;
        commands::run(api, &mut state, cli.command)
            .await
            .map_err(login_hint)?
    };

    print!("{output}");
    Ok(())
}

fn login_hint(err: anyhow::Error) -> anyhow::Error {
    if err
        .downcast_ref::<WorkError>()
        .is_some_and(WorkError::is_unauthorized)
    {
        return err.context("Not authorized, run `metronique login` with a valid token");
    }
    err
}
