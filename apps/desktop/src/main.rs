use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{config, load_settings, HttpUserDirectory};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod controller;
mod view;

use controller::{commands::HELP, Controller, Flow};

#[derive(Parser, Debug)]
#[command(about = "Terminal client for a remote user directory")]
struct Args {
    /// Base URL of the directory service; `/users` is appended.
    #[arg(long)]
    base_url: Option<String>,
    /// Settings file (defaults to ./client.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(timeout_secs);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let base_url = config::normalize_base_url(&settings.base_url)?;
    let directory = HttpUserDirectory::with_timeout(&base_url, settings.request_timeout())
        .context("failed to build http client")?;
    tracing::info!("users: directory at {}", directory.users_url());

    let mut controller = Controller::new(directory);
    controller.load().await;
    print_screen(&controller.render())?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if controller.handle_line(&line).await == Flow::Quit {
            break;
        }
        print_screen(&controller.render())?;
    }

    Ok(())
}

fn print_screen(screen: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    stdout.write_all(screen.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
