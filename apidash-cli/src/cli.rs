use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::debug;

use apidash_core::{Config, FetchState, HttpBackend, StatusView};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "apidash", version, about = "API status dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API base address in the config file.
    Configure {
        /// Base address, e.g. "http://localhost:5062"; prompts when absent.
        base_url: Option<String>,
    },

    /// Fetch both endpoints and render the dashboard.
    Show {
        /// Override the configured base address for this run.
        #[arg(long)]
        base_url: Option<String>,

        /// Never prompt; exit nonzero instead of offering a retry.
        #[arg(long)]
        non_interactive: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { base_url } => configure(base_url),
            Command::Show { base_url, non_interactive } => {
                show(base_url.as_deref(), non_interactive).await
            }
        }
    }
}

fn configure(base_url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let value = match base_url {
        Some(value) => value,
        None => {
            let current = config.resolve_base_url(None);
            inquire::Text::new("API base address:")
                .with_default(&current)
                .prompt()
                .context("Failed to read base address")?
        }
    };

    config.set_base_url(value.trim_end_matches('/').to_string());
    config.save()?;

    println!("Saved base address to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(base_url: Option<&str>, non_interactive: bool) -> Result<()> {
    let config = Config::load()?;
    let base = config.resolve_base_url(base_url);
    debug!("using base address {base}");

    let mut view = StatusView::new(HttpBackend::new(base.clone()));

    loop {
        println!("Fetching {base} ...");
        view.load().await;

        match view.state() {
            FetchState::Ready(snapshot) => {
                println!("{}", render::dashboard(snapshot, &base));
                return Ok(());
            }
            FetchState::Error(message) => {
                eprintln!("{}", render::error_panel(message));

                if non_interactive {
                    bail!("Fetch cycle failed: {message}");
                }

                let retry = inquire::Confirm::new("Retry?")
                    .with_default(true)
                    .prompt()
                    .context("Failed to read retry answer")?;

                if !retry {
                    bail!("Fetch cycle failed: {message}");
                }
            }
            // load() always settles to ready or error.
            FetchState::Loading => bail!("Fetch cycle did not settle"),
        }
    }
}
