//! Terminal front end: the registration form and the attendee list.

mod form;
mod list;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rsvp::features::registration::HttpStore;
use rsvp_logger::{LevelFilter, Logger};
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(name = "rsvp", version, about = "Register for the event and see who is coming")]
struct Cli {
    /// Base URL of the RSVP server.
    #[arg(long, env = "RSVP_API_URL", default_value = "http://127.0.0.1:4583", global = true)]
    api_url: String,

    /// Log debug output to the console.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the registration form.
    Register {
        /// Skip the name prompt.
        #[arg(long)]
        name: Option<String>,
        /// Skip the phone prompt; separators are allowed.
        #[arg(long)]
        phone: Option<String>,
        /// Skip the national ID prompt; separators are allowed.
        #[arg(long)]
        national_id: Option<String>,
    },
    /// List everyone who confirmed, newest first.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _logger =
        Logger::builder().name(env!("CARGO_PKG_NAME")).stderr(true).level(level).init()?;

    let store = HttpStore::new(&cli.api_url).context("Creating API client")?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Register { name, phone, national_id } => {
            let prefill = form::Prefill { name, phone, national_id };
            if let Ok(event) = store.event().await {
                form::print_event(&mut out, &event)?;
            } else {
                tracing::warn!(api_url = %cli.api_url, "Event details unavailable");
            }
            form::run(store, prefill, &mut stdin.lock(), &mut out).await?;
        },
        Command::List => list::run(&store, &mut out).await?,
    }

    out.flush()?;
    Ok(())
}
