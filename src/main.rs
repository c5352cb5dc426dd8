use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rocket::config::{Config, Shutdown};
use rocket::routes;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use recording_vote::dispatcher::{SignalDispatcher, ToggleSignal};
use recording_vote::error::Error;
use recording_vote::locator::{ProcessLocator, SystemProcessTable};
use recording_vote::routes::{index, index_fallback, status, vote, vote_post, AppState};
use recording_vote::tally::VoteTally;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address the HTTP server should listen on
    #[arg(long)]
    listen_address: SocketAddr,

    /// HTML file served at the root path
    #[arg(long)]
    index_page: PathBuf,

    /// Number of votes necessary to toggle recording
    #[arg(long, default_value_t = 2)]
    toggle_threshold: usize,

    /// Process name to scan for
    #[arg(long, default_value = "Jamulus")]
    process_name: String,
}

async fn run(args: Args) -> Result<(), Error> {
    let locator = SystemProcessTable;
    let pid = locator
        .locate(&args.process_name)
        .ok_or_else(|| Error::ProcessNotFound(args.process_name.clone()))?;
    info!(pid, process = %args.process_name, "found target process");

    let index_page = std::fs::read(&args.index_page).map_err(|source| Error::IndexPage {
        path: args.index_page.clone(),
        source,
    })?;

    let dispatcher = Arc::new(SignalDispatcher::new(
        pid,
        args.process_name.clone(),
        Box::new(locator),
        Box::new(ToggleSignal),
    ));

    let state = AppState {
        tally: Mutex::new(VoteTally::new()),
        threshold: args.toggle_threshold,
        dispatcher,
        index_page,
    };

    let mut shutdown = Shutdown::default();
    #[cfg(unix)]
    shutdown.signals.insert(rocket::config::Sig::Term);

    let config = Config {
        address: args.listen_address.ip(),
        port: args.listen_address.port(),
        shutdown,
        ..Config::default()
    };

    info!("listening insecurely on {}", args.listen_address);
    rocket::custom(config)
        .manage(state)
        .mount("/", routes![index, index_fallback, vote, vote_post, status])
        .launch()
        .await?;

    info!("received shutdown signal, exiting gracefully");
    Ok(())
}

#[rocket::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}
