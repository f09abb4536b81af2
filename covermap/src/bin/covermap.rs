use std::env;

use clap::Parser;
use covermap::CovermapResult;
use covermap::config::args::Args;
use covermap::config::file::{Config, read_config};
use covermap::logging::{ensure_covermap_core_log_level_matches, init_tracing};
use covermap::srv::new_server;
use covermap_core::config::env::OsEnv;
use tracing::{error, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

async fn start(args: Args) -> CovermapResult<()> {
    info!("Starting covermap v{VERSION}");

    let env = OsEnv::default();
    let save_config = args.meta.save_config.clone();
    let mut config = if let Some(ref cfg_filename) = args.meta.config {
        info!("Using {}", cfg_filename.display());
        read_config(cfg_filename, &env)?
    } else {
        info!("Config file is not specified, using defaults");
        Config::default()
    };

    args.merge_into_config(&mut config, &env);
    config.finalize()?;
    let substituted = env.substituted();
    if !substituted.is_empty() {
        info!(
            "Configuration used environment variables: {}",
            substituted.join(", ")
        );
    }
    let state = config.resolve();

    if let Some(file_name) = save_config {
        config.save_to_file(file_name.as_path())?;
    } else {
        info!("Use --save-config to save or print the configuration.");
    }

    let (server, listen_addresses) = new_server(config.srv, state)?;
    info!("covermap has been started on {listen_addresses}.");
    info!("Open http://{listen_addresses}/ to see the map.");

    server.await
}

#[tokio::main]
async fn main() {
    let filter = ensure_covermap_core_log_level_matches(env::var("RUST_LOG").ok());
    init_tracing(&filter, env::var("COVERMAP_FORMAT").ok());

    let args = Args::parse();
    if let Err(e) = start(args).await {
        // Ensure the message is printed, even if the logging is disabled
        if tracing::enabled!(tracing::Level::ERROR) {
            error!("{e}");
        } else {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }
}
