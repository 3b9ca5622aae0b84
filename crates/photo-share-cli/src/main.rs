// SPDX-License-Identifier: AGPL-3.0
// Photo Share CLI - Headless frontend

mod app;
mod cli;
mod folder_library;
mod folder_share;

use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("photo_share_cli=info".parse().unwrap())
                .add_directive("photo_share_core=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Photo Share v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Photos(args) => app::list_photos(args).await,
        Command::Share(args) => app::share(args).await,
        Command::View { library, start } => app::view(library, start).await,
        Command::Theme { action } => app::theme(cli.config_dir, action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
