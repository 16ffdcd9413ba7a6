//! Wrench CLI
//!
//! Files maintenance requests through the step-by-step workflow and manages
//! the local request history.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use wrench_core::{
    models::SessionContext, params::ListRequests, validation::validate_email, DeskBuilder,
};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        blob_dir,
        no_color,
        user_id,
        user_name,
        user_email,
        command,
    } = Args::parse();

    validate_email(&user_email).context("Invalid --user-email")?;
    let session = SessionContext::new(user_id, user_name, user_email);

    let desk = DeskBuilder::new()
        .with_database_path(database_file)
        .with_blob_dir(blob_dir)
        .build()
        .await
        .context("Failed to initialize request desk")?;

    let cli = Cli::new(desk, TerminalRenderer::new(!no_color), session);

    info!("Wrench started");

    match command {
        Some(Request { command }) => cli.handle_request_command(command).await,
        Some(Invite { command }) => cli.handle_invite_command(command).await,
        Some(Classify(args)) => {
            cli.classify(&args);
            Ok(())
        }
        Some(Analyze(args)) => cli.analyze(&args).await,
        None => cli.list_requests(&ListRequests::default()).await,
    }
}
