use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AnalyzeArgs, ClassifyArgs, InviteCommands, RequestCommands};

/// File and track maintenance requests for your home
///
/// Wrench walks a maintenance request through the same steps a tenant sees
/// in the request form (category, description, urgency, location, photos and
/// review) and submits it once every required detail is present. Requests
/// and invites are kept in a local SQLite database and photos are copied
/// under a blob directory.
#[derive(Parser)]
#[command(version, about, name = "wrench")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/wrench/requests.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Directory uploaded photos are written to. Defaults to
    /// $XDG_DATA_HOME/wrench/blobs
    #[arg(long, global = true)]
    pub blob_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Identifier of the tenant filing or viewing requests
    #[arg(long, global = true, env = "WRENCH_USER_ID", default_value = "tenant")]
    pub user_id: String,

    /// Name recorded on submitted requests
    #[arg(long, global = true, env = "WRENCH_USER_NAME", default_value = "Tenant")]
    pub user_name: String,

    /// Contact email recorded on submitted requests
    #[arg(
        long,
        global = true,
        env = "WRENCH_USER_EMAIL",
        default_value = "tenant@example.com"
    )]
    pub user_email: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Wrench CLI
///
/// - `request`: file a new request and manage submitted ones
/// - `invite`: register and look up property invite codes
/// - `classify`: suggest a category for a description
/// - `analyze`: turn a repair assistant's analysis into the next step
#[derive(Subcommand)]
pub enum Commands {
    /// File and manage maintenance requests
    #[command(alias = "r")]
    Request {
        #[command(subcommand)]
        command: RequestCommands,
    },
    /// Manage property invite codes
    #[command(alias = "i")]
    Invite {
        #[command(subcommand)]
        command: InviteCommands,
    },
    /// Suggest a category for a problem description
    #[command(alias = "c")]
    Classify(ClassifyArgs),
    /// Decide the next step from a repair assistant's analysis
    #[command(alias = "a")]
    Analyze(AnalyzeArgs),
}
