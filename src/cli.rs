//! CLI struct definitions for the Baton command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "baton",
    version = env!("CARGO_PKG_VERSION"),
    about = "Baton is the daemonless, local-first checkpoint protocol that agents call on demand to externalize session state into a durable handoff and resume it after a context discard.",
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// Checkpoint namespace root (defaults to the nearest `.baton` directory).
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub(crate) struct CheckpointCli {
    /// Session name; omit for the default session.
    pub session_name: Option<String>,
    /// Read the checkpoint document (JSON) from this file.
    #[clap(long)]
    pub file: Option<PathBuf>,
    /// Read the checkpoint document (JSON) from stdin instead.
    #[clap(long)]
    pub stdin: bool,
    /// Mark the record to survive a later resume.
    #[clap(long)]
    pub retain: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ResumeCli {
    /// Session name; omit for the default session.
    pub session_name: Option<String>,
    /// Keep the record after a successful resume instead of deleting it.
    #[clap(long)]
    pub keep: bool,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ListCli {
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Write a checkpoint document for a session
    #[clap(name = "checkpoint", visible_alias = "c")]
    Checkpoint(CheckpointCli),

    /// Load a previously checkpointed session and apply the cleanup policy
    #[clap(name = "resume", visible_alias = "r")]
    Resume(ResumeCli),

    /// List checkpoints under the namespace root
    #[clap(name = "list", visible_alias = "l")]
    List(ListCli),

    /// Show version information
    #[clap(name = "version")]
    Version,
}
