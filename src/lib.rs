//! Baton: session handoff for AI agents
//!
//! **Baton is a local-first checkpoint protocol for long-running agent
//! sessions.**
//!
//! An interactive session externalizes its working state into a durable
//! handoff document (`baton checkpoint`), discards its context, and later
//! reconstructs continuity from the stored document (`baton resume`). Baton
//! defines the document schema, the addressing rules, and the retention
//! policy; it does not generate the document's prose and it does not parse
//! user-facing commands -- those belong to the calling agent runtime.
//!
//! # Core Principles
//!
//! - **Local-first**: every record is a plain JSON file under `.baton/`
//! - **One record per session**: a new checkpoint fully replaces the prior one
//! - **One-shot by default**: a successful resume deletes the record unless
//!   retention was requested
//! - **Fail closed**: invalid documents never reach storage; corrupt records
//!   are never auto-deleted
//!
//! # Addressing
//!
//! - Default session: `<root>/handoff.json`
//! - Named session: `<root>/handoffs/handoff-{name}.json`
//!
//! # Examples
//!
//! ```bash
//! # Checkpoint the default session from a document file
//! baton checkpoint --file handoff.json
//!
//! # Checkpoint a named session from stdin
//! cat doc.json | baton checkpoint feature-a --stdin
//!
//! # Resume and delete the record
//! baton resume feature-a
//!
//! # Resume but keep the record for a later look
//! baton resume feature-a --keep
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: protocol implementation (session keys, document model, record
//!   envelope, store, writer, reader)

pub mod core;

mod cli;

use crate::core::document::CheckpointDocument;
use crate::core::error::BatonError;
use crate::core::reader::{self, Retention};
use crate::core::record::CheckpointRecord;
use crate::core::session::SessionKey;
use crate::core::store::{CheckpointStore, FileStore};
use crate::core::{output, writer};

use clap::Parser;
use colored::Colorize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const NAMESPACE_DIR: &str = ".baton";

/// Walk up from `start_dir` looking for an existing `.baton` namespace;
/// fall back to creating one under `start_dir` on first write.
fn find_namespace_root(start_dir: &Path) -> PathBuf {
    let mut current_dir = PathBuf::from(start_dir);
    loop {
        let candidate = current_dir.join(NAMESPACE_DIR);
        if candidate.exists() {
            return candidate;
        }
        if !current_dir.pop() {
            return start_dir.join(NAMESPACE_DIR);
        }
    }
}

fn load_document_input(args: &cli::CheckpointCli) -> Result<CheckpointDocument, BatonError> {
    let raw = match (&args.file, args.stdin) {
        (Some(_), true) => {
            return Err(BatonError::Validation(
                "pass either --file or --stdin, not both".to_string(),
            ));
        }
        (Some(path), false) => fs::read_to_string(path)
            .map_err(|e| BatonError::storage_read(path, e))?,
        (None, true) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (None, false) => {
            return Err(BatonError::Validation(
                "a checkpoint document is required: pass --file <doc.json> or --stdin".to_string(),
            ));
        }
    };

    serde_json::from_str(&raw)
        .map_err(|e| BatonError::Validation(format!("invalid checkpoint document: {}", e)))
}

fn dispatch_checkpoint(store: &FileStore, args: &cli::CheckpointCli) -> Result<(), BatonError> {
    let key = SessionKey::resolve(args.session_name.as_deref())?;
    let document = load_document_input(args)?;
    let scenario = document.scenario;
    let address = writer::write(store, &key, document, args.retain)?;

    println!(
        "{} Checkpoint written for session '{}' ({})",
        "✓".bright_green(),
        key.label().bright_white().bold(),
        scenario.as_str()
    );
    println!(
        "  {} Address: {}",
        "▸".bright_cyan(),
        address.display().to_string().bright_black()
    );
    if args.retain {
        println!(
            "  {} Record will survive resume (retain requested)",
            "▸".bright_cyan()
        );
    }
    Ok(())
}

fn render_resumed_text(key: &SessionKey, document: &CheckpointDocument, retention: Retention) {
    println!(
        "{} Resumed session '{}' ({})",
        "✓".bright_green(),
        key.label().bright_white().bold(),
        document.scenario.as_str()
    );
    println!(
        "  {} Objective: {}",
        "▸".bright_cyan(),
        output::clip(&document.objective, 100)
    );
    println!(
        "  {} Current state: {}",
        "▸".bright_cyan(),
        output::clip(&document.current_state, 100)
    );

    if !document.architectural_context.is_empty() {
        println!(
            "  {} Context: {}",
            "▸".bright_cyan(),
            output::context_summary(&document.architectural_context)
        );
    }
    if !document.work_completed.is_empty() {
        println!(
            "  {} Completed: {}",
            "▸".bright_cyan(),
            output::completed_summary(&document.work_completed)
        );
    }
    println!(
        "  {} Remaining: {}",
        "▸".bright_cyan(),
        output::remaining_summary(&document.work_remaining)
    );
    if !document.open_questions.is_empty() {
        println!(
            "  {} Open questions: {}",
            "▸".bright_cyan(),
            output::questions_summary(&document.open_questions)
        );
    }

    match retention {
        Retention::Deleted => println!(
            "  {} Record deleted after read (pass --keep to retain)",
            "▸".bright_yellow()
        ),
        Retention::Retained => println!("  {} Record retained", "▸".bright_yellow()),
    }

    println!();
    println!("{}", "Resumption prompt:".bright_white().bold());
    println!("{}", document.resumption_prompt);
}

fn dispatch_resume(store: &FileStore, args: &cli::ResumeCli) -> Result<ExitCode, BatonError> {
    let key = SessionKey::resolve(args.session_name.as_deref())?;

    match reader::read(store, &key, args.keep) {
        Ok((document, retention)) => {
            if args.format == "json" {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                render_resumed_text(&key, &document, retention);
            }
            Ok(ExitCode::SUCCESS)
        }
        // Recoverable: report once, with the fallback path, and signal
        // failure through the exit code rather than a second error print.
        Err(BatonError::NotFound(_)) => {
            println!(
                "{} No checkpoint found for session '{}'",
                "✗".bright_red(),
                key.label().bright_white().bold()
            );
            println!(
                "  {} Expected address: {}",
                "▸".bright_yellow(),
                store.address(&key).display()
            );
            println!(
                "  {} Run {} to create one, or restate the session's intent manually",
                "▸".bright_yellow(),
                "baton checkpoint".bright_cyan().bold()
            );
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other),
    }
}

fn dispatch_list(store: &FileStore, args: &cli::ListCli) -> Result<(), BatonError> {
    let keys = store.list_keys()?;

    if args.format == "json" {
        let mut rows = Vec::new();
        for key in &keys {
            let row = match CheckpointRecord::decode(&store.get(key)?) {
                Ok(record) => serde_json::json!({
                    "session": key.label(),
                    "address": store.address(key),
                    "scenario": record.document.scenario.as_str(),
                    "written_at": record.written_at,
                    "retain": record.retain,
                }),
                Err(_) => serde_json::json!({
                    "session": key.label(),
                    "address": store.address(key),
                    "corrupt": true,
                }),
            };
            rows.push(row);
        }
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if keys.is_empty() {
        println!("No checkpoints under {}", store.root().display());
        return Ok(());
    }
    for key in &keys {
        match CheckpointRecord::decode(&store.get(key)?) {
            Ok(record) => println!(
                "{} {} ({}, written {}{})",
                "●".bright_green(),
                key.label().bright_white(),
                record.document.scenario.as_str(),
                record.written_at,
                if record.retain { ", retained" } else { "" }
            ),
            Err(_) => println!(
                "{} {} {}",
                "✗".bright_red(),
                key.label().bright_white(),
                "(corrupt record)".bright_black()
            ),
        }
    }
    Ok(())
}

pub fn run() -> Result<ExitCode, BatonError> {
    let cli = cli::Cli::parse();
    let current_dir = std::env::current_dir()?;
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => find_namespace_root(&current_dir),
    };
    let store = FileStore::new(root);

    match &cli.command {
        cli::Command::Version => {
            // Simple output for scripts/parsing.
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Checkpoint(args) => {
            dispatch_checkpoint(&store, args)?;
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Resume(args) => dispatch_resume(&store, args),
        cli::Command::List(args) => {
            dispatch_list(&store, args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
