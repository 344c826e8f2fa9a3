//! ipnotes CLI - Wallet-encrypted notes stored on IPFS
//!
//! This is the command-line interface for ipnotes. It wires the core
//! library to a config file, the environment and the terminal.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use ipnotes_core::VERSION;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{doctor, enhance, init, misc, notes};
use crate::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use crate::errors::exit_code_for;
use crate::ui::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli).await {
        let ui_ctx = ctx.ui_context(false);

        let full = format!("{}", e);
        let (message, explicit_hint) = split_hint(&full);
        let hint = explicit_hint.or_else(|| contextual_hint(message));

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Split "message\nhint" as produced by `CliError`; a leading "Hint:" is dropped.
fn split_hint(error: &str) -> (&str, Option<String>) {
    match error.split_once('\n') {
        Some((message, rest)) => {
            let rest = rest.trim();
            let rest = rest
                .strip_prefix("Hint:")
                .or_else(|| rest.strip_prefix("hint:"))
                .unwrap_or(rest)
                .trim();
            if rest.is_empty() {
                (message, None)
            } else {
                (message, Some(rest.to_string()))
            }
        }
        None => (error, None),
    }
}

/// Hints for core errors that reach `main` without one.
fn contextual_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("wallet request rejected") {
        return Some("Approve the request in your wallet and try again".to_string());
    }

    if error_lower.contains("decryption failed") {
        return Some(
            "The note was encrypted with a different wallet, or the payload is damaged"
                .to_string(),
        );
    }

    if error_lower.contains("invalid note payload") {
        return Some("The CID does not point to an ipnotes payload".to_string());
    }

    if error_lower.contains("failed to parse config") {
        return Some("Fix the file or rewrite it with `ipnotes init --force`".to_string());
    }

    if error_lower.contains("reference file") {
        return Some("The reference file must be a JSON array of {\"cid\": ...} objects".to_string());
    }

    None
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            notes::handle_add(ctx, args).await?;
        }
        Some(Commands::List(args)) => {
            notes::handle_list(ctx, args).await?;
        }
        Some(Commands::Show(args)) => {
            notes::handle_show(ctx, args).await?;
        }
        Some(Commands::Delete(args)) => {
            notes::handle_delete(ctx, args)?;
        }
        Some(Commands::Refs(args)) => {
            notes::handle_refs(ctx, args)?;
        }
        Some(Commands::Enhance(args)) => {
            enhance::handle_enhance(ctx, args)?;
        }
        Some(Commands::Doctor(args)) => {
            doctor::handle_doctor(ctx, args).await?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("ipnotes v{}", VERSION);
            println!("\nQuickstart:");
            println!("  ipnotes init --address <0x...>");
            println!("  ipnotes add --body \"Hello\" --enhance");
            println!("  ipnotes list");
            println!("  ipnotes show <cid>");
            println!("\nRun `ipnotes --help` for full usage.");
        }
    }

    Ok(())
}
