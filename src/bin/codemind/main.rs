// ABOUTME: CodeMind CLI - drives the editor, assistant, and history components from a terminal
// ABOUTME: Talks to a running codemind-server through the typed API client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Run a file in the sandbox
//! codemind run --language python --file hello.py
//!
//! # Feed standard input to the program
//! codemind run --language c --file sum.c --stdin "3 4"
//!
//! # Ask the assistant to debug or explain a file
//! codemind ask debug --language javascript --file app.js
//! codemind ask explain --language java --file Main.java
//!
//! # Generate code from a prompt
//! codemind ask generate --language python --prompt "binary search over a sorted list"
//!
//! # Review and prune history
//! codemind history list
//! codemind history show 3f6c1a2e-...
//! codemind history delete 3f6c1a2e-...
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codemind::{
    client::ApiClient,
    logging::LoggingConfig,
    models::AssistantMode,
    ui::{AppContext, Theme},
};

#[derive(Parser)]
#[command(
    name = "codemind",
    about = "CodeMind CLI",
    long_about = "Run code, ask the AI assistant, and review assistant history against a CodeMind server."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server URL override (defaults to `CODEMIND_API_URL` or http://127.0.0.1:8081)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Colour theme for terminal output
    #[arg(long, global = true, default_value = "dark")]
    theme: Theme,

    /// Signed-in display name
    #[arg(long, global = true)]
    user: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run source code in the sandbox
    Run {
        /// Language name (javascript, python, java, c)
        #[arg(long, short = 'l')]
        language: String,

        /// Source file; the language template is used when omitted
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Standard input for the program
        #[arg(long)]
        stdin: Option<String>,
    },

    /// Ask the AI assistant
    Ask {
        /// debug, explain, or generate
        mode: AssistantMode,

        /// Language name
        #[arg(long, short = 'l')]
        language: String,

        /// Source file for debug and explain
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Free-text prompt for generate
        #[arg(long, short = 'p')]
        prompt: Option<String>,
    },

    /// Assistant history commands
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum HistoryCommand {
    /// List every interaction, newest first
    List,

    /// Show one interaction in full
    Show {
        /// Interaction ID
        id: String,
    },

    /// Delete one interaction
    Delete {
        /// Interaction ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let client = cli
        .api_url
        .as_deref()
        .map_or_else(ApiClient::from_env, ApiClient::new);
    let mut context = AppContext::new(cli.theme);
    if let Some(user) = cli.user {
        context = context.with_identity(user);
    }

    match cli.command {
        Command::Run {
            language,
            file,
            stdin,
        } => {
            commands::run::execute(&context, client, &language, file, stdin).await?;
        }
        Command::Ask {
            mode,
            language,
            file,
            prompt,
        } => {
            commands::ask::execute(&context, client, mode, &language, file, prompt).await?;
        }
        Command::History { action } => match action {
            HistoryCommand::List => commands::history::list(&context, client).await?,
            HistoryCommand::Show { id } => commands::history::show(&context, client, &id).await?,
            HistoryCommand::Delete { id } => {
                commands::history::delete(&context, client, &id).await?;
            }
        },
    }

    Ok(())
}
