// Copyright 2026 Faleproxy Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use faleproxy::cli;

#[derive(Parser)]
#[command(
    name = "faleproxy",
    about = "Faleproxy — fetch a page and swap Yale for Fale in its visible text",
    version,
    after_help = "Run 'faleproxy <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service in the foreground
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3001")]
        port: u16,
        /// Word to replace (case-insensitive)
        #[arg(long, default_value = "yale")]
        target: String,
        /// Word to substitute (must match the target's length)
        #[arg(long, default_value = "fale")]
        replacement: String,
        /// Fetch timeout in milliseconds
        #[arg(long, default_value = "10000")]
        timeout: u64,
    },
    /// Fetch a single page, rewrite it, and print the result
    Fetch {
        /// URL to fetch
        url: String,
        /// Word to replace (case-insensitive)
        #[arg(long, default_value = "yale")]
        target: String,
        /// Word to substitute (must match the target's length)
        #[arg(long, default_value = "fale")]
        replacement: String,
        /// Fetch timeout in milliseconds
        #[arg(long, default_value = "10000")]
        timeout: u64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("FALEPROXY_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("FALEPROXY_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("FALEPROXY_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("FALEPROXY_NO_COLOR", "1");
    }

    let result = match cli.command {
        Commands::Serve {
            port,
            target,
            replacement,
            timeout,
        } => cli::serve_cmd::run(port, &target, &replacement, timeout).await,
        Commands::Fetch {
            url,
            target,
            replacement,
            timeout,
        } => cli::fetch_cmd::run(&url, &target, &replacement, timeout).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "faleproxy", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
