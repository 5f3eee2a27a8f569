use std::io::IsTerminal;

use clap::Parser;
use taskboard::cli::commands::Cli;
use taskboard::cli::handlers::{self, Session};
use taskboard::cli::shell;
use taskboard::io::config_io;
use tracing_subscriber::EnvFilter;

fn main() {
    install_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::resolve_config(cli.config.as_deref(), &cwd)?;
    let mut session = Session::from_config(&config, cli.empty)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        // One-shot: run against a fresh board and exit
        Some(cmd) => handlers::dispatch(&mut session, cmd, cli.json, &mut out),
        None => {
            let stdin = std::io::stdin();
            let interactive = stdin.is_terminal();
            shell::run_shell(&mut session, cli.json, stdin.lock(), &mut out, interactive)
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
