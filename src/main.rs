//! Curl Latency Probe - Main CLI Application
//!
//! Times a curl command repeatedly and reports the mean, TP90 and TP99 of
//! the successful runs.

use clap::Parser;
use curl_latency_probe::{
    cli::Cli,
    config::EnvManager,
    error::{AppError, Result},
    App,
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("This is a bug; please report it with the command that triggered it.");
        process::exit(99);
    }));

    // Parse command line arguments
    let cli = Cli::parse();
    let use_color = cli.use_colors();
    colored::control::set_override(use_color);

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.env_example {
        print!("{}", EnvManager::create_example_env_content());
        return Ok(());
    }

    let app = App::from_cli(cli)?;
    app.run().await?;
    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Run with --env-example to see the supported environment variables");
            eprintln!("  - --count must be at most 100000");
            eprintln!("  - --interval and --timeout take seconds between 0 and 3600");
            eprintln!("  - --color and --no-color cannot be combined");
        }
        AppError::Io(_) => {
            eprintln!();
            eprintln!("I/O troubleshooting:");
            eprintln!("  - Check that stdout is writable (closed pipes end the run)");
            eprintln!("  - Check permissions on the command and environment files");
        }
        _ => {}
    }
}
