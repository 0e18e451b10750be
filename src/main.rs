#[cfg(not(feature = "cli"))]
compile_error!("The `dbc2sql` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::io::Write;
use std::process;
use tracing_subscriber::EnvFilter;

use dbc::cli;
use dbc::cli::app::{Cli, ColorMode, Commands};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();

    let result = match cli.command {
        Commands::Convert {
            input,
            schema,
            output,
        } => cli::convert::execute(
            &cli::convert::Options {
                input,
                schema,
                output,
            },
            &mut writer,
        ),

        Commands::Batch {
            schema_dir,
            input_dir,
            output_dir,
        } => cli::batch::execute(
            &cli::batch::Options {
                schema_dir,
                input_dir,
                output_dir,
            },
            &mut writer,
        ),

        Commands::Header { input, json } => {
            cli::header::execute(&cli::header::Options { input, json }, &mut writer)
        }

        Commands::Syntax => cli::syntax::execute(&cli::syntax::Options, &mut writer),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "dbc2sql", &mut writer);
            Ok(())
        }
    };

    let _ = writer.flush();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Diagnostics go to stderr so they never mix with SQL on stdout.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dbc=debug")
    } else {
        EnvFilter::new("dbc=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
