use std::panic;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use gencli::cli::commands::execute_command;
use gencli::cli::{output, Cli, CliError};
use gencli::exitcode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let message = e.to_string();
                let first = message.lines().next().unwrap_or_default();
                let err = CliError::InvalidArgs(first.trim_start_matches("error: ").to_string());
                output::error(&err);
                process::exit(err.exit_code());
            }
        },
    };

    setup_logging(cli.debug);

    // Panics are reported as internal errors; keep the default hook quiet.
    panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {}", info);
    }));

    let outcome = panic::catch_unwind(|| execute_command(&cli))
        .unwrap_or_else(|payload| Err(CliError::from_panic(payload)));

    match outcome {
        Ok(()) => {
            output::success();
            process::exit(exitcode::OK);
        }
        Err(e) => {
            output::error(&e);
            process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Logs go to stderr; stdout carries only the status line
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
