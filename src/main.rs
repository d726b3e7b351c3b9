//! Pipe-filter entry point: advance a progress bar once per stdin line.
//!
//! The expected line count is supplied as the single positional argument,
//! typically precomputed by the caller:
//!
//! ```text
//! find . -type f -exec cp "{}" /tmp/media/ \; | pipebar $(find . -type f | wc -l)
//! ```
//!
//! Reading stops at end-of-stream, at an empty line, or on Ctrl-C; all
//! three finalize the bar and exit 0. A missing or non-positive total is
//! reported on stderr and exits 1.

use std::io::{self, BufRead as _};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context as _;
use clap::Parser;

use pipebar::ProgressBar;

/// Terminal progress bar for pipes: one unit of progress per input line.
#[derive(Parser)]
#[command(name = "pipebar", version, about)]
struct Cli {
    /// Expected number of lines on standard input (-1 for unknown).
    total: i64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            log::error!("{error:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let mut bar = ProgressBar::new(cli.total);
    log::info!("expecting {} units", cli.total);

    if cli.total <= 0 {
        eprintln!(
            "a positive number of jobs/iterations is required\n\
             \n\
             Usage:\n\
             \x20   command | pipebar <jobs>\n\
             \n\
             Example:\n\
             \x20   find . -type f -exec cp \"{{}}\" /tmp/media/ \\; | pipebar $(find . -type f | wc -l)"
        );
        return Ok(1);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("failed to install the interrupt handler")?;
    }

    let stdin = io::stdin();
    let mut scope = bar.open();

    for line in stdin.lock().lines() {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        match line {
            // An empty line is the stream-end sentinel, matching the
            // end-of-stream behavior of the upstream producers this filter
            // is used with.
            Ok(text) if text.is_empty() => break,
            Ok(_) => scope.increment(1),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => break,
            Err(error) => return Err(error).context("failed reading standard input"),
        }
    }

    // Scope drop renders 100% and prints the execution-time summary, for
    // end-of-stream and interrupt alike.
    drop(scope);
    Ok(0)
}
