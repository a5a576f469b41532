// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fluxo::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    // RUST_LOG wins over --verbose; tables go to stdout, logs to stderr.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match matches.subcommand() {
        Some(("analyze", sub)) => commands::analyze::handle(sub)?,
        Some(("categorize", sub)) => commands::categories::handle(sub)?,
        Some(("rules", sub)) => commands::rules::handle(sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
