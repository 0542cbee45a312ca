// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end for merging and inspecting result files.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};
use cts_results::{ResultList, SimpleQuery, load, merge, save, write_results};
use std::io::{self, Write};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "cts-results", version, about)]
struct App {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge result files into one canonical, deduplicated, sorted list.
    Merge {
        /// Input result files.
        #[arg(required = true)]
        inputs: Vec<Utf8PathBuf>,

        /// Write the merged list to this file instead of standard output,
        /// creating parent directories as needed.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// List the distinct tag-set variants observed in a result file.
    Variants {
        /// Input result file.
        input: Utf8PathBuf,

        /// Emit JSON instead of one canonical tag string per line.
        #[arg(long)]
        json: bool,
    },

    /// List the distinct statuses observed in a result file.
    Statuses {
        /// Input result file.
        input: Utf8PathBuf,

        /// Emit JSON instead of one status code per line.
        #[arg(long)]
        json: bool,
    },
}

fn init_logger() {
    let level_str = std::env::var("CTS_RESULTS_LOG").unwrap_or_default();
    // If the level string is empty, use the standard level filter instead.
    let targets: Targets = if level_str.is_empty() {
        Targets::new().with_default(LevelFilter::INFO)
    } else {
        level_str.parse().expect("unable to parse CTS_RESULTS_LOG")
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(targets);
    tracing_subscriber::registry().with(layer).init();
}

fn load_input(path: &Utf8Path) -> Result<ResultList<SimpleQuery>> {
    load(path).wrap_err_with(|| format!("reading `{path}`"))
}

fn exec(command: Command) -> Result<()> {
    match command {
        Command::Merge { inputs, output } => {
            let lists = inputs
                .iter()
                .map(|path| load_input(path))
                .collect::<Result<Vec<_>>>()?;
            let merged = merge(lists);
            match output {
                Some(path) => {
                    save(&path, &merged).wrap_err_with(|| format!("writing `{path}`"))?
                }
                None => write_results(io::stdout().lock(), &merged)?,
            }
        }
        Command::Variants { input, json } => {
            let variants = load_input(&input)?.variants();
            let mut stdout = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &variants)?;
                writeln!(stdout)?;
            } else {
                for variant in variants {
                    writeln!(stdout, "{variant}")?;
                }
            }
        }
        Command::Statuses { input, json } => {
            let statuses = load_input(&input)?.statuses();
            let mut stdout = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &statuses)?;
                writeln!(stdout)?;
            } else {
                for status in statuses {
                    writeln!(stdout, "{status}")?;
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logger();
    let app = App::parse();
    exec(app.command)
}
