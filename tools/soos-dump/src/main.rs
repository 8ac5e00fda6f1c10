// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! soos-dump - Inspect object streams
//!
//! Lists the objects, block data and resets of a stream file, and can
//! re-encode a stream with value interning to show how much it shrinks.

mod render;
mod shrink;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use soos::protocol::constants::{tag_name, TC_BLOCKDATA, TC_RESET};
use soos::{ObjectReader, StreamConfig, StreamItem, SubstitutableTypes};

#[derive(Parser)]
#[command(name = "soos-dump")]
#[command(about = "Inspect object streams and measure value interning")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every item in a stream
    Dump {
        /// Stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Nesting shown for records and arrays
        #[arg(short, long, default_value = "2")]
        depth: usize,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-encode a stream, interning substitutable values
    Shrink {
        /// Stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output stream file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// YAML stream configuration (defaults to the built-in types)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Extra substitutable record class names
        #[arg(short = 't', long = "type", value_name = "CLASS")]
        types: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump {
            input,
            depth,
            quiet,
        } => cmd_dump(&input, depth, quiet),
        Commands::Shrink {
            input,
            output,
            config,
            types,
        } => cmd_shrink(&input, &output, config.as_deref(), types),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_dump(input: &Path, depth: usize, quiet: bool) -> anyhow::Result<()> {
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let mut reader = ObjectReader::new(file)?;
    let mut index = 0usize;

    while let Some(item) = reader.next_item()? {
        if !quiet {
            match &item {
                StreamItem::Object(obj) => println!(
                    "{:>5} {} {}",
                    index,
                    "object".cyan(),
                    render::describe(obj.as_ref(), depth)
                ),
                StreamItem::BlockData(bytes) => println!(
                    "{:>5} {} {} bytes: {}",
                    index,
                    tag_name(TC_BLOCKDATA).yellow(),
                    bytes.len(),
                    render::hex(bytes, 16).dimmed()
                ),
                StreamItem::Reset => println!(
                    "{:>5} {}",
                    index,
                    tag_name(TC_RESET).magenta().bold()
                ),
            }
        }
        index += 1;
    }

    let stats = reader.stats();
    println!(
        "{} {} items: {} objects ({} back-references), {} class descriptors ({} back-references), {} resets",
        ">>>".green().bold(),
        index,
        stats.objects,
        stats.object_refs,
        stats.class_descs,
        stats.class_refs,
        stats.resets
    );
    Ok(())
}

fn cmd_shrink(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    types: Vec<String>,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => StreamConfig::from_yaml_file(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => StreamConfig::new(SubstitutableTypes::builtin()),
    };
    config.substitutable.extend(types);

    let source = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let sink = File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    let mut sink = BufWriter::new(sink);
    let report = shrink::shrink(source, &mut sink, config)?;
    sink.flush()?;

    let before = std::fs::metadata(input)?.len();
    let after = std::fs::metadata(output)?.len();
    println!(
        "{} {} -> {} bytes ({} objects, {} substituted, {} block bytes, {} resets)",
        ">>>".green().bold(),
        before,
        after,
        report.objects,
        report.substitutions,
        report.block_bytes,
        report.resets
    );
    if after > before {
        eprintln!("{}", "    re-encoded stream is larger than the input".yellow());
    }
    Ok(())
}
