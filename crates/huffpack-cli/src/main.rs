//! `huffman` - compress or decompress one file, printing JSON statistics

use std::io::{stdout, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use huffpack_core::{CodecConfig, HuffmanCodec, Operation};

#[derive(Debug, Parser)]
#[command(name = "huffman", version, about = "Huffman file compressor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress <INPUT> into the container <OUTPUT>
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Omit the payload checksum
        #[arg(long)]
        no_checksum: bool,
    },
    /// Restore the original bytes of container <INPUT> into <OUTPUT>
    Decompress { input: PathBuf, output: PathBuf },
    /// Print the header of container <INPUT>
    Inspect { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let line = match cli.command {
        Command::Compress {
            input,
            output,
            no_checksum,
        } => {
            let codec = HuffmanCodec::with_config(CodecConfig {
                checksum: !no_checksum,
            });
            run(&codec, Operation::Compress, input, output)?
        }
        Command::Decompress { input, output } => {
            run(&HuffmanCodec::new(), Operation::Decompress, input, output)?
        }
        Command::Inspect { input } => {
            let info = HuffmanCodec::new()
                .inspect_file(&input)
                .with_context(|| format!("inspecting {}", input.display()))?;
            serde_json::to_string(&info).context("serializing container info")?
        }
    };

    let mut out = stdout().lock();
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

fn run(
    codec: &HuffmanCodec,
    operation: Operation,
    input: PathBuf,
    output: PathBuf,
) -> anyhow::Result<String> {
    let stats = codec.run(operation, &input, &output).with_context(|| {
        format!(
            "{} {} into {}",
            operation.as_str(),
            input.display(),
            output.display()
        )
    })?;
    serde_json::to_string(&stats).context("serializing statistics")
}
