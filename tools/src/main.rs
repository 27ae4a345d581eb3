use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bedrock_tools::{
    decode_frame, format_decode_pretty, inspect_batch, parse_hex, registry_summary, BatchReport,
};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{Codec, CodecLimits};
use glob::Pattern;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "bedrock-tools",
    version,
    about = "Bedrock frame, batch and registry inspection"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode one frame (identifier plus fields).
    Decode {
        /// Hex string, or a path to a file holding the raw frame.
        frame: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
        /// Accept bytes left over after the last field.
        #[arg(long)]
        allow_trailing: bool,
    },
    /// Decode every frame of a game batch.
    Batch {
        /// Path to a captured datagram, or a directory of them.
        path: PathBuf,
        /// The batch carries a compression method byte.
        #[arg(long)]
        compressed: bool,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Pretty)]
        format: DecodeFormat,
    },
    /// List registered packets.
    Registry {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log)?;

    let registry = packets::registry().context("build packet registry")?;
    let nbt = packets::NetworkNbt::new();
    let codec = Codec::new(registry).with_tag_grammar(&nbt);

    match cli.command {
        Command::Decode {
            frame,
            format,
            allow_trailing,
        } => {
            let bytes = read_frame(&frame)?;
            let codec = if allow_trailing {
                codec.with_limits(CodecLimits {
                    reject_trailing_bytes: false,
                    ..CodecLimits::default()
                })
            } else {
                codec
            };
            let decoded = decode_frame(&bytes, &codec)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&decoded).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => print!("{}", format_decode_pretty(&decoded)),
            }
        }
        Command::Batch {
            path,
            compressed,
            glob,
            format,
        } => {
            let files = if path.is_dir() {
                collect_batch_files(&path, glob.as_deref())?
            } else {
                vec![path]
            };
            for file in files {
                let bytes =
                    fs::read(&file).with_context(|| format!("read batch {}", file.display()))?;
                let report = inspect_batch(&bytes, compressed, &wire::Limits::default(), &codec)
                    .with_context(|| format!("inspect batch {}", file.display()))?;
                print_batch_report(&file, &report, format)?;
            }
        }
        Command::Registry { json } => {
            let summary = registry_summary(registry);
            if json {
                let json = serde_json::to_string_pretty(&summary).context("serialize json")?;
                println!("{json}");
            } else {
                println!("registry hash: 0x{:016x}", registry.hash());
                for shape in summary {
                    println!(
                        "{:>5}  {:<32} {:>3} fields  {}",
                        shape.id, shape.name, shape.fields, shape.hash
                    );
                }
            }
        }
    }
    Ok(())
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("install log subscriber")
}

fn read_frame(arg: &str) -> Result<Vec<u8>> {
    let path = Path::new(arg);
    if path.is_file() {
        fs::read(path).with_context(|| format!("read frame {}", path.display()))
    } else {
        parse_hex(arg).context("parse frame hex")
    }
}

fn collect_batch_files(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = glob
        .map(|value| Pattern::new(value).context("invalid glob pattern"))
        .transpose()?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !pattern.matches_path(&path) && !matches_name {
                continue;
            }
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn print_batch_report(path: &Path, report: &BatchReport, format: DecodeFormat) -> Result<()> {
    match format {
        DecodeFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        DecodeFormat::Pretty => {
            println!(
                "== {} ({} payload bytes, compression: {}) ==",
                path.display(),
                report.payload_len,
                report.compression.as_deref().unwrap_or("not negotiated")
            );
            for frame in &report.frames {
                print!("{}", format_decode_pretty(frame));
            }
            if !report.unknown.is_empty() {
                let ids: Vec<String> = report.unknown.iter().map(|id| format!("0x{id:x}")).collect();
                println!("unknown packets: {} ({})", report.unknown.len(), ids.join(", "));
            }
        }
    }
    Ok(())
}
