use crate::config::{ExecutionMode, OutputFormat, RleConfig};
use crate::error::RleError;
use crate::pipeline;
use crate::rle::fused_boundaries;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

const DEFAULT_WORKERS: usize = 4;

#[derive(Parser)]
#[command(author, version, about, long_about = "Parallel chunked run-length encoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run-length encodes a file
    Encode {
        /// Input file to encode
        #[arg(short, long, value_name = "FILE", default_value = "test.txt")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE", default_value = "compressed.txt")]
        output: PathBuf,

        /// Number of worker threads
        #[arg(short = 't', long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Number of chunks (default: one per worker)
        #[arg(short, long)]
        chunks: Option<usize>,

        /// Scheduling mode [rayon, threads, sequential]
        #[arg(short, long, default_value = "rayon")]
        mode: ExecutionMode,

        /// Output format [text, binary, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shows how a file is split into chunks and which boundaries fuse
    Plan {
        /// Input file to inspect
        #[arg(short, long, value_name = "FILE", default_value = "test.txt")]
        input: PathBuf,

        /// Number of worker threads
        #[arg(short = 't', long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Number of chunks (default: one per worker)
        #[arg(short, long)]
        chunks: Option<usize>,
    },
}

pub fn run() -> Result<(), RleError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode { input, output, workers, chunks, mode, format, progress, json } => {
            let config = RleConfig {
                workers: *workers,
                chunks: *chunks,
                mode: *mode,
                format: *format,
                progress: *progress,
            };

            let mut in_file = BufReader::new(File::open(input)?);
            let mut out_file = BufWriter::new(File::create(output)?);

            let start = Instant::now();
            let stats = pipeline::encode(&mut in_file, &mut out_file, &config)?;
            let duration = start.elapsed();

            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Encoding done. Output saved to {}", output.display());
                println!("  Original Size:  {} bytes", stats.original_size);
                println!("  Encoded Size:   {} bytes", stats.encoded_size);
                println!("  Tokens:         {}", stats.token_count);
                println!("  Chunks:         {} ({} fused boundaries)", stats.chunks, stats.fusions);
                println!("  Elapsed Time:   {:.2?}", duration);
            }
        }
        Commands::Plan { input, workers, chunks } => {
            let config = RleConfig {
                workers: *workers,
                chunks: *chunks,
                mode: ExecutionMode::Sequential,
                ..Default::default()
            };

            let mut buffer = Vec::new();
            BufReader::new(File::open(input)?).read_to_end(&mut buffer)?;
            let partials = pipeline::plan(&buffer, &config)?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let fused = fused_boundaries(&partials);
            for (partial, fuses) in partials.iter().zip(fused) {
                let range = partial.range;
                match (partial.leading(), partial.trailing()) {
                    (Some(leading), Some(trailing)) => {
                        writeln!(
                            out,
                            "chunk {:>3} [{}..{})  tokens {:>6}  leading {}  trailing {}{}",
                            range.index,
                            range.start,
                            range.end,
                            partial.tokens.len(),
                            leading,
                            trailing,
                            if fuses { "  (fuses with previous)" } else { "" }
                        )?;
                    }
                    _ => writeln!(out, "chunk {:>3} [{}..{})  empty", range.index, range.start, range.end)?,
                }
            }
        }
    }

    Ok(())
}
