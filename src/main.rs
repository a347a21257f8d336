//! FlashRESP - RESP Decoder
//!
//! This is the entry point for the `flashresp` command-line tool.
//! It reads RESP-encoded input from files or stdin, decodes every value in
//! it and prints the results the way redis-cli displays replies.

use anyhow::{bail, Context};
use flashresp::protocol::{ParseError, ParserConfig, RespParser, RespValue};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Tool configuration
struct Config {
    /// Files to decode; stdin when empty
    inputs: Vec<PathBuf>,
    /// Decoder limits
    parser: ParserConfig,
    /// Log at debug level unless RUST_LOG says otherwise
    verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config {
            inputs: Vec::new(),
            parser: ParserConfig::default(),
            verbose: false,
        };
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--max-depth" => {
                    config.parser.max_depth = flag_value(&args, i, "--max-depth");
                    i += 2;
                }
                "--max-bulk" => {
                    config.parser.max_bulk_size = flag_value(&args, i, "--max-bulk");
                    i += 2;
                }
                "--max-array" => {
                    config.parser.max_array_len = flag_value(&args, i, "--max-array");
                    i += 2;
                }
                "--verbose" | "-v" => {
                    config.verbose = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" => {
                    println!("FlashRESP version {}", flashresp::VERSION);
                    std::process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    eprintln!("Unknown argument: {}", arg);
                    print_help();
                    std::process::exit(1);
                }
                path => {
                    config.inputs.push(PathBuf::from(path));
                    i += 1;
                }
            }
        }

        config
    }
}

/// Reads the value following a flag, exiting with a message if it is
/// missing or malformed.
fn flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(raw) = args.get(i + 1) else {
        eprintln!("Error: {} requires a value", flag);
        std::process::exit(1);
    };

    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for {}: {}", flag, raw);
        std::process::exit(1);
    })
}

fn print_help() {
    println!(
        r#"
FlashRESP - RESP Decoder

USAGE:
    flashresp [OPTIONS] [FILE ...]

Reads stdin when no FILE is given. Every value in each input is decoded
and printed; bytes after one value start the next.

OPTIONS:
        --max-depth <N>      Maximum array nesting depth (default: 32)
        --max-bulk <BYTES>   Maximum bulk string size (default: 536870912)
        --max-array <N>      Maximum array element count (default: 1048576)
    -v, --verbose            Enable debug logging
        --version            Print version information
    -h, --help               Print this help message

EXAMPLES:
    $ printf '*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n' | flashresp
    1) "ECHO"
    2) "hey"

    $ printf ':-5\r\n' | flashresp
    (integer) -5
"#
    );
}

/// Everything decoded from one input.
struct Decoded {
    label: String,
    values: Vec<RespValue>,
    /// Offset of the frame that failed, and why
    error: Option<(usize, ParseError)>,
}

/// Decodes every frame in `buf`, stopping at the first error.
fn decode_all(parser: &RespParser, label: String, buf: &[u8]) -> Decoded {
    let mut frames = parser.frames(buf);
    let mut values = Vec::new();
    let mut error = None;

    for result in frames.by_ref() {
        match result {
            Ok(value) => values.push(value),
            Err(e) => error = Some(e),
        }
    }

    // Iteration stops at a failed frame, so the offset still points at it
    let error = error.map(|e| (frames.offset(), e));

    debug!(input = %label, frames = values.len(), bytes = buf.len(), "Decoded input");

    Decoded {
        label,
        values,
        error,
    }
}

/// Decodes `buf` on the blocking pool so large inputs do not stall the
/// runtime's worker threads.
async fn decode_input(
    parser: Arc<RespParser>,
    label: String,
    buf: Vec<u8>,
) -> anyhow::Result<Decoded> {
    tokio::task::spawn_blocking(move || decode_all(&parser, label, &buf))
        .await
        .context("decode task failed")
}

/// Prints the decoded values; returns true if the input had an error.
fn report(decoded: &Decoded, show_label: bool) -> bool {
    if show_label {
        println!("==> {} <==", decoded.label);
    }

    for value in &decoded.values {
        println!("{}", value);
    }

    match &decoded.error {
        None => false,
        Some((offset, e)) if e.is_incomplete() => {
            warn!(input = %decoded.label, offset = offset, "Incomplete value at end of input");
            true
        }
        Some((offset, e)) => {
            warn!(input = %decoded.label, offset = offset, error = %e, "Decode failed");
            true
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging on stderr so stdout carries only decoded values
    let default_level = if config.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!(
        max_depth = config.parser.max_depth,
        max_bulk_size = config.parser.max_bulk_size,
        max_array_len = config.parser.max_array_len,
        "Decoder configured"
    );

    let parser = Arc::new(RespParser::with_config(config.parser.clone()));
    let mut failed = false;

    if config.inputs.is_empty() {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("failed to read stdin")?;
        let decoded = decode_input(Arc::clone(&parser), "<stdin>".to_string(), buf).await?;
        failed |= report(&decoded, false);
    } else {
        // One task per input, each owning its buffer; results are reported
        // in argument order.
        let tasks: Vec<_> = config
            .inputs
            .iter()
            .cloned()
            .map(|path| {
                let parser = Arc::clone(&parser);
                tokio::spawn(async move {
                    let buf = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    decode_input(parser, path.display().to_string(), buf).await
                })
            })
            .collect();

        let show_label = tasks.len() > 1;
        for task in tasks {
            let decoded = task.await.context("decode task failed")??;
            failed |= report(&decoded, show_label);
        }
    }

    if failed {
        bail!("one or more inputs failed to decode");
    }

    Ok(())
}
