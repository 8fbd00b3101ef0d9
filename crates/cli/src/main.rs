mod config;
mod pretty;

use config::Config;

use std::io::{self, IsTerminal, Read};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::{control::set_override, Colorize};
use hashorbit_core::{Catalog, Classification, Md5DbProvider, ReversalOutcome, ReversalRegistry};
use serde::Serialize;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::pretty::PrettyConfig;

const LONG_ABOUT: &str = r##"
Hashorbit identifies the likely algorithm behind a hash string.

Paste in a digest and see every algorithm family it could belong to, ranked
by how likely each one is. Many families share a length and alphabet, so the
answer is usually a ranked list rather than a single name.

SUPPORTED FAMILIES:
  Password:     BCrypt, Argon2 (i/d), scrypt, PBKDF2
  MD:           MD5, MD4, MD2, MD6-128/256/512
  SHA:          SHA-1, SHA-224/256/384/512, SHA3-224/256/384/512
  RIPEMD:       RIPEMD-128/160/256/320
  Other:        Tiger-128/160/192, Whirlpool, NTLM, HMAC-MD5/SHA1/SHA256
  Checksums:    CRC32, Adler32

EXAMPLES:
  horb 5d41402abc4b2a76b9719d911017c592       MD5 and its look-alikes
  horb -r 5d41402abc4b2a76b9719d911017c592    Also look up the plaintext
  horb '$2b$12$KIXQ...'                       BCrypt (quote the $ signs)
  horb -1 da39a3ee5e6b4b0d3255bfef95601890afd80709
                                              Only the best guess

OUTPUT:
  Candidates are ranked by confidence. Ties keep a fixed order.
    90% and up   high reliability (green)
    70-89%       medium (yellow)
    50-69%       low
    below 50%    weak (red)

REVERSAL:
  With -r, MD5 digests are looked up in a public precomputed database.
  This sends the digest over the network. Other families are not supported.

PIPED INPUT:
    echo 5d41402abc4b2a76b9719d911017c592 | horb

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting        | CLI flag               | Env var              | Default
  ---------------|------------------------|----------------------|---------
  min_confidence | -m, --min-confidence   | HORB_MIN_CONFIDENCE  | 0
  no_color       | -C, --no-color         | HORB_NO_COLOR        | false
  timeout        | --timeout              | HORB_TIMEOUT         | 10
  reversal_url   |                        | HORB_REVERSAL_URL    | nitrxgen md5db

  Config file location: horb --config-path
  Generate default config: horb --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "horb")]
#[command(version)]
#[command(about = "Identify the likely algorithm behind a hash string")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The hash string to identify
    ///
    /// Surrounding whitespace is ignored. When omitted and stdin is piped,
    /// the hash is read from stdin.
    #[arg(value_name = "HASH")]
    input: Option<String>,

    /// Also try to recover the plaintext (MD5 only, uses the network)
    #[arg(long, short = 'r')]
    reverse: bool,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Show only the highest-confidence candidate
    #[arg(long, short = '1')]
    first: bool,

    /// Hide candidates below this confidence (0-100)
    #[arg(long, short = 'm', value_name = "N", value_parser = clap::value_parser!(u8).range(0..=100))]
    min_confidence: Option<u8>,

    /// Only report whether the input fits this family
    ///
    /// Use --families to see available names.
    #[arg(long, short = 'f', value_name = "NAME")]
    family: Option<String>,

    /// List all known hash families, grouped by length
    #[arg(long)]
    families: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages and match rules, -vv shows trace messages.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Timeout for the reversal lookup in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

/// Shape of `--json` output.
#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    classification: &'a Classification<'static>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reversal: Option<&'a ReversalOutcome>,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    std::process::exit(1);
}

/// Read the hash from stdin when it is piped.
fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(buffer.trim().to_string())
}

fn build_registry(timeout: u64, reversal_url: String) -> ReversalRegistry {
    let provider = Md5DbProvider::new()
        .with_base_url(reversal_url)
        .with_request_timeout(Duration::from_secs(timeout));
    let mut registry = ReversalRegistry::empty().with_timeout(Duration::from_secs(timeout));
    registry.register("MD5", Arc::new(provider));
    registry
}

/// Run one reversal attempt to completion on a single-threaded runtime.
fn run_reversal(
    registry: &ReversalRegistry,
    input: &str,
    candidates: &Classification<'_>,
) -> Result<ReversalOutcome, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;
    Ok(runtime.block_on(registry.attempt_reversal(input, candidates)))
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => fail("Cannot determine config directory"),
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => fail(e),
        }
        return;
    }

    // Initialize tracing based on verbosity level
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let min_confidence = if let Some(m) = cli.min_confidence {
        tracing::debug!("min_confidence = {} (from CLI)", m);
        m
    } else {
        let m = file_config.min_confidence();
        let source = if std::env::var("HORB_MIN_CONFIDENCE").is_ok() {
            "env HORB_MIN_CONFIDENCE"
        } else if file_config.min_confidence.is_some() {
            "config file"
        } else {
            "default"
        };
        tracing::debug!("min_confidence = {} (from {})", m, source);
        m
    };

    let timeout = if let Some(t) = cli.timeout {
        tracing::debug!("timeout = {}s (from CLI)", t);
        t
    } else {
        let t = file_config.timeout();
        tracing::debug!("timeout = {}s (from config/env/default)", t);
        t
    };

    let no_color = cli.no_color || file_config.no_color();
    if no_color {
        set_override(false);
    }

    let pretty_config = PrettyConfig {
        color: !no_color,
        verbose: cli.verbose > 0,
        ..Default::default()
    };

    let catalog = Catalog::builtin();

    // Handle --families (no input needed)
    if cli.families {
        print!("{}", pretty::render_families(catalog, &pretty_config));
        return;
    }

    if let Some(ref name) = cli.family {
        if catalog.get(name).is_none() {
            fail(format!(
                "Unknown family '{}'. Use {} to see available names.",
                name.yellow(),
                "--families".bold()
            ));
        }
    }

    let stdin_is_pipe = !io::stdin().is_terminal();
    let input = if let Some(input) = cli.input {
        input
    } else if stdin_is_pipe {
        match read_stdin() {
            Ok(text) if text.is_empty() => fail("Empty input"),
            Ok(text) => text,
            Err(e) => fail(e),
        }
    } else {
        eprintln!("{}: No input provided", "error".red().bold());
        eprintln!();
        eprintln!("Usage: {} <HASH>", "horb".bold());
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  horb 5d41402abc4b2a76b9719d911017c592     Identify a digest");
        eprintln!("  horb -r 5d41402abc4b2a76b9719d911017c592  Also look up the plaintext");
        eprintln!("  echo <hash> | horb                        Pipe input");
        eprintln!();
        eprintln!("Run {} for more information.", "horb --help".bold());
        std::process::exit(1);
    };

    let mut result = catalog.classify(&input).at_least(min_confidence);
    if let Some(ref name) = cli.family {
        result = result.named(name);
    }

    // Attempt reversal only on request, and only when something matched
    let outcome = if cli.reverse && !result.is_empty() {
        let registry = build_registry(timeout, file_config.reversal_url());
        match run_reversal(&registry, &input, &result) {
            Ok(outcome) => Some(outcome),
            Err(e) => fail(e),
        }
    } else {
        None
    };

    if cli.json {
        let output = JsonOutput {
            classification: &result,
            reversal: outcome.as_ref(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("Failed to serialize output: {}", e)),
        }
        if result.is_empty() {
            std::process::exit(1);
        }
        return;
    }

    if result.is_empty() {
        let display_input = if result.input().is_empty() {
            "(empty input)"
        } else {
            result.input()
        };
        match cli.family {
            Some(ref name) => println!("Input does not fit {}: {}", name, display_input),
            None => println!("No matching hash family for: {}", display_input),
        }
        std::process::exit(1);
    }

    if result.is_ambiguous() && !cli.first {
        println!(
            "{}",
            format!(
                "{} candidate families for {} characters, most likely first",
                result.len(),
                result.input().chars().count()
            )
            .dimmed()
        );
        println!();
    }

    let shown = if cli.first { 1 } else { result.len() };
    for family in result.iter().take(shown) {
        print!("{}", pretty::render_candidate(family, &pretty_config));
        println!();
    }

    if let Some(ref outcome) = outcome {
        println!("{}", pretty::render_outcome(outcome, &pretty_config));
    }
}
