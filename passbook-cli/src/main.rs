use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use passbook_core::ParseResult;
use passbook_ingest::{StatementKind, detect_kind, parse_auto, parse_text};
use std::io::Write;
use std::path::{Path, PathBuf};

mod config;
mod output;
mod state;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "passbook", version, about = "Turn extracted bank statement text into structured data")]
struct Cli {
    /// Log parser decisions at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement's extracted text and print the result
    Parse {
        /// Text file to read, or `-` for stdin
        path: PathBuf,

        /// Statement layout (default: detect from the text)
        #[arg(long, value_enum, default_value_t = KindArg::Auto)]
        kind: KindArg,

        /// Output format (default: from config, else json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Include parse diagnostics in the output
        #[arg(long)]
        diagnostics: bool,

        /// Refuse inputs larger than this many bytes (default: from config, else 10 MiB)
        #[arg(long)]
        max_bytes: Option<u64>,
    },

    /// Print the statement kind detected in a text file
    Detect {
        /// Text file to read, or `-` for stdin
        path: PathBuf,
    },

    /// Manage ~/.passbook/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Auto,
    CreditCard,
    Savings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            path,
            kind,
            format,
            diagnostics,
            max_bytes,
        } => {
            parse_file(&path, kind, format, diagnostics, max_bytes)?;
        }

        Command::Detect { path } => {
            let cfg = config::load_config()?;
            let text = state::read_input(&path, cfg.parser.max_bytes)?;
            match detect_kind(&text) {
                Some(kind) => println!("{kind}"),
                None => bail!("could not detect statement kind: {}", path.display()),
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn parse_file(
    path: &Path,
    kind: KindArg,
    format: Option<OutputFormat>,
    with_diagnostics: bool,
    max_bytes: Option<u64>,
) -> Result<()> {
    let cfg = config::load_config()?;
    let settings = cfg.parse_settings();
    let format = format.unwrap_or(cfg.output.format);
    let max_bytes = max_bytes.unwrap_or(cfg.parser.max_bytes);

    let text = state::read_input(path, max_bytes)?;
    let outcome = match kind {
        KindArg::Auto => parse_auto(&text, &settings),
        KindArg::CreditCard => parse_text(StatementKind::CreditCard, &text, &settings),
        KindArg::Savings => parse_text(StatementKind::Savings, &text, &settings),
    };
    log::info!(
        "{}: {} diagnostics",
        path.display(),
        outcome.diagnostics.len()
    );

    let doc = match &outcome.result {
        ParseResult::Success(doc) => doc,
        ParseResult::Failure(msg) => {
            if with_diagnostics {
                print_diagnostics(&outcome.diagnostics);
            }
            bail!("{}: {msg}", path.display());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let diagnostics = with_diagnostics.then_some(outcome.diagnostics.as_slice());
            output::write_json(&mut out, doc, diagnostics)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            if with_diagnostics {
                print_diagnostics(&outcome.diagnostics);
            }
            output::write_csv(&mut out, doc)?;
        }
    }

    Ok(())
}

fn print_diagnostics(diagnostics: &[passbook_core::Diagnostic]) {
    for d in diagnostics {
        eprintln!("{}", output::format_diagnostic(d));
    }
}
