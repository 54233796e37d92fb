use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use extrato_finance::{
    process_pdf, process_text, ExportTarget, ExtractSummary, ProcessOutcome, StatementExtractor,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "extrato",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EXTRATO_BUILD_SHA"), ")"),
    about = "Extract transactions from Brazilian bank statements"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement PDF
    Extract {
        /// Bank identifier written into the Debito/Credito columns
        #[arg(long)]
        bank: String,

        /// Path to the statement PDF
        #[arg(long)]
        pdf: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract transactions from statement text already pulled out of a document
    ExtractText {
        /// Bank identifier written into the Debito/Credito columns
        #[arg(long)]
        bank: String,

        /// Path to a UTF-8 text file
        #[arg(long)]
        text: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage ~/.extrato/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Skip writing the CSV export
    #[arg(long)]
    no_export: bool,

    /// Include the extracted records in the printed JSON
    #[arg(long)]
    records: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config (file + environment)
    Show,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    summary: ExtractSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    lancamentos: Option<&'a [extrato_core::TransactionRecord]>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg);

    match cli.command {
        Command::Extract { bank, pdf, output } => {
            if !pdf.exists() {
                bail!("PDF not found: {} (pass --pdf <path>)", pdf.display());
            }
            info!(bank = %bank, "processing {}", pdf.display());
            let extractor = StatementExtractor::new()?;
            let target = export_target(&cfg, &pdf, &output);
            let outcome = process_pdf(
                &extractor,
                &bank,
                &pdf,
                cfg.limits.max_document_bytes,
                target.as_ref(),
            )
            .with_context(|| format!("processing {}", pdf.display()))?;
            print_report(&outcome, &output)?;
        }

        Command::ExtractText { bank, text, output } => {
            info!(bank = %bank, "processing {}", text.display());
            let content = state::read_text(&text)?;
            let extractor = StatementExtractor::new()?;
            let target = export_target(&cfg, &text, &output);
            let outcome = process_text(&extractor, &bank, &content, target.as_ref())
                .with_context(|| format!("processing {}", text.display()))?;
            print_report(&outcome, &output)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// `RUST_LOG` first, then the config filter. Logs go to stderr.
fn init_logging(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export_target(cfg: &Config, document: &Path, output: &OutputArgs) -> Option<ExportTarget> {
    if output.no_export {
        return None;
    }
    Some(ExportTarget::for_document(&cfg.storage.exports_dir, document))
}

fn print_report(outcome: &ProcessOutcome, output: &OutputArgs) -> Result<()> {
    let report = Report {
        summary: ExtractSummary::from(outcome),
        lancamentos: output.records.then_some(outcome.result.records.as_slice()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
