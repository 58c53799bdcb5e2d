use anyhow::Context;
use bcv_rates::cli;
use bcv_rates::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bcv-rates")]
#[command(about = "Official USD/EUR quotations from the Central Bank of Venezuela")]
#[command(long_about = "bcv-rates - official USD/EUR quotations from the Central Bank of Venezuela

Every record is one ledger line:
  2024-01-11 EUR 45,50000000 USD 42,10000000

COMMANDS:
  batch   - Extract quotations from a directory of quarterly .xls files
  fetch   - Append today's quotation from the bank's web page to the history
  stage   - Rename upstream .xls files to <yy><quarter>.xls

EXAMPLES:
  bcv-rates batch                        # ./xls_files/ -> ./output/excel.txt
  bcv-rates fetch                        # ./output/history.txt + log.txt
  bcv-rates fetch cron                   # tag the log line with 'cron'
  bcv-rates --config bcv.yaml fetch      # settings from a YAML file")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "BCV_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Extract quotations from a directory of spreadsheet files.

Each sheet with a 'Fecha Valor: dd/mm/yyyy' label in column D and both an
EUR and a USD row becomes one ledger line. All lines are sorted and the
output file is rewritten from scratch.

Unless --no-rename is given, upstream names such as 2_1_2c24_smc.xls are
first renamed to 24c.xls.

Unreadable workbooks are reported and skipped; use --strict to abort instead.")]
    /// Extract quotations from a directory of .xls files
    Batch {
        /// Directory with the spreadsheet files
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output ledger file (rewritten)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not rename upstream file names first
        #[arg(long)]
        no_rename: bool,

        /// Abort on the first unreadable workbook
        #[arg(long)]
        strict: bool,
    },

    #[command(long_about = "Append today's quotation from the bank's web page.

Skips the network call when the history already holds a quotation for
today, and skips the append when the page still shows an already recorded
date. On append, a timestamped line (plus TAG) goes to the log file, the
ledger line to the history file, and a desktop notification is shown.

WARNING: --insecure disables TLS certificate validation for the source
site. Use it only if the site's certificate chain cannot be verified.")]
    /// Append today's quotation from the web page to the history
    Fetch {
        /// Free-text tag appended to the log line
        tag: Option<String>,

        /// History ledger file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Run log file
        #[arg(long)]
        log: Option<PathBuf>,

        /// Source page URL
        #[arg(long)]
        url: Option<String>,

        /// Do not show a desktop notification
        #[arg(long)]
        no_notify: bool,

        /// Skip TLS certificate validation (known risk)
        #[arg(long)]
        insecure: bool,
    },

    /// Rename upstream .xls files to <yy><quarter>.xls
    Stage {
        /// Directory with the spreadsheet files
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "bcv_rates=debug"
    } else {
        "bcv_rates=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load config {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    match cli.command {
        Commands::Batch {
            dir,
            output,
            no_rename,
            strict,
        } => {
            if let Some(dir) = dir {
                config.xls_dir = dir;
            }
            if output.is_some() {
                config.batch_output = output;
            }
            config.rename_files &= !no_rename;
            config.strict_batch |= strict;
            cli::batch(&config)?;
        }

        Commands::Fetch {
            tag,
            history,
            log,
            url,
            no_notify,
            insecure,
        } => {
            if history.is_some() {
                config.history_file = history;
            }
            if log.is_some() {
                config.log_file = log;
            }
            if let Some(url) = url {
                config.source_url = url;
            }
            config.notifications &= !no_notify;
            config.insecure_transport |= insecure;
            cli::fetch(&config, tag.as_deref())?;
        }

        Commands::Stage { dir } => {
            if let Some(dir) = dir {
                config.xls_dir = dir;
            }
            cli::stage(&config)?;
        }
    }
    Ok(())
}
