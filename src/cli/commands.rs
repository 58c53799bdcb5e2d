use crate::batch::BatchProcessor;
use crate::config::Config;
use crate::error::BcvResult;
use crate::excel::stage_directory;
use crate::history::{Outcome, Reconciler, SkipReason};
use crate::notify::DesktopNotifier;
use crate::web::WebFetcher;
use colored::Colorize;

/// Execute the batch command
pub fn batch(config: &Config) -> BcvResult<()> {
    println!("{}", "📒 BCV - Spreadsheet batch".bold().green());
    println!("   Directory: {}", config.xls_dir.display());
    println!("   Output:    {}\n", config.batch_output_path().display());

    let report = BatchProcessor::new(config).run()?;

    if let Some(staging) = &report.staging {
        for (old, new) in &staging.renamed {
            println!("   Renamed '{}' to '{}'", old, new.bright_blue());
        }
        for name in &staging.skipped {
            println!("   {} '{}' (unexpected name)", "Not renamed".yellow(), name);
        }
    }

    for (path, reason) in &report.skipped_files {
        println!(
            "   {} {}: {}",
            "⚠️  Skipped".yellow(),
            path.display(),
            reason
        );
    }
    for (path, sheet, reason) in &report.rejected_sheets {
        println!(
            "   {} {} [{}]: {}",
            "⚠️  Rejected sheet".yellow(),
            path.display(),
            sheet,
            reason
        );
    }

    println!(
        "\n{} {} records from {} sheets in {} files",
        "✅ Wrote".bold().green(),
        report.lines.len(),
        report.sheets,
        report.files
    );
    Ok(())
}

/// Execute the fetch command
pub fn fetch(config: &Config, tag: Option<&str>) -> BcvResult<()> {
    let fetcher = WebFetcher::new(config)?;
    let mut reconciler = Reconciler::new(config, fetcher);
    if config.notifications {
        reconciler = reconciler.with_notifier(Box::new(DesktopNotifier::default()));
    }

    match reconciler.run(tag)? {
        Outcome::Appended { record, .. } => {
            println!("{} {}", "✅ New quotation:".bold().green(), record);
        }
        Outcome::Skipped(SkipReason::UpToDate { last_date }) => {
            println!("Already up to date ({})", last_date);
        }
        Outcome::Skipped(SkipReason::NotPublished { fetched, .. }) => {
            println!("No new quotation published (site shows {})", fetched);
        }
        Outcome::Skipped(SkipReason::Unavailable(reason)) => {
            println!("{} {}", "⚠️  Source unavailable:".yellow(), reason);
        }
    }
    Ok(())
}

/// Execute the stage command
pub fn stage(config: &Config) -> BcvResult<()> {
    println!("{}", "🗂  BCV - Staging spreadsheet names".bold().green());
    println!("   Directory: {}\n", config.xls_dir.display());

    let report = stage_directory(&config.xls_dir)?;
    for (old, new) in &report.renamed {
        println!("   Renamed '{}' to '{}'", old, new.bright_blue());
    }
    for name in &report.skipped {
        println!("   {} '{}' (unexpected name)", "Not renamed".yellow(), name);
    }
    println!(
        "\n{} {} renamed, {} skipped",
        "✅".green(),
        report.renamed.len(),
        report.skipped.len()
    );
    Ok(())
}
