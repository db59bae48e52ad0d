use colored::*;
use codereader_core::RunSummary;

pub fn print_summary(summary: &RunSummary, quiet: bool) {
    if quiet {
        return;
    }
    println!(
        "{} Snapshot saved to: {} ({} files)",
        "✅".green(),
        summary.output_path.display().to_string().blue(),
        summary.files_written
    );
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
}
