use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use typefix_cli::config::RunConfiguration;
use typefix_cli::processor::{FileReport, process_all};
use typefix_cli::rules::RuleSet;

#[derive(Parser)]
#[command(name = "typefix")]
#[command(
	author,
	version,
	about = "One-shot patcher for known type-inconsistency idioms in TypeScript sources"
)]
struct Cli {
	/// Report the changes that would be made without writing any file
	#[arg(long)]
	dry_run: bool,
}

fn main() -> ExitCode {
	typefix_cli::logging::init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	let config = RunConfiguration::new(cli.dry_run);

	let rules = RuleSet::standard().context("Failed to compile rules")?;

	if config.dry_run {
		println!("Dry run: no files will be written.");
	}

	for report in process_all(&rules, &config) {
		print_report(&report);
	}

	// Per-file failures are reported above and never change the exit code.
	Ok(ExitCode::SUCCESS)
}

fn print_report(report: &FileReport) {
	println!("Processing {}", report.path.display());
	for change in report.rule_changes.iter().filter(|c| c.count > 0) {
		println!("  {}: {} change(s)", change.rule, change.count);
	}
	println!("  {}", report.outcome);
}
