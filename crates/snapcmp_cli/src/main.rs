#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;
mod logging;

#[derive(Parser)]
#[command(name = "snapcmp", about = "Behavior snapshot container tools")]
struct Cli {
	/// Emit debug logs on stderr.
	#[arg(long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Verify container files.
	Validate(cmd::validate::Args),
	/// List cases or print one case.
	Show(cmd::show::Args),
	/// Merge containers into size-capped parts.
	Merge(cmd::merge::Args),
	/// Compare the cases of two containers.
	Compare(cmd::compare::Args),
}

fn main() {
	match run() {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(err) => {
			eprintln!("error: {err}");
			std::process::exit(1);
		}
	}
}

fn run() -> snapcmp::snap::Result<bool> {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	match cli.command {
		Commands::Validate(args) => cmd::validate::run(args),
		Commands::Show(args) => cmd::show::run(args).map(|()| true),
		Commands::Merge(args) => cmd::merge::run(args).map(|()| true),
		Commands::Compare(args) => cmd::compare::run(args).map(|()| true),
	}
}
