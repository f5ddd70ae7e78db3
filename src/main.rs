#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "wirearg", about = "Wire signature marshalling tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Sig {
		signature: String,
	},
	Resolve {
		signature: String,
		#[arg(long)]
		json: bool,
	},
	Encode {
		signature: String,
		value: String,
		#[arg(long)]
		json: bool,
	},
	Roundtrip {
		signature: String,
		value: String,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> wirearg::wire::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Sig { signature } => cmd::sig::run(&signature),
		Commands::Resolve { signature, json } => cmd::resolve::run(&signature, json),
		Commands::Encode { signature, value, json } => cmd::encode::run(&signature, &value, json),
		Commands::Roundtrip { signature, value } => cmd::roundtrip::run(&signature, &value),
	}
}
