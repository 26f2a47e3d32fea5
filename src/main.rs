#![allow(non_snake_case, non_upper_case_globals)]

mod cli;

use std::process::ExitCode;
use ::clap::Parser;
use ::log::LevelFilter;
use cli::Args;

fn main() -> ExitCode
{
	let args = Args::parse();

	let level = match args.verbose
	{
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	::env_logger::Builder::new().filter_level(level).init();

	return match cli::run(&args)
	{
		Ok(()) => ExitCode::SUCCESS,
		Err(err) =>
		{
			::log::error!("{err:#}");
			ExitCode::FAILURE
		}
	};
}
