#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use std::fs;
use std::path::{Path, PathBuf};
use ::anyhow::{Context, Result};
use ::clap::Parser;
use ixf_extract::{dispatch, readDirectory, ByteReader};

const RecognisedExtensions: &[&str] = &["dat", "ixf", "bld", "sc3", "st3", "sct", "cfg"];
const DefaultOutputDirectory: &str = "extracted";

/**
`ixf-extract` -- enumerate and extract resources from SimCity 3000's indexed
container format (IXF/DAT/BLD/SC3/ST3/SCT/CFG).
*/
#[derive(Parser, Debug)]
#[command(name = "ixf-extract", version, about = "Extract resources from SimCity 3000 IXF-family containers", disable_help_flag = true)]
pub struct Args
{
	/// A single container file, or a directory to scan for recognised container files.
	pub input: PathBuf,

	/// Directory to write extracted files into. Defaults to `./extracted`.
	pub output: Option<PathBuf>,

	/// Extract resources (the default when neither this nor `--list-entries` is given).
	#[arg(short = 'e', long = "extract", conflicts_with = "listEntries")]
	pub extract: bool,

	/// Print each container's directory (TGI, offset, length) instead of extracting.
	#[arg(short = 'l', long = "list-entries")]
	pub listEntries: bool,

	/// Overwrite files that already exist at the destination path.
	#[arg(short = 'o', long = "overwrite-existing")]
	pub overwriteExisting: bool,

	/// Raise the log level; repeatable (-v, -vv, -vvv).
	#[arg(short = 'v', long = "verbose", action = ::clap::ArgAction::Count)]
	pub verbose: u8,

	#[arg(short = '?', long = "help", action = ::clap::ArgAction::Help)]
	help: Option<bool>,
}

pub fn run(args: &Args) -> Result<()>
{
	let files = discoverFiles(&args.input)?;
	let outputDir = args.output.clone().unwrap_or_else(|| PathBuf::from(DefaultOutputDirectory));

	if !args.listEntries
	{
		fs::create_dir_all(&outputDir)
			.with_context(|| format!("failed to create output directory {}", outputDir.display()))?;
	}

	for file in files
	{
		if let Err(err) = processFile(&file, args.listEntries, &outputDir, args.overwriteExisting)
		{
			::log::error!("{}: {err:#}", file.display());
		}
	}

	return Ok(());
}

fn discoverFiles(input: &Path) -> Result<Vec<PathBuf>>
{
	if input.is_file()
	{
		return Ok(vec![input.to_path_buf()]);
	}

	let mut files = vec![];
	for extension in RecognisedExtensions
	{
		let pattern = input.join(format!("*.{}", caseInsensitiveGlob(extension)));
		let pattern = pattern.to_string_lossy().into_owned();

		for entry in ::glob::glob(&pattern).with_context(|| format!("invalid glob pattern {pattern}"))?
		{
			files.push(entry.with_context(|| format!("failed to read a directory entry under {}", input.display()))?);
		}
	}

	files.sort();
	files.dedup();
	return Ok(files);
}

/// Turn `dat` into `[dD][aA][tT]`, a glob bracket-expression matching either case of each
/// letter, since the `glob` crate itself has no case-insensitive match mode.
fn caseInsensitiveGlob(extension: &str) -> String
{
	let mut pattern = String::with_capacity(extension.len() * 4);
	for ch in extension.chars()
	{
		pattern.push('[');
		pattern.push(ch.to_ascii_lowercase());
		pattern.push(ch.to_ascii_uppercase());
		pattern.push(']');
	}
	return pattern;
}

fn processFile(path: &Path, listOnly: bool, outputDir: &Path, overwriteExisting: bool) -> Result<()>
{
	let mut reader = ByteReader::fromFile(path)?;
	let entries = readDirectory(&mut reader).context("failed to parse container directory")?;

	::log::info!("{}: {} live entries", path.display(), entries.len());

	for entry in entries
	{
		if listOnly
		{
			println!(
				"0x{:08X} 0x{:08X} 0x{:08X}  offset={} length={}",
				entry.r#type, entry.group, entry.instance, entry.offset, entry.length,
			);
			continue;
		}

		reader.seek(entry.offset as u64).context("failed to seek to entry payload")?;
		let payload = reader.readVec(entry.length as usize).context("failed to read entry payload")?;

		let (kind, bytes) = dispatch(&entry, &payload)?;
		let fileName = format!("0x{:08X}_0x{:08X}_0x{:08X}.{}", entry.r#type, entry.group, entry.instance, kind.extension());
		let destination = outputDir.join(fileName);

		if destination.exists() && !overwriteExisting
		{
			::log::warn!("{}: already exists, skipping (use --overwrite-existing to replace)", destination.display());
			continue;
		}

		fs::write(&destination, &bytes).with_context(|| format!("failed to write {}", destination.display()))?;
	}

	return Ok(());
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn CaseInsensitiveGlobBuildsABracketExpressionPerLetter()
	{
		assert_eq!("[dD][aA][tT]", caseInsensitiveGlob("dat"));
	}
}
