#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use std::io::{Read, Seek};
use crate::bytes::ByteReader;
use crate::error::IxfError;
use super::entry::{EntryKind, IndexEntry};

/// The 4-byte little-endian magic at offset 0 of an IXF/DAT/BLD/... file.
pub const ContainerSignature: u32 = 0x80C3_81D7;

/// A container smaller than this is treated as empty without even checking
/// the signature -- observed in real Linux-release assets.
const MinimumContainerLength: u64 = 24;

/// The size, in bytes, of one index record.
const EntrySize: u64 = 20;

/**
Parse the directory of an IXF-family container: validate the signature, walk
fixed-size 20-byte index records, and return the live entries in on-disk
order. Deleted slots (all `0xFFFFFFFF`) are skipped silently; the terminator
record (all zero) ends the walk.
*/
pub fn readDirectory<R: Read + Seek>(reader: &mut ByteReader<R>) -> std::result::Result<Vec<IndexEntry>, IxfError>
{
	if reader.len() < MinimumContainerLength
	{
		return Ok(vec![]);
	}

	reader.seek(0).map_err(|_| IxfError::UnexpectedEof { requested: 4, available: reader.len() as usize })?;

	let signature = reader.readU32LE()?;
	if signature != ContainerSignature
	{
		return Err(IxfError::BadSignature { found: signature });
	}

	let mut entries = vec![];
	loop
	{
		let entry = IndexEntry::fromReader(reader)?;

		match entry.classify()
		{
			EntryKind::Terminator => break,
			EntryKind::Deleted => continue,
			EntryKind::Live => entries.push(entry),
		}
	}

	return Ok(entries);
}

/// How many bytes the directory stream occupies, given a live entry count --
/// useful for callers laying out a fresh container; not used by the parser
/// itself, which walks until it finds the terminator.
pub fn directoryByteLen(entryCountIncludingTerminator: u64) -> u64
{
	return 4 + entryCountIncludingTerminator * EntrySize;
}
