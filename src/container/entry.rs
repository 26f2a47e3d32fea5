#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use crate::bytes::ByteReader;
use crate::error::IxfError;
use std::io::{Read, Seek};

/// All fields `0x00000000`. Encountering this record ends directory parsing.
const TerminatorWord: u32 = 0x0000_0000;
/// All fields `0xFFFFFFFF`. A deleted/empty slot; skipped silently.
const DeletedWord: u32 = 0xFFFF_FFFF;

/**
A single 20-byte index record: five little-endian `u32` fields naming where
one resource's payload lives in the container (`Type`, `Group`, `Instance`
together form its TGI identity; `Offset`/`Length` locate the payload bytes).
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct IndexEntry
{
	pub group: u32,
	pub instance: u32,
	pub r#type: u32,
	pub offset: u32,
	pub length: u32,
}

/// What a raw 20-byte record means to the directory parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind
{
	/// A real resource entry; keep it.
	Live,
	/// All fields `0xFFFFFFFF`; skip it, directory parsing continues.
	Deleted,
	/// All fields `0x00000000`; directory parsing stops here.
	Terminator,
}

impl IndexEntry
{
	pub fn fromReader<R: Read + Seek>(reader: &mut ByteReader<R>) -> std::result::Result<Self, IxfError>
	{
		let group = reader.readU32LE()?;
		let instance = reader.readU32LE()?;
		let r#type = reader.readU32LE()?;
		let offset = reader.readU32LE()?;
		let length = reader.readU32LE()?;

		return Ok(Self { group, instance, r#type, offset, length });
	}

	pub fn classify(&self) -> EntryKind
	{
		let fields = [self.group, self.instance, self.r#type, self.offset, self.length];

		if fields.iter().all(|field| *field == TerminatorWord)
		{
			return EntryKind::Terminator;
		}

		if fields.iter().all(|field| *field == DeletedWord)
		{
			return EntryKind::Deleted;
		}

		return EntryKind::Live;
	}

	pub fn isLive(&self) -> bool
	{
		return self.classify() == EntryKind::Live;
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn TerminatorIsClassifiedCorrectly()
	{
		let entry = IndexEntry { group: 0, instance: 0, r#type: 0, offset: 0, length: 0 };
		assert_eq!(EntryKind::Terminator, entry.classify());
	}

	#[test]
	fn DeletedIsClassifiedCorrectly()
	{
		let entry = IndexEntry { group: 0xFFFF_FFFF, instance: 0xFFFF_FFFF, r#type: 0xFFFF_FFFF, offset: 0xFFFF_FFFF, length: 0xFFFF_FFFF };
		assert_eq!(EntryKind::Deleted, entry.classify());
	}

	#[test]
	fn PartialZeroOrPartialFfIsStillLive()
	{
		let mostlyZero = IndexEntry { group: 0, instance: 0, r#type: 1, offset: 0, length: 0 };
		assert_eq!(EntryKind::Live, mostlyZero.classify());

		let mostlyFf = IndexEntry { group: 0xFFFF_FFFF, instance: 0xFFFF_FFFF, r#type: 1, offset: 0xFFFF_FFFF, length: 0xFFFF_FFFF };
		assert_eq!(EntryKind::Live, mostlyFf.classify());
	}
}
