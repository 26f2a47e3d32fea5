#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use crate::error::IxfError;

/// `CompressedSizePresent`: a 3- or 4-byte compressed-size field follows the
/// 2-byte signature.
pub const CompressedSizePresent: u8 = 0x01;
/// `Unknown1`: reserved. Preserved on decode, ignored on encode.
pub const Unknown1: u8 = 0x40;
/// `LargeSizeFields`: size fields are 4-byte big-endian instead of 3-byte.
pub const LargeSizeFields: u8 = 0x80;

const SignatureMask: u8 = 0x3E;
const SignatureValue: u8 = 0x10;
const SignatureSecondByte: u8 = 0xFB;

/**
A parsed QFS/RefPack header: where its signature bytes sit in the stream,
its flag byte, the declared uncompressed size, and the offset of the first
opcode.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QfsHeader
{
	/// `0` or `4` -- which placement matched.
	pub headerStart: usize,
	pub flags: u8,
	pub uncompressedSize: u32,
	/// Byte offset, relative to the start of `data`, of the first opcode.
	pub dataStart: usize,
}

impl QfsHeader
{
	pub fn hasFlag(&self, flag: u8) -> bool
	{
		return self.flags & flag != 0;
	}

	/// Locate and parse a QFS header in `data`, trying offset 0 then offset 4.
	pub fn parse(data: &[u8]) -> std::result::Result<Self, IxfError>
	{
		let headerStart = if isSignatureAt(data, 0)
		{
			0
		}
		else if isSignatureAt(data, 4)
		{
			4
		}
		else
		{
			return Err(IxfError::UnsupportedFormat);
		};

		let flags = data[headerStart];
		let mut cursor = headerStart + 2;

		if flags & CompressedSizePresent != 0
		{
			cursor += if flags & LargeSizeFields != 0 { 4 } else { 3 };
		}

		let sizeFieldLen = if flags & LargeSizeFields != 0 { 4 } else { 3 };
		let sizeBytes = data.get(cursor..cursor + sizeFieldLen)
			.ok_or(IxfError::UnsupportedFormat)?;
		let uncompressedSize = readBigEndian(sizeBytes);
		cursor += sizeFieldLen;

		return Ok(Self { headerStart, flags, uncompressedSize, dataStart: cursor });
	}
}

fn isSignatureAt(data: &[u8], offset: usize) -> bool
{
	match data.get(offset..offset + 2)
	{
		Some(bytes) => bytes[0] & SignatureMask == SignatureValue && bytes[1] == SignatureSecondByte,
		None => false,
	}
}

fn readBigEndian(bytes: &[u8]) -> u32
{
	let mut value: u32 = 0;
	for byte in bytes
	{
		value = (value << 8) | *byte as u32;
	}
	return value;
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn ParsesHeaderAtOffsetZeroWithThreeByteSize()
	{
		let data = [0x10, 0xFB, 0x00, 0x00, 0x05, 0x41, 0x42];
		let header = QfsHeader::parse(&data).unwrap();

		assert_eq!(0, header.headerStart);
		assert_eq!(5, header.uncompressedSize);
		assert_eq!(5, header.dataStart);
	}

	#[test]
	fn ParsesHeaderAtOffsetFourWithLengthPrefix()
	{
		let data = [0x00, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x05, 0x41];
		let header = QfsHeader::parse(&data).unwrap();

		assert_eq!(4, header.headerStart);
		assert_eq!(5, header.uncompressedSize);
		assert_eq!(9, header.dataStart);
	}

	#[test]
	fn LargeSizeFieldsUsesFourByteBigEndianSize()
	{
		let data = [0x90, 0xFB, 0x00, 0x01, 0x00, 0x00, 0x41];
		let header = QfsHeader::parse(&data).unwrap();

		assert!(header.hasFlag(LargeSizeFields));
		assert_eq!(0x0001_0000, header.uncompressedSize);
		assert_eq!(6, header.dataStart);
	}

	#[test]
	fn CompressedSizePresentSkipsTheExtraSizeField()
	{
		let data = [0x11, 0xFB, 0xAA, 0xBB, 0xCC, 0x00, 0x00, 0x05, 0x41];
		let header = QfsHeader::parse(&data).unwrap();

		assert!(header.hasFlag(CompressedSizePresent));
		assert_eq!(8, header.dataStart);
	}

	#[test]
	fn NoValidSignatureFailsWithUnsupportedFormat()
	{
		let data = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
		let result = QfsHeader::parse(&data);
		assert!(matches!(result, Err(IxfError::UnsupportedFormat)));
	}

	#[test]
	fn TruncatedBeforeSignatureBytesFails()
	{
		let data = [0x10];
		let result = QfsHeader::parse(&data);
		assert!(matches!(result, Err(IxfError::UnsupportedFormat)));
	}

	#[test]
	fn Unknown1BitIsPreservedOnTheParsedFlags()
	{
		let data = [0x10 | Unknown1, 0xFB, 0x00, 0x00, 0x05];
		let header = QfsHeader::parse(&data).unwrap();
		assert!(header.hasFlag(Unknown1));
	}
}
