#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use crate::error::IxfError;
use super::header::QfsHeader;

/// Decode a QFS/RefPack stream, returning a freshly allocated buffer sized to
/// the header's declared uncompressed size.
pub fn decode(data: &[u8]) -> std::result::Result<Vec<u8>, IxfError>
{
	let header = QfsHeader::parse(data)?;
	let mut out = vec![0u8; header.uncompressedSize as usize];
	decodeInto(data, &header, &mut out)?;
	return Ok(out);
}

/// Decode a QFS/RefPack stream into a caller-supplied buffer. `out` must be
/// at least as long as the header's declared uncompressed size.
pub fn decodeInto(data: &[u8], header: &QfsHeader, out: &mut [u8]) -> std::result::Result<usize, IxfError>
{
	if out.len() < header.uncompressedSize as usize
	{
		return Err(IxfError::BufferTooSmall { needed: header.uncompressedSize as usize, available: out.len() });
	}

	let mut ip = header.dataStart;
	let mut op: usize = 0;
	let end = data.len();

	while ip < end && data[ip] < 0xFC
	{
		let (plainCount, copyCount, copyOffset, consumed) = decodeOpcode(data, ip)?;
		ip += consumed;

		copyLiteralsFromInput(data, &mut ip, out, &mut op, plainCount)?;

		if copyCount > 0
		{
			copyFromWindow(out, &mut op, copyOffset, copyCount)?;
		}
	}

	if ip < end && op < out.len()
	{
		let b0 = data[ip];
		ip += 1;
		let plainCount = (b0 & 0x03) as usize;
		copyLiteralsFromInput(data, &mut ip, out, &mut op, plainCount)?;
	}

	return Ok(op);
}

/// Returns `(plainCount, copyCount, copyOffset, bytesConsumedFromInput)`.
fn decodeOpcode(data: &[u8], ip: usize) -> std::result::Result<(usize, usize, usize, usize), IxfError>
{
	let b0 = byteAt(data, ip)?;

	if b0 < 0x80
	{
		let b1 = byteAt(data, ip + 1)?;
		let plainCount = (b0 & 0x03) as usize;
		let copyCount = (((b0 & 0x1C) >> 2) + 3) as usize;
		let copyOffset = (((b0 as usize & 0x60) << 3) + b1 as usize + 1) as usize;
		return Ok((plainCount, copyCount, copyOffset, 2));
	}

	if b0 < 0xC0
	{
		let b1 = byteAt(data, ip + 1)?;
		let b2 = byteAt(data, ip + 2)?;
		let plainCount = ((b1 & 0xC0) >> 6) as usize;
		let copyCount = ((b0 & 0x3F) + 4) as usize;
		let copyOffset = (((b1 as usize & 0x3F) << 8) + b2 as usize + 1) as usize;
		return Ok((plainCount, copyCount, copyOffset, 3));
	}

	if b0 < 0xE0
	{
		let b1 = byteAt(data, ip + 1)?;
		let b2 = byteAt(data, ip + 2)?;
		let b3 = byteAt(data, ip + 3)?;
		let plainCount = (b0 & 0x03) as usize;
		let copyCount = (((b0 as usize & 0x0C) << 6) + b3 as usize + 5) as usize;
		let copyOffset = (((b0 as usize & 0x10) << 12) + ((b1 as usize) << 8) + b2 as usize + 1) as usize;
		return Ok((plainCount, copyCount, copyOffset, 4));
	}

	// 0xE0..=0xFB
	let plainCount = (((b0 & 0x1F) as usize) << 2) + 4;
	return Ok((plainCount, 0, 0, 1));
}

fn byteAt(data: &[u8], index: usize) -> std::result::Result<u8, IxfError>
{
	return data.get(index).copied().ok_or_else(|| IxfError::CorruptStream("opcode read past end of input".into()));
}

fn copyLiteralsFromInput(data: &[u8], ip: &mut usize, out: &mut [u8], op: &mut usize, count: usize) -> std::result::Result<(), IxfError>
{
	if count == 0
	{
		return Ok(());
	}

	let inputSlice = data.get(*ip..*ip + count)
		.ok_or_else(|| IxfError::CorruptStream("literal run read past end of input".into()))?;
	let outputSlice = out.get_mut(*op..*op + count)
		.ok_or_else(|| IxfError::CorruptStream("literal run wrote past declared output size".into()))?;

	outputSlice.copy_from_slice(inputSlice);
	*ip += count;
	*op += count;
	return Ok(());
}

/// Copy `count` bytes from `out[op - copyOffset - 1 ..]` to `out[op..]`,
/// advancing one byte at a time so overlapping source/destination ranges
/// (runs) behave correctly.
fn copyFromWindow(out: &mut [u8], op: &mut usize, copyOffset: usize, count: usize) -> std::result::Result<(), IxfError>
{
	if copyOffset + 1 > *op
	{
		return Err(IxfError::CorruptStream("back-reference points before output start".into()));
	}

	let mut source = *op - copyOffset - 1;

	for _ in 0..count
	{
		if *op >= out.len()
		{
			return Err(IxfError::CorruptStream("copy wrote past declared output size".into()));
		}

		out[*op] = out[source];
		*op += 1;
		source += 1;
	}

	return Ok(());
}
