#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use std::fs;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use ::anyhow::{Context, Result};
use ::byteorder::{ByteOrder, LittleEndian};
use crate::error::IxfError;

const BufferCapacity: usize = 4096;

/**
A buffered, seekable, little-endian byte reader over any `Read + Seek` source.

Maintains a fixed-size internal buffer (`BufferCapacity`, or the source
length if smaller) that is refilled on demand with a shift-back-and-fill
strategy: unread bytes are moved to the front of the buffer and the rest is
topped up from the source, so a seek landing inside the already-buffered
window never touches the underlying source at all.

Reads larger than the buffer (entry payloads, QFS streams) bypass the cache
entirely and read straight from the source into the caller's own buffer.
*/
pub struct ByteReader<R>
{
	source: R,
	sourceLen: u64,
	buffer: Vec<u8>,
	bufStart: u64,
	bufPos: usize,
	bufLen: usize,
}

impl<R: Read + Seek> ByteReader<R>
{
	/// Wrap `source`, determining its length by seeking to the end and back.
	pub fn new(mut source: R) -> std::io::Result<Self>
	{
		let sourceLen = source.seek(SeekFrom::End(0))?;
		source.seek(SeekFrom::Start(0))?;

		let capacity = (BufferCapacity as u64).min(sourceLen).max(1) as usize;

		return Ok(Self
		{
			source,
			sourceLen,
			buffer: vec![0u8; capacity],
			bufStart: 0,
			bufPos: 0,
			bufLen: 0,
		});
	}

	/// The total length, in bytes, of the wrapped source.
	pub fn len(&self) -> u64
	{
		return self.sourceLen;
	}

	/// The virtual read position, accounting for buffered-but-unconsumed bytes.
	pub fn position(&self) -> u64
	{
		return self.bufStart + self.bufPos as u64;
	}

	/// Bytes remaining between the current position and the end of the source.
	pub fn remaining(&self) -> u64
	{
		return self.sourceLen.saturating_sub(self.position());
	}

	/// Move the read position. A seek landing inside the current buffered
	/// window is a pure pointer move; otherwise the buffer is invalidated and
	/// refilled lazily on the next read.
	pub fn seek(&mut self, pos: u64) -> std::io::Result<()>
	{
		if pos >= self.bufStart && pos <= self.bufStart + self.bufLen as u64
		{
			self.bufPos = (pos - self.bufStart) as usize;
			return Ok(());
		}

		self.source.seek(SeekFrom::Start(pos))?;
		self.bufStart = pos;
		self.bufPos = 0;
		self.bufLen = 0;
		return Ok(());
	}

	fn fill(&mut self, need: usize) -> std::io::Result<()>
	{
		if self.bufPos + need <= self.bufLen
		{
			return Ok(());
		}

		let remaining = self.bufLen - self.bufPos;
		if remaining > 0
		{
			self.buffer.copy_within(self.bufPos..self.bufLen, 0);
		}
		self.bufStart += self.bufPos as u64;
		self.bufPos = 0;
		self.bufLen = remaining;

		if need > self.buffer.len()
		{
			self.buffer.resize(need, 0);
		}

		let read = self.source.read(&mut self.buffer[self.bufLen..])?;
		self.bufLen += read;
		return Ok(());
	}

	/// Fill `out` completely, failing with `UnexpectedEof` if the source runs
	/// out first.
	pub fn readExact(&mut self, out: &mut [u8]) -> std::result::Result<(), IxfError>
	{
		if out.is_empty()
		{
			return Ok(());
		}

		if out.len() > self.buffer.len()
		{
			let pos = self.position();
			let available = self.remaining();

			self.source.seek(SeekFrom::Start(pos))
				.map_err(|_| IxfError::UnexpectedEof { requested: out.len(), available: available as usize })?;
			self.source.read_exact(out)
				.map_err(|_| IxfError::UnexpectedEof { requested: out.len(), available: available as usize })?;

			self.bufStart = pos + out.len() as u64;
			self.bufPos = 0;
			self.bufLen = 0;
			return Ok(());
		}

		let available = self.remaining();
		self.fill(out.len())
			.map_err(|_| IxfError::UnexpectedEof { requested: out.len(), available: available as usize })?;

		if self.bufPos + out.len() > self.bufLen
		{
			return Err(IxfError::UnexpectedEof { requested: out.len(), available: available as usize });
		}

		out.copy_from_slice(&self.buffer[self.bufPos..self.bufPos + out.len()]);
		self.bufPos += out.len();
		return Ok(());
	}

	/// Read `length` bytes into a freshly allocated `Vec<u8>`.
	pub fn readVec(&mut self, length: usize) -> std::result::Result<Vec<u8>, IxfError>
	{
		let mut out = vec![0u8; length];
		self.readExact(&mut out)?;
		return Ok(out);
	}

	pub fn readU8(&mut self) -> std::result::Result<u8, IxfError>
	{
		let mut bytes = [0u8; 1];
		self.readExact(&mut bytes)?;
		return Ok(bytes[0]);
	}

	pub fn readU16LE(&mut self) -> std::result::Result<u16, IxfError>
	{
		let mut bytes = [0u8; 2];
		self.readExact(&mut bytes)?;
		return Ok(LittleEndian::read_u16(&bytes));
	}

	pub fn readU32LE(&mut self) -> std::result::Result<u32, IxfError>
	{
		let mut bytes = [0u8; 4];
		self.readExact(&mut bytes)?;
		return Ok(LittleEndian::read_u32(&bytes));
	}

	pub fn readU64LE(&mut self) -> std::result::Result<u64, IxfError>
	{
		let mut bytes = [0u8; 8];
		self.readExact(&mut bytes)?;
		return Ok(LittleEndian::read_u64(&bytes));
	}
}

impl ByteReader<Cursor<Vec<u8>>>
{
	/// Read the entire file at `path` into memory and wrap it in a `ByteReader`.
	///
	/// Container files in practice are at most a few tens of megabytes, so
	/// this is the construction path both the CLI and the test suite use.
	pub fn fromFile(path: &Path) -> Result<Self>
	{
		let bytes = fs::read(path)
			.with_context(|| format!("Failed to read {}", path.display()))?;

		return Ok(Self::fromBytes(bytes));
	}

	/// Wrap an in-memory byte buffer.
	pub fn fromBytes(bytes: Vec<u8>) -> Self
	{
		return Self::new(Cursor::new(bytes)).expect("seeking a Cursor<Vec<u8>> never fails");
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn readerOf(bytes: &[u8]) -> ByteReader<Cursor<Vec<u8>>>
	{
		return ByteReader::fromBytes(bytes.to_vec());
	}

	#[test]
	fn ReadsTypedLittleEndianIntegers()
	{
		let mut reader = readerOf(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);

		assert_eq!(0x01, reader.readU8().unwrap());
		assert_eq!(0x0302, reader.readU16LE().unwrap());
		assert_eq!(0x08070605, reader.readU32LE().unwrap());
	}

	#[test]
	fn SeekWithinBufferedWindowIsAPureMove()
	{
		let mut reader = readerOf(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

		let _ = reader.readU32LE().unwrap();
		reader.seek(0).unwrap();
		assert_eq!(1, reader.readU8().unwrap());

		reader.seek(8).unwrap();
		assert_eq!(9, reader.readU8().unwrap());
	}

	#[test]
	fn ReadPastEndFailsWithUnexpectedEof()
	{
		let mut reader = readerOf(&[1, 2, 3]);

		let result = reader.readU32LE();
		assert!(matches!(result, Err(IxfError::UnexpectedEof { requested: 4, .. })));
	}

	#[test]
	fn BulkReadBypassesCacheAcrossBufferBoundary()
	{
		let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
		let mut reader = ByteReader::fromBytes(data.clone());

		reader.seek(4090).unwrap();
		let chunk = reader.readVec(20).unwrap();
		assert_eq!(&data[4090..4110], chunk.as_slice());
	}

	#[test]
	fn PositionAccountsForBufferedButUnconsumedBytes()
	{
		let mut reader = readerOf(&[0u8; 100]);
		let _ = reader.readVec(10).unwrap();
		assert_eq!(10, reader.position());
	}

	#[test]
	fn EmptySourceReportsZeroLength()
	{
		let reader = readerOf(&[]);
		assert_eq!(0, reader.len());
		assert_eq!(0, reader.remaining());
	}
}
