#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use std::fmt;

/**
The error kinds this crate's core (byte reader, directory parser, QFS/RefPack
codec) can produce.

`Incompressible` from the QFS encoder is deliberately not a variant here --
it's a soft "use the original bytes" signal, not a failure, so
[`crate::qfs::encode::compress`] returns `Option<Vec<u8>>` instead.
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IxfError
{
	/// The 4-byte container signature did not match `0x80C381D7`.
	BadSignature { found: u32 },

	/// No valid QFS header signature (`(byte & 0x3E) == 0x10` followed by
	/// `0xFB`) was found at offset 0 or offset 4.
	UnsupportedFormat,

	/// The QFS opcode stream asked to read or write out of bounds, or a
	/// back-reference pointed before the start of the output.
	CorruptStream(String),

	/// The caller-supplied output buffer is shorter than the QFS header's
	/// declared uncompressed size.
	BufferTooSmall { needed: usize, available: usize },

	/// More bytes were requested from a reader than remained in its source.
	UnexpectedEof { requested: usize, available: usize },
}

impl fmt::Display for IxfError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		use IxfError::*;

		return match self
		{
			BadSignature { found } => write!(f, "bad container signature: found 0x{:08X}, expected 0x80C381D7", found),
			UnsupportedFormat => write!(f, "no QFS header signature found at offset 0 or offset 4"),
			CorruptStream(reason) => write!(f, "corrupt QFS opcode stream: {}", reason),
			BufferTooSmall { needed, available } => write!(f, "output buffer too small: need {} bytes, have {}", needed, available),
			UnexpectedEof { requested, available } => write!(f, "unexpected end of input: requested {} bytes, {} available", requested, available),
		};
	}
}

impl std::error::Error for IxfError {}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn DisplayMessagesAreHumanReadable()
	{
		assert!(IxfError::BadSignature { found: 0 }.to_string().contains("0x80C381D7"));
		assert!(IxfError::UnsupportedFormat.to_string().contains("QFS header"));
		assert!(IxfError::CorruptStream("ran off the end".into()).to_string().contains("ran off the end"));
		assert!(IxfError::BufferTooSmall { needed: 10, available: 4 }.to_string().contains("10"));
		assert!(IxfError::UnexpectedEof { requested: 8, available: 2 }.to_string().contains("8"));
	}
}
