#![allow(non_snake_case, non_upper_case_globals)]
#![cfg_attr(debug_assertions, allow(dead_code))]

use crate::container::IndexEntry;
use crate::error::IxfError;
use crate::qfs;

/// The first 8 bytes of a container-compressed entry's payload.
const ContainerCompressedSignature: [u8; 8] = [0x07, 0x01, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00];
/// Compressed payloads begin this many bytes into the entry, past the opaque per-entry header.
const CompressedPayloadOffset: usize = 20;

const SpriteAlphaFlagA: u32 = 0x1000_0000;
const SpriteAlphaFlagB: u32 = 0x0008_0000;

/// The 32-bit resource-type tags this system recognises by name. `Other` carries any
/// unrecognised tag through unchanged -- the wire format is open-ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResourceKind
{
	BufferResource,
	BuildingOccupantAttributes,
	FloraOccupantAttributes,
	HotKey,
	OccupantAttributes,
	OccupantAttributeOverrides,
	NetworkOccupantAttributes,
	PortOccupantAttributes,
	SerializedSC3City,
	SerialText,
	SpriteAttributes,
	SpriteAnimationAttributes,
	SpriteImage,
	SpriteImageInfo,
	String,
	Other(u32),
}

impl ResourceKind
{
	pub fn fromType(r#type: u32) -> Self
	{
		return match r#type
		{
			0x62B9_DA24 => Self::BufferResource,
			0x207E_DC0E => Self::BuildingOccupantAttributes,
			0xFFD3_0C03 => Self::FloraOccupantAttributes,
			0xA2E3_D533 => Self::HotKey,
			0xC179_C042 => Self::OccupantAttributes,
			0x856C_D19A => Self::OccupantAttributeOverrides,
			0xE223_741F => Self::NetworkOccupantAttributes,
			0x2200_55E1 => Self::PortOccupantAttributes,
			0x0000_0FA1 => Self::SerializedSC3City,
			0x81F5_3D09 => Self::SerialText,
			0x0000_6300 => Self::SpriteAttributes,
			0x0000_6301 => Self::SpriteAnimationAttributes,
			0x0000_0000 => Self::SpriteImage,
			0x0000_0001 => Self::SpriteImageInfo,
			0x2026_960B => Self::String,
			other => Self::Other(other),
		};
	}

	/// The output file extension (without the leading dot) this type tag maps to.
	pub fn extension(&self) -> &'static str
	{
		use ResourceKind::*;

		return match self
		{
			BufferResource => "bmp",
			BuildingOccupantAttributes
			| FloraOccupantAttributes
			| OccupantAttributes
			| OccupantAttributeOverrides
			| NetworkOccupantAttributes
			| PortOccupantAttributes => "tkb1",
			HotKey | SerialText | String => "txt",
			SpriteAttributes => "sat",
			SpriteAnimationAttributes => "saa",
			SpriteImage => "sim",
			SpriteImageInfo => "sii",
			SerializedSC3City | Other(_) => "bin",
		};
	}
}

fn hasAlphaFlag(payload: &[u8]) -> bool
{
	if payload.len() <= CompressedPayloadOffset
	{
		return false;
	}

	let word = u32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
	return word & SpriteAlphaFlagA != 0 || word & SpriteAlphaFlagB != 0;
}

fn isContainerCompressed(payload: &[u8]) -> bool
{
	return payload.len() > CompressedPayloadOffset && payload.starts_with(&ContainerCompressedSignature);
}

/**
Resolve one live entry's final bytes given its raw payload, following the precedence in
[`ResourceKind::fromType`]'s caller-facing contract: sprite-image alpha handling wins over the
container-compressed-entry signature for `SpriteImage`; every other type only ever takes the
signature path. Returns the bytes to write and the kind used to pick an extension.
*/
pub fn dispatch(entry: &IndexEntry, payload: &[u8]) -> std::result::Result<(ResourceKind, Vec<u8>), IxfError>
{
	let kind = ResourceKind::fromType(entry.r#type);

	if kind == ResourceKind::SpriteImage
	{
		if hasAlphaFlag(payload)
		{
			return Ok((kind, qfs::decode(&payload[CompressedPayloadOffset..])?));
		}
		return Ok((kind, payload.to_vec()));
	}

	if isContainerCompressed(payload)
	{
		return Ok((kind, qfs::decode(&payload[CompressedPayloadOffset..])?));
	}

	if kind == ResourceKind::String
	{
		return Ok((kind, readLengthPrefixedString(payload)));
	}

	return Ok((kind, payload.to_vec()));
}

fn readLengthPrefixedString(payload: &[u8]) -> Vec<u8>
{
	if payload.len() < 4
	{
		return vec![];
	}

	let length = i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
	if length <= 0
	{
		return vec![];
	}

	let end = (4 + length as usize).min(payload.len());
	return payload[4..end].to_vec();
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn entryOfType(r#type: u32) -> IndexEntry
	{
		return IndexEntry { group: 1, instance: 2, r#type, offset: 24, length: 0 };
	}

	#[test]
	fn StringResourceUnwrapsItsLengthPrefix()
	{
		let entry = entryOfType(0x2026_960B);
		let payload = [0x04, 0x00, 0x00, 0x00, b'T', b'e', b's', b't'];

		let (kind, bytes) = dispatch(&entry, &payload).unwrap();
		assert_eq!(ResourceKind::String, kind);
		assert_eq!(b"Test".to_vec(), bytes);
	}

	#[test]
	fn NonPositiveLengthPrefixYieldsEmptyBytes()
	{
		let entry = entryOfType(0x2026_960B);
		let payload = [0x00, 0x00, 0x00, 0x00];

		let (_, bytes) = dispatch(&entry, &payload).unwrap();
		assert!(bytes.is_empty());
	}

	#[test]
	fn SpriteImageExactlyTwentyBytesIsWrittenVerbatim()
	{
		let entry = entryOfType(0x0000_0000);
		let payload = vec![0u8; 20];

		let (kind, bytes) = dispatch(&entry, &payload).unwrap();
		assert_eq!(ResourceKind::SpriteImage, kind);
		assert_eq!(20, bytes.len());
	}

	#[test]
	fn SpriteImageAlphaFlagTakesPriorityOverContainerSignature()
	{
		let entry = entryOfType(0x0000_0000);
		let mut payload = ContainerCompressedSignature.to_vec();
		payload.extend_from_slice(&[0u8; 12]);
		// Alpha flag word at payload offset 4 overlaps the container signature's tail;
		// force it anyway to exercise alpha-checked-first precedence.
		payload[4] = 0x00;
		payload[5] = 0x00;
		payload[6] = 0x00;
		payload[7] = 0x10;
		payload.extend_from_slice(&[0x10, 0xFB, 0x00, 0x00, 0x01, 0xFD, 0x41]);

		let (kind, bytes) = dispatch(&entry, &payload).unwrap();
		assert_eq!(ResourceKind::SpriteImage, kind);
		assert_eq!(vec![0x41], bytes);
	}

	#[test]
	fn ContainerCompressedSignatureIsDecodedFromOffsetTwenty()
	{
		let entry = entryOfType(0xDEAD_BEEF);
		let mut payload = ContainerCompressedSignature.to_vec();
		payload.extend_from_slice(&[0u8; 12]);
		// header (size=5), a 4-literal run ("hell"), then a terminator carrying the final "o".
		payload.extend_from_slice(&[0x10, 0xFB, 0x00, 0x00, 0x05, 0xE0, b'h', b'e', b'l', b'l', 0xFD, b'o']);

		let (_, bytes) = dispatch(&entry, &payload).unwrap();
		assert_eq!(b"hello".to_vec(), bytes);
	}

	#[test]
	fn UnrecognisedTypeFallsBackToBinExtension()
	{
		let kind = ResourceKind::fromType(0x1234_5678);
		assert_eq!("bin", kind.extension());
	}
}
