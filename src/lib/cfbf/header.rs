/*
cfbfheader library & toolset
Copyright (C) 2018 Steve Muller <steve.muller@outlook.com>

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

use super::error::{DecodeError, DecodeWarning};
use super::primitives::{read_u16, read_u32, read_u32_array};
use super::structures::{Clsid, Header, SectorId, BYTE_ORDER_LITTLE_ENDIAN, HEADER_SIZE, INLINE_FAT_ENTRIES, SIGNATURE};

// Field offsets within the header block
const OFFSET_CLSID: usize = 0x08;
const OFFSET_MINOR_VERSION: usize = 0x18;
const OFFSET_MAJOR_VERSION: usize = 0x1A;
const OFFSET_BYTE_ORDER: usize = 0x1C;
const OFFSET_SECTOR_SHIFT: usize = 0x1E;
const OFFSET_MINI_SECTOR_SHIFT: usize = 0x20;
const OFFSET_RESERVED: usize = 0x22;
const OFFSET_RESERVED2: usize = 0x24;
const OFFSET_NUMBER_OF_DIRECTORY_SECTORS: usize = 0x28;
const OFFSET_NUMBER_OF_FAT_SECTORS: usize = 0x2C;
const OFFSET_FIRST_DIRECTORY_SECTOR: usize = 0x30;
const OFFSET_TRANSACTION_SIGNATURE: usize = 0x34;
const OFFSET_MINI_STREAM_CUTOFF_SIZE: usize = 0x38;
const OFFSET_FIRST_MINI_FAT_SECTOR: usize = 0x3C;
const OFFSET_NUMBER_OF_MINI_FAT_SECTORS: usize = 0x40;
const OFFSET_FIRST_DIFAT_SECTOR: usize = 0x44;
const OFFSET_NUMBER_OF_DIFAT_SECTORS: usize = 0x48;
const OFFSET_FAT_SECTOR_LOCATIONS: usize = 0x4C;

/// Decodes and validates the header at the beginning of `bytes`.
///
/// At least 512 bytes are required; anything beyond belongs to the first sector and is ignored.
/// Non-zero reserved fields are tolerated and reported through `Header::warnings`.
pub fn decode(bytes: &[u8]) -> Result<Header, DecodeError> {
	if bytes.len() < HEADER_SIZE {
		return Err(DecodeError::TruncatedInput { needed: HEADER_SIZE, available: bytes.len() });
	}
	let buffer = &bytes[..HEADER_SIZE];

	let mut signature = [0u8; 8];
	signature.copy_from_slice(&buffer[..8]);
	if signature != SIGNATURE {
		return Err(DecodeError::InvalidSignature { found: signature });
	}

	// Nothing else may be read as little-endian until the byte order mark confirms it
	let byte_order = read_u16(&buffer[OFFSET_BYTE_ORDER..])?;
	if byte_order != BYTE_ORDER_LITTLE_ENDIAN {
		return Err(DecodeError::UnsupportedByteOrder { found: byte_order });
	}

	let mut clsid = [0u8; 16];
	clsid.copy_from_slice(&buffer[OFFSET_CLSID..OFFSET_CLSID + 16]);
	let minor_version = read_u16(&buffer[OFFSET_MINOR_VERSION..])?;
	let major_version = read_u16(&buffer[OFFSET_MAJOR_VERSION..])?;
	let sector_shift = read_u16(&buffer[OFFSET_SECTOR_SHIFT..])?;
	let mini_sector_shift = read_u16(&buffer[OFFSET_MINI_SECTOR_SHIFT..])?;
	let reserved = read_u16(&buffer[OFFSET_RESERVED..])?;
	let reserved2 = read_u32(&buffer[OFFSET_RESERVED2..])?;
	let number_of_directory_sectors = read_u32(&buffer[OFFSET_NUMBER_OF_DIRECTORY_SECTORS..])?;
	let number_of_fat_sectors = read_u32(&buffer[OFFSET_NUMBER_OF_FAT_SECTORS..])?;
	let first_directory_sector_location = SectorId::from(read_u32(&buffer[OFFSET_FIRST_DIRECTORY_SECTOR..])?);
	let transaction_signature = read_u32(&buffer[OFFSET_TRANSACTION_SIGNATURE..])?;
	let mini_stream_cutoff_size = read_u32(&buffer[OFFSET_MINI_STREAM_CUTOFF_SIZE..])?;
	let first_mini_fat_sector_location = SectorId::from(read_u32(&buffer[OFFSET_FIRST_MINI_FAT_SECTOR..])?);
	let number_of_mini_fat_sectors = read_u32(&buffer[OFFSET_NUMBER_OF_MINI_FAT_SECTORS..])?;
	let first_difat_sector_location = SectorId::from(read_u32(&buffer[OFFSET_FIRST_DIFAT_SECTOR..])?);
	let number_of_difat_sectors = read_u32(&buffer[OFFSET_NUMBER_OF_DIFAT_SECTORS..])?;
	let raw_fat_sector_locations = read_u32_array::<INLINE_FAT_ENTRIES>(&buffer[OFFSET_FAT_SECTOR_LOCATIONS..])?;

	match (major_version, sector_shift) {
		(3, 0x0009) | (4, 0x000C) => {},
		(3, _) | (4, _) => return Err(DecodeError::InconsistentSectorShift { major_version, sector_shift }),
		_ => return Err(DecodeError::UnsupportedVersion { found: major_version }),
	}

	if major_version == 3 && number_of_directory_sectors != 0 {
		return Err(DecodeError::InconsistentDirectorySectorCount { found: number_of_directory_sectors });
	}

	if transaction_signature != 0 {
		return Err(DecodeError::UnsupportedTransactionSignature { found: transaction_signature });
	}

	let mut warnings = Vec::new();
	if reserved != 0 {
		warnings.push(DecodeWarning::ReservedFieldNonZero { offset: OFFSET_RESERVED, value: reserved as u32 });
	}
	if reserved2 != 0 {
		warnings.push(DecodeWarning::ReservedFieldNonZero { offset: OFFSET_RESERVED2, value: reserved2 });
	}

	let mut fat_sector_locations = [SectorId::Free; INLINE_FAT_ENTRIES];
	for (location, &raw) in fat_sector_locations.iter_mut().zip(raw_fat_sector_locations.iter()) {
		*location = SectorId::from(raw);
	}

	Ok(Header {
		signature,
		clsid: Clsid(clsid),
		minor_version,
		major_version,
		byte_order,
		sector_shift,
		sector_size: 1 << sector_shift,
		mini_sector_shift,
		mini_sector_size: 1u64.checked_shl(mini_sector_shift as u32).unwrap_or(0),
		reserved,
		reserved2,
		number_of_directory_sectors,
		number_of_fat_sectors,
		first_directory_sector_location,
		transaction_signature,
		mini_stream_cutoff_size,
		first_mini_fat_sector_location,
		number_of_mini_fat_sectors,
		first_difat_sector_location,
		number_of_difat_sectors,
		fat_sector_locations,
		warnings,
	})
}

/// Like `decode`, but a non-zero reserved field is a hard error.
pub fn decode_strict(bytes: &[u8]) -> Result<Header, DecodeError> {
	let header = decode(bytes)?;
	match header.warnings.first() {
		Some(&warning) => Err(warning.into_error()),
		None => Ok(header),
	}
}
