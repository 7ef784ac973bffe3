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

// Also see: [MS-CFB]: Compound File Binary File Format specifications, https://msdn.microsoft.com/en-us/library/dd942138.aspx

use std::fmt;
use super::error::DecodeWarning;

/// Size in bytes of the header block at the beginning of every CFBF file.
pub const HEADER_SIZE: usize = 512;

/// Number of FAT sector locations stored directly in the header.
pub const INLINE_FAT_ENTRIES: usize = 109;

/// `D0 CF 11 E0 A1 B1 1A E1`
pub const SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Byte order mark of a little-endian file, as read in little-endian order.
pub const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0xFFFE;

pub const MAXREGSECT: u32 = 0xFFFFFFFA;
pub const RESERVED: u32 = 0xFFFFFFFB;
pub const DIFSECT: u32 = 0xFFFFFFFC;
pub const FATSECT: u32 = 0xFFFFFFFD;
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE;
pub const FREESECT: u32 = 0xFFFFFFFF;

/// A sector location in a CFBF file: either a regular sector number, or one of the values reserved at the top of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectorId {
	/// A sector number in `0x00000000..=0xFFFFFFF9`.
	Regular(u32),
	/// `MAXREGSECT`
	MaxRegular,
	/// `RESERVED`
	Reserved,
	/// `DIFSECT`: the sector holds part of the DIFAT.
	Difat,
	/// `FATSECT`: the sector holds part of the FAT.
	Fat,
	/// `ENDOFCHAIN`
	EndOfChain,
	/// `FREESECT`: the sector is unallocated.
	Free,
}

impl SectorId {
	pub fn is_regular(self) -> bool {
		match self {
			SectorId::Regular(_) => true,
			_ => false,
		}
	}

	pub fn is_free(self) -> bool {
		self == SectorId::Free
	}

	/// The MS-CFB name of a reserved value, `None` for regular sectors.
	pub fn sentinel_name(self) -> Option<&'static str> {
		match self {
			SectorId::Regular(_) => None,
			SectorId::MaxRegular => Some("MAXREGSECT"),
			SectorId::Reserved => Some("RESERVED"),
			SectorId::Difat => Some("DIFSECT"),
			SectorId::Fat => Some("FATSECT"),
			SectorId::EndOfChain => Some("ENDOFCHAIN"),
			SectorId::Free => Some("FREESECT"),
		}
	}
}

impl From<u32> for SectorId {
	fn from(value: u32) -> SectorId {
		match value {
			MAXREGSECT => SectorId::MaxRegular,
			RESERVED => SectorId::Reserved,
			DIFSECT => SectorId::Difat,
			FATSECT => SectorId::Fat,
			ENDOFCHAIN => SectorId::EndOfChain,
			FREESECT => SectorId::Free,
			regular => SectorId::Regular(regular),
		}
	}
}

impl From<SectorId> for u32 {
	fn from(id: SectorId) -> u32 {
		match id {
			SectorId::Regular(n) => n,
			SectorId::MaxRegular => MAXREGSECT,
			SectorId::Reserved => RESERVED,
			SectorId::Difat => DIFSECT,
			SectorId::Fat => FATSECT,
			SectorId::EndOfChain => ENDOFCHAIN,
			SectorId::Free => FREESECT,
		}
	}
}

impl fmt::Display for SectorId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.sentinel_name() {
			Some(name) => f.write_str(name),
			None => write!(f, "{:#X}", u32::from(*self)),
		}
	}
}

/// A 16-byte class identifier, kept in its on-disk byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clsid(pub [u8; 16]);

impl Clsid {
	pub fn is_null(&self) -> bool {
		self.0.iter().all(|&b| b == 0)
	}
}

impl fmt::Display for Clsid {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for b in self.0.iter() {
			write!(f, "{:02x}", b)?;
		}
		Ok(())
	}
}

/// The 512-byte header of a CFBF file, including the DIFAT entries stored inline.
///
/// Only produced by a successful decode, so every value has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
	pub signature: [u8; 8],
	pub clsid: Clsid,
	pub minor_version: u16,
	pub major_version: u16,
	pub byte_order: u16,
	pub sector_shift: u16,
	pub sector_size: u64, // virtual field; not actually contained in CFBF file
	pub mini_sector_shift: u16,
	pub mini_sector_size: u64, // virtual field; zero if the shift does not fit a u64
	pub reserved: u16,
	pub reserved2: u32,
	pub number_of_directory_sectors: u32,
	pub number_of_fat_sectors: u32,
	pub first_directory_sector_location: SectorId,
	pub transaction_signature: u32,
	pub mini_stream_cutoff_size: u32,
	pub first_mini_fat_sector_location: SectorId,
	pub number_of_mini_fat_sectors: u32,
	pub first_difat_sector_location: SectorId,
	pub number_of_difat_sectors: u32,
	/// Locations of the first 109 FAT sectors.
	pub fat_sector_locations: [SectorId; INLINE_FAT_ENTRIES],
	pub(super) warnings: Vec<DecodeWarning>,
}

impl Header {
	/// Anomalies tolerated while decoding, such as non-zero reserved fields.
	pub fn warnings(&self) -> &[DecodeWarning] {
		&self.warnings
	}
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "<Signature: ")?;
		for b in self.signature.iter() {
			write!(f, "{:02x}", b)?;
		}
		write!(f, " ; Clsid: {} ; MinorVersion: {:x} ; MajorVersion: {:x} ; ByteOrder: {:x} ; SectorShift: {:x} ; MiniSectorShift: {:x} ; Reserved: {:x} ; Reserved2: {:x}",
			self.clsid, self.minor_version, self.major_version, self.byte_order, self.sector_shift, self.mini_sector_shift, self.reserved, self.reserved2)?;
		write!(f, " ; DirectorySectors: {:x} ; FatSectors: {:x} ; DirectoryStart: {} ; TransactionSignature: {:x} ; MiniStreamCutoff: {:x}",
			self.number_of_directory_sectors, self.number_of_fat_sectors, self.first_directory_sector_location, self.transaction_signature, self.mini_stream_cutoff_size)?;
		write!(f, " ; MiniFatStart: {} ; MiniFatSectors: {:x} ; DifatStart: {} ; DifatSectors: {:x} ; FatSectorLocations: [",
			self.first_mini_fat_sector_location, self.number_of_mini_fat_sectors, self.first_difat_sector_location, self.number_of_difat_sectors)?;
		for (i, location) in self.fat_sector_locations.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{}", location)?;
		}
		write!(f, "]>")
	}
}
