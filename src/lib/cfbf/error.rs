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

use std::io;
use thiserror::Error;
use super::structures::SectorId;

/// Reasons a 512-byte header block is rejected by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("truncated input: {needed} bytes required, {available} available")]
	TruncatedInput { needed: usize, available: usize },

	#[error("invalid signature {found:02X?}, expected D0 CF 11 E0 A1 B1 1A E1")]
	InvalidSignature { found: [u8; 8] },

	#[error("unsupported byte order mark {found:#06X}, only little-endian (0xFFFE) is supported")]
	UnsupportedByteOrder { found: u16 },

	#[error("unsupported major version {found}, expected 3 or 4")]
	UnsupportedVersion { found: u16 },

	#[error("sector shift {sector_shift:#X} does not match major version {major_version}")]
	InconsistentSectorShift { major_version: u16, sector_shift: u16 },

	#[error("number of directory sectors must be zero for major version 3, found {found}")]
	InconsistentDirectorySectorCount { found: u32 },

	#[error("reserved field at offset {offset:#X} is {value:#X}, expected zero")]
	ReservedFieldNonZero { offset: usize, value: u32 },

	#[error("transaction signature {found:#X} is not supported, expected zero")]
	UnsupportedTransactionSignature { found: u32 },
}

/// Anomalies that do not prevent a header from being decoded, but must not go unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWarning {
	ReservedFieldNonZero { offset: usize, value: u32 },
}

impl DecodeWarning {
	/// The hard error a strict decode reports for this anomaly.
	pub fn into_error(self) -> DecodeError {
		match self {
			DecodeWarning::ReservedFieldNonZero { offset, value } => DecodeError::ReservedFieldNonZero { offset, value },
		}
	}
}

impl std::fmt::Display for DecodeWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.into_error())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
	/// The FAT has more sectors than the header lists inline; the remainder is only reachable through DIFAT sectors.
	#[error("FAT spans {fat_sectors} sectors with {difat_sectors} DIFAT sector(s) starting at {first_difat_sector}; DIFAT chains are not supported")]
	DifatChainUnsupported { fat_sectors: u32, difat_sectors: u32, first_difat_sector: SectorId },

	#[error("inline FAT entry #{index} repeats sector {sector}")]
	AllocationConflict { index: usize, sector: SectorId },
}

/// Any failure while reading a header from a byte source and interpreting it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("Invalid header: {0}")]
	Decode(#[from] DecodeError),

	#[error("Allocation table: {0}")]
	Allocation(#[from] AllocationError),
}
