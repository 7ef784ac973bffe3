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

//! Decoding of the header block of Compound File Binary Format (CFBF) files,
//! and of the FAT sector locations it lists inline.

mod error;
mod primitives;
mod structures;
pub mod header;
pub mod allocation;
#[cfg(test)]
mod fixtures;

pub use self::error::{AllocationError, DecodeError, DecodeWarning, Error};
pub use self::primitives::{read_u16, read_u32};
pub use self::structures::{Clsid, Header, SectorId, HEADER_SIZE, INLINE_FAT_ENTRIES, SIGNATURE};
pub use self::structures::{MAXREGSECT, RESERVED, DIFSECT, FATSECT, ENDOFCHAIN, FREESECT};
pub use self::allocation::{AllocationMap, LinkState};

use std::io::Read;

/// Reads the header block from the current position of `input` and decodes it.
///
/// Only the header is consumed. A source that ends early yields `DecodeError::TruncatedInput`.
pub fn read_header<R: Read>(input: R, strict: bool) -> Result<Header, Error> {
	let mut buffer = Vec::with_capacity(HEADER_SIZE);
	input.take(HEADER_SIZE as u64).read_to_end(&mut buffer)?;
	let header = if strict {
		header::decode_strict(&buffer)?
	}
	else {
		header::decode(&buffer)?
	};
	Ok(header)
}
