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

//! Fixed-width little-endian integer decoding.

use byteorder::{ByteOrder, LittleEndian};
use super::error::DecodeError;

/// Decodes the little-endian `u16` at the start of `bytes`.
pub fn read_u16(bytes: &[u8]) -> Result<u16, DecodeError> {
	require(bytes, 2)?;
	Ok(LittleEndian::read_u16(bytes))
}

/// Decodes the little-endian `u32` at the start of `bytes`.
pub fn read_u32(bytes: &[u8]) -> Result<u32, DecodeError> {
	require(bytes, 4)?;
	Ok(LittleEndian::read_u32(bytes))
}

/// Decodes `N` consecutive little-endian `u32` values from the start of `bytes`.
pub fn read_u32_array<const N: usize>(bytes: &[u8]) -> Result<[u32; N], DecodeError> {
	require(bytes, N * 4)?;
	let mut values = [0u32; N];
	LittleEndian::read_u32_into(&bytes[..N * 4], &mut values);
	Ok(values)
}

// byteorder panics on short slices, so the length is checked up front
fn require(bytes: &[u8], needed: usize) -> Result<(), DecodeError> {
	if bytes.len() < needed {
		Err(DecodeError::TruncatedInput { needed, available: bytes.len() })
	}
	else {
		Ok(())
	}
}
