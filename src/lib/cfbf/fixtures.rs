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

//! Header blocks shared by the unit tests.

use super::structures::{HEADER_SIZE, SIGNATURE};

/// A minimal valid version 3 header: no FAT sectors, every inline FAT entry free.
pub fn header_bytes() -> [u8; HEADER_SIZE] {
	let mut bytes = [0u8; HEADER_SIZE];
	bytes[..8].copy_from_slice(&SIGNATURE);
	put_u16(&mut bytes, 0x18, 0x3E);
	put_u16(&mut bytes, 0x1A, 3);
	put_u16(&mut bytes, 0x1C, 0xFFFE);
	put_u16(&mut bytes, 0x1E, 9);
	put_u16(&mut bytes, 0x20, 6);
	for b in bytes[0x4C..].iter_mut() {
		*b = 0xFF;
	}
	bytes
}

pub fn put_u16(bytes: &mut [u8], offset: usize, value: u16) {
	bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn put_u32(bytes: &mut [u8], offset: usize, value: u32) {
	bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Sets inline FAT entry `index` of a header block.
pub fn put_fat_entry(bytes: &mut [u8], index: usize, value: u32) {
	put_u32(bytes, 0x4C + index * 4, value);
}
