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

extern crate cfbfheader;

use std::io::Cursor;
use cfbfheader::cfbf::{self, allocation, header, AllocationError, DecodeError, Error, SectorId};

fn empty_container_header() -> Vec<u8> {
	let mut bytes = vec![0u8; 512];
	bytes[0..8].copy_from_slice(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);
	bytes[24..26].copy_from_slice(&[0x3E, 0x00]);
	bytes[26..28].copy_from_slice(&[0x03, 0x00]);
	bytes[28..30].copy_from_slice(&[0xFE, 0xFF]);
	bytes[30..32].copy_from_slice(&[0x09, 0x00]);
	bytes[32..34].copy_from_slice(&[0x06, 0x00]);
	for b in bytes[76..].iter_mut() {
		*b = 0xFF;
	}
	bytes
}

#[test]
fn empty_container_decodes_to_empty_map() {
	let header = header::decode(&empty_container_header()).unwrap();
	assert_eq!(header.major_version, 3);
	assert_eq!(header.minor_version, 0x3E);
	assert_eq!(header.sector_shift, 9);
	assert_eq!(header.byte_order, 0xFFFE);
	assert!(header.warnings().is_empty());

	let map = allocation::build(&header).unwrap();
	assert!(map.is_empty());
}

#[test]
fn reversed_byte_order_mark_is_rejected() {
	let mut bytes = empty_container_header();
	bytes[28..30].copy_from_slice(&[0xFF, 0xFE]);
	assert_eq!(header::decode(&bytes), Err(DecodeError::UnsupportedByteOrder { found: 0xFEFF }));
}

#[test]
fn signature_mismatch_wins_over_everything_else() {
	let mut bytes = vec![0x5Au8; 512];
	bytes[0..8].copy_from_slice(b"PK\x03\x04\x14\x00\x00\x00");
	assert!(matches!(header::decode(&bytes), Err(DecodeError::InvalidSignature { .. })));
}

#[test]
fn every_prefix_is_truncated() {
	let bytes = empty_container_header();
	for len in 0..512 {
		assert!(matches!(header::decode(&bytes[..len]), Err(DecodeError::TruncatedInput { .. })), "prefix of {} bytes", len);
	}
}

#[test]
fn full_inline_array_needs_difat() {
	let mut bytes = empty_container_header();
	bytes[44..48].copy_from_slice(&109u32.to_le_bytes());
	for i in 0..109u32 {
		let offset = 76 + i as usize * 4;
		bytes[offset..offset + 4].copy_from_slice(&(i + 1).to_le_bytes());
	}
	let header = header::decode(&bytes).unwrap();
	assert_eq!(header.fat_sector_locations[108], SectorId::Regular(109));
	match allocation::build(&header) {
		Err(AllocationError::DifatChainUnsupported { fat_sectors: 109, .. }) => {},
		other => panic!("unexpected result: {:?}", other),
	}
}

#[test]
fn header_is_read_from_a_larger_file() {
	let mut file = empty_container_header();
	file.extend_from_slice(&[0u8; 1024]);
	let header = cfbf::read_header(Cursor::new(file), true).unwrap();
	assert_eq!(header.sector_size, 512);

	match cfbf::read_header(Cursor::new(vec![0xD0, 0xCF]), false) {
		Err(Error::Decode(DecodeError::TruncatedInput { available: 2, .. })) => {},
		other => panic!("unexpected result: {:?}", other),
	}
}
