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

use std::collections::btree_map::{self, BTreeMap};
use super::error::AllocationError;
use super::structures::{Header, SectorId, INLINE_FAT_ENTRIES};

/// What the inline FAT array says about a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
	/// Not listed in the header.
	Unallocated,
	/// Listed with one of the reserved values instead of a sector number.
	Sentinel,
	/// A FAT sector whose contents still have to be read from the file.
	PendingResolution,
}

/// Sectors named by the FAT array inlined in a header, keyed by their own sector ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationMap {
	entries: BTreeMap<SectorId, LinkState>,
}

impl AllocationMap {
	pub fn get(&self, id: SectorId) -> Option<LinkState> {
		self.entries.get(&id).cloned()
	}

	/// Like `get`, but sectors not listed are reported as `Unallocated`.
	pub fn state(&self, id: SectorId) -> LinkState {
		self.get(id).unwrap_or(LinkState::Unallocated)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates entries in ascending sector order, sentinels after regular sectors.
	pub fn iter(&self) -> Iter {
		Iter { inner: self.entries.iter() }
	}
}

pub struct Iter<'a> {
	inner: btree_map::Iter<'a, SectorId, LinkState>,
}

impl<'a> Iterator for Iter<'a> {
	type Item = (SectorId, LinkState);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(&id, &state)| (id, state))
	}
}

impl<'a> IntoIterator for &'a AllocationMap {
	type Item = (SectorId, LinkState);
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Iter<'a> {
		self.iter()
	}
}

/// Builds the allocation map from the FAT sector locations stored in the header.
///
/// Fails with `DifatChainUnsupported` if the FAT extends beyond what the header can address,
/// i.e. the last inline slot is in use or more than 109 FAT sectors are declared.
pub fn build(header: &Header) -> Result<AllocationMap, AllocationError> {
	let last = header.fat_sector_locations[INLINE_FAT_ENTRIES - 1];
	let last_in_use = !last.is_free() && last != SectorId::Regular(0);
	if last_in_use || header.number_of_fat_sectors as usize > INLINE_FAT_ENTRIES {
		return Err(AllocationError::DifatChainUnsupported {
			fat_sectors: header.number_of_fat_sectors,
			difat_sectors: header.number_of_difat_sectors,
			first_difat_sector: header.first_difat_sector_location,
		});
	}

	let mut entries = BTreeMap::new();
	for (index, &id) in header.fat_sector_locations.iter().enumerate() {
		let state = match id {
			SectorId::Free => continue,
			SectorId::Regular(_) => LinkState::PendingResolution,
			_ => LinkState::Sentinel,
		};
		if entries.insert(id, state).is_some() {
			return Err(AllocationError::AllocationConflict { index, sector: id });
		}
	}

	Ok(AllocationMap { entries })
}
