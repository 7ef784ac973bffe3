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

use std::fs::File;
use std::io::{Read, Write, Error, ErrorKind};
use std::io::Stderr;
use std::path::Path;

/// Reads all of `read` into memory, refusing inputs that are empty or larger than `limit` bytes.
pub fn read_limited(read: impl Read, limit: u64) -> Result<Vec<u8>, Error> {
	let mut data: Vec<u8> = Vec::new();
	// one byte past the limit tells a file that is exactly `limit` bytes from a larger one
	read.take(limit.saturating_add(1)).read_to_end(&mut data)?;
	if data.is_empty() {
		return Err(Error::new(ErrorKind::InvalidData, "zero length file"));
	}
	if data.len() as u64 > limit {
		return Err(Error::new(ErrorKind::InvalidData, "file larger than limit"));
	}
	Ok(data)
}

/// Opens the file at `path` and reads it with `read_limited`.
pub fn load_file(path: impl AsRef<Path>, limit: u64) -> Result<Vec<u8>, Error> {
	let file = File::open(path)?;
	read_limited(file, limit)
}

pub struct Debug {
	output: Stderr,
	level: i8,
}

impl Debug {
	pub fn new(output: Stderr, level: i8) -> Debug {
		Debug { output, level }
	}

	// write errors on the debug stream are ignored
	pub fn log(&mut self, level: i8, string: String) {
		if self.level >= level {
			let _ = self.output.write_all(string.as_bytes());
		}
	}

	pub fn logln(&mut self, level: i8, string: String) {
		if self.level >= level {
			let _ = self.output.write_all(string.as_bytes());
			let _ = self.output.write_all(&[0x0A]);
		}
	}
}
