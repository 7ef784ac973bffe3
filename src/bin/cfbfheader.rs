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

#[macro_use] // enable value_t! macro
extern crate clap;
extern crate cfbfheader;

use std::io::{stdin, stderr};
use clap::{Arg, App, ArgMatches};
use cfbfheader::cfbf::{self, allocation, header, Error, Header, LinkState};
use cfbfheader::io::{load_file, read_limited, Debug};

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

fn main() {
	let matches = App::new("cfbfheader")
		.version("1.0")
		.author("Steve Muller <steve.muller@outlook.com>")
		.about("This utility reads the header of a Compound File Binary File Format (also known as OLE file, COM file, or Structured Storage file), validates it and prints its fields.")
		.arg(Arg::with_name("verbose")
			.short("v")
			.help("Increases the debug verbosity. This will print debug messages to standard error (STDERR). Can be used up to 2 times.")
			.multiple(true)
			.takes_value(false))
		.arg(Arg::with_name("input")
			.value_name("FILE")
			.help("A file in Compound File Binary File Format (CFBF). If omitted (or '-'), the file will be read from STDIN instead.")
			.short("i")
			.long("input")
			.required(false))
		.arg(Arg::with_name("max-size")
			.value_name("MEGABYTES")
			.help("Refuses to read input files larger than this.")
			.long("max-size")
			.default_value("1000"))
		.arg(Arg::with_name("strict")
			.long("strict")
			.help("Treats non-zero reserved header fields as an error instead of a warning.")
			.takes_value(false))
		.arg(Arg::with_name("fat")
			.long("fat")
			.help("Also prints the FAT sectors listed in the header.")
			.takes_value(false))
	.get_matches();

	let verbose = matches.occurrences_of("verbose") as i8;
	let mut debug = Debug::new(stderr(), verbose);

	if let Err(e) = dispatch(&matches, &mut debug) {
		eprintln!("ERROR: {}", e);
		std::process::exit(1);
	}
}

fn dispatch(matches: &ArgMatches, debug: &mut Debug) -> Result<(), Error> {
	let inputfile = matches.value_of("input").unwrap_or("-");
	let max_size = value_t!(matches, "max-size", u64).unwrap_or_else(|e| e.exit());
	let strict = matches.is_present("strict");
	let limit = max_size.saturating_mul(BYTES_PER_MEGABYTE);

	debug.log(1, format!("[dispatch] Loading input (at most {} bytes) ... ", limit));
	let data = match inputfile {
		"" | "-" => read_limited(stdin(), limit)?,
		_ => load_file(inputfile, limit)?,
	};
	debug.logln(1, format!("OK ({} bytes).", data.len()));

	let header = decode(&data, strict, debug)?;
	for warning in header.warnings() {
		eprintln!("WARNING: {}", warning);
	}
	println!("{}", header);

	if matches.is_present("fat") {
		print_allocation(&header, debug)?;
	}
	Ok(())
}

fn decode(data: &[u8], strict: bool, debug: &mut Debug) -> Result<Header, Error> {
	debug.log(1, format!("[decode] Decoding CFBF header ({} bytes{}) ... ", cfbf::HEADER_SIZE, if strict { ", strict" } else { "" }));
	let header = if strict { header::decode_strict(data)? } else { header::decode(data)? };
	debug.logln(1, format!("OK."));
	debug.logln(2, format!("[decode] Version {}.{:#X}, {}-byte sectors, {}-byte mini-sectors.", header.major_version, header.minor_version, header.sector_size, header.mini_sector_size));
	Ok(header)
}

fn print_allocation(header: &Header, debug: &mut Debug) -> Result<(), Error> {
	debug.log(1, format!("[print_allocation] Building allocation map from {} inline FAT entries ... ", cfbf::INLINE_FAT_ENTRIES));
	let map = allocation::build(header)?;
	debug.logln(1, format!("OK ({} entries).", map.len()));

	for (id, state) in &map {
		let state = match state {
			LinkState::Unallocated => "unallocated",
			LinkState::Sentinel => "sentinel",
			LinkState::PendingResolution => "fat sector",
		};
		println!("{} {}", id, state);
	}
	Ok(())
}

