use std::io::Read;
use std::fs;
use std::path::Path;

use bytes::Buf;

use flate2;

use log::info;

use super::config::is_url;
use super::error::Error;


fn maybe_gunzip<R: Read + 'static>(name: &str, r: R) -> Box<dyn Read> {
	if name.ends_with(".gz") {
		Box::new(flate2::read::GzDecoder::new(r))
	} else {
		Box::new(r)
	}
}

pub fn magic_open<P: AsRef<Path>>(path: P) -> Result<Box<dyn Read>, Error> {
	let path = path.as_ref();
	let f = fs::File::open(path)?;
	Ok(maybe_gunzip(&path.to_string_lossy(), f))
}

/// Open a data source which is either an HTTP(S) URL or a local path.
/// Remote bodies are buffered in memory in full before parsing.
pub fn open_source(location: &str) -> Result<Box<dyn Read>, Error> {
	if !is_url(location) {
		info!("reading {}", location);
		return magic_open(location)
	}
	info!("fetching {}", location);
	let resp = reqwest::blocking::get(location)?.error_for_status()?;
	let body = resp.bytes()?;
	Ok(maybe_gunzip(location, body.reader()))
}


#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Write;

	use flate2::write::GzEncoder;
	use flate2::Compression;

	#[test]
	fn magic_open_decompresses_gz() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("data.csv.gz");
		let mut enc = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
		enc.write_all(b"a,b\n1,2\n").unwrap();
		enc.finish().unwrap();

		let mut s = String::new();
		open_source(&path.to_string_lossy()).unwrap().read_to_string(&mut s).unwrap();
		assert_eq!(s, "a,b\n1,2\n");
	}

	#[test]
	fn missing_local_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nope.csv");
		match open_source(&path.to_string_lossy()) {
			Err(Error::Io(_)) => (),
			Err(e) => panic!("unexpected error: {}", e),
			Ok(_) => panic!("opening a missing file succeeded"),
		}
	}
}
