// SocialGaze - platform/fs.rs
//
// Raw source reads. Invalid UTF-8 is replaced rather than rejected so a
// single bad byte never prevents a dataset from loading.

use std::io::{self, Read};
use std::path::Path;

/// Size of a file in bytes, without reading it.
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a stream to its end, lossily decoded.
///
/// Returns `Ok(None)` if the stream holds more than `max_bytes`.
pub fn read_to_string_capped<R: Read>(reader: R, max_bytes: u64) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    reader.take(max_bytes.saturating_add(1)).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
