//! Line-oriented file I/O
//!
//! The converter is a single-pass batch tool: the whole input is read into
//! an ordered line vector before processing begins, and the output buffer is
//! flushed once at the end. A run either completes and produces one output
//! file, or fails before the file is created.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Default buffer size for buffered readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Read an entire file into a vector of lines
///
/// Trailing `\n` and `\r\n` line endings are stripped.
pub fn read_lines<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);

    let mut lines = Vec::new();
    let mut buffer = String::with_capacity(256);
    loop {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(_) => {
                if buffer.ends_with('\n') {
                    buffer.pop();
                    if buffer.ends_with('\r') {
                        buffer.pop();
                    }
                }
                lines.push(buffer.clone());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(lines)
}

/// Read only the first line of a file
///
/// Returns `None` for an empty file.
pub fn read_first_line<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);

    let mut buffer = String::with_capacity(256);
    match reader.read_line(&mut buffer)? {
        0 => Ok(None),
        _ => {
            if buffer.ends_with('\n') {
                buffer.pop();
                if buffer.ends_with('\r') {
                    buffer.pop();
                }
            }
            Ok(Some(buffer))
        }
    }
}

/// Write a line buffer to a file in one pass
///
/// Creates the file only at this point; every line is newline-terminated.
pub fn write_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}
