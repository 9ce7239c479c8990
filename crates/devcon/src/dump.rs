//! Plain-text scrollback dump.
//!
//! Writes the buffered lines as UTF-8 text: display flags (the
//! high-color palette bit, link markers) are stripped, trailing blanks
//! are trimmed per line, and fully-blank lines at either end are skipped
//! so a mostly-empty buffer dumps as an empty file instead of a page of
//! blank lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use devcon_core::ScrollbackBuffer;

/// Write the buffer's content as plain text to `out`.
pub fn dump_plain_text(buffer: &ScrollbackBuffer, mut out: impl Write) -> io::Result<()> {
    let valid = buffer.valid_lines();
    let mut start = valid.start;
    while start < valid.end && buffer.line_len(start) == 0 {
        start += 1;
    }
    let mut end = valid.end;
    while end > start && buffer.line_len(end - 1) == 0 {
        end -= 1;
    }
    for line in start..end {
        let len = buffer.line_len(line);
        let text: String = buffer.row(line)[..len].iter().map(|c| c.plain()).collect();
        writeln!(out, "{text}")?;
    }
    out.flush()
}

/// Dump the buffer to a file at `path`, creating or truncating it.
pub fn dump_to_path(buffer: &ScrollbackBuffer, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    dump_plain_text(buffer, BufWriter::new(file))
}
