use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a newline-delimited list. Line terminators (`\n` or `\r\n`) are stripped,
/// blank lines are kept so line numbers stay stable. A trailing newline does not
/// produce an extra empty entry.
pub fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().collect()
}
