use std::io::{BufRead, Write};

use crate::config::parse_work_group_size;
use crate::BenchError;

pub const THREADS_PROMPT: &str = "Enter the number of threads: ";

/// Ask for the work-group size on `writer` and read one line from `reader`.
pub fn prompt_work_group_size<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<usize, BenchError> {
    write!(writer, "{THREADS_PROMPT}")?;
    writer.flush()?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(BenchError::InvalidInput(
            "standard input closed before a work-group size was entered".into(),
        ));
    }
    parse_work_group_size(&line)
}
