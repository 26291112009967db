//! Reading and writing the bounds file.
//!
//! One `"<min> <max>"` line per feature, then a final line with the target
//! bounds.

use std::io::{self, Write};
use std::path::Path;

use crate::core::BoundsTable;
use crate::error::{Result, ScalingError};
use crate::io::export::write_text;
use crate::io::format::write_bounds_line;
use crate::transform::MinMaxScale;

impl BoundsTable {
    /// Write the table in bounds-file format.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for (_, scale) in self.columns() {
            write_bounds_line(writer, scale.min, scale.max)?;
        }
        Ok(())
    }

    /// Create or replace a bounds file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, atomic: bool) -> Result<()> {
        write_text(path, atomic, |w| self.write(w))
    }

    /// Parse bounds-file content. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut scales = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            scales.push(parse_line(line, i + 1)?);
        }

        let target = scales.pop().ok_or_else(|| ScalingError::Parse {
            line: 0,
            message: "bounds file is empty".to_string(),
        })?;
        if scales.is_empty() {
            return Err(ScalingError::Parse {
                line: 1,
                message: "bounds file has no feature lines".to_string(),
            });
        }
        Ok(BoundsTable::new(scales, target))
    }

    /// Read a bounds file written by [`write_to`](Self::write_to).
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ScalingError::io(path, e))?;
        Self::parse(&text)
    }
}

fn parse_line(line: &str, number: usize) -> Result<MinMaxScale> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(ScalingError::Parse {
            line: number,
            message: format!("expected \"<min> <max>\", got {} fields", fields.len()),
        });
    }
    let parse = |s: &str| {
        s.parse::<f64>().map_err(|_| ScalingError::Parse {
            line: number,
            message: format!("'{}' is not a number", s),
        })
    };
    Ok(MinMaxScale::new(parse(fields[0])?, parse(fields[1])?))
}
