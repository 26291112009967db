//! Writing normalized datasets to disk.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::Builder;

use crate::error::{Result, ScalingError};
use crate::io::format::write_row;

/// Create or replace `path` with whatever `body` writes.
///
/// With `atomic`, the content goes to a temporary file in the same
/// directory which is then renamed over `path`, so readers never see a
/// partially written file. The replaced file keeps its permissions; a new
/// file gets the same mode [`File::create`] would give it.
pub fn write_text<P, F>(path: P, atomic: bool, body: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let path = path.as_ref();

    if !atomic {
        let file = File::create(path).map_err(|e| ScalingError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        body(&mut writer).map_err(|e| ScalingError::io(path, e))?;
        return writer.flush().map_err(|e| ScalingError::io(path, e));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = temp_builder()
        .tempfile_in(dir)
        .map_err(|e| ScalingError::io(path, e))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| ScalingError::io(path, e))?;
    }
    {
        let mut writer = BufWriter::new(&mut tmp);
        body(&mut writer).map_err(|e| ScalingError::io(path, e))?;
        writer.flush().map_err(|e| ScalingError::io(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| ScalingError::io(path, e))?;
    tmp.persist(path).map_err(|e| ScalingError::io(path, e))?;
    Ok(())
}

/// Temp files default to 0600; ask for 0666 and let the umask trim it.
#[cfg_attr(not(unix), allow(unused_mut))]
fn temp_builder<'a, 'b>() -> Builder<'a, 'b> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

/// Write normalized rows, one fitness case per line.
pub fn write_normalized<P: AsRef<Path>>(path: P, rows: &[Vec<f64>], atomic: bool) -> Result<()> {
    write_text(path, atomic, |w| {
        for row in rows {
            write_row(w, row)?;
        }
        Ok(())
    })
}
