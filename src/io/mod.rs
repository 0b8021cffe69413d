//! Text formats at the edges of the pipeline, plus the output sink.
//!
//! - `mesh` - the input mesh description (counts, vertex rows, face loops)
//! - `dcel` - the 1-based indexed DCEL layout written after validation, and
//!   a reader for it
//!
//! Files are written through a temp file in the target directory and renamed
//! into place once everything has been written.

pub mod dcel;
pub mod mesh;

use std::fs::{self, File};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

/// Where command output goes: stdout, or a file replaced atomically.
pub enum Sink {
    Stdout(Stdout),
    File(PendingWrite),
}

/// Write-then-rename wrapper for file outputs.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

/// Open `output` for writing; `None` or `-` means stdout.  An existing file
/// is only replaced when `force` is set.
pub fn open_sink(output: Option<&Path>, force: bool) -> Result<Sink> {
    let target = match output {
        None => return Ok(Sink::Stdout(io::stdout())),
        Some(path) if path == Path::new("-") => return Ok(Sink::Stdout(io::stdout())),
        Some(path) => path,
    };

    let parent = target.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("[io] Failed to create directory {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("[io] Failed to create temp file in {}", parent.display()))?;

    Ok(Sink::File(PendingWrite { target: target.to_path_buf(), tmp }))
}

impl Sink {
    /// Flush, and for files move the temp file over the target.
    pub fn finish(self) -> Result<()> {
        match self {
            Sink::Stdout(mut out) => out.flush().context("[io] Failed to flush stdout"),
            Sink::File(mut pending) => {
                pending.tmp.flush().context("[io] Failed to flush output")?;
                pending.tmp.as_file().sync_all().ok(); // best-effort fsync
                pending.tmp.persist(&pending.target)
                    .with_context(|| format!("[io] Failed to rename output to {}", pending.target.display()))?;
                if let Some(dir) = pending.target.parent().filter(|p| !p.as_os_str().is_empty()) {
                    let _ = File::open(dir).and_then(|f| f.sync_all());
                }
                Ok(())
            }
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File(pending) => pending.tmp.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(pending) => pending.tmp.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_appears_only_after_finish() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.txt");

        let mut sink = open_sink(Some(&target), false).unwrap();
        writeln!(sink, "hello").unwrap();
        assert!(!target.exists());

        sink.finish().unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello\n");
    }

    #[test]
    fn existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "old").unwrap();

        assert!(open_sink(Some(&target), false).is_err());

        let mut sink = open_sink(Some(&target), true).unwrap();
        write!(sink, "new").unwrap();
        sink.finish().unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn dash_means_stdout() {
        assert!(matches!(open_sink(Some(Path::new("-")), false).unwrap(), Sink::Stdout(_)));
        assert!(matches!(open_sink(None, false).unwrap(), Sink::Stdout(_)));
    }
}
