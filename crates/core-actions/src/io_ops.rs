//! File IO for the editor session.
//!
//! Loading splits a file into records the way `getline` does: each record is
//! the exact bytes of one line, including its `\n` when present. Saving writes
//! every line's bytes back in order. Nothing is normalized in either
//! direction, so load followed by save reproduces the file byte for byte
//! (CRLF endings, a missing final newline and empty files included).

use core_state::EditorSession;
use core_text::LineBuffer;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no file name")]
    NoFileName,
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Split `reader` into newline-terminated records.
pub fn read_records_from<R: BufRead>(mut reader: R) -> io::Result<Vec<Vec<u8>>> {
    let mut records = Vec::new();
    loop {
        let mut record = Vec::new();
        if reader.read_until(b'\n', &mut record)? == 0 {
            break;
        }
        records.push(record);
    }
    Ok(records)
}

pub fn read_records(path: &Path) -> Result<Vec<Vec<u8>>, LoadError> {
    let read = || -> io::Result<Vec<Vec<u8>>> {
        let file = File::open(path)?;
        read_records_from(BufReader::new(file))
    };
    let records = read().map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(target: "io", records = records.len(), "read_records");
    Ok(records)
}

/// Read `path` into `session`, replacing its document.
pub fn load_session(path: &Path, session: &mut EditorSession) -> Result<(), LoadError> {
    let records = read_records(path)?;
    session.load_into(records);
    Ok(())
}

/// Write every line of `buffer` to `out` in order. Returns the byte count.
pub fn write_lines<W: Write>(buffer: &LineBuffer, out: &mut W) -> io::Result<usize> {
    let mut total = 0;
    for line in buffer.lines() {
        out.write_all(line.as_bytes())?;
        total += line.len();
    }
    out.flush()?;
    Ok(total)
}

/// Save the session's document to `target`, or to the session's own file
/// when `target` is `None`. The file is created or truncated.
pub fn write_session(session: &EditorSession, target: Option<&Path>) -> Result<usize, SaveError> {
    let path = target
        .or_else(|| session.file_name())
        .ok_or(SaveError::NoFileName)?;
    let write = || -> io::Result<usize> {
        let mut out = BufWriter::new(File::create(path)?);
        write_lines(session.buffer(), &mut out)
    };
    let bytes = write().map_err(|source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(target: "io", lines = session.buffer().count(), bytes, "write_session");
    Ok(bytes)
}
