// EventSheet - platform/fs.rs
//
// Filesystem helpers: whole-file reads with transparent gzip decompression,
// and the output-file writability check.

use crate::util::constants::GZIP_MAGIC;
use flate2::read::MultiGzDecoder;
use std::fs::OpenOptions;
use std::io::{self, Read};
use std::path::Path;

/// Raw content of one log file.
#[derive(Debug)]
pub struct LogBytes {
    pub bytes: Vec<u8>,

    /// True when the file was gzip-encoded and has been decompressed.
    pub compressed: bool,
}

/// Why `read_log_bytes` failed.
#[derive(Debug)]
pub enum ReadFailure {
    /// The file could not be opened or read.
    Io(io::Error),
    /// The file carries the gzip magic but the stream is corrupt.
    Gzip(io::Error),
}

/// Read the full content of `path`.
///
/// Content starting with the gzip magic is decompressed (all members, so
/// concatenated archives read completely) whatever the file extension.
/// The file handle is released before returning.
pub fn read_log_bytes(path: &Path) -> Result<LogBytes, ReadFailure> {
    let raw = std::fs::read(path).map_err(ReadFailure::Io)?;

    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(LogBytes {
            bytes: raw,
            compressed: false,
        });
    }

    let mut decoder = MultiGzDecoder::new(raw.as_slice());
    let mut bytes = Vec::with_capacity(raw.len() * 4);
    decoder.read_to_end(&mut bytes).map_err(ReadFailure::Gzip)?;

    tracing::debug!(
        path = %path.display(),
        compressed = raw.len(),
        decompressed = bytes.len(),
        "Decompressed gzip log"
    );

    Ok(LogBytes {
        bytes,
        compressed: true,
    })
}

/// Check that an existing `path` can be opened for writing.
///
/// A missing file is writable. An existing file is opened in append mode,
/// which never changes its content; failure means another process holds it
/// (a spreadsheet editor on Windows) or permissions forbid the write.
pub fn check_writable(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    OpenOptions::new().append(true).open(path).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_plain_file_read_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        std::fs::write(&path, b"Service started\n").unwrap();
        let content = read_log_bytes(&path).unwrap();
        assert!(!content.compressed);
        assert_eq!(content.bytes, b"Service started\n");
    }

    #[test]
    fn test_gzip_file_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log.gz");
        std::fs::write(&path, gzip(b"Email sent\n")).unwrap();
        let content = read_log_bytes(&path).unwrap();
        assert!(content.compressed);
        assert_eq!(content.bytes, b"Email sent\n");
    }

    #[test]
    fn test_concatenated_gzip_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multi.gz");
        let mut data = gzip(b"first\n");
        data.extend(gzip(b"second\n"));
        std::fs::write(&path, data).unwrap();
        assert_eq!(read_log_bytes(&path).unwrap().bytes, b"first\nsecond\n");
    }

    #[test]
    fn test_corrupt_gzip_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gz");
        std::fs::write(&path, [0x1f, 0x8b, 0x08, 0x00, 0x01, 0x02]).unwrap();
        assert!(matches!(read_log_bytes(&path), Err(ReadFailure::Gzip(_))));
    }

    #[test]
    fn test_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_log_bytes(&dir.path().join("absent.log"));
        assert!(matches!(result, Err(ReadFailure::Io(_))));
    }

    #[test]
    fn test_check_missing_and_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        assert!(check_writable(&path).is_ok());
        std::fs::write(&path, b"existing").unwrap();
        assert!(check_writable(&path).is_ok());
        assert_eq!(std::fs::read(&path).unwrap(), b"existing");
    }

    #[test]
    fn test_check_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_writable(dir.path()).is_err());
    }
}
