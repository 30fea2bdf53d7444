/// File and stdin reading with size enforcement and UTF-8 validation.
///
/// Used by `gstin render` to load a saved response body. `gstin-core` never
/// touches the filesystem; all reading happens here.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: read through a `Read::take` cap so allocation is bounded.
/// - All failures become [`CliError`] variants with exit code 2.
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::cli::PathOrStdin;
use crate::error::CliError;

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) when the file is missing or
/// unreadable, larger than `max_size`, or not valid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();
    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(bytes, &path.display().to_string())
}

fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Reads stdin up to `max_size` bytes; one extra byte is requested so that
/// a stream of exactly `max_size` bytes is accepted.
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    read_capped(std::io::stdin().lock(), max_size, "-")
}

fn read_capped<R: Read>(reader: R, max_size: u64, label: &str) -> Result<String, CliError> {
    let mut buf = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;
    if buf.len() as u64 > max_size {
        return Err(CliError::FileTooLarge {
            source: label.to_owned(),
            limit: max_size,
            actual: None,
        });
    }
    bytes_to_string(buf, label)
}

/// Converts bytes to a `String`, reporting the offset of the first invalid
/// UTF-8 sequence on failure.
fn bytes_to_string(bytes: Vec<u8>, source_label: &str) -> Result<String, CliError> {
    String::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: source_label.to_owned(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(contents).expect("write temp file");
        f
    }

    #[test]
    fn read_valid_utf8_file() {
        let content = r#"{"data":{"gstin":"27ABCDE1234F1Z5"}}"#;
        let f = temp_file_with(content.as_bytes());
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let result = read_input(&source, 1024).expect("should read file");
        assert_eq!(result, content);
    }

    #[test]
    fn read_file_exactly_at_limit_succeeds() {
        let f = temp_file_with(b"hello");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let result = read_input(&source, 5).expect("should succeed at limit");
        assert_eq!(result, "hello");
    }

    #[test]
    fn read_file_over_limit_reports_actual_size() {
        let f = temp_file_with(b"hello world");
        let source = PathOrStdin::Path(f.path().to_path_buf());
        match read_input(&source, 4).expect_err("should fail") {
            CliError::FileTooLarge {
                actual: Some(n), ..
            } => assert_eq!(n, 11),
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn read_invalid_utf8_returns_error_with_offset() {
        let mut data = b"hello".to_vec();
        data.push(0xFF);
        let f = temp_file_with(&data);
        let source = PathOrStdin::Path(f.path().to_path_buf());
        let err = read_input(&source, 1024).expect_err("should fail on bad UTF-8");
        assert_eq!(err.exit_code(), 2);
        match err {
            CliError::InvalidUtf8 { byte_offset, .. } => assert_eq!(byte_offset, 5),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }

    #[test]
    fn read_nonexistent_file_returns_file_not_found() {
        let source = PathOrStdin::Path(PathBuf::from("/no/such/file/response.json"));
        let err = read_input(&source, 1024).expect_err("should fail");
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn capped_reader_accepts_exact_limit() {
        let text = read_capped(&b"12345"[..], 5, "-").expect("at limit");
        assert_eq!(text, "12345");
    }

    #[test]
    fn capped_reader_rejects_overflow() {
        let err = read_capped(&b"123456"[..], 5, "-").expect_err("over limit");
        match err {
            CliError::FileTooLarge { source, actual, .. } => {
                assert_eq!(source, "-");
                assert_eq!(actual, None);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }
}
