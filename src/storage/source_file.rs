use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// A scene file on disk.
///
/// Constructed once per load. The size and line count are captured at
/// construction and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    size: u64,
    line_count: usize,
}

/// Errors that can occur when opening a scene file.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The file does not carry the expected extension.
    #[error("file {} is not a .{expected} file", .path.display())]
    Format {
        /// The offending path.
        path: PathBuf,
        /// The extension that was expected.
        expected: String,
    },

    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SourceFile {
    /// Opens the file at `path`, which must have the extension `extension`
    /// (without the leading dot).
    ///
    /// The path is canonicalized, and the file is scanned once to count its
    /// lines.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::Format`] if the extension does not match, or
    /// [`OpenError::Io`] if the file cannot be resolved or read.
    pub fn open(path: impl AsRef<Path>, extension: &str) -> Result<Self, OpenError> {
        let path = path.as_ref();

        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            return Err(OpenError::Format {
                path: path.to_path_buf(),
                expected: extension.to_string(),
            });
        }

        let path = path.canonicalize()?;
        let size = std::fs::metadata(&path)?.len();
        let line_count = count_lines(BufReader::new(File::open(&path)?))?;

        tracing::debug!(path = %path.display(), size, line_count, "opened source file");

        Ok(Self {
            path,
            size,
            line_count,
        })
    }

    /// The absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The size of the file in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The number of physical lines in the file.
    ///
    /// A final line without a trailing newline is counted.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Opens a buffered reader positioned at the start of the file.
    pub(crate) fn reader(&self) -> io::Result<BufReader<File>> {
        File::open(&self.path).map(BufReader::new)
    }

    #[cfg(test)]
    pub(crate) fn detached(path: impl Into<PathBuf>, size: u64, line_count: usize) -> Self {
        Self {
            path: path.into(),
            size,
            line_count,
        }
    }
}

fn count_lines<R: BufRead>(mut reader: R) -> io::Result<usize> {
    let mut count = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(count);
        }
        count += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    fn scene_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".ma").tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test_case(b"" as &[u8], 0 ; "empty")]
    #[test_case(b"a;\n", 1 ; "single line")]
    #[test_case(b"a;\nb;", 2 ; "no trailing newline")]
    #[test_case(b"a;\n\n\tb;\n", 3 ; "blank and indented lines")]
    fn counts_lines(content: &[u8], expected: usize) {
        assert_eq!(count_lines(content).unwrap(), expected);
    }

    #[test]
    fn open_captures_size_and_lines() {
        let file = scene_file(b"requires maya \"2018\";\ncurrentUnit -l centimeter;\n");
        let source = SourceFile::open(file.path(), "ma").unwrap();

        assert_eq!(source.size(), 49);
        assert_eq!(source.line_count(), 2);
        assert!(source.path().is_absolute());
    }

    #[test]
    fn wrong_extension_is_a_format_error() {
        let file = tempfile::Builder::new().suffix(".mb").tempfile().unwrap();
        let error = SourceFile::open(file.path(), "ma").unwrap_err();
        assert!(matches!(error, OpenError::Format { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error = SourceFile::open(tmp.path().join("missing.ma"), "ma").unwrap_err();
        assert!(matches!(error, OpenError::Io(_)));
    }
}
