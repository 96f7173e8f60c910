//! Reading requirements files line by line.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

/// One raw line of a requirements file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementLine {
    /// The line as written, without the line terminator.
    pub text: String,
    /// The file the line was read from.
    pub source: PathBuf,
    /// 1-based line number.
    pub number: usize,
}

impl fmt::Display for RequirementLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.display(), self.number)
    }
}

/// The lines of a requirements file, in file order.
///
/// The file is read completely before the first line is yielded, so no handle
/// stays open while included files are processed.
#[derive(Debug)]
pub struct Lines {
    source: PathBuf,
    lines: std::iter::Enumerate<std::vec::IntoIter<String>>,
}

impl Iterator for Lines {
    type Item = RequirementLine;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, text) = self.lines.next()?;
        Some(RequirementLine {
            text,
            source: self.source.clone(),
            number: index + 1,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

/// Reads the lines of the requirements file at `path`.
///
/// Blank lines and comments are included; filtering them is up to the caller.
///
/// # Errors
///
/// Returns [`ReadError::NotFound`] if the file does not exist and
/// [`ReadError::Io`] if it cannot be read.
pub fn read_lines(path: &Path) -> Result<Lines, ReadError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ReadError::NotFound(path.to_path_buf())
        } else {
            ReadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    tracing::debug!("Read {} from disk", path.display());

    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    Ok(Lines {
        source: path.to_path_buf(),
        lines: lines.into_iter().enumerate(),
    })
}

/// Errors that can occur while reading a requirements file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The file does not exist.
    #[error("Requirements file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("Failed to read requirements file {}: {source}", .path.display())]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
