use std::io;

use thiserror::Error;

use crate::types::FileFormat;

/// Everything that can go wrong while reading or writing minutiae files.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested file format (by name or extension) is not supported.
    ///
    /// Raised before any file is touched.
    #[error("unsupported minutiae file format: {0}")]
    UnsupportedFormat(String),

    /// The format needs the dimensions of the fingerprint image, but none were given.
    #[error("{0} files need the image size")]
    MissingImageSize(FileFormat),

    /// A minutia cannot be represented in the target format.
    #[error("minutia {index} has a non-finite angle, which {format} files cannot hold")]
    NonFiniteAngle { index: usize, format: FileFormat },

    /// The file content does not follow the grammar of the selected format.
    #[error("corrupt minutiae file{}: {reason}", at_line(.line))]
    CorruptFile {
        /// 1-based line number, when the problem is tied to a single line.
        line: Option<usize>,
        reason: Corruption,
    },

    /// The file could not be read or written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Corruption {
    #[error("unknown minutia type '{0}'")]
    UnknownType(String),

    #[error("the file declared there would be {declared} minutiae, but {actual} were read")]
    CountMismatch { declared: usize, actual: usize },

    #[error("missing minutiae count")]
    MissingCount,

    #[error("invalid {field} '{token}'")]
    InvalidNumber { field: &'static str, token: String },

    #[error("expected {expected} fields, found {actual}")]
    FieldCount { expected: usize, actual: usize },
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(", line {}", line),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn corrupt(line: usize, reason: Corruption) -> Self {
        Error::CorruptFile {
            line: Some(line),
            reason,
        }
    }

    /// Returns the reason if this is a [`Error::CorruptFile`].
    pub fn corruption(&self) -> Option<&Corruption> {
        match self {
            Error::CorruptFile { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
