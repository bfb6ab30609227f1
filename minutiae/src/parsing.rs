use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::consts::NBIST_HEADER_LINES;
use crate::error::{Corruption, Error};
use crate::records::{Grammar, NbistHeader, NbistRecord, SimpleRecord, XytRecord};
use crate::types::{FileFormat, Minutia};

/// Reads minutiae files of one format.
#[derive(Debug, Copy, Clone)]
pub struct MinutiaeReader {
    format: FileFormat,
}

impl MinutiaeReader {
    pub fn new(format: FileFormat) -> Self {
        MinutiaeReader { format }
    }

    /// Creates a reader from a format name such as `"mindtct"` or `"xyt"`.
    pub fn for_name(name: &str) -> Result<Self, Error> {
        Ok(Self::new(name.parse()?))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Reads all minutiae from the file at `path`, in file order.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<Minutia>, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let minutiae = self.parse(&text)?;
        debug!(
            "read {} minutiae from {} ({})",
            minutiae.len(),
            path.display(),
            self.format
        );
        Ok(minutiae)
    }

    /// Parses the content of a minutiae file.
    pub fn parse(&self, text: &str) -> Result<Vec<Minutia>, Error> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        match Grammar::from(self.format) {
            Grammar::Nbist => parse_nbist(&lines),
            Grammar::Simple => parse_records(&lines, 0, |line, no| {
                SimpleRecord::parse(line, no).map(SimpleRecord::into_minutia)
            }),
            Grammar::Xyt => parse_records(&lines, 0, |line, no| {
                XytRecord::parse(line, no).map(XytRecord::into_minutia)
            }),
        }
    }
}

/// Parses every non-blank line from `first` on. Line numbers passed on are 1-based.
fn parse_records(
    lines: &[&str],
    first: usize,
    parse_line: impl Fn(&str, usize) -> Result<Minutia, Error>,
) -> Result<Vec<Minutia>, Error> {
    let mut minutiae = vec![];
    for (i, &line) in lines.iter().enumerate().skip(first) {
        if line.is_empty() {
            continue;
        }
        let minutia = parse_line(line, i + 1)?;
        trace!(line = i + 1, ?minutia, "parsed record");
        minutiae.push(minutia);
    }
    Ok(minutiae)
}

fn parse_nbist(lines: &[&str]) -> Result<Vec<Minutia>, Error> {
    let declared = NbistHeader::declared_count(lines)?;
    let minutiae = parse_records(lines, NBIST_HEADER_LINES, |line, no| {
        NbistRecord::parse(line, no).map(NbistRecord::into_minutia)
    })?;

    if minutiae.len() != declared {
        return Err(Error::CorruptFile {
            line: None,
            reason: Corruption::CountMismatch {
                declared,
                actual: minutiae.len(),
            },
        });
    }

    Ok(minutiae)
}
