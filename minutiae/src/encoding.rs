use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::records::{Grammar, NbistHeader, NbistRecord, SimpleRecord, XytRecord};
use crate::types::{FileFormat, ImageSize, Minutia};

/// Writes minutiae files of one format.
#[derive(Debug, Copy, Clone)]
pub struct MinutiaeEncoder {
    format: FileFormat,
}

impl MinutiaeEncoder {
    pub fn new(format: FileFormat) -> Self {
        MinutiaeEncoder { format }
    }

    /// Picks the encoder by the extension of `path` (`.sim`, `.min` or `.xyt`).
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::new(FileFormat::from_path(path)?))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Writes `minutiae` to `path`, replacing any existing file.
    ///
    /// `image` is required for NBIST/MINDTCT, whose header records the image
    /// dimensions, and NBIST angles must be finite. Both are checked before the
    /// file is created.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        minutiae: &[Minutia],
        image: Option<ImageSize>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        self.check(minutiae, image)?;

        let file = fs::File::create(path)?;
        let mut out = io::BufWriter::new(file);
        self.encode(&mut out, minutiae, image)?;
        out.flush()?;

        debug!(
            "wrote {} minutiae to {} ({})",
            minutiae.len(),
            path.display(),
            self.format
        );
        Ok(())
    }

    /// Serializes `minutiae` into `out`.
    pub fn encode(
        &self,
        out: &mut impl Write,
        minutiae: &[Minutia],
        image: Option<ImageSize>,
    ) -> Result<(), Error> {
        self.check(minutiae, image)?;
        match Grammar::from(self.format) {
            Grammar::Nbist => {
                let image = image.ok_or(Error::MissingImageSize(self.format))?;
                let header = NbistHeader {
                    image,
                    count: minutiae.len(),
                };
                write!(out, "{}", header)?;
                for (index, m) in minutiae.iter().enumerate() {
                    writeln!(out, "{}", NbistRecord::from_minutia(index, m))?;
                }
            }
            Grammar::Simple => {
                for m in minutiae {
                    writeln!(out, "{}", SimpleRecord::from(m))?;
                }
            }
            Grammar::Xyt => {
                for m in minutiae {
                    writeln!(out, "{}", XytRecord::from(m))?;
                }
            }
        }
        Ok(())
    }

    fn check(&self, minutiae: &[Minutia], image: Option<ImageSize>) -> Result<(), Error> {
        if Grammar::from(self.format) != Grammar::Nbist {
            return Ok(());
        }
        if image.is_none() {
            return Err(Error::MissingImageSize(self.format));
        }
        // Angle units are integers; NaN or infinity has no unit to round to.
        match minutiae.iter().position(|m| !m.angle.is_finite()) {
            Some(index) => Err(Error::NonFiniteAngle {
                index,
                format: self.format,
            }),
            None => Ok(()),
        }
    }
}
