use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MinutiaType {
    /// A ridge terminates.
    RidgeEnding,
    /// A ridge splits into two.
    Bifurcation,
}

/// Represents a single minutia.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Minutia {
    /// X coordinate in the original (unscaled) image.
    pub x: i32,
    /// Y coordinate in the original (unscaled) image.
    pub y: i32,
    /// Ridge direction in degrees. Not normalized.
    pub angle: f64,
    /// Type of the minutia.
    pub kind: MinutiaType,
    /// Quality score, opaque to this crate.
    pub quality: f64,
}

impl Minutia {
    pub fn new(x: i32, y: i32, angle: f64, kind: MinutiaType, quality: f64) -> Self {
        Minutia {
            x,
            y,
            angle,
            kind,
            quality,
        }
    }
}

/// Text formats minutiae can be read from and written to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FileFormat {
    /// Fixed-header format written by MINDTCT, angles in units of 11.25°.
    Nbist,
    /// Same grammar as [`FileFormat::Nbist`].
    Mindtct,
    /// `x y angle TYPE quality`, one minutia per line.
    Simple,
    /// `x y angle quality`, one minutia per line, no type.
    Xyt,
}

impl FileFormat {
    /// Picks the format used when saving to `path`, based on its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        match path.extension().and_then(OsStr::to_str) {
            Some("sim") => Ok(FileFormat::Simple),
            Some("min") => Ok(FileFormat::Nbist),
            Some("xyt") => Ok(FileFormat::Xyt),
            Some(ext) => Err(Error::UnsupportedFormat(format!("extension '.{}'", ext))),
            None => Err(Error::UnsupportedFormat(format!(
                "'{}' has no extension",
                path.display()
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Nbist => "NBIST",
            FileFormat::Mindtct => "MINDTCT",
            FileFormat::Simple => "SIMPLE",
            FileFormat::Xyt => "XYT",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nbist" => Ok(FileFormat::Nbist),
            "mindtct" => Ok(FileFormat::Mindtct),
            "simple" => Ok(FileFormat::Simple),
            "xyt" => Ok(FileFormat::Xyt),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

/// Pixel dimensions of the original fingerprint image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        ImageSize { width, height }
    }

    pub fn contains(&self, minutia: &Minutia) -> bool {
        minutia.x >= 0
            && minutia.y >= 0
            && (minutia.x as u32) <= self.width
            && (minutia.y as u32) <= self.height
    }
}

impl FromStr for ImageSize {
    type Err = &'static str;

    /// Parses `WIDTHxHEIGHT`, e.g. `512x480`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s.split_once('x').ok_or("no separator")?;
        let width = width.trim().parse().map_err(|_| "invalid width")?;
        let height = height.trim().parse().map_err(|_| "invalid height")?;
        Ok(ImageSize { width, height })
    }
}

/// A location on the (possibly resized) display.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn scaled(self, factor: f64) -> Point {
        Point {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl FromStr for Point {
    type Err = &'static str;

    /// Parses `X,Y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or("no separator")?;
        let x = x.trim().parse().map_err(|_| "invalid x")?;
        let y = y.trim().parse().map_err(|_| "invalid y")?;
        Ok(Point { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path("a/b.sim").unwrap(), FileFormat::Simple);
        assert_eq!(FileFormat::from_path("b.min").unwrap(), FileFormat::Nbist);
        assert_eq!(FileFormat::from_path("b.xyt").unwrap(), FileFormat::Xyt);
        assert!(matches!(
            FileFormat::from_path("b.png"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FileFormat::from_path("noext"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn format_from_name() {
        assert_eq!("NBIST".parse::<FileFormat>().unwrap(), FileFormat::Nbist);
        assert_eq!("mindtct".parse::<FileFormat>().unwrap(), FileFormat::Mindtct);
        assert_eq!("Simple".parse::<FileFormat>().unwrap(), FileFormat::Simple);
        assert!("sim".parse::<FileFormat>().is_err());
        assert!(matches!(
            "iso".parse::<FileFormat>(),
            Err(Error::UnsupportedFormat(name)) if name == "iso"
        ));
    }

    #[test]
    fn image_size_and_point() {
        assert_eq!("512x480".parse::<ImageSize>(), Ok(ImageSize::new(512, 480)));
        assert!("512".parse::<ImageSize>().is_err());
        assert_eq!("1.5,2".parse::<Point>(), Ok(Point::new(1.5, 2.0)));

        let size = ImageSize::new(10, 10);
        assert!(size.contains(&Minutia::new(10, 0, 0.0, MinutiaType::RidgeEnding, 0.0)));
        assert!(!size.contains(&Minutia::new(11, 0, 0.0, MinutiaType::RidgeEnding, 0.0)));
        assert!(!size.contains(&Minutia::new(-1, 0, 0.0, MinutiaType::RidgeEnding, 0.0)));
    }
}
