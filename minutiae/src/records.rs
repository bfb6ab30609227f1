//! Per-format line layouts.
//!
//! The files themselves are purely positional; every layout is spelled out here
//! once, and both the reader and the encoder go through it.

use std::fmt;
use std::str::FromStr;

use crate::consts::{NBIST_COUNT_LINE, NBIST_DEGREES_PER_UNIT};
use crate::error::{Corruption, Error};
use crate::types::{FileFormat, ImageSize, Minutia, MinutiaType};

/// Distinct grammars. `FileFormat::Mindtct` shares the NBIST one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Grammar {
    Nbist,
    Simple,
    Xyt,
}

impl From<FileFormat> for Grammar {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Nbist | FileFormat::Mindtct => Grammar::Nbist,
            FileFormat::Simple => Grammar::Simple,
            FileFormat::Xyt => Grammar::Xyt,
        }
    }
}

fn number<T: FromStr>(token: &str, field: &'static str, line: usize) -> Result<T, Error> {
    token.parse().map_err(|_| {
        Error::corrupt(
            line,
            Corruption::InvalidNumber {
                field,
                token: token.to_owned(),
            },
        )
    })
}

fn exact_fields<'a>(line: &'a str, expected: usize, line_no: usize) -> Result<Vec<&'a str>, Error> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(Error::corrupt(
            line_no,
            Corruption::FieldCount {
                expected,
                actual: tokens.len(),
            },
        ));
    }
    Ok(tokens)
}

/// The four header lines of an NBIST file.
///
/// ```text
/// Image (w,h) 512 480
///
/// 42 Minutiae Detected
///
/// ```
pub(crate) struct NbistHeader {
    pub(crate) image: ImageSize,
    pub(crate) count: usize,
}

impl NbistHeader {
    /// Extracts the declared number of records. Only the count line matters.
    pub(crate) fn declared_count(lines: &[&str]) -> Result<usize, Error> {
        let line_no = NBIST_COUNT_LINE + 1;
        let token = lines
            .get(NBIST_COUNT_LINE)
            .and_then(|line| line.split_whitespace().next())
            .ok_or_else(|| Error::corrupt(line_no, Corruption::MissingCount))?;
        number(token, "minutiae count", line_no)
    }
}

impl fmt::Display for NbistHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Image (w,h) {} {}", self.image.width, self.image.height)?;
        writeln!(f)?;
        writeln!(f, "{} Minutiae Detected", self.count)?;
        writeln!(f)
    }
}

/// `idx : x, y : angle_units : quality :TYPE`
#[derive(Debug, PartialEq)]
pub(crate) struct NbistRecord {
    pub(crate) index: usize,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) angle_units: f64,
    pub(crate) quality: f64,
    pub(crate) kind: MinutiaType,
}

impl NbistRecord {
    const FIELDS: usize = 6;

    pub(crate) fn parse(line: &str, line_no: usize) -> Result<Self, Error> {
        let tokens: Vec<_> = line
            .split(|c: char| matches!(c, ':' | ';' | ',' | ' '))
            .filter(|token| !token.is_empty())
            .collect();
        // MINDTCT appends feature ids and neighbour lists; only the leading fields are ours.
        if tokens.len() < Self::FIELDS {
            return Err(Error::corrupt(
                line_no,
                Corruption::FieldCount {
                    expected: Self::FIELDS,
                    actual: tokens.len(),
                },
            ));
        }

        let kind = match tokens[5] {
            "BIF" => MinutiaType::Bifurcation,
            "RIG" => MinutiaType::RidgeEnding,
            other => {
                return Err(Error::corrupt(
                    line_no,
                    Corruption::UnknownType(other.to_owned()),
                ))
            }
        };

        Ok(NbistRecord {
            index: number(tokens[0], "index", line_no)?,
            x: number(tokens[1], "x", line_no)?,
            y: number(tokens[2], "y", line_no)?,
            angle_units: number(tokens[3], "angle", line_no)?,
            quality: number(tokens[4], "quality", line_no)?,
            kind,
        })
    }

    /// Quantizes the angle to the nearest unit; exact ties (e.g. 5.625°) round
    /// away from zero, so 5.625° becomes unit 1.
    pub(crate) fn from_minutia(index: usize, m: &Minutia) -> Self {
        NbistRecord {
            index,
            x: m.x,
            y: m.y,
            angle_units: (m.angle / NBIST_DEGREES_PER_UNIT).round(),
            quality: m.quality,
            kind: m.kind,
        }
    }

    pub(crate) fn into_minutia(self) -> Minutia {
        Minutia {
            x: self.x,
            y: self.y,
            angle: self.angle_units * NBIST_DEGREES_PER_UNIT,
            kind: self.kind,
            quality: self.quality,
        }
    }
}

impl fmt::Display for NbistRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self.kind {
            MinutiaType::Bifurcation => "BIF",
            MinutiaType::RidgeEnding => "RIG",
        };
        write!(
            f,
            "{:4} : {:4}, {:4} : {:2} : {} :{}",
            self.index, self.x, self.y, self.angle_units as i64, self.quality, tag
        )
    }
}

/// `x y angle TYPE quality`
#[derive(Debug, PartialEq)]
pub(crate) struct SimpleRecord {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) angle: f64,
    pub(crate) kind: MinutiaType,
    pub(crate) quality: f64,
}

impl SimpleRecord {
    const FIELDS: usize = 5;

    pub(crate) fn parse(line: &str, line_no: usize) -> Result<Self, Error> {
        let tokens = exact_fields(line, Self::FIELDS, line_no)?;
        let kind = match tokens[3] {
            "BIF" => MinutiaType::Bifurcation,
            "END" => MinutiaType::RidgeEnding,
            other => {
                return Err(Error::corrupt(
                    line_no,
                    Corruption::UnknownType(other.to_owned()),
                ))
            }
        };

        Ok(SimpleRecord {
            x: number(tokens[0], "x", line_no)?,
            y: number(tokens[1], "y", line_no)?,
            angle: number(tokens[2], "angle", line_no)?,
            kind,
            quality: number(tokens[4], "quality", line_no)?,
        })
    }

    pub(crate) fn into_minutia(self) -> Minutia {
        Minutia::new(self.x, self.y, self.angle, self.kind, self.quality)
    }
}

impl From<&Minutia> for SimpleRecord {
    fn from(m: &Minutia) -> Self {
        SimpleRecord {
            x: m.x,
            y: m.y,
            angle: m.angle,
            kind: m.kind,
            quality: m.quality,
        }
    }
}

impl fmt::Display for SimpleRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self.kind {
            MinutiaType::Bifurcation => "BIF",
            MinutiaType::RidgeEnding => "END",
        };
        write!(
            f,
            "{} {} {} {} {}",
            self.x, self.y, self.angle, tag, self.quality
        )
    }
}

/// `x y angle quality`
#[derive(Debug, PartialEq)]
pub(crate) struct XytRecord {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) angle: f64,
    pub(crate) quality: f64,
}

impl XytRecord {
    const FIELDS: usize = 4;

    pub(crate) fn parse(line: &str, line_no: usize) -> Result<Self, Error> {
        let tokens = exact_fields(line, Self::FIELDS, line_no)?;
        Ok(XytRecord {
            x: number(tokens[0], "x", line_no)?,
            y: number(tokens[1], "y", line_no)?,
            angle: number(tokens[2], "angle", line_no)?,
            quality: number(tokens[3], "quality", line_no)?,
        })
    }

    pub(crate) fn into_minutia(self) -> Minutia {
        Minutia::new(
            self.x,
            self.y,
            self.angle,
            MinutiaType::RidgeEnding,
            self.quality,
        )
    }
}

impl From<&Minutia> for XytRecord {
    fn from(m: &Minutia) -> Self {
        XytRecord {
            x: m.x,
            y: m.y,
            angle: m.angle,
            quality: m.quality,
        }
    }
}

impl fmt::Display for XytRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.angle, self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nbist_record_with_mindtct_trailer() {
        let line = "3 :  264,  23 :  5 :  0.069 :BIF :0 ;; 12,4; 7,0";
        let record = NbistRecord::parse(line, 8).unwrap();
        assert_eq!(
            record,
            NbistRecord {
                index: 3,
                x: 264,
                y: 23,
                angle_units: 5.0,
                quality: 0.069,
                kind: MinutiaType::Bifurcation,
            }
        );
        assert_eq!(record.into_minutia().angle, 56.25);
    }

    #[test]
    fn nbist_record_layout() {
        let m = Minutia::new(264, 23, 58.0, MinutiaType::RidgeEnding, 0.25);
        let line = NbistRecord::from_minutia(0, &m).to_string();
        assert_eq!(line, "   0 :  264,   23 :  5 : 0.25 :RIG");
        assert_eq!(NbistRecord::parse(line.trim(), 1).unwrap().angle_units, 5.0);
    }

    #[test]
    fn nbist_record_too_short() {
        let err = NbistRecord::parse("0 : 1, 2 : 3", 5).unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptFile {
                line: Some(5),
                reason: Corruption::FieldCount { expected: 6, actual: 4 }
            }
        ));
    }

    #[test]
    fn invalid_number_names_field_and_line() {
        let err = SimpleRecord::parse("10 abc 45 END 1", 2).unwrap_err();
        assert_eq!(err.to_string(), "corrupt minutiae file, line 2: invalid y 'abc'");
    }

    #[test]
    fn xyt_needs_four_fields() {
        assert!(XytRecord::parse("1 2 3", 1).is_err());
        assert!(XytRecord::parse("1 2 3 4 5", 1).is_err());
        let m = XytRecord::parse("1 2 3.5 40", 1).unwrap().into_minutia();
        assert_eq!(m, Minutia::new(1, 2, 3.5, MinutiaType::RidgeEnding, 40.0));
    }

    #[test]
    fn header_layout() {
        let header = NbistHeader {
            image: ImageSize::new(512, 480),
            count: 2,
        };
        let text = header.to_string();
        assert_eq!(text, "Image (w,h) 512 480\n\n2 Minutiae Detected\n\n");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(NbistHeader::declared_count(&lines).unwrap(), 2);
    }

    #[test]
    fn header_without_count() {
        let err = NbistHeader::declared_count(&["Image (w,h) 1 1", ""]).unwrap_err();
        assert_eq!(err.corruption(), Some(&Corruption::MissingCount));
    }
}
