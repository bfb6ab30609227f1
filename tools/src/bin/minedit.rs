use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use argh::FromArgs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use minutiae::{
    minutia_from_drag, FileFormat, ImageSize, MinutiaType, Minutiae, MinutiaeEncoder,
    MinutiaeReader, Point,
};

/// A drag on the display: where the minutia was placed and where the direction drag ended.
#[derive(Debug, Copy, Clone)]
struct Drag {
    start: Point,
    end: Point,
}

impl FromStr for Drag {
    type Err = &'static str;

    /// Parses `SX,SY,EX,EY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| "invalid coordinate")?;
        match values.as_slice() {
            &[sx, sy, ex, ey] => Ok(Drag {
                start: Point::new(sx, sy),
                end: Point::new(ex, ey),
            }),
            _ => Err("expected SX,SY,EX,EY"),
        }
    }
}

/// Edit a minutiae file: remove minutiae by nearest match and add new ones from drags
#[derive(FromArgs, Debug)]
struct Options {
    /// minutiae file to edit; an empty session is started when missing
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// format of the input file: nbist, mindtct, simple or xyt (default: simple)
    #[argh(option, short = 'f', default = "FileFormat::Simple")]
    format: FileFormat,

    /// output file; .sim, .min or .xyt
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// original image width divided by displayed width (default: 1)
    #[argh(option, default = "1.0")]
    scale: f64,

    /// size of the fingerprint image as WIDTHxHEIGHT; required for .min output
    #[argh(option, short = 's')]
    image_size: Option<ImageSize>,

    /// display coordinates X,Y near which to remove a minutia
    #[argh(option, short = 'r')]
    remove: Vec<Point>,

    /// add a ridge ending from a drag SX,SY,EX,EY in display coordinates
    #[argh(option, short = 'e')]
    ending: Vec<Drag>,

    /// add a bifurcation from a drag SX,SY,EX,EY in display coordinates
    #[argh(option, short = 'b')]
    bifurcation: Vec<Drag>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt: Options = argh::from_env();

    // Fail on a bad extension before doing any work.
    let encoder = MinutiaeEncoder::for_path(&opt.output).context("cannot save minutiae")?;

    let mut session = Minutiae::new();
    if let Some(input) = &opt.input {
        session
            .load(&MinutiaeReader::new(opt.format), input)
            .with_context(|| format!("cannot load {}", input.display()))?;
    }

    for point in &opt.remove {
        if session.remove_nearest(point.scaled(opt.scale)).is_none() {
            warn!("no minutia near {},{}", point.x, point.y);
        }
    }

    let drags = opt
        .ending
        .iter()
        .map(|d| (d, MinutiaType::RidgeEnding))
        .chain(opt.bifurcation.iter().map(|d| (d, MinutiaType::Bifurcation)));
    for (drag, kind) in drags {
        let minutia = minutia_from_drag(drag.start, drag.end, kind, opt.scale);
        if let Some(image) = opt.image_size {
            if !image.contains(&minutia) {
                warn!(?minutia, "outside of the image, skipped");
                continue;
            }
        }
        session.push(minutia);
    }

    session
        .save(&encoder, &opt.output, opt.image_size)
        .with_context(|| format!("cannot save {}", opt.output.display()))?;

    info!(
        "saved {} minutiae to {} ({})",
        session.len(),
        opt.output.display(),
        encoder.format()
    );
    Ok(())
}
