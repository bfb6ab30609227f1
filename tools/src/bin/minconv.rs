use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minutiae::{FileFormat, ImageSize, MinutiaeEncoder, MinutiaeReader};

/// Converts minutiae files between NBIST/MINDTCT, SIMPLE and XYT
#[derive(StructOpt, Debug)]
struct Options {
    /// Format of the input file; supported formats: nbist, mindtct, simple, xyt
    #[structopt(short = "f", long)]
    from: FileFormat,

    /// Format of the output file; inferred from the output extension (.min, .sim, .xyt) when missing
    #[structopt(short = "t", long)]
    to: Option<FileFormat>,

    /// Size of the fingerprint image as WIDTHxHEIGHT; required for NBIST output
    #[structopt(short = "s", long)]
    image_size: Option<ImageSize>,

    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = Options::from_args();

    let encoder = match opt.to {
        Some(format) => MinutiaeEncoder::new(format),
        None => MinutiaeEncoder::for_path(&opt.output).context("cannot pick output format")?,
    };

    let minutiae = MinutiaeReader::new(opt.from)
        .read(&opt.input)
        .with_context(|| format!("cannot read {}", opt.input.display()))?;

    if let Some(image) = opt.image_size {
        let outside = minutiae.iter().filter(|m| !image.contains(m)).count();
        if outside > 0 {
            anyhow::bail!("{} minutiae lie outside the {}x{} image", outside, image.width, image.height);
        }
    }

    encoder
        .write(&opt.output, &minutiae, opt.image_size)
        .with_context(|| format!("cannot write {}", opt.output.display()))?;

    info!(
        "converted {} minutiae: {} ({}) -> {} ({})",
        minutiae.len(),
        opt.input.display(),
        opt.from,
        opt.output.display(),
        encoder.format()
    );
    Ok(())
}
