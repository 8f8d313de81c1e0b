use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    about = "Pads transparent pixels in images by averaging RGB values from nearby opaque pixels"
)]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(flatten)]
    pub pad: PadOptions,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Print stage names, pixel counts and chosen parameters as padding runs.
    #[structopt(short, long)]
    pub verbose: bool,

    /// The padder.toml config file to use. If not specified, padder will look
    /// for one in the current directory.
    #[structopt(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct PadOptions {
    /// The images to pad (PNG, TGA, TIFF, BMP, ...).
    #[structopt(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Where to write the padded image. Only valid with a single input.
    /// Defaults to the input's name with `_padded.tga` in place of its
    /// extension.
    #[structopt(short, long)]
    pub output: Option<PathBuf>,

    /// The radius of the window that RGB values are averaged over.
    #[structopt(short, long)]
    pub radius: Option<u32>,

    /// The spread of the Gaussian used to fade alpha outwards.
    #[structopt(short, long)]
    pub sigma: Option<f64>,

    /// A UV island mask image. Pixels brighter than half in the mask are kept,
    /// everything else is padded, and the output is fully opaque.
    #[structopt(short, long)]
    pub mask: Option<PathBuf>,

    /// Pick radius and sigma from the image's resolution. Explicitly given
    /// values still win.
    #[structopt(long)]
    pub auto: bool,
}
