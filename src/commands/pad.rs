use std::{
    env, io,
    path::{Path, PathBuf},
};

use indicatif::{ProgressBar, ProgressStyle};
use padkit::{FillParameters, Image, MaskImage, Mode, PadOutcome};
use thiserror::Error;

use crate::{
    codec,
    config::{Config, ConfigError},
    options::{GlobalOptions, PadOptions},
    output_path::default_output_path,
};

pub fn pad(global: GlobalOptions, options: PadOptions) -> Result<(), PadError> {
    let config = load_config(global.config.as_deref())?;

    if let Some(path) = &config.file_path {
        log::info!("Using config from: {}", path.display());
    }

    if options.output.is_some() && options.inputs.len() > 1 {
        return Err(PadError::OutputWithMultipleInputs {
            count: options.inputs.len(),
        });
    }

    // Check every path up front so that a typo doesn't fail a batch halfway
    // through.
    for input in &options.inputs {
        if !input.exists() {
            return Err(PadError::MissingInput {
                path: input.clone(),
            });
        }
    }

    let mask = match &options.mask {
        Some(path) => {
            if !path.exists() {
                return Err(PadError::MissingMask { path: path.clone() });
            }

            let mask = codec::load_mask(path).map_err(|source| PadError::MaskLoad {
                path: path.clone(),
                source,
            })?;

            log::info!("Using UV island mask from: {}", path.display());
            Some(mask)
        }
        None => None,
    };

    let progress = if options.inputs.len() > 1 {
        let progress = ProgressBar::new(options.inputs.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let session = PadSession {
        options: &options,
        config: &config,
        mask: mask.as_ref(),
    };

    for input in &options.inputs {
        progress.set_message(input.display().to_string());

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| config_output_path(&config, input));

        match session.pad_file(input, &output)? {
            Some(written) => {
                if !global.verbose {
                    report(&progress, written.display().to_string());
                }
            }
            None => report(
                &progress,
                format!(
                    "{}: Image has no transparency. Nothing to pad.",
                    input.display()
                ),
            ),
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    Ok(())
}

/// Holds everything shared between the inputs of a single run.
struct PadSession<'a> {
    options: &'a PadOptions,
    config: &'a Config,
    mask: Option<&'a MaskImage>,
}

impl<'a> PadSession<'a> {
    /// Pads one file, returning the path written to, or `None` if the image
    /// had nothing to pad.
    fn pad_file(&self, input: &Path, output: &Path) -> Result<Option<PathBuf>, PadError> {
        let image = codec::load_image(input).map_err(|source| PadError::ImageLoad {
            path: input.to_owned(),
            source,
        })?;

        let (width, height) = image.size();
        log::info!("Loaded image: {} ({}x{})", input.display(), width, height);

        let padded = match self.pad_image(&image).map_err(|source| PadError::Pad {
            path: input.to_owned(),
            source,
        })? {
            PadOutcome::Padded(padded) => padded,
            PadOutcome::Unchanged => return Ok(None),
        };

        codec::save_image(output, &padded).map_err(|source| PadError::ImageSave {
            path: output.to_owned(),
            source,
        })?;

        log::info!("Padded image saved to: {}", output.display());

        Ok(Some(output.to_owned()))
    }

    fn pad_image(&self, image: &Image) -> Result<PadOutcome, padkit::Error> {
        let params = resolve_parameters(self.options, self.config, image.max_dimension());

        let mode = match self.mask {
            Some(mask) => Mode::ExternalMask(mask.clone()),
            None => Mode::AlphaDriven,
        };

        log::info!(
            "Using radius={}, sigma={} ({})",
            params.radius,
            params.sigma,
            match mode {
                Mode::AlphaDriven => "alpha mode",
                Mode::ExternalMask(_) => "UV mask mode",
            }
        );

        padkit::pad(image, mode, params)
    }
}

/// Command line values take precedence over the config file, which takes
/// precedence over auto-tuning and defaults.
fn resolve_parameters(options: &PadOptions, config: &Config, max_dim: u32) -> FillParameters {
    FillParameters::resolve(
        options.radius.or(config.radius),
        options.sigma.or(config.sigma),
        options.auto || config.auto,
        max_dim,
    )
}

fn config_output_path(config: &Config, input: &Path) -> PathBuf {
    default_output_path(input, &config.output_suffix, &config.output_extension)
}

fn load_config(explicit: Option<&Path>) -> Result<Config, PadError> {
    if let Some(path) = explicit {
        return Ok(Config::read_from_file(path)?);
    }

    match Config::read_from_folder(env::current_dir()?) {
        Ok(config) => Ok(config),
        Err(err) if err.is_not_found() => Ok(Config::default()),
        Err(err) => Err(err.into()),
    }
}

/// Prints a line to stdout without tearing the progress bar, if one is shown.
fn report(progress: &ProgressBar, message: String) {
    if progress.is_hidden() {
        println!("{}", message);
    } else {
        progress.println(message);
    }
}

#[derive(Debug, Error)]
pub enum PadError {
    #[error("Input file '{}' does not exist", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Mask file '{}' does not exist", .path.display())]
    MissingMask { path: PathBuf },

    #[error("--output can only be used with a single input, but {count} were given")]
    OutputWithMultipleInputs { count: usize },

    #[error("Error loading image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Error loading mask {}: {source}", .path.display())]
    MaskLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Error saving image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Error padding {}: {source}", .path.display())]
    Pad {
        path: PathBuf,
        source: padkit::Error,
    },

    #[error(transparent)]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}
