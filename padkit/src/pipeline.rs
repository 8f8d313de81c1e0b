use crate::{
    average::weighted_average,
    error::Error,
    fade::fade_alpha,
    image::{Image, MaskImage},
    mask::{zero_invalid, ValidityMask},
    nearest::nearest_fill,
    params::FillParameters,
};

const OPAQUE: u8 = 255;

/// Where the validity mask comes from. Picked once per run.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Only fully opaque pixels are valid. Alpha is faded outwards afterwards.
    AlphaDriven,

    /// Pixels are valid where a UV island mask is brighter than half. The
    /// padded image comes out fully opaque.
    ExternalMask(MaskImage),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PadOutcome {
    /// The image had nothing to pad and should be left as-is.
    Unchanged,

    Padded(Image),
}

/// Runs the whole padding pipeline over an image.
pub fn pad(image: &Image, mode: Mode, params: FillParameters) -> Result<PadOutcome, Error> {
    params.validate()?;

    let (w, h) = image.size();
    let external = matches!(mode, Mode::ExternalMask(_));

    let mask = match &mode {
        Mode::ExternalMask(mask_image) => {
            let mask = ValidityMask::from_mask_image(mask_image, image.size())?;
            log::info!("Using UV island mask ({} valid pixels)", mask.valid_count());
            mask
        }
        Mode::AlphaDriven => {
            let mask = ValidityMask::from_alpha(image);

            if mask.is_fully_valid() {
                log::info!("Image has no transparency, nothing to pad");
                return Ok(PadOutcome::Unchanged);
            }

            log::info!("Found {} transparent pixels to pad", mask.invalid_count());
            mask
        }
    };

    if mask.valid_count() == 0 {
        return Err(Error::NoValidPixels);
    }

    let mut source = image.clone();
    if !external {
        zero_invalid(&mut source, &mask);
    }

    log::info!(
        "Padding {}x{} image with radius={}, sigma={}",
        w,
        h,
        params.radius,
        params.sigma
    );

    log::info!("Applying smooth padding...");
    let averaged = weighted_average(&source, &mask, params.radius);

    log::info!("Applying flood fill padding...");
    let mut padded = nearest_fill(&averaged, &mask);

    if external {
        padded.set_alpha(&vec![OPAQUE; padded.pixel_count()]);
    } else {
        log::info!("Applying alpha blur with sigma={}...", params.sigma);
        let faded = fade_alpha(&image.alpha(), image.size(), params.sigma);
        padded.set_alpha(&faded);
    }

    Ok(PadOutcome::Padded(padded))
}
