use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Mask size {}x{} doesn't match image size {}x{}",
        .mask.0,
        .mask.1,
        .image.0,
        .image.1
    )]
    MaskSizeMismatch { image: (u32, u32), mask: (u32, u32) },

    #[error("Image has no valid pixels to pad from")]
    NoValidPixels,

    #[error("Invalid fill parameters: radius {radius} must be at least 1 and sigma {sigma} must be positive")]
    InvalidParameters { radius: u32, sigma: f64 },
}
