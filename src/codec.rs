//! Converts between files on disk and the in-memory buffers that padkit
//! works on.

use std::path::Path;

use image::{ColorType, ImageResult};
use padkit::{Image, MaskImage};

/// Decodes any format the `image` crate understands into 8-bit RGBA.
pub fn load_image(path: &Path) -> ImageResult<Image> {
    let decoded = image::open(path)?.to_rgba8();
    let size = decoded.dimensions();

    Ok(Image::new_rgba8(size, decoded.into_raw()))
}

/// Decodes a mask image, collapsing it to a single 8-bit luminance channel.
pub fn load_mask(path: &Path) -> ImageResult<MaskImage> {
    let decoded = image::open(path)?.to_luma8();
    let size = decoded.dimensions();

    Ok(MaskImage::new_luma8(size, decoded.into_raw()))
}

/// Encodes the image in the format implied by the path's extension.
pub fn save_image(path: &Path, image: &Image) -> ImageResult<()> {
    let (width, height) = image.size();

    image::save_buffer(path, image.as_bytes(), width, height, ColorType::Rgba8)
}
