//! Validity masks mark which pixels of an image carry authoritative color and
//! which ones need to be synthesized from their neighbors.

use crate::{
    error::Error,
    image::{area, Image, MaskImage},
};

/// Mask values strictly greater than this are considered valid.
const MASK_THRESHOLD: u8 = 128;

/// Alpha value a pixel must have to be considered valid when the mask comes
/// from the image itself.
const OPAQUE: u8 = 255;

// TODO: We could use a more efficient bit vec here instead of Vec<bool> to cut
// our memory cost by 8x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask {
    size: (u32, u32),
    data: Vec<bool>,
}

impl ValidityMask {
    /// Creates a mask where every pixel is invalid.
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            size: (w, h),
            data: vec![false; area((w, h))],
        }
    }

    /// Thresholds an external mask image. The mask must be exactly the same
    /// size as the image it'll be applied to; it's never resized.
    pub fn from_mask_image(mask: &MaskImage, image_size: (u32, u32)) -> Result<Self, Error> {
        if mask.size() != image_size {
            return Err(Error::MaskSizeMismatch {
                image: image_size,
                mask: mask.size(),
            });
        }

        let data = mask
            .as_bytes()
            .iter()
            .map(|&value| value > MASK_THRESHOLD)
            .collect();

        Ok(Self {
            size: image_size,
            data,
        })
    }

    /// Marks every fully opaque pixel of the image as valid.
    pub fn from_alpha(image: &Image) -> Self {
        let data = image.alpha().into_iter().map(|a| a == OPAQUE).collect();

        Self {
            size: image.size(),
            data,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let index = self.index(x, y);
        self.data[index] = true;
    }

    /// Tells whether the pixel at the given row-major index is valid.
    pub fn is_valid(&self, index: usize) -> bool {
        self.data[index]
    }

    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&valid| valid).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.data.len() - self.valid_count()
    }

    pub fn is_fully_valid(&self) -> bool {
        self.data.iter().all(|&valid| valid)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.size.0 as usize
    }

    pub(crate) fn as_slice(&self) -> &[bool] {
        &self.data
    }
}

/// Clears the color of every invalid pixel so that nothing is known about it
/// going into the fill passes. Alpha is left as-is.
pub(crate) fn zero_invalid(image: &mut Image, mask: &ValidityMask) {
    assert!(image.size() == mask.size());

    for (index, &valid) in mask.as_slice().iter().enumerate() {
        if !valid {
            for channel in 0..3 {
                image.set_channel(index, channel, 0);
            }
        }
    }
}
