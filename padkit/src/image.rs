//! Simple containers to hold image buffers while they're being padded.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Rgba8,
    Luma8,
}

impl ImageFormat {
    fn stride(&self) -> usize {
        match self {
            ImageFormat::Rgba8 => 4,
            ImageFormat::Luma8 => 1,
        }
    }
}

/// Number of pixels in an image of the given size, computed without
/// overflowing `u32`.
pub(crate) fn area(size: (u32, u32)) -> usize {
    size.0 as usize * size.1 as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// An 8-bit RGBA image held entirely in memory, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
    format: ImageFormat,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();
        let format = ImageFormat::Rgba8;

        assert!(size.0 > 0 && size.1 > 0);
        assert!(data.len() == area(size) * format.stride());

        Self { size, data, format }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let data = vec![0; area(size) * ImageFormat::Rgba8.stride()];
        Self::new_rgba8(size, data)
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The length of the longer side of the image.
    pub fn max_dimension(&self) -> u32 {
        self.size.0.max(self.size.1)
    }

    pub fn pixel_count(&self) -> usize {
        area(self.size)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    /// Reads one channel of the pixel at the given row-major index.
    pub(crate) fn channel(&self, index: usize, channel: usize) -> u8 {
        self.data[index * self.format.stride() + channel]
    }

    pub(crate) fn set_channel(&mut self, index: usize, channel: usize, value: u8) {
        self.data[index * self.format.stride() + channel] = value;
    }

    /// Copies the RGB of the pixel at index `from` onto the pixel at index
    /// `to`, leaving alpha alone.
    pub(crate) fn copy_rgb(&mut self, from: usize, to: usize) {
        let stride = self.format.stride();
        let (from, to) = (from * stride, to * stride);

        for channel in 0..3 {
            self.data[to + channel] = self.data[from + channel];
        }
    }

    /// Extracts the alpha channel as a row-major buffer.
    pub fn alpha(&self) -> Vec<u8> {
        self.data
            .chunks_exact(self.format.stride())
            .map(|pixel| pixel[3])
            .collect()
    }

    pub(crate) fn set_alpha(&mut self, alpha: &[u8]) {
        assert!(alpha.len() == self.pixel_count());

        let stride = self.format.stride();
        for (pixel, &value) in self.data.chunks_exact_mut(stride).zip(alpha) {
            pixel[3] = value;
        }
    }

    fn offset(&self, pos: (u32, u32)) -> usize {
        let stride = self.format.stride();
        stride * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}

/// A single-channel 8-bit image, like a UV island mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskImage {
    size: (u32, u32),
    data: Vec<u8>,
}

impl MaskImage {
    pub fn new_luma8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();
        let stride = ImageFormat::Luma8.stride();

        assert!(size.0 > 0 && size.1 > 0);
        assert!(data.len() == area(size) * stride);

        Self { size, data }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_pixel() {
        let source = Image::new_empty_rgba8((4, 4));

        assert_eq!(source.get_pixel((0, 0)), Pixel::new(0, 0, 0, 0));
        assert_eq!(source.get_pixel((3, 3)), Pixel::new(0, 0, 0, 0));
    }

    #[test]
    fn set_pixel() {
        let mut source = Image::new_empty_rgba8((3, 3));

        source.set_pixel((0, 0), Pixel::new(1, 2, 3, 4));
        assert_eq!(source.get_pixel((0, 0)), Pixel::new(1, 2, 3, 4));

        source.set_pixel((2, 2), Pixel::new(5, 6, 7, 8));
        assert_eq!(source.get_pixel((2, 2)), Pixel::new(5, 6, 7, 8));

        assert_eq!(&source.data[0..4], &[1, 2, 3, 4]);
        assert_eq!(&source.data[(source.data.len() - 4)..], &[5, 6, 7, 8]);
    }

    #[test]
    fn copy_rgb_keeps_alpha() {
        let mut source = Image::new_empty_rgba8((2, 1));
        source.set_pixel((0, 0), Pixel::new(9, 8, 7, 255));
        source.set_pixel((1, 0), Pixel::new(0, 0, 0, 12));

        source.copy_rgb(0, 1);

        assert_eq!(source.get_pixel((1, 0)), Pixel::new(9, 8, 7, 12));
    }

    #[test]
    fn alpha_round_trip() {
        let mut source = Image::new_empty_rgba8((2, 2));
        source.set_alpha(&[1, 2, 3, 4]);

        assert_eq!(source.alpha(), vec![1, 2, 3, 4]);
        assert_eq!(source.get_pixel((1, 1)), Pixel::new(0, 0, 0, 4));
    }

    #[test]
    fn area_does_not_overflow_u32() {
        assert_eq!(area((32768, 32768)) * 4, 1 << 32);
        assert_eq!(area((u32::MAX, 2)), u32::MAX as usize * 2);
    }

    #[test]
    fn offset_past_u32_range() {
        let image = Image {
            size: (70_000, 70_000),
            data: Vec::new(),
            format: ImageFormat::Rgba8,
        };

        assert_eq!(image.offset((1, 69_999)), 4 * (69_999 * 70_000 + 1));
    }

    #[test]
    #[should_panic]
    fn mask_wrong_length() {
        MaskImage::new_luma8((2, 2), vec![0; 3]);
    }
}
