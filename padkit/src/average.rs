//! Fills invalid pixels with the mean color of the valid pixels within a
//! square window around them.
//!
//! The window sums are computed with a separable box sum: one running-sum pass
//! along rows and one along columns. Cost is independent of the radius.

use crate::{image::Image, mask::ValidityMask};

pub fn weighted_average(image: &Image, mask: &ValidityMask, radius: u32) -> Image {
    assert!(image.size() == mask.size());

    let size = image.size();
    let valid = mask.as_slice();

    let weights: Vec<u64> = valid.iter().map(|&v| v as u64).collect();
    let weight_sums = box_sum(&weights, size, radius);

    let mut output = image.clone();
    let mut filled = 0;

    for channel in 0..3 {
        let weighted: Vec<u64> = valid
            .iter()
            .enumerate()
            .map(|(index, &v)| {
                if v {
                    u64::from(image.channel(index, channel))
                } else {
                    0
                }
            })
            .collect();

        let color_sums = box_sum(&weighted, size, radius);

        for (index, &v) in valid.iter().enumerate() {
            if v {
                continue;
            }

            // Pixels with nothing valid in reach keep their current value;
            // the nearest fill pass picks them up afterwards.
            let weight = weight_sums[index];
            if weight == 0 {
                continue;
            }

            // The mean of 8-bit values always fits in 8 bits.
            let mean = color_sums[index] / weight;
            output.set_channel(index, channel, mean as u8);

            if channel == 0 {
                filled += 1;
            }
        }
    }

    log::debug!(
        "Averaged {} of {} invalid pixels with radius {}",
        filled,
        mask.invalid_count(),
        radius
    );

    output
}

/// Sums `values` over a `(2 * radius + 1)` square window centered on each
/// pixel. Anything outside the image counts as zero.
fn box_sum(values: &[u64], size: (u32, u32), radius: u32) -> Vec<u64> {
    let (w, h) = (size.0 as usize, size.1 as usize);
    let radius = radius as usize;

    assert!(values.len() == w * h);

    let mut horizontal = vec![0; w * h];
    let mut prefix = Vec::with_capacity(w.max(h) + 1);

    for y in 0..h {
        let row = &values[y * w..(y + 1) * w];
        prefix_sums(row.iter().copied(), &mut prefix);

        for x in 0..w {
            horizontal[y * w + x] = window(&prefix, x, radius, w);
        }
    }

    let mut output = vec![0; w * h];

    for x in 0..w {
        let column = (0..h).map(|y| horizontal[y * w + x]);
        prefix_sums(column, &mut prefix);

        for y in 0..h {
            output[y * w + x] = window(&prefix, y, radius, h);
        }
    }

    output
}

fn prefix_sums<I: Iterator<Item = u64>>(values: I, prefix: &mut Vec<u64>) {
    prefix.clear();
    prefix.push(0);

    let mut total = 0;
    for value in values {
        total += value;
        prefix.push(total);
    }
}

/// Sum of the line over `[center - radius, center + radius]`, clipped to the
/// line's bounds.
fn window(prefix: &[u64], center: usize, radius: usize, len: usize) -> u64 {
    let start = center.saturating_sub(radius);
    let end = (center + radius + 1).min(len);

    prefix[end] - prefix[start]
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::image::Pixel;

    /// Direct per-pixel window sum, for checking the separable version.
    fn naive_box_sum(values: &[u64], size: (u32, u32), radius: u32) -> Vec<u64> {
        let (w, h) = (size.0 as i64, size.1 as i64);
        let r = radius as i64;
        let mut output = vec![0; values.len()];

        for y in 0..h {
            for x in 0..w {
                let mut sum = 0;
                for dy in -r..=r {
                    for dx in -r..=r {
                        let (sx, sy) = (x + dx, y + dy);
                        if sx >= 0 && sy >= 0 && sx < w && sy < h {
                            sum += values[(sy * w + sx) as usize];
                        }
                    }
                }
                output[(y * w + x) as usize] = sum;
            }
        }

        output
    }

    #[test]
    fn box_sum_matches_naive() {
        let size = (7, 5);
        let values: Vec<u64> = (0..35).map(|i| (i * 37 % 11) as u64).collect();

        for radius in 0..6 {
            assert_eq!(
                box_sum(&values, size, radius),
                naive_box_sum(&values, size, radius),
                "radius {}",
                radius
            );
        }
    }

    #[test]
    fn single_valid_center() {
        let mut image = Image::new_empty_rgba8((3, 3));
        image.set_pixel((1, 1), Pixel::new(200, 50, 10, 255));

        let mut mask = ValidityMask::new(3, 3);
        mask.set(1, 1);

        let output = weighted_average(&image, &mask, 1);

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(output.get_pixel((x, y)).rgb(), [200, 50, 10]);
            }
        }
    }

    #[test]
    fn out_of_reach_pixels_keep_their_value() {
        let mut image = Image::new_empty_rgba8((5, 5));
        image.set_pixel((2, 2), Pixel::new(200, 50, 10, 255));

        let mut mask = ValidityMask::new(5, 5);
        mask.set(2, 2);

        let output = weighted_average(&image, &mask, 1);

        assert_eq!(output.get_pixel((1, 1)).rgb(), [200, 50, 10]);
        assert_eq!(output.get_pixel((3, 2)).rgb(), [200, 50, 10]);
        assert_eq!(output.get_pixel((0, 0)).rgb(), [0, 0, 0]);
        assert_eq!(output.get_pixel((4, 0)).rgb(), [0, 0, 0]);
        assert_eq!(output.get_pixel((2, 4)).rgb(), [0, 0, 0]);
    }

    #[test]
    fn mean_truncates() {
        let mut image = Image::new_empty_rgba8((3, 1));
        image.set_pixel((0, 0), Pixel::new(10, 0, 255, 255));
        image.set_pixel((2, 0), Pixel::new(15, 1, 254, 255));

        let mut mask = ValidityMask::new(3, 1);
        mask.set(0, 0);
        mask.set(2, 0);

        let output = weighted_average(&image, &mask, 1);

        // (10 + 15) / 2 = 12.5, (0 + 1) / 2 = 0.5, (255 + 254) / 2 = 254.5
        assert_eq!(output.get_pixel((1, 0)).rgb(), [12, 0, 254]);
    }

    #[test]
    fn valid_pixels_and_alpha_untouched() {
        let mut image = Image::new_empty_rgba8((4, 4));
        let mut mask = ValidityMask::new(4, 4);

        for y in 0..4 {
            for x in 0..4 {
                let value = (x * 40 + y * 10) as u8;
                if (x + y) % 3 == 0 {
                    image.set_pixel((x, y), Pixel::new(value, 255 - value, value / 2, 255));
                    mask.set(x, y);
                } else {
                    image.set_pixel((x, y), Pixel::new(0, 0, 0, 7));
                }
            }
        }

        let output = weighted_average(&image, &mask, 2);

        for y in 0..4 {
            for x in 0..4 {
                if mask.get(x, y) {
                    assert_eq!(output.get_pixel((x, y)), image.get_pixel((x, y)));
                } else {
                    assert_eq!(output.get_pixel((x, y)).a, 7);
                }
            }
        }
    }
}
