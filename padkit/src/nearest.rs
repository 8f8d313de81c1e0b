//! Assigns every invalid pixel the color of its closest valid pixel.
//!
//! Uses the separable exact Euclidean distance transform from Felzenszwalb and
//! Huttenlocher, "Distance Transforms of Sampled Functions". The first pass
//! finds the nearest valid row within each column. The second pass takes the
//! lower envelope of the parabolas `(x - column)^2 + row_distance^2` along each
//! row. Envelope breakpoints are kept as exact fractions so that the chosen
//! source is never farther than the true nearest one.
//!
//! Ties are broken deterministically: within a column the smaller row wins,
//! and across columns the smaller column wins.

use std::cmp::Ordering;

use crate::{image::Image, mask::ValidityMask};

pub fn nearest_fill(image: &Image, mask: &ValidityMask) -> Image {
    assert!(image.size() == mask.size());

    let mut output = image.clone();

    let sources = match nearest_valid(mask) {
        Some(sources) => sources,
        None => {
            log::warn!("No valid pixels to fill from, leaving image as-is");
            return output;
        }
    };

    let mut filled = 0;
    for (index, &source) in sources.iter().enumerate() {
        if !mask.is_valid(index) {
            output.copy_rgb(source, index);
            filled += 1;
        }
    }

    log::debug!("Filled {} pixels from their nearest valid pixel", filled);

    output
}

/// Computes, for every pixel, the row-major index of the nearest valid pixel.
/// Valid pixels map to themselves. Returns `None` if nothing is valid.
pub fn nearest_valid(mask: &ValidityMask) -> Option<Vec<usize>> {
    let (w, h) = (mask.size().0 as usize, mask.size().1 as usize);

    let column_rows = nearest_rows(mask, w, h);

    if column_rows.iter().all(Option::is_none) {
        return None;
    }

    let mut sources = vec![0; w * h];
    let mut envelope = Envelope::with_capacity(w);

    for y in 0..h {
        envelope.clear();

        for x in 0..w {
            if let Some(row) = column_rows[y * w + x] {
                let dy = row as i64 - y as i64;
                envelope.push(x as i64, dy * dy);
            }
        }

        let mut k = 0;
        for x in 0..w {
            while envelope.next_starts_before(k, x as i64) {
                k += 1;
            }

            let column = envelope.columns[k] as usize;

            // Every column on the envelope has a valid row by construction.
            if let Some(row) = column_rows[y * w + column] {
                sources[y * w + x] = row * w + column;
            }
        }
    }

    Some(sources)
}

/// For each pixel, the nearest valid row in the same column, if the column has
/// any valid pixel at all.
fn nearest_rows(mask: &ValidityMask, w: usize, h: usize) -> Vec<Option<usize>> {
    let mut rows = vec![None; w * h];

    for x in 0..w {
        let mut above = None;
        for y in 0..h {
            if mask.is_valid(y * w + x) {
                above = Some(y);
            }
            rows[y * w + x] = above;
        }

        let mut below = None;
        for y in (0..h).rev() {
            if mask.is_valid(y * w + x) {
                below = Some(y);
            }

            let index = y * w + x;
            rows[index] = match (rows[index], below) {
                (Some(up), Some(down)) if down - y < y - up => Some(down),
                (None, down) => down,
                (up, _) => up,
            };
        }
    }

    rows
}

/// A fraction with a positive denominator.
#[derive(Debug, Clone, Copy)]
struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    fn compare(&self, other: &Fraction) -> Ordering {
        let lhs = i128::from(self.num) * i128::from(other.den);
        let rhs = i128::from(other.num) * i128::from(self.den);
        lhs.cmp(&rhs)
    }

    fn less_than_integer(&self, value: i64) -> bool {
        i128::from(self.num) < i128::from(value) * i128::from(self.den)
    }
}

/// Lower envelope of the parabolas `(x - column)^2 + height` along one row.
struct Envelope {
    columns: Vec<i64>,
    heights: Vec<i64>,

    /// Where each parabola starts being the lowest one. The first entry is
    /// unused, the first parabola extends to negative infinity.
    starts: Vec<Fraction>,
}

impl Envelope {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
            heights: Vec::with_capacity(capacity),
            starts: Vec::with_capacity(capacity),
        }
    }

    fn clear(&mut self) {
        self.columns.clear();
        self.heights.clear();
        self.starts.clear();
    }

    /// Adds a parabola. Columns must be pushed in increasing order.
    fn push(&mut self, column: i64, height: i64) {
        loop {
            let last = match self.columns.len() {
                0 => {
                    self.columns.push(column);
                    self.heights.push(height);
                    self.starts.push(Fraction { num: 0, den: 1 });
                    return;
                }
                len => len - 1,
            };

            let start = self.intersection(last, column, height);

            if last > 0 && start.compare(&self.starts[last]) != Ordering::Greater {
                self.columns.pop();
                self.heights.pop();
                self.starts.pop();
                continue;
            }

            self.columns.push(column);
            self.heights.push(height);
            self.starts.push(start);
            return;
        }
    }

    /// The x at which the parabola at `column` becomes lower than the one at
    /// `self.columns[k]`.
    fn intersection(&self, k: usize, column: i64, height: i64) -> Fraction {
        let (p, fp) = (self.columns[k], self.heights[k]);
        let (q, fq) = (column, height);

        Fraction {
            num: (fq + q * q) - (fp + p * p),
            den: 2 * (q - p),
        }
    }

    fn next_starts_before(&self, k: usize, x: i64) -> bool {
        k + 1 < self.columns.len() && self.starts[k + 1].less_than_integer(x)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::image::Pixel;

    fn brute_force_distance(mask: &ValidityMask, index: usize) -> i64 {
        let w = mask.size().0 as usize;
        let (x, y) = ((index % w) as i64, (index / w) as i64);

        (0..mask.size().0 as usize * mask.size().1 as usize)
            .filter(|&i| mask.is_valid(i))
            .map(|i| {
                let (sx, sy) = ((i % w) as i64, (i / w) as i64);
                (sx - x) * (sx - x) + (sy - y) * (sy - y)
            })
            .min()
            .unwrap()
    }

    fn distance(w: usize, a: usize, b: usize) -> i64 {
        let (ax, ay) = ((a % w) as i64, (a / w) as i64);
        let (bx, by) = ((b % w) as i64, (b / w) as i64);
        (ax - bx) * (ax - bx) + (ay - by) * (ay - by)
    }

    /// Small deterministic pseudo-random sequence so the tests don't need an
    /// RNG crate.
    fn scatter(seed: u32, w: u32, h: u32, density: u32) -> ValidityMask {
        let mut mask = ValidityMask::new(w, h);
        let mut state = seed;

        for y in 0..h {
            for x in 0..w {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                if (state >> 16) % 100 < density {
                    mask.set(x, y);
                }
            }
        }

        mask
    }

    #[test]
    fn matches_brute_force() {
        for (seed, density) in &[(1, 2), (7, 5), (42, 20), (99, 60)] {
            let mask = scatter(*seed, 23, 17, *density);
            if mask.valid_count() == 0 {
                continue;
            }

            let sources = nearest_valid(&mask).unwrap();

            for (index, &source) in sources.iter().enumerate() {
                assert!(mask.is_valid(source));
                assert_eq!(
                    distance(23, index, source),
                    brute_force_distance(&mask, index),
                    "pixel {} with seed {}",
                    index,
                    seed
                );
            }
        }
    }

    #[test]
    fn valid_pixels_map_to_themselves() {
        let mask = scatter(3, 9, 9, 30);
        let sources = nearest_valid(&mask).unwrap();

        for (index, &source) in sources.iter().enumerate() {
            if mask.is_valid(index) {
                assert_eq!(source, index);
            }
        }
    }

    #[test]
    fn nothing_valid() {
        let mask = ValidityMask::new(4, 3);
        assert_eq!(nearest_valid(&mask), None);
    }

    #[test]
    fn ties_prefer_smaller_column() {
        let mut mask = ValidityMask::new(3, 1);
        mask.set(0, 0);
        mask.set(2, 0);

        assert_eq!(nearest_valid(&mask).unwrap(), vec![0, 0, 2]);
    }

    #[test]
    fn ties_prefer_smaller_row() {
        let mut mask = ValidityMask::new(1, 3);
        mask.set(0, 0);
        mask.set(0, 2);

        assert_eq!(nearest_valid(&mask).unwrap(), vec![0, 0, 2]);
    }

    #[test]
    fn far_corner_fills_from_single_pixel() {
        let mut image = Image::new_empty_rgba8((40, 30));
        image.set_pixel((5, 5), Pixel::new(200, 50, 10, 255));

        let mut mask = ValidityMask::new(40, 30);
        mask.set(5, 5);

        let output = nearest_fill(&image, &mask);

        assert_eq!(output.get_pixel((39, 29)), Pixel::new(200, 50, 10, 0));
        assert_eq!(output.get_pixel((0, 0)), Pixel::new(200, 50, 10, 0));
    }

    #[test]
    fn two_regions_split_the_gap() {
        let mut image = Image::new_empty_rgba8((6, 1));
        image.set_pixel((0, 0), Pixel::new(255, 0, 0, 255));
        image.set_pixel((5, 0), Pixel::new(0, 0, 255, 255));

        let mut mask = ValidityMask::new(6, 1);
        mask.set(0, 0);
        mask.set(5, 0);

        let output = nearest_fill(&image, &mask);
        let colors: Vec<_> = (0..6).map(|x| output.get_pixel((x, 0)).rgb()).collect();

        assert_eq!(
            colors,
            vec![
                [255, 0, 0],
                [255, 0, 0],
                [255, 0, 0],
                [0, 0, 255],
                [0, 0, 255],
                [0, 0, 255],
            ]
        );
    }
}
