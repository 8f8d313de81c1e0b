//! Re-synthesizes alpha so that opacity falls off smoothly outwards from the
//! opaque parts of an image instead of cutting off hard at their edge.

const OPAQUE: u8 = 255;

/// Gaussian kernels extend this many standard deviations from their center.
const TRUNCATE: f64 = 4.0;

/// Kernels are cut off after this many mirrored periods of the line. Shorter
/// lines count as `MIN_PERIOD` long, so kernels for ordinary sigmas on small
/// images are never cut short.
const MAX_PERIODS: i64 = 16;
const MIN_PERIOD: i64 = 256;

/// Fades alpha outwards from fully opaque pixels. The result is never less
/// than the original alpha at any pixel.
pub fn fade_alpha(alpha: &[u8], size: (u32, u32), sigma: f64) -> Vec<u8> {
    assert!(alpha.len() == size.0 as usize * size.1 as usize);

    let opaque: Vec<f64> = alpha
        .iter()
        .map(|&a| if a < OPAQUE { 0.0 } else { 1.0 })
        .collect();

    let field = gaussian_blur(&opaque, size, sigma);
    let normalized = normalize(&field);

    alpha
        .iter()
        .zip(normalized)
        .map(|(&a, n)| {
            let faded = (n * 255.0) as u8;
            a.max(faded)
        })
        .collect()
}

/// Min-max normalizes `values` into `[0, 1]`. A constant field has no range to
/// normalize over and comes back as all zeroes.
fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !(range > 0.0) {
        log::debug!("Alpha fade field is constant, skipping normalization");
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|&v| ((v - min) / range).max(0.0).min(1.0))
        .collect()
}

/// Separable Gaussian blur with mirrored edges, where the edge sample itself
/// is repeated (`d c b a | a b c d | d c b a`).
pub(crate) fn gaussian_blur(values: &[f64], size: (u32, u32), sigma: f64) -> Vec<f64> {
    let (w, h) = (size.0 as usize, size.1 as usize);
    assert!(values.len() == w * h);

    let row_taps = line_taps(sigma, w);
    let column_taps = line_taps(sigma, h);

    let mut horizontal = vec![0.0; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for &(offset, weight) in &row_taps {
                let sx = reflect(x as i64 + offset, w);
                sum += values[y * w + sx] * weight;
            }
            horizontal[y * w + x] = sum;
        }
    }

    let mut output = vec![0.0; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for &(offset, weight) in &column_taps {
                let sy = reflect(y as i64 + offset, h);
                sum += horizontal[sy * w + x] * weight;
            }
            output[y * w + x] = sum;
        }
    }

    output
}

/// Offsets and weights of a Gaussian kernel applied along a line of `len`
/// samples.
///
/// Mirroring repeats every `2 * len` samples, so a kernel wider than that is
/// folded onto one period. This keeps the work and memory bounded by the
/// image size no matter how large sigma is.
fn line_taps(sigma: f64, len: usize) -> Vec<(i64, f64)> {
    let period = 2 * len as i64;
    let max_half = MAX_PERIODS * period.max(MIN_PERIOD);

    let kernel = gaussian_kernel_1d(sigma, max_half as usize);
    let half = (kernel.len() / 2) as i64;

    if kernel.len() as i64 <= period {
        return kernel
            .into_iter()
            .enumerate()
            .map(|(i, weight)| (i as i64 - half, weight))
            .collect();
    }

    let mut folded = vec![0.0; period as usize];
    for (i, weight) in kernel.into_iter().enumerate() {
        folded[(i as i64 - half).rem_euclid(period) as usize] += weight;
    }

    folded
        .into_iter()
        .enumerate()
        .map(|(offset, weight)| (offset as i64, weight))
        .collect()
}

/// A normalized Gaussian kernel of `2 * half + 1` taps, with `half` capped at
/// `max_half`.
fn gaussian_kernel_1d(sigma: f64, max_half: usize) -> Vec<f64> {
    if !(sigma > 0.0) {
        return vec![1.0];
    }

    let half = (TRUNCATE * sigma + 0.5).min(max_half as f64) as usize;

    let mut kernel: Vec<f64> = (0..=2 * half)
        .map(|i| {
            let x = i as f64 - half as f64;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Maps an out-of-range index back into `0..len` by mirroring, repeating the
/// edge sample. Kernels wider than the line wrap around more than once.
fn reflect(index: i64, len: usize) -> usize {
    let len = len as i64;
    let period = 2 * len;
    let wrapped = index.rem_euclid(period);

    if wrapped < len {
        wrapped as usize
    } else {
        (period - 1 - wrapped) as usize
    }
}
