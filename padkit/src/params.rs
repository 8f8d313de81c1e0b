//! Fill parameters and the heuristics used to pick them from an image's
//! resolution.

use crate::error::Error;

pub const DEFAULT_RADIUS: u32 = 3;
pub const DEFAULT_SIGMA: f64 = 3.0;

/// How far the averaging pass reaches and how wide the alpha falloff is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParameters {
    /// Half the side of the averaging window, which is `2 * radius + 1` wide.
    pub radius: u32,

    /// Spread of the Gaussian used to fade alpha outwards.
    pub sigma: f64,
}

impl Default for FillParameters {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl FillParameters {
    pub fn new(radius: u32, sigma: f64) -> Self {
        Self { radius, sigma }
    }

    /// Picks parameters proportional to the texture's resolution, so that the
    /// same margin in texels results regardless of mip level.
    pub fn auto(max_dim: u32) -> Self {
        let max_dim = f64::from(max_dim);

        let radius = ((max_dim / 512.0 * 3.0).floor() as u32).max(2);

        // Python-style rounding to one decimal: ties go to the even digit.
        let spread = (max_dim / 1024.0 * 3.0).max(1.0).min(10.0);
        let sigma = (spread * 10.0).round_ties_even() / 10.0;

        Self { radius, sigma }
    }

    /// Combines caller-supplied values with auto-tuned ones.
    ///
    /// Auto-tuning kicks in when it's requested or when neither value was
    /// given, and only fills in the values that are missing. Anything still
    /// missing after that falls back to the defaults.
    pub fn resolve(radius: Option<u32>, sigma: Option<f64>, auto: bool, max_dim: u32) -> Self {
        let (mut radius, mut sigma) = (radius, sigma);

        if auto || (radius.is_none() && sigma.is_none()) {
            let tuned = Self::auto(max_dim);
            radius = radius.or(Some(tuned.radius));
            sigma = sigma.or(Some(tuned.sigma));

            log::info!(
                "Auto-set parameters: radius={}, sigma={}",
                radius.unwrap_or(DEFAULT_RADIUS),
                sigma.unwrap_or(DEFAULT_SIGMA)
            );
        }

        Self {
            radius: radius.unwrap_or(DEFAULT_RADIUS),
            sigma: sigma.unwrap_or(DEFAULT_SIGMA),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.radius == 0 || !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::InvalidParameters {
                radius: self.radius,
                sigma: self.sigma,
            });
        }

        Ok(())
    }
}
