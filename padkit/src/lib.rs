//! Padkit fills the transparent parts of textures with plausible color so that
//! texture filtering and mipmapping don't bleed black or garbage across UV
//! seams. It was built for `padder`, a command line tool that pads texture
//! files in place of an artist doing it by hand.
//!
//! Padding runs in a few stages:
//!
//! 1. A validity mask is built, either from the image's own alpha or from an
//!    external UV island mask.
//! 2. Invalid pixels close to valid ones take the average color of the valid
//!    pixels within a square window.
//! 3. Anything still left takes the color of its nearest valid pixel.
//! 4. In alpha mode, alpha is faded outwards from opaque regions. With a UV
//!    mask, the output is made fully opaque instead.
//!
//! ## Example
//! ```
//! use padkit::{pad, FillParameters, Image, Mode, PadOutcome, Pixel};
//!
//! let mut image = Image::new_empty_rgba8((8, 8));
//! image.set_pixel((3, 3), Pixel::new(200, 50, 10, 255));
//!
//! // Pick parameters from the image's resolution.
//! let params = FillParameters::auto(image.max_dimension());
//!
//! match pad(&image, Mode::AlphaDriven, params).unwrap() {
//!     PadOutcome::Padded(padded) => {
//!         assert_eq!(padded.get_pixel((0, 0)).rgb(), [200, 50, 10]);
//!     }
//!     PadOutcome::Unchanged => unreachable!(),
//! }
//! ```

mod average;
mod error;
mod fade;
mod image;
mod mask;
mod nearest;
mod params;
mod pipeline;

pub use average::weighted_average;
pub use error::Error;
pub use fade::fade_alpha;
pub use image::*;
pub use mask::ValidityMask;
pub use nearest::{nearest_fill, nearest_valid};
pub use params::*;
pub use pipeline::*;
