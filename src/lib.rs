#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod driver;

mod color;
mod errors;
mod pixel;
mod pixel_range;
mod strip;
mod strip_type;

pub use color::Color;
pub use errors::{ConfigError, InitializationError, RenderError};
pub use pixel::Pixel;
pub use pixel_range::{IntoPixelRange, PixelRange};
pub use strip::{PixelError, Strip, StripBuilder};
pub use strip_type::{StripType, UnknownStripType};

/// Default settings of [StripBuilder].
pub mod defaults {
    pub use crate::strip::{DEFAULT_BRIGHTNESS, DEFAULT_DMA, DEFAULT_FREQUENCY, DEFAULT_GPIO};
}
