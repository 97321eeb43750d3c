use snafu::prelude::*;

/// Errors of the pixel accessors of [Strip](crate::Strip).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PixelError {
    /// The position is past the end of the strip.
    #[snafu(display("pixel {index} is out of range for a strip of {len} pixels"))]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The number of pixels on the strip.
        len: usize,
    },
    /// A range write got a different amount of pixels than the range covers.
    #[snafu(display("pixel range covers {expected} pixels, but {actual} were given"))]
    LengthMismatch {
        /// The number of positions the range covers.
        expected: usize,
        /// The number of pixels given.
        actual: usize,
    },
    /// The strip was already torn down.
    #[snafu(display("the strip was already torn down"))]
    Released,
}
