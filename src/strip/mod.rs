use snafu::prelude::*;

mod builder;
mod errors;

pub use builder::{
    StripBuilder, DEFAULT_BRIGHTNESS, DEFAULT_DMA, DEFAULT_FREQUENCY, DEFAULT_GPIO,
};
pub use errors::PixelError;

use errors::{LengthMismatchSnafu, OutOfRangeSnafu, ReleasedSnafu};

use crate::{
    driver::{ControllerConfig, Driver, PwmChannel},
    errors::{
        DriverSnafu, InitializationError, InitializationSnafu, ReleasedSnafu as RenderReleasedSnafu,
        RenderError,
    },
    Color, IntoPixelRange, Pixel, StripType,
};

/// A WS281x LED strip, attached to one channel of a driver.
///
/// Owns the driver. The driver gets finalized exactly once, either through
/// [teardown](Strip::teardown) or when the strip is dropped.
///
/// Writes only modify the driver's buffer; nothing reaches the LEDs
/// before [show](Strip::show) is called.
pub struct Strip<D: Driver> {
    driver: D,
    channel: PwmChannel,
    strip_type: StripType,
    released: bool,
}

impl<D: Driver> Strip<D> {
    /// Initializes a strip with `count` pixels on the given GPIO pin,
    /// using the default settings of [StripBuilder].
    pub fn new(driver: D, count: usize, gpio: i32) -> Result<Self, InitializationError> {
        StripBuilder::new(count, gpio).build(driver)
    }

    pub(crate) fn init(
        mut driver: D,
        config: ControllerConfig,
        channel: PwmChannel,
    ) -> Result<Self, InitializationError> {
        let strip_type = config
            .channel(channel)
            .map(|c| c.strip_type)
            .unwrap_or_default();

        log::debug!("Initializing ws2811 driver.");
        log::debug!("    Frequency: {} Hz", config.frequency);
        log::debug!("    DMA channel: {}", config.dma);
        for (slot, ch) in config.channels.iter().enumerate() {
            if let Some(ch) = ch {
                log::debug!(
                    "    Channel {}: {} pixels on GPIO {}, {}, brightness {}{}",
                    slot,
                    ch.count,
                    ch.gpio,
                    ch.strip_type,
                    ch.brightness,
                    if ch.invert { ", inverted" } else { "" }
                );
            }
        }

        let status = driver.init(&config);
        if !status.is_success() {
            let message = driver.status_message(status);
            log::warn!("ws2811_init failed: {} ({})", status.code(), message);
            return InitializationSnafu {
                code: status.code(),
                message,
            }
            .fail();
        }

        Ok(Self {
            driver,
            channel,
            strip_type,
            released: false,
        })
    }

    /// Updates the LEDs with the data from the pixel buffer.
    ///
    /// Blocks until the driver is done. On failure, the previously
    /// rendered frame stays on the strip; calling this again retries.
    pub fn show(&mut self) -> Result<(), RenderError> {
        ensure!(!self.released, RenderReleasedSnafu);

        let status = self.driver.render();
        if !status.is_success() {
            let message = self.driver.status_message(status);
            log::warn!("ws2811_render failed: {} ({})", status.code(), message);
            return DriverSnafu {
                code: status.code(),
                message,
            }
            .fail();
        }

        log::trace!("Rendered {} pixels.", self.pixel_count());
        Ok(())
    }

    /// Reads the color of the pixel at `index`.
    pub fn get_color(&self, index: usize) -> Result<Color, PixelError> {
        self.check_index(index)?;
        Ok(self.driver.get_pixel(self.channel, index))
    }

    /// Sets the color of the pixel at `index`.
    pub fn set_color(&mut self, index: usize, pixel: impl Pixel) -> Result<(), PixelError> {
        self.check_index(index)?;
        self.driver.set_pixel(self.channel, index, pixel.into_color());
        Ok(())
    }

    /// Reads the colors of all pixels in `range`, in ascending order.
    ///
    /// The range gets clamped to the length of the strip.
    pub fn get_colors(&self, range: impl IntoPixelRange) -> Result<Vec<Color>, PixelError> {
        ensure!(!self.released, ReleasedSnafu);

        let range = range.into_pixel_range();
        Ok(range
            .indices(self.pixel_count())
            .map(|index| self.driver.get_pixel(self.channel, index))
            .collect())
    }

    /// Sets the pixels in `range` to the given colors, in ascending order.
    ///
    /// The range gets clamped to the length of the strip. `pixels` has to
    /// contain exactly one pixel for every position in the clamped range;
    /// otherwise nothing gets written.
    pub fn set_colors<P>(
        &mut self,
        range: impl IntoPixelRange,
        pixels: impl IntoIterator<Item = P>,
    ) -> Result<(), PixelError>
    where
        P: Pixel,
    {
        ensure!(!self.released, ReleasedSnafu);

        let range = range.into_pixel_range();
        let len = self.pixel_count();
        let colors: Vec<Color> = pixels.into_iter().map(Pixel::into_color).collect();

        let expected = range.count(len);
        ensure!(
            colors.len() == expected,
            LengthMismatchSnafu {
                expected,
                actual: colors.len()
            }
        );

        for (index, color) in range.indices(len).zip(colors) {
            self.driver.set_pixel(self.channel, index, color);
        }
        Ok(())
    }

    /// The colors of all pixels of the strip.
    pub fn pixels(&self) -> Result<Vec<Color>, PixelError> {
        self.get_colors(..)
    }

    /// Sets the brightness, from 0 (off) to 255 (unscaled).
    ///
    /// The driver scales every pixel by it while rendering,
    /// so it takes effect with the next [show](Strip::show).
    pub fn set_brightness(&mut self, brightness: u8) {
        if self.released {
            log::warn!("Ignoring brightness change on a torn down strip.");
            return;
        }
        self.driver.set_brightness(self.channel, brightness);
    }

    /// The current brightness. Zero after teardown.
    pub fn brightness(&self) -> u8 {
        if self.released {
            return 0;
        }
        self.driver.brightness(self.channel)
    }

    /// The number of pixels on the strip, as configured in the driver.
    /// Zero after teardown.
    pub fn pixel_count(&self) -> usize {
        if self.released {
            return 0;
        }
        self.driver.pixel_count(self.channel)
    }

    /// The driver channel this strip is attached to.
    pub fn channel(&self) -> PwmChannel {
        self.channel
    }

    /// The color order of the strip.
    pub fn strip_type(&self) -> StripType {
        self.strip_type
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether the driver was already finalized.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Finalizes the driver and releases its hardware resources.
    ///
    /// Only the first call has an effect. After this, all pixel
    /// operations and [show](Strip::show) fail with `Released`.
    pub fn teardown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        self.driver.finalize();
        log::debug!("ws2811 driver finalized.");
    }

    fn check_index(&self, index: usize) -> Result<(), PixelError> {
        ensure!(!self.released, ReleasedSnafu);

        let len = self.pixel_count();
        ensure!(index < len, OutOfRangeSnafu { index, len });
        Ok(())
    }
}

impl<D: Driver> Drop for Strip<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{FakeDriver, Status};

    #[test]
    fn single_pixel_access() {
        let mut strip = Strip::new(FakeDriver::new(), 3, 18).unwrap();

        strip.set_color(2, Color::new(0, 0, 255)).unwrap();
        assert_eq!(strip.get_color(2).unwrap(), Color::new(0, 0, 255));
        assert_eq!(strip.get_color(0).unwrap(), Color::BLACK);
    }

    #[test]
    fn out_of_range_never_reaches_driver() {
        let mut strip = Strip::new(FakeDriver::new(), 3, 18).unwrap();

        assert!(matches!(
            strip.set_color(3, [1, 2, 3]),
            Err(PixelError::OutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            strip.get_color(7),
            Err(PixelError::OutOfRange { index: 7, len: 3 })
        ));
    }

    #[test]
    fn init_failure_carries_driver_message() {
        let mut driver = FakeDriver::new();
        driver.fail_next_init(Status::ERROR_ILLEGAL_GPIO);

        let err = Strip::new(&mut driver, 10, 4).err().unwrap();
        assert_eq!(err.code, -11);
        assert_eq!(err.message, "Selected GPIO not possible");
        assert_eq!(
            err.to_string(),
            "ws2811_init failed with code -11 (Selected GPIO not possible)"
        );
        assert_eq!(driver.finalize_calls(), 0);
    }

    #[test]
    fn render_failure() {
        let mut strip = Strip::new(FakeDriver::new(), 1, 18).unwrap();
        strip.show().unwrap();

        let mut driver = FakeDriver::new();
        driver.fail_next_render(Status::ERROR_DMA);
        let mut failing = Strip::new(driver, 1, 18).unwrap();
        let err = failing.show().unwrap_err();
        assert!(matches!(err, RenderError::Driver { code: -10, .. }));
        assert_eq!(err.to_string(), "ws2811_render failed with code -10 (DMA error)");
    }

    #[test]
    fn teardown_once() {
        let mut driver = FakeDriver::new();
        {
            let mut strip = Strip::new(&mut driver, 1, 18).unwrap();
            strip.teardown();
            strip.teardown();
            assert!(strip.is_released());
        }
        assert_eq!(driver.finalize_calls(), 1);
        assert_eq!(driver.unbalanced_finalize_calls(), 0);
    }

    #[test]
    fn released_strip_refuses_work() {
        let mut strip = Strip::new(FakeDriver::new(), 2, 18).unwrap();
        strip.teardown();

        assert!(matches!(strip.show(), Err(RenderError::Released)));
        assert!(matches!(strip.get_color(0), Err(PixelError::Released)));
        assert!(matches!(strip.set_color(0, 0u32), Err(PixelError::Released)));
        assert!(matches!(strip.pixels(), Err(PixelError::Released)));
        assert_eq!(strip.pixel_count(), 0);
        assert_eq!(strip.brightness(), 0);
    }
}
