//! The boundary to the driver that performs the actual hardware access.
//!
//! The pulse timing, the DMA transfers and the PWM/PCM/SPI peripherals are
//! all handled by the driver; a [Strip](crate::Strip) only configures it,
//! writes pixels into its buffer and asks it to render.

use core::fmt;

use crate::{Color, StripType};

mod fake;
#[cfg(feature = "rpi")]
mod native;

pub use fake::{FailureQueue, FakeDriver, RenderedFrame};
#[cfg(feature = "rpi")]
#[cfg_attr(docsrs, doc(cfg(feature = "rpi")))]
pub use native::NativeDriver;

/// A status code returned by the driver.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(i32);

impl Status {
    /// The operation succeeded.
    pub const SUCCESS: Self = Self(0);
    /// Generic failure.
    pub const ERROR_GENERIC: Self = Self(-1);
    /// Out of memory.
    pub const ERROR_OUT_OF_MEMORY: Self = Self(-2);
    /// Hardware revision is not supported.
    pub const ERROR_HW_NOT_SUPPORTED: Self = Self(-3);
    /// Memory lock failed.
    pub const ERROR_MEM_LOCK: Self = Self(-4);
    /// mmap() failed.
    pub const ERROR_MMAP: Self = Self(-5);
    /// Unable to map registers into userspace.
    pub const ERROR_MAP_REGISTERS: Self = Self(-6);
    /// Unable to initialize GPIO.
    pub const ERROR_GPIO_INIT: Self = Self(-7);
    /// Unable to initialize PWM.
    pub const ERROR_PWM_SETUP: Self = Self(-8);
    /// Failed to create mailbox device.
    pub const ERROR_MAILBOX_DEVICE: Self = Self(-9);
    /// DMA error.
    pub const ERROR_DMA: Self = Self(-10);
    /// Selected GPIO not possible.
    pub const ERROR_ILLEGAL_GPIO: Self = Self(-11);
    /// Unable to initialize PCM.
    pub const ERROR_PCM_SETUP: Self = Self(-12);
    /// Unable to initialize SPI.
    pub const ERROR_SPI_SETUP: Self = Self(-13);
    /// SPI transfer error.
    pub const ERROR_SPI_TRANSFER: Self = Self(-14);

    /// Wraps a raw `ws2811_return_t` value.
    pub const fn from_raw(code: i32) -> Self {
        Self(code)
    }

    /// The raw `ws2811_return_t` value.
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Whether this is the success sentinel.
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// The description the driver library uses for this status.
    pub const fn description(self) -> &'static str {
        match self.0 {
            0 => "Success",
            -1 => "Generic failure",
            -2 => "Out of memory",
            -3 => "Hardware revision is not supported",
            -4 => "Memory lock failed",
            -5 => "mmap() failed",
            -6 => "Unable to map registers into userspace",
            -7 => "Unable to initialize GPIO",
            -8 => "Unable to initialize PWM",
            -9 => "Failed to create mailbox device",
            -10 => "DMA error",
            -11 => "Selected GPIO not possible",
            -12 => "Unable to initialize PCM",
            -13 => "Unable to initialize SPI",
            -14 => "SPI transfer error",
            _ => "Unknown error",
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({}: {})", self.0, self.description())
    }
}

/// One of the two hardware channel slots of the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PwmChannel {
    /// PWM channel 0, usually GPIO 12 or 18.
    #[default]
    Pwm0,
    /// PWM channel 1, usually GPIO 13 or 19.
    Pwm1,
}

impl PwmChannel {
    /// Both channels, in slot order.
    pub const ALL: [Self; 2] = [Self::Pwm0, Self::Pwm1];

    /// The slot index inside the driver's channel array.
    pub const fn index(self) -> usize {
        match self {
            Self::Pwm0 => 0,
            Self::Pwm1 => 1,
        }
    }

    /// The channel for a slot index, if it exists.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Pwm0),
            1 => Some(Self::Pwm1),
            _ => None,
        }
    }
}

/// The configuration of one hardware channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Number of pixels on the strip.
    pub count: usize,
    /// GPIO pin connected to the strip's data line.
    pub gpio: i32,
    /// Whether the signal line is inverted, e.g. by a level shifting transistor.
    pub invert: bool,
    /// Brightness scale, from 0 (off) to 255 (unscaled).
    pub brightness: u8,
    /// Color order of the strip.
    pub strip_type: StripType,
}

/// The full configuration handed to [Driver::init].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Signal frequency in Hz.
    pub frequency: u32,
    /// DMA channel number.
    pub dma: i32,
    /// The two channel slots. Unused slots are `None`.
    pub channels: [Option<ChannelConfig>; 2],
}

impl ControllerConfig {
    /// The configuration of a channel slot, if it is in use.
    pub fn channel(&self, channel: PwmChannel) -> Option<&ChannelConfig> {
        self.channels[channel.index()].as_ref()
    }
}

/// The entry points of a WS281x driver.
///
/// Implemented by [NativeDriver] for the real hardware
/// and by [FakeDriver] for tests.
///
/// Pixel positions handed to a driver are always smaller than
/// the [pixel_count](Driver::pixel_count) of that channel.
pub trait Driver {
    /// Allocates the hardware resources for the configured channels.
    fn init(&mut self, config: &ControllerConfig) -> Status;

    /// Pushes the buffered pixel data to the strips.
    ///
    /// Blocks until the driver is done.
    fn render(&mut self) -> Status;

    /// Writes one pixel into the buffer of a channel.
    fn set_pixel(&mut self, channel: PwmChannel, index: usize, color: Color);

    /// Reads one pixel from the buffer of a channel.
    fn get_pixel(&self, channel: PwmChannel, index: usize) -> Color;

    /// The number of pixels configured for a channel.
    fn pixel_count(&self, channel: PwmChannel) -> usize;

    /// Sets the brightness of a channel, applied on the next render.
    fn set_brightness(&mut self, channel: PwmChannel, brightness: u8);

    /// The brightness of a channel.
    fn brightness(&self, channel: PwmChannel) -> u8;

    /// Releases the hardware resources.
    ///
    /// Must only be called once per successful [init](Driver::init).
    fn finalize(&mut self);

    /// A human readable description of a status code.
    fn status_message(&self, status: Status) -> &'static str {
        status.description()
    }
}

impl<D> Driver for &mut D
where
    D: Driver + ?Sized,
{
    fn init(&mut self, config: &ControllerConfig) -> Status {
        (**self).init(config)
    }

    fn render(&mut self) -> Status {
        (**self).render()
    }

    fn set_pixel(&mut self, channel: PwmChannel, index: usize, color: Color) {
        (**self).set_pixel(channel, index, color)
    }

    fn get_pixel(&self, channel: PwmChannel, index: usize) -> Color {
        (**self).get_pixel(channel, index)
    }

    fn pixel_count(&self, channel: PwmChannel) -> usize {
        (**self).pixel_count(channel)
    }

    fn set_brightness(&mut self, channel: PwmChannel, brightness: u8) {
        (**self).set_brightness(channel, brightness)
    }

    fn brightness(&self, channel: PwmChannel) -> u8 {
        (**self).brightness(channel)
    }

    fn finalize(&mut self) {
        (**self).finalize()
    }

    fn status_message(&self, status: Status) -> &'static str {
        (**self).status_message(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_descriptions() {
        assert!(Status::SUCCESS.is_success());
        assert!(!Status::ERROR_DMA.is_success());
        assert_eq!(Status::ERROR_DMA.code(), -10);
        assert_eq!(Status::from_raw(-11).description(), "Selected GPIO not possible");
        assert_eq!(Status::from_raw(-99).description(), "Unknown error");
    }

    #[test]
    fn channel_indices() {
        for channel in PwmChannel::ALL {
            assert_eq!(PwmChannel::from_index(channel.index()), Some(channel));
        }
        assert_eq!(PwmChannel::from_index(2), None);
    }
}
