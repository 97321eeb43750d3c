use rs_ws281x::{ChannelBuilder, Controller, ControllerBuilder, RawColor, WS2811Error};

use super::{ControllerConfig, Driver, PwmChannel, Status};
use crate::{Color, StripType};

/// The `rpi_ws281x` driver library, through the `rs_ws281x` bindings.
///
/// Needs to run on a supported Raspberry Pi with access to `/dev/mem`,
/// which usually means running as root.
#[derive(Default)]
pub struct NativeDriver {
    controller: Option<Controller>,
    active: [bool; 2],
}

impl NativeDriver {
    /// Creates an uninitialized driver.
    pub fn new() -> Self {
        Self::default()
    }

    // The bindings build slices from the raw LED buffer, which is only
    // allocated for configured channels.
    fn leds(&self, channel: PwmChannel) -> &[RawColor] {
        match &self.controller {
            Some(controller) if self.active[channel.index()] => {
                controller.leds(channel.index())
            }
            _ => &[],
        }
    }

    fn leds_mut(&mut self, channel: PwmChannel) -> &mut [RawColor] {
        match &mut self.controller {
            Some(controller) if self.active[channel.index()] => {
                controller.leds_mut(channel.index())
            }
            _ => &mut [],
        }
    }
}

impl Driver for NativeDriver {
    fn init(&mut self, config: &ControllerConfig) -> Status {
        if self.controller.is_some() {
            log::warn!("ws2811 already initialized; finalizing before re-init.");
            self.finalize();
        }

        let mut builder = ControllerBuilder::new();
        builder.freq(config.frequency).dma(config.dma);

        for slot in PwmChannel::ALL {
            if let Some(channel) = config.channel(slot) {
                builder.channel(
                    slot.index(),
                    ChannelBuilder::new()
                        .pin(channel.gpio)
                        .count(i32::try_from(channel.count).unwrap_or(i32::MAX))
                        .invert(channel.invert)
                        .brightness(channel.brightness)
                        .strip_type(native_strip_type(channel.strip_type))
                        .build(),
                );
            }
        }

        match builder.build() {
            Ok(controller) => {
                self.controller = Some(controller);
                self.active = PwmChannel::ALL.map(|slot| config.channel(slot).is_some());
                Status::SUCCESS
            }
            Err(err) => status_of(&err),
        }
    }

    fn render(&mut self) -> Status {
        match &mut self.controller {
            Some(controller) => match controller.render() {
                Ok(()) => Status::SUCCESS,
                Err(err) => status_of(&err),
            },
            None => Status::ERROR_GENERIC,
        }
    }

    fn set_pixel(&mut self, channel: PwmChannel, index: usize, color: Color) {
        if let Some(led) = self.leds_mut(channel).get_mut(index) {
            *led = to_raw(color);
        }
    }

    fn get_pixel(&self, channel: PwmChannel, index: usize) -> Color {
        self.leds(channel)
            .get(index)
            .map_or(Color::from(u32::MAX), |led| from_raw(*led))
    }

    fn pixel_count(&self, channel: PwmChannel) -> usize {
        self.leds(channel).len()
    }

    fn set_brightness(&mut self, channel: PwmChannel, brightness: u8) {
        if let Some(controller) = &mut self.controller {
            controller.set_brightness(channel.index(), brightness);
        }
    }

    fn brightness(&self, channel: PwmChannel) -> u8 {
        self.controller
            .as_ref()
            .map_or(0, |controller| controller.brightness(channel.index()))
    }

    fn finalize(&mut self) {
        // Dropping the controller calls `ws2811_fini`,
        // which also frees the LED buffers.
        self.controller = None;
        self.active = [false; 2];
    }
}

/// The LED buffer holds `0xWWRRGGBB` words in native (little endian) byte order.
fn to_raw(color: Color) -> RawColor {
    color.to_u32().to_le_bytes()
}

fn from_raw(raw: RawColor) -> Color {
    Color::from(u32::from_le_bytes(raw))
}

fn native_strip_type(strip_type: StripType) -> rs_ws281x::StripType {
    use rs_ws281x::StripType as Native;

    match strip_type {
        StripType::Rgb => Native::Ws2811Rgb,
        StripType::Rbg => Native::Ws2811Rbg,
        StripType::Grb => Native::Ws2811Grb,
        StripType::Gbr => Native::Ws2811Gbr,
        StripType::Brg => Native::Ws2811Brg,
        StripType::Bgr => Native::Ws2811Bgr,
        StripType::Rgbw => Native::Sk6812Rgbw,
        StripType::Rbgw => Native::Sk6812Rbgw,
        StripType::Grbw => Native::Sk6812Grbw,
        StripType::Gbrw => Native::Sk6812Gbrw,
        StripType::Brgw => Native::Sk6812Brgw,
        StripType::Bgrw => Native::Sk6812Bgrw,
    }
}

#[allow(unreachable_patterns)]
fn status_of(err: &WS2811Error) -> Status {
    match err {
        WS2811Error::Generic => Status::ERROR_GENERIC,
        WS2811Error::OutOfMemory => Status::ERROR_OUT_OF_MEMORY,
        WS2811Error::HwNotSupported => Status::ERROR_HW_NOT_SUPPORTED,
        WS2811Error::MemLock => Status::ERROR_MEM_LOCK,
        WS2811Error::Mmap => Status::ERROR_MMAP,
        WS2811Error::MapRegisters => Status::ERROR_MAP_REGISTERS,
        WS2811Error::GpioInit => Status::ERROR_GPIO_INIT,
        WS2811Error::PwmSetup => Status::ERROR_PWM_SETUP,
        WS2811Error::MailboxDevice => Status::ERROR_MAILBOX_DEVICE,
        WS2811Error::Dma => Status::ERROR_DMA,
        WS2811Error::IllegalGpio => Status::ERROR_ILLEGAL_GPIO,
        WS2811Error::PcmSetup => Status::ERROR_PCM_SETUP,
        WS2811Error::SpiSetup => Status::ERROR_SPI_SETUP,
        WS2811Error::SpiTransfer => Status::ERROR_SPI_TRANSFER,
        _ => Status::ERROR_GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_color_layout() {
        let color = Color::rgbw(0x11, 0x22, 0x33, 0x44);
        assert_eq!(to_raw(color), [0x33, 0x22, 0x11, 0x44]);
        assert_eq!(from_raw(to_raw(color)), color);
    }

    #[test]
    fn uninitialized_driver_is_empty() {
        let mut driver = NativeDriver::new();

        assert_eq!(driver.pixel_count(PwmChannel::Pwm0), 0);
        assert_eq!(driver.render(), Status::ERROR_GENERIC);
        driver.set_pixel(PwmChannel::Pwm0, 0, Color::new(1, 2, 3));
        assert_eq!(driver.get_pixel(PwmChannel::Pwm0, 0).to_u32(), u32::MAX);
        driver.finalize();
    }

    #[test]
    fn error_codes() {
        assert_eq!(status_of(&WS2811Error::Dma), Status::ERROR_DMA);
        assert_eq!(status_of(&WS2811Error::IllegalGpio), Status::ERROR_ILLEGAL_GPIO);
    }
}
