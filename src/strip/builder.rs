use std::env;

use super::Strip;
use crate::{
    driver::{ChannelConfig, ControllerConfig, Driver, PwmChannel},
    errors::{ConfigError, InitializationError, InvalidValueSnafu},
    StripType,
};

/// The default signal frequency, in Hz.
pub const DEFAULT_FREQUENCY: u32 = 800_000;
/// The default DMA channel.
pub const DEFAULT_DMA: i32 = 5;
/// The default brightness; no scaling.
pub const DEFAULT_BRIGHTNESS: u8 = 255;
/// The default GPIO pin used by [StripBuilder::from_env].
pub const DEFAULT_GPIO: i32 = 18;

/// Collects the settings of a [Strip] before initializing the driver.
///
/// ```
/// use ws281x_strip::{driver::{FakeDriver, PwmChannel}, StripBuilder, StripType};
///
/// let strip = StripBuilder::new(60, 13)
///     .channel(PwmChannel::Pwm1)
///     .strip_type(StripType::WS2812)
///     .brightness(128)
///     .build(FakeDriver::new())
///     .unwrap();
///
/// assert_eq!(strip.pixel_count(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripBuilder {
    count: usize,
    gpio: i32,
    frequency: u32,
    dma: i32,
    invert: bool,
    brightness: u8,
    channel: PwmChannel,
    strip_type: StripType,
}

impl StripBuilder {
    /// Starts a strip with `count` pixels on the given GPIO pin.
    pub fn new(count: usize, gpio: i32) -> Self {
        Self {
            count,
            gpio,
            frequency: DEFAULT_FREQUENCY,
            dma: DEFAULT_DMA,
            invert: false,
            brightness: DEFAULT_BRIGHTNESS,
            channel: PwmChannel::default(),
            strip_type: StripType::default(),
        }
    }

    /// Reads the settings from `WS2811_*` environment variables.
    ///
    /// | Variable                    | Default   |
    /// |-----------------------------|-----------|
    /// | `WS2811_GPIO_PIN_NUMBER`    | `18`      |
    /// | `WS2811_FREQUENCY`          | `800000`  |
    /// | `WS2811_DMA_CHANNEL_NUMBER` | `5`       |
    /// | `WS2811_BRIGHTNESS`         | `255`     |
    /// | `WS2811_INVERT`             | `false`   |
    /// | `WS2811_PWM_CHANNEL`        | `0`       |
    /// | `WS2811_STRIP_TYPE`         | `rgb`     |
    pub fn from_env(count: usize) -> Result<Self, ConfigError> {
        Self::from_lookup(count, |variable| {
            env::var_os(variable).map(|value| value.to_string_lossy().into_owned())
        })
    }

    pub(crate) fn from_lookup(
        count: usize,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |variable: &'static str| lookup(variable).map(|value| (variable, value));

        let mut builder = Self::new(count, DEFAULT_GPIO);

        if let Some(gpio) = var("WS2811_GPIO_PIN_NUMBER") {
            builder.gpio = parse(gpio, |v| v.parse().ok())?;
        }
        if let Some(frequency) = var("WS2811_FREQUENCY") {
            builder.frequency = parse(frequency, |v| v.parse().ok())?;
        }
        if let Some(dma) = var("WS2811_DMA_CHANNEL_NUMBER") {
            builder.dma = parse(dma, |v| v.parse().ok())?;
        }
        if let Some(brightness) = var("WS2811_BRIGHTNESS") {
            builder.brightness = parse(brightness, |v| v.parse().ok())?;
        }
        if let Some(invert) = var("WS2811_INVERT") {
            builder.invert = parse(invert, parse_bool)?;
        }
        if let Some(channel) = var("WS2811_PWM_CHANNEL") {
            builder.channel = parse(channel, |v| {
                v.parse().ok().and_then(PwmChannel::from_index)
            })?;
        }
        if let Some(strip_type) = var("WS2811_STRIP_TYPE") {
            builder.strip_type = parse(strip_type, |v| v.parse().ok())?;
        }

        Ok(builder)
    }

    /// The signal frequency in Hz. Should never go below 400 kHz.
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// The DMA channel. Make sure it is not used by anything else.
    pub fn dma(mut self, dma: i32) -> Self {
        self.dma = dma;
        self
    }

    /// Whether the signal line is inverted.
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// The initial brightness, from 0 (off) to 255 (unscaled).
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// The driver channel slot the strip is attached to.
    pub fn channel(mut self, channel: PwmChannel) -> Self {
        self.channel = channel;
        self
    }

    /// The color order of the strip.
    pub fn strip_type(mut self, strip_type: StripType) -> Self {
        self.strip_type = strip_type;
        self
    }

    /// The driver configuration for these settings.
    ///
    /// Only the selected channel slot is populated.
    pub fn config(&self) -> ControllerConfig {
        let mut channels = [None; 2];
        channels[self.channel.index()] = Some(ChannelConfig {
            count: self.count,
            gpio: self.gpio,
            invert: self.invert,
            brightness: self.brightness,
            strip_type: self.strip_type,
        });

        ControllerConfig {
            frequency: self.frequency,
            dma: self.dma,
            channels,
        }
    }

    /// Initializes the driver and returns the strip.
    pub fn build<D: Driver>(self, driver: D) -> Result<Strip<D>, InitializationError> {
        Strip::init(driver, self.config(), self.channel)
    }
}

fn parse<T>(
    (variable, value): (&'static str, String),
    parser: impl FnOnce(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match parser(value.trim()) {
        Some(parsed) => Ok(parsed),
        None => InvalidValueSnafu { variable, value }.fail(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<StripBuilder, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StripBuilder::from_lookup(30, |variable| vars.get(variable).cloned())
    }

    #[test]
    fn defaults() {
        let config = StripBuilder::new(10, 18).config();

        assert_eq!(config.frequency, 800_000);
        assert_eq!(config.dma, 5);
        assert_eq!(config.channels[1], None);

        let channel = config.channel(PwmChannel::Pwm0).unwrap();
        assert_eq!(channel.count, 10);
        assert_eq!(channel.gpio, 18);
        assert!(!channel.invert);
        assert_eq!(channel.brightness, 255);
        assert_eq!(channel.strip_type, StripType::Rgb);
    }

    #[test]
    fn only_selected_slot_is_populated() {
        let config = StripBuilder::new(10, 13)
            .channel(PwmChannel::Pwm1)
            .invert(true)
            .config();

        assert_eq!(config.channels[0], None);
        assert!(config.channel(PwmChannel::Pwm1).unwrap().invert);
    }

    #[test]
    fn env_defaults() {
        assert_eq!(from_vars(&[]).unwrap(), StripBuilder::new(30, 18));
    }

    #[test]
    fn env_values() {
        let builder = from_vars(&[
            ("WS2811_GPIO_PIN_NUMBER", "13"),
            ("WS2811_FREQUENCY", "400000"),
            ("WS2811_DMA_CHANNEL_NUMBER", " 10 "),
            ("WS2811_BRIGHTNESS", "64"),
            ("WS2811_INVERT", "yes"),
            ("WS2811_PWM_CHANNEL", "1"),
            ("WS2811_STRIP_TYPE", "sk6812w"),
        ])
        .unwrap();

        let expected = StripBuilder::new(30, 13)
            .frequency(400_000)
            .dma(10)
            .brightness(64)
            .invert(true)
            .channel(PwmChannel::Pwm1)
            .strip_type(StripType::Grbw);
        assert_eq!(builder, expected);
    }

    #[test]
    fn env_invalid_values() {
        let err = from_vars(&[("WS2811_BRIGHTNESS", "300")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to parse environment variable WS2811_BRIGHTNESS: '300'"
        );

        assert!(from_vars(&[("WS2811_PWM_CHANNEL", "2")]).is_err());
        assert!(from_vars(&[("WS2811_INVERT", "maybe")]).is_err());
        assert!(from_vars(&[("WS2811_STRIP_TYPE", "apa102")]).is_err());
    }
}
