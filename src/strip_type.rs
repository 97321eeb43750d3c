use core::{fmt, str::FromStr};

use snafu::prelude::*;

/// The color order of the connected LED strip.
///
/// The raw values are the ones of the driver: one byte per channel,
/// holding the bit shift of that channel on the wire (`0xWWRRGGBB`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StripType {
    /// WS2811, red-green-blue.
    #[default]
    Rgb = 0x0010_0800,
    /// WS2811, red-blue-green.
    Rbg = 0x0010_0008,
    /// WS2811, green-red-blue. This is what most WS2812 strips use.
    Grb = 0x0008_1000,
    /// WS2811, green-blue-red.
    Gbr = 0x0008_0010,
    /// WS2811, blue-red-green.
    Brg = 0x0000_1008,
    /// WS2811, blue-green-red.
    Bgr = 0x0000_0810,
    /// SK6812, red-green-blue-white.
    Rgbw = 0x1810_0800,
    /// SK6812, red-blue-green-white.
    Rbgw = 0x1810_0008,
    /// SK6812, green-red-blue-white.
    Grbw = 0x1808_1000,
    /// SK6812, green-blue-red-white.
    Gbrw = 0x1808_0010,
    /// SK6812, blue-red-green-white.
    Brgw = 0x1800_1008,
    /// SK6812, blue-green-red-white.
    Bgrw = 0x1800_0810,
}

impl StripType {
    /// WS2812 strips are GRB encoded.
    pub const WS2812: Self = Self::Grb;
    /// SK6812 RGB strips are GRB encoded.
    pub const SK6812: Self = Self::Grb;
    /// SK6812 RGBW strips are GRBW encoded.
    pub const SK6812W: Self = Self::Grbw;

    const ALL: [Self; 12] = [
        Self::Rgb,
        Self::Rbg,
        Self::Grb,
        Self::Gbr,
        Self::Brg,
        Self::Bgr,
        Self::Rgbw,
        Self::Rbgw,
        Self::Grbw,
        Self::Gbrw,
        Self::Brgw,
        Self::Bgrw,
    ];

    /// The raw value the driver expects in `strip_type`.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Whether the strip has a dedicated white LED.
    pub const fn has_white(self) -> bool {
        (self.raw() >> 24) != 0
    }

    fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rbg => "rbg",
            Self::Grb => "grb",
            Self::Gbr => "gbr",
            Self::Brg => "brg",
            Self::Bgr => "bgr",
            Self::Rgbw => "rgbw",
            Self::Rbgw => "rbgw",
            Self::Grbw => "grbw",
            Self::Gbrw => "gbrw",
            Self::Brgw => "brgw",
            Self::Bgrw => "bgrw",
        }
    }
}

impl fmt::Display for StripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown strip type name.
#[derive(Debug, Snafu)]
#[snafu(display("unknown strip type '{name}'"))]
pub struct UnknownStripType {
    name: String,
}

impl FromStr for StripType {
    type Err = UnknownStripType;

    /// Accepts the color orders (`grb`, `rgbw`, ...) and the
    /// chip aliases `ws2812`, `sk6812` and `sk6812w`, case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let alias = match lower.as_str() {
            "ws2812" => Some(Self::WS2812),
            "sk6812" => Some(Self::SK6812),
            "sk6812w" => Some(Self::SK6812W),
            _ => None,
        };

        alias
            .or_else(|| Self::ALL.into_iter().find(|t| t.name() == lower))
            .context(UnknownStripTypeSnafu { name: s })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_detection() {
        assert!(!StripType::Rgb.has_white());
        assert!(!StripType::WS2812.has_white());
        assert!(StripType::SK6812W.has_white());
        assert!(StripType::Bgrw.has_white());
    }

    #[test]
    fn raw_values() {
        assert_eq!(StripType::Grb.raw(), 0x0008_1000);
        assert_eq!(StripType::SK6812W.raw(), 0x1808_1000);
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("GRB".parse::<StripType>().unwrap(), StripType::Grb);
        assert_eq!(" rgbw ".parse::<StripType>().unwrap(), StripType::Rgbw);
        assert_eq!("ws2812".parse::<StripType>().unwrap(), StripType::Grb);
        assert_eq!("sk6812w".parse::<StripType>().unwrap(), StripType::Grbw);
        assert!("apa102".parse::<StripType>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for t in StripType::ALL {
            assert_eq!(t.to_string().parse::<StripType>().unwrap(), t);
        }
    }
}
